use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use strum::IntoStaticStr;

pub struct ThemeColors {
    pub stroke: Srgba<f64>,
    pub label: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub hub: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            stroke: Srgba::new(1.0, 1.0, 1.0, 1.0),
            label: Srgba::new(1.0, 1.0, 1.0, 1.0),
            pointer: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.25, 0.33, 1.0),
                Some(1.0),
            ),
            hub: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.97, 0.98, 0.99, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Styling of the result line; the string form is the CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum ResultTone {
    #[strum(serialize = "result-invalid")]
    Invalid,
    #[strum(serialize = "result-win")]
    Win,
    #[strum(serialize = "result-loss")]
    Loss,
}

impl ResultTone {
    pub fn css_class(self) -> &'static str {
        self.into()
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.spinwheel-title {
    font-size: 20px;
    font-weight: bold;
}
.result {
    font-size: 16px;
    font-weight: bold;
}
.result-invalid {
    color: #EF4444;
}
.result-win {
    color: #16A34A;
}
.result-loss {
    color: #334155;
}
.confetti-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_css_classes() {
        assert_eq!(ResultTone::Invalid.css_class(), "result-invalid");
        assert_eq!(ResultTone::Win.css_class(), "result-win");
        assert_eq!(ResultTone::Loss.css_class(), "result-loss");
    }
}
