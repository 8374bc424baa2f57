use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::game::{Outcome, SpinAttempt, WheelGame};
use crate::gui::confetti::{self, ConfettiOverlay};
use crate::gui::theme::{self, ResultTone, ThemeColors};
use crate::gui::wheel::{self, WheelState};
use gtk::prelude::*;
use gtk4 as gtk;
use rand::rngs::StdRng;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub text: String,
    pub tone: ResultTone,
}

impl From<&Outcome> for ResultMessage {
    fn from(outcome: &Outcome) -> Self {
        Self {
            text: outcome.message(),
            tone: if outcome.is_win() {
                ResultTone::Win
            } else {
                ResultTone::Loss
            },
        }
    }
}

/// Pending spin resolution. Dropping it before it fires cancels the resolution.
pub struct SpinTimer(Option<glib::SourceId>);

impl SpinTimer {
    pub fn schedule(delay: Duration, sender: ComponentSender<AppModel>) -> Self {
        let id = glib::timeout_add_local_once(delay, move || {
            sender.input(AppMsg::SpinFinished);
        });
        Self(Some(id))
    }

    /// The source is gone once its callback has run; forget it instead of removing.
    fn fired(mut self) {
        self.0 = None;
    }
}

impl Drop for SpinTimer {
    fn drop(&mut self) {
        if let Some(id) = self.0.take() {
            id.remove();
        }
    }
}

pub struct AppModel {
    pub game: WheelGame,
    pub config: Config,
    pub rng: StdRng,
    pub result: Option<ResultMessage>,
    pub wheel: Rc<RefCell<WheelState>>,
    pub confetti: Rc<RefCell<ConfettiOverlay>>,
    spin_timer: Option<SpinTimer>,
    pub drawing_area: gtk::DrawingArea,
    pub confetti_area: gtk::DrawingArea,
    pub guess_entry: gtk::Entry,
}

#[derive(Debug)]
pub enum AppMsg {
    Spin,
    SpinFinished,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, StdRng, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Spin the Wheel"),
            set_default_size: (480, 640),

            #[name = "overlay"]
            gtk::Overlay {
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_margin_all: 24,

                    gtk::Label {
                        set_label: "Spin the Wheel",
                        add_css_class: "spinwheel-title",
                    },

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_content_width: 360,
                        set_content_height: 360,
                        set_hexpand: true,
                        set_vexpand: true,
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,
                        set_halign: gtk::Align::Center,

                        #[name = "guess_entry"]
                        gtk::Entry {
                            set_placeholder_text: Some("1-16"),
                            set_input_purpose: gtk::InputPurpose::Digits,
                            set_max_width_chars: 6,
                            connect_activate[sender] => move |_| {
                                sender.input(AppMsg::Spin);
                            },
                        },

                        gtk::Button {
                            set_label: "Spin",
                            #[watch]
                            set_sensitive: !model.game.is_spinning(),
                            connect_clicked[sender] => move |_| {
                                sender.input(AppMsg::Spin);
                            },
                        },
                    },

                    gtk::Label {
                        set_wrap: true,
                        #[watch]
                        set_label: model.result.as_ref().map_or("", |r| r.text.as_str()),
                        #[watch]
                        set_css_classes: &model.result_classes(),
                        #[watch]
                        set_opacity: if model.result.is_some() { 1.0 } else { 0.0 },
                    },
                },

                #[name = "confetti_area"]
                add_overlay = &gtk::DrawingArea {
                    set_can_target: false,
                    add_css_class: "confetti-area",
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rng, rx) = init;

        theme::load_css();

        let wheel = Rc::new(RefCell::new(WheelState::new(config.palette.clone())));
        let confetti = Rc::new(RefCell::new(ConfettiOverlay::new(
            &config.confetti,
            config.palette.clone(),
        )));

        let model = AppModel {
            game: WheelGame::new(),
            config,
            rng,
            result: None,
            wheel: wheel.clone(),
            confetti: confetti.clone(),
            spin_timer: None,
            drawing_area: gtk::DrawingArea::default(),
            confetti_area: gtk::DrawingArea::default(),
            guess_entry: gtk::Entry::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.confetti_area = widgets.confetti_area.clone();
        model.guess_entry = widgets.guess_entry.clone();

        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let mut wheel_state = wheel.borrow_mut();
                wheel_state.resize(width, height);
                let rotation = wheel_state.displayed_rotation(Instant::now());
                if let Err(e) = wheel::draw(cr, &wheel_state, rotation, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        widgets
            .confetti_area
            .set_draw_func(move |_, cr, width, height| {
                let overlay = confetti.borrow();
                if let Err(e) =
                    confetti::draw(cr, &overlay, width as f64, height as f64, Instant::now())
                {
                    log::error!("Confetti drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        widgets.guess_entry.grab_focus();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Spin => self.spin(sender),
            AppMsg::SpinFinished => self.finish_spin(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.wheel.borrow_mut().palette = new_config.palette.clone();
                    self.confetti
                        .borrow_mut()
                        .apply_config(&new_config.confetti, new_config.palette.clone());
                    self.config = new_config;
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn result_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["result"];
        classes.extend(self.result.as_ref().map(|r| r.tone.css_class()));
        classes
    }

    fn spin(&mut self, sender: ComponentSender<Self>) {
        let input = self.guess_entry.text();

        match self.game.spin(input.as_str(), &mut self.rng) {
            Ok(SpinAttempt::Busy) => log::debug!("Spin ignored, the wheel is already turning"),
            Ok(SpinAttempt::Started(spin)) => {
                let duration = self.config.spin.duration();
                log::info!(
                    "Spinning for {} over {:.1}s ({:.1} deg)",
                    spin.guess,
                    duration.as_secs_f64(),
                    spin.to - spin.from
                );

                self.result = None;
                self.wheel
                    .borrow_mut()
                    .animate(spin.from, spin.to, duration, Instant::now());

                let wheel_state = self.wheel.clone();
                self.drawing_area.add_tick_callback(move |area, _| {
                    area.queue_draw();
                    if wheel_state.borrow().is_animating() {
                        glib::ControlFlow::Continue
                    } else {
                        glib::ControlFlow::Break
                    }
                });

                self.spin_timer = Some(SpinTimer::schedule(duration, sender));
            }
            Err(e) => {
                log::warn!("Rejected guess: {}", e);
                self.result = Some(ResultMessage {
                    text: e.prompt(),
                    tone: ResultTone::Invalid,
                });
                self.guess_entry.grab_focus();
            }
        }
    }

    fn finish_spin(&mut self) {
        if let Some(timer) = self.spin_timer.take() {
            timer.fired();
        }

        let Some(outcome) = self.game.finish() else {
            return;
        };

        log::info!(
            "Wheel stopped on {} (guess {})",
            outcome.winning_number,
            outcome.guess
        );
        self.result = Some(ResultMessage::from(&outcome));

        if outcome.is_win() {
            self.celebrate();
        }
    }

    fn celebrate(&mut self) {
        let mut overlay = self.confetti.borrow_mut();
        overlay.celebrate(&mut self.rng, Instant::now());

        if overlay.start_ticking() {
            let overlay_state = self.confetti.clone();
            self.confetti_area.add_tick_callback(move |area, _| {
                area.queue_draw();
                if overlay_state.borrow_mut().tick(Instant::now()) {
                    glib::ControlFlow::Continue
                } else {
                    glib::ControlFlow::Break
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Guess;

    #[test]
    fn test_result_message_from_outcome() {
        let win = Outcome {
            guess: Guess::new(13).unwrap(),
            winning_number: 13,
        };
        let loss = Outcome {
            guess: Guess::new(4).unwrap(),
            winning_number: 9,
        };

        assert_eq!(ResultMessage::from(&win).tone, ResultTone::Win);
        assert_eq!(
            ResultMessage::from(&loss),
            ResultMessage {
                text: "Oops! It was 9. Try again!".to_string(),
                tone: ResultTone::Loss,
            }
        );
    }
}
