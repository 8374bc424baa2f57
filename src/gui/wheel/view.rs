use super::model::{SegmentGeometry, WheelState};
use super::{HUB_RADIUS, LABEL_FONT_SIZE, POINTER_HALF_WIDTH, POINTER_LENGTH, STROKE_WIDTH};
use crate::config::Palette;
use crate::game::POINTER_ANGLE;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use std::f64::consts::PI;

struct SegmentRenderer<'a> {
    geometry: &'a SegmentGeometry,
    palette: &'a Palette,
}

impl<'a> SegmentRenderer<'a> {
    fn new(geometry: &'a SegmentGeometry, palette: &'a Palette) -> Self {
        Self { geometry, palette }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_wedge(cr, colors)?;
        self.draw_label(cr, colors)
    }

    fn draw_wedge(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let g = self.geometry;
        let color = self
            .palette
            .get(g.segment.color_index(self.palette.len()));
        let (r, gr, b) = color.to_f64();

        cr.move_to(g.center.x, g.center.y);
        cr.line_to(g.arc_start.x, g.arc_start.y);
        cr.arc(
            g.center.x,
            g.center.y,
            g.radius,
            g.segment.start_angle().to_radians(),
            g.segment.end_angle().to_radians(),
        );
        cr.close_path();

        cr.set_source_rgb(r, gr, b);
        cr.fill_preserve()?;

        let (r, gr, b, a) = colors.stroke.into_components();
        cr.set_source_rgba(r, gr, b, a);
        cr.set_line_width(STROKE_WIDTH * g.scale);
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let g = self.geometry;
        let text = g.segment.number().to_string();

        cr.save()?;
        cr.translate(g.label.x, g.label.y);
        cr.rotate(g.label_rotation.to_radians());

        let (r, gr, b, a) = colors.label.into_components();
        cr.set_source_rgba(r, gr, b, a);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE * g.scale);
        if let Ok(ext) = cr.text_extents(&text) {
            // center on the anchor
            cr.move_to(
                -(ext.x_bearing() + ext.width() / 2.0),
                -(ext.y_bearing() + ext.height() / 2.0),
            );
            cr.show_text(&text)?;
        }
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    state: &WheelState,
    rotation: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    // the whole wheel turns as one unit around its center
    cr.translate(state.center.x, state.center.y);
    cr.rotate(rotation.to_radians());
    cr.translate(-state.center.x, -state.center.y);

    for geometry in &state.segment_geometries {
        SegmentRenderer::new(geometry, &state.palette).draw(cr, colors)?;
    }
    draw_hub(cr, state, colors)?;
    cr.restore()?;

    draw_pointer(cr, state, colors)
}

fn draw_hub(cr: &Context, state: &WheelState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.hub.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(
        state.center.x,
        state.center.y,
        HUB_RADIUS * state.scale,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}

/// Fixed triangle over the rim, tip pointing at the wheel.
fn draw_pointer(
    cr: &Context,
    state: &WheelState,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let radius = state
        .segment_geometries
        .first()
        .map(|g| g.radius)
        .unwrap_or_default();
    let tip = state.center.polar(radius - POINTER_LENGTH * 0.5 * state.scale, POINTER_ANGLE);
    let base = state.center.polar(
        radius + POINTER_LENGTH * 0.5 * state.scale,
        POINTER_ANGLE,
    );
    let half = POINTER_HALF_WIDTH * state.scale;

    cr.move_to(tip.x, tip.y);
    cr.line_to(base.x - half, base.y);
    cr.line_to(base.x + half, base.y);
    cr.close_path();

    let (r, g, b, a) = colors.pointer.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.fill_preserve()?;

    let (r, g, b, a) = colors.stroke.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(STROKE_WIDTH * state.scale);
    cr.stroke()
}
