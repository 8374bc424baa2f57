use crate::config::Palette;
use crate::game::Segment;
use crate::gui::wheel::{LABEL_RADIUS, VIEWBOX_SIZE, WHEEL_RADIUS};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point `radius` away from `self` at `degrees` (0 = right, clockwise on screen).
    pub fn polar(self, radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }
}

/// Screen geometry of one wedge in the wheel's unrotated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry {
    pub segment: Segment,
    pub center: Point,
    pub radius: f64,
    pub arc_start: Point,
    pub arc_end: Point,
    pub label: Point,
    /// Label rotation in degrees, keeps the number upright along the wedge.
    pub label_rotation: f64,
    pub scale: f64,
}

impl SegmentGeometry {
    pub fn calculate(segment: Segment, center: Point, scale: f64) -> Self {
        let radius = WHEEL_RADIUS * scale;
        let mid = segment.mid_angle();

        Self {
            segment,
            center,
            radius,
            arc_start: center.polar(radius, segment.start_angle()),
            arc_end: center.polar(radius, segment.end_angle()),
            label: center.polar(LABEL_RADIUS * scale, mid),
            label_rotation: mid + 90.0,
            scale,
        }
    }

    pub fn layout(center: Point, scale: f64) -> Vec<Self> {
        Segment::all()
            .map(|segment| Self::calculate(segment, center, scale))
            .collect()
    }
}

pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    pub from: f64,
    pub to: f64,
    pub started_at: Instant,
    pub duration: Duration,
}

impl SpinAnimation {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    pub fn angle_at(&self, now: Instant) -> f64 {
        self.from + (self.to - self.from) * ease_out(self.progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

pub struct WheelState {
    pub center: Point,
    pub scale: f64,
    pub palette: Palette,
    pub rotation: f64,
    pub animation: Option<SpinAnimation>,
    pub segment_geometries: Vec<SegmentGeometry>,
    size: (i32, i32),
}

impl WheelState {
    pub fn new(palette: Palette) -> Self {
        let mut state = Self {
            center: Point::new(VIEWBOX_SIZE / 2.0, VIEWBOX_SIZE / 2.0),
            scale: 1.0,
            palette,
            rotation: 0.0,
            animation: None,
            segment_geometries: Vec::new(),
            size: (VIEWBOX_SIZE as i32, VIEWBOX_SIZE as i32),
        };
        state.recalculate_geometries();
        state
    }

    /// Fits the wheel into a `width` x `height` area. No-op when the size is unchanged.
    pub fn resize(&mut self, width: i32, height: i32) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        self.center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
        self.scale = width.min(height).max(0) as f64 / VIEWBOX_SIZE;
        self.recalculate_geometries();
    }

    fn recalculate_geometries(&mut self) {
        self.segment_geometries = SegmentGeometry::layout(self.center, self.scale);
    }

    pub fn animate(&mut self, from: f64, to: f64, duration: Duration, now: Instant) {
        self.rotation = from;
        self.animation = Some(SpinAnimation {
            from,
            to,
            started_at: now,
            duration,
        });
    }

    /// Rotation to draw at `now`; settles the animation once it is done.
    pub fn displayed_rotation(&mut self, now: Instant) -> f64 {
        if let Some(animation) = self.animation {
            if animation.is_finished(now) {
                self.rotation = animation.to;
                self.animation = None;
            } else {
                return animation.angle_at(now);
            }
        }
        self.rotation
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SEGMENT_COUNT;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_layout_matches_viewbox() {
        let center = Point::new(100.0, 100.0);
        let layout = SegmentGeometry::layout(center, 1.0);
        assert_eq!(layout.len(), SEGMENT_COUNT);

        // first wedge starts at 3 o'clock and turns clockwise (y grows downward)
        assert_close(layout[0].arc_start, Point::new(195.0, 100.0));
        assert!(layout[0].arc_end.y > 100.0);

        // segment 13 starts at the top, under the pointer
        assert_close(layout[12].arc_start, Point::new(100.0, 5.0));
    }

    #[test]
    fn test_wedges_share_edges() {
        let layout = SegmentGeometry::layout(Point::new(50.0, 80.0), 2.0);
        for i in 0..SEGMENT_COUNT {
            let next = &layout[(i + 1) % SEGMENT_COUNT];
            assert_close(layout[i].arc_end, next.arc_start);
        }
    }

    #[test]
    fn test_labels_sit_at_midpoint() {
        let center = Point::new(100.0, 100.0);
        for geometry in SegmentGeometry::layout(center, 1.0) {
            let (dx, dy) = (geometry.label.x - center.x, geometry.label.y - center.y);
            assert!((dx.hypot(dy) - LABEL_RADIUS).abs() < 1e-9);

            let mid = geometry.segment.mid_angle();
            assert_close(geometry.label, center.polar(LABEL_RADIUS, mid));
            assert_eq!(geometry.label_rotation, mid + 90.0);
        }
    }

    #[test]
    fn test_resize_scales_and_centers() {
        let mut state = WheelState::new(Palette::default());
        state.resize(400, 600);

        assert_eq!(state.scale, 2.0);
        assert_eq!(state.center, Point::new(200.0, 300.0));
        assert_eq!(state.segment_geometries[0].radius, WHEEL_RADIUS * 2.0);
    }

    #[test]
    fn test_animation_endpoints() {
        let start = Instant::now();
        let duration = Duration::from_secs(4);
        let mut state = WheelState::new(Palette::default());

        state.animate(90.0, 1530.0, duration, start);
        assert_eq!(state.displayed_rotation(start), 90.0);

        let mut last = 90.0;
        for ms in (250..4000).step_by(250) {
            let angle = state.displayed_rotation(start + Duration::from_millis(ms));
            assert!(angle >= last && angle < 1530.0);
            last = angle;
        }
        assert!(state.is_animating());

        assert_eq!(state.displayed_rotation(start + duration), 1530.0);
        assert!(!state.is_animating());
        assert_eq!(state.rotation, 1530.0);
    }

    #[test]
    fn test_ease_out_shape() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(2.0), 1.0);
        // fast start, slow finish
        assert!(ease_out(0.5) > 0.5);
    }
}
