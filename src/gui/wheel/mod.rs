pub mod model;
pub mod view;

pub use model::{Point, SegmentGeometry, SpinAnimation, WheelState};
pub use view::draw;

// Geometry is laid out in a VIEWBOX_SIZE square and scaled to the drawing area.
pub const VIEWBOX_SIZE: f64 = 200.0;
pub const WHEEL_RADIUS: f64 = 95.0;
pub const LABEL_RADIUS: f64 = 75.0; // slightly closer to the hub than the rim
pub const LABEL_FONT_SIZE: f64 = 10.0;
pub const STROKE_WIDTH: f64 = 1.0;
pub const HUB_RADIUS: f64 = 8.0;
pub const POINTER_HALF_WIDTH: f64 = 7.0;
pub const POINTER_LENGTH: f64 = 14.0;
