pub mod confetti;
pub mod guess;
pub mod segment;
pub mod wheel;

pub use confetti::{Confetti, ConfettiPiece};
pub use guess::{Guess, GuessError};
pub use segment::Segment;
pub use wheel::{Outcome, Spin, SpinAttempt, SpinPlan, WheelGame, resolve};

pub const SEGMENT_COUNT: usize = 16;
pub const FULL_TURN: f64 = 360.0;
pub const SEGMENT_SPAN: f64 = FULL_TURN / SEGMENT_COUNT as f64;
pub const POINTER_ANGLE: f64 = 270.0; // top of the wheel, 0 deg = right, clockwise
pub const MIN_TURNS: f64 = 3.0;
pub const EXTRA_TURNS: f64 = 2.0; // random part of a spin, in [0, EXTRA_TURNS) turns
