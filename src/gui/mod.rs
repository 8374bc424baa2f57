pub mod app;
pub mod confetti;
pub mod theme;
pub mod wheel;
