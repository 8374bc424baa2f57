use crate::config::{ConfettiConfig, Palette};
use crate::game::Confetti;
use cairo::Context;
use rand::Rng;
use std::time::Instant;

pub const PIECE_SIZE: f64 = 10.0;
pub const PIECE_TURNS: f64 = 2.0; // full turns while falling

/// Confetti plus what the overlay needs to draw and tick it.
pub struct ConfettiOverlay {
    pub confetti: Confetti,
    pub palette: Palette,
    pub count: usize,
    ticking: bool,
}

impl ConfettiOverlay {
    pub fn new(config: &ConfettiConfig, palette: Palette) -> Self {
        Self {
            confetti: Confetti::new(config.lifetime()),
            palette,
            count: config.count,
            ticking: false,
        }
    }

    pub fn apply_config(&mut self, config: &ConfettiConfig, palette: Palette) {
        self.confetti.set_lifetime(config.lifetime());
        self.count = config.count;
        self.palette = palette;
    }

    pub fn celebrate<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        self.confetti
            .burst(self.count, self.palette.len(), rng, now);
        log::debug!("confetti: {} pieces live", self.confetti.pieces().len());
    }

    /// Claims the frame tick. Returns false if a tick callback is already running.
    pub fn start_ticking(&mut self) -> bool {
        !std::mem::replace(&mut self.ticking, true)
    }

    /// Prunes expired pieces; clears the tick claim once nothing is left.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.confetti.prune(now);
        self.ticking = !self.confetti.is_empty();
        self.ticking
    }
}

pub fn draw(
    cr: &Context,
    overlay: &ConfettiOverlay,
    width: f64,
    height: f64,
    now: Instant,
) -> Result<(), cairo::Error> {
    for piece in overlay.confetti.pieces() {
        let progress = piece.progress(now);
        let x = piece.left * width;
        let y = -PIECE_SIZE + progress * (height + PIECE_SIZE);
        let (r, g, b) = overlay.palette.get(piece.color_index).to_f64();

        cr.save()?;
        cr.translate(x + PIECE_SIZE / 2.0, y + PIECE_SIZE / 2.0);
        cr.rotate(progress * PIECE_TURNS * std::f64::consts::TAU);
        cr.rectangle(
            -PIECE_SIZE / 2.0,
            -PIECE_SIZE / 2.0,
            PIECE_SIZE,
            PIECE_SIZE,
        );
        cr.set_source_rgb(r, g, b);
        cr.fill()?;
        cr.restore()?;
    }
    Ok(())
}
