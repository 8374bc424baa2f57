use rand::Rng;
use std::ops::Range;
use std::time::{Duration, Instant};

pub const FALL_DURATION: Range<Duration> = Duration::from_secs(2)..Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal position as a fraction of the viewport width, in `[0, 1)`.
    pub left: f64,
    pub fall_duration: Duration,
    pub color_index: usize,
    pub spawned_at: Instant,
}

impl ConfettiPiece {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, palette_len: usize, now: Instant) -> Self {
        let fall_secs =
            rng.random_range(FALL_DURATION.start.as_secs_f64()..FALL_DURATION.end.as_secs_f64());
        Self {
            left: rng.random_range(0.0..1.0),
            fall_duration: Duration::from_secs_f64(fall_secs),
            color_index: rng.random_range(0..palette_len.max(1)),
            spawned_at: now,
        }
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.spawned_at)
    }

    /// Fall progress in `[0, 1]`; stays at 1 until the piece is pruned.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.fall_duration.is_zero() {
            return 1.0;
        }
        (self.age(now).as_secs_f64() / self.fall_duration.as_secs_f64()).min(1.0)
    }
}

/// Live celebration particles. Each piece is dropped `lifetime` after it spawned,
/// independent of how long its fall takes.
#[derive(Debug, Clone)]
pub struct Confetti {
    pieces: Vec<ConfettiPiece>,
    lifetime: Duration,
}

impl Confetti {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            pieces: Vec::new(),
            lifetime,
        }
    }

    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        palette_len: usize,
        rng: &mut R,
        now: Instant,
    ) {
        self.pieces
            .extend((0..count).map(|_| ConfettiPiece::random(rng, palette_len, now)));
    }

    /// Removes expired pieces. Returns whether anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.pieces.len();
        let lifetime = self.lifetime;
        self.pieces.retain(|p| p.age(now) < lifetime);
        self.pieces.len() != before
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn set_lifetime(&mut self, lifetime: Duration) {
        self.lifetime = lifetime;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_burst_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut confetti = Confetti::new(Duration::from_secs(5));
        let now = Instant::now();

        confetti.burst(50, 16, &mut rng, now);

        assert_eq!(confetti.pieces().len(), 50);
        for piece in confetti.pieces() {
            assert!((0.0..1.0).contains(&piece.left));
            assert!(FALL_DURATION.contains(&piece.fall_duration));
            assert!(piece.color_index < 16);
            assert_eq!(piece.spawned_at, now);
        }
    }

    #[test]
    fn test_pieces_expire_after_lifetime() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut confetti = Confetti::new(Duration::from_secs(5));
        let start = Instant::now();

        confetti.burst(10, 4, &mut rng, start);
        confetti.burst(5, 4, &mut rng, start + Duration::from_secs(3));

        // every first-wave piece has finished falling but is still alive
        assert!(!confetti.prune(start + Duration::from_millis(4_500)));
        assert_eq!(confetti.pieces().len(), 15);

        assert!(confetti.prune(start + Duration::from_secs(5)));
        assert_eq!(confetti.pieces().len(), 5);

        assert!(confetti.prune(start + Duration::from_secs(8)));
        assert!(confetti.is_empty());
    }

    #[test]
    fn test_progress_clamps() {
        let now = Instant::now();
        let piece = ConfettiPiece {
            left: 0.5,
            fall_duration: Duration::from_secs(2),
            color_index: 0,
            spawned_at: now,
        };

        assert_eq!(piece.progress(now), 0.0);
        assert_eq!(piece.progress(now + Duration::from_secs(1)), 0.5);
        assert_eq!(piece.progress(now + Duration::from_secs(4)), 1.0);
    }
}
