use super::{
    EXTRA_TURNS, FULL_TURN, Guess, GuessError, MIN_TURNS, POINTER_ANGLE, SEGMENT_COUNT,
    SEGMENT_SPAN, Segment,
};
use rand::Rng;

/// Random components of a single spin, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub extra_spins: f64,
    pub offset: f64,
}

impl SpinPlan {
    pub fn new(extra_spins: f64, offset: f64) -> Self {
        Self {
            extra_spins,
            offset,
        }
    }

    /// At least `MIN_TURNS` full turns, up to `MIN_TURNS + EXTRA_TURNS`, plus a whole-degree offset.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let extra_spins = FULL_TURN * (MIN_TURNS + rng.random_range(0.0..EXTRA_TURNS));
        let offset = f64::from(rng.random_range(0..FULL_TURN as u16));
        Self::new(extra_spins, offset)
    }

    pub fn total(&self) -> f64 {
        self.extra_spins + self.offset
    }
}

/// A spin that was accepted and is now animating from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub guess: Guess,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinAttempt {
    Started(Spin),
    /// A spin is already running; the request is dropped.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub guess: Guess,
    pub winning_number: u8,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        self.guess.number() == self.winning_number
    }

    pub fn message(&self) -> String {
        if self.is_win() {
            format!(
                "🎉 JACKPOT! The number was {}. You win!",
                self.winning_number
            )
        } else {
            format!("Oops! It was {}. Try again!", self.winning_number)
        }
    }
}

/// Angle of the unrotated wheel that sits under the pointer after `rotation` degrees.
pub fn effective_angle(rotation: f64) -> f64 {
    let normalized = rotation.rem_euclid(FULL_TURN);
    (POINTER_ANGLE - normalized).rem_euclid(FULL_TURN)
}

/// Segment under the pointer for any accumulated rotation.
pub fn winning_segment(rotation: f64) -> Segment {
    // rem_euclid can round up to exactly FULL_TURN for tiny negative inputs
    let index =
        ((effective_angle(rotation) / SEGMENT_SPAN).floor() as usize).min(SEGMENT_COUNT - 1);
    Segment { index }
}

pub fn resolve(rotation: f64) -> u8 {
    winning_segment(rotation).number()
}

/// Accumulated rotation plus the spin gate. The gate holds the guess being spun for.
#[derive(Debug, Clone, Default)]
pub struct WheelGame {
    rotation: f64,
    pending: Option<Guess>,
}

impl WheelGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Validates `input` and starts a random spin. Busy wins over validation:
    /// while spinning, even garbage input is silently dropped.
    pub fn spin<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        rng: &mut R,
    ) -> Result<SpinAttempt, GuessError> {
        if self.is_spinning() {
            return Ok(SpinAttempt::Busy);
        }
        let guess = input.parse()?;
        Ok(self.start(guess, SpinPlan::random(rng)))
    }

    pub fn start(&mut self, guess: Guess, plan: SpinPlan) -> SpinAttempt {
        if self.is_spinning() {
            return SpinAttempt::Busy;
        }

        let from = self.rotation;
        self.rotation += plan.total();
        self.pending = Some(guess);

        log::debug!(
            "spin for {} from {:.1} to {:.1} deg",
            guess,
            from,
            self.rotation
        );

        SpinAttempt::Started(Spin {
            guess,
            from,
            to: self.rotation,
        })
    }

    /// Ends the running spin and reports the result. `None` when nothing was spinning.
    pub fn finish(&mut self) -> Option<Outcome> {
        let guess = self.pending.take()?;
        Some(Outcome {
            guess,
            winning_number: resolve(self.rotation),
        })
    }
}
