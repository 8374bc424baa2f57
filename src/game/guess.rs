use super::SEGMENT_COUNT;
use derive_more::{Deref, Display, Into};
use std::str::FromStr;
use thiserror::Error;

/// A validated guess, always within `1..=SEGMENT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deref, Into)]
pub struct Guess(u8);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("no guess entered")]
    Missing,
    #[error("guess '{0}' is not a whole number")]
    NotANumber(String),
    #[error("guess {0} is outside 1..={max}", max = SEGMENT_COUNT)]
    OutOfRange(i64),
}

impl GuessError {
    /// Message shown to the player, whatever went wrong.
    pub fn prompt(&self) -> String {
        format!("Please enter a number between 1 and {SEGMENT_COUNT}!")
    }
}

impl Guess {
    pub fn new(number: u8) -> Option<Self> {
        (1..=SEGMENT_COUNT as u8).contains(&number).then_some(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl FromStr for Guess {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GuessError::Missing);
        }

        let value: i64 = s
            .parse()
            .map_err(|_| GuessError::NotANumber(s.to_string()))?;

        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(GuessError::OutOfRange(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bounds() {
        assert_eq!("1".parse::<Guess>().map(|g| g.number()), Ok(1));
        assert_eq!("16".parse::<Guess>().map(|g| g.number()), Ok(16));
        assert_eq!(" 7 \n".parse::<Guess>().map(|g| g.number()), Ok(7));
    }

    #[test]
    fn test_rejects_invalid_input() {
        let cases = vec![
            ("0", GuessError::OutOfRange(0)),
            ("17", GuessError::OutOfRange(17)),
            ("-3", GuessError::OutOfRange(-3)),
            ("300", GuessError::OutOfRange(300)),
            ("abc", GuessError::NotANumber("abc".to_string())),
            ("4.5", GuessError::NotANumber("4.5".to_string())),
            ("", GuessError::Missing),
            ("   ", GuessError::Missing),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<Guess>(), Err(expected), "input {input:?}");
        }
    }

    #[test]
    fn test_prompt_is_shared() {
        assert_eq!(
            GuessError::Missing.prompt(),
            "Please enter a number between 1 and 16!"
        );
        assert_eq!(
            GuessError::OutOfRange(40).prompt(),
            GuessError::NotANumber("x".into()).prompt()
        );
    }
}
