//! Per-letter feedback and feedback vectors
//!
//! Each position of a guess is answered with one of three values:
//! - 0 = Mismatch (letter not in the word at its known multiplicity)
//! - 1 = Position mismatch (letter in the word, wrong position)
//! - 2 = Match (letter locked in place)

use super::Word;
use super::word::{ALPHABET_LEN, letter_index};
use std::fmt;

/// Feedback for a single position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Mismatch,
    PositionMismatch,
    Match,
}

/// Error type for malformed feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    Length { expected: usize, got: usize },
    InvalidValue(String),
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, got } => {
                write!(f, "Feedback must have {expected} entries, got {got}")
            }
            Self::InvalidValue(value) => write!(
                f,
                "Invalid feedback value '{value}'. Allowed: 0/1/2, X/Y/G, -/_ or ⬜🟨🟩"
            ),
        }
    }
}

impl std::error::Error for FeedbackError {}

impl Feedback {
    /// Convert the numeric form used by the interactive prompt
    ///
    /// # Errors
    /// Returns `FeedbackError::InvalidValue` for anything outside 0..=2.
    pub fn from_digit(value: u8) -> Result<Self, FeedbackError> {
        match value {
            0 => Ok(Self::Mismatch),
            1 => Ok(Self::PositionMismatch),
            2 => Ok(Self::Match),
            other => Err(FeedbackError::InvalidValue(other.to_string())),
        }
    }

    /// Convert a single character
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' | 'X' | 'x' | '-' | '_' | '⬜' | '⬛' => Some(Self::Mismatch),
            '1' | 'Y' | 'y' | '🟨' => Some(Self::PositionMismatch),
            '2' | 'G' | 'g' | '🟩' => Some(Self::Match),
            _ => None,
        }
    }

    /// Numeric form (0/1/2)
    #[must_use]
    pub const fn digit(self) -> u8 {
        match self {
            Self::Mismatch => 0,
            Self::PositionMismatch => 1,
            Self::Match => 2,
        }
    }

    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Mismatch => '⬜',
            Self::PositionMismatch => '🟨',
            Self::Match => '🟩',
        }
    }
}

/// Feedback for a whole guess
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedbackVector(Vec<Feedback>);

impl FeedbackVector {
    #[must_use]
    pub const fn new(entries: Vec<Feedback>) -> Self {
        Self(entries)
    }

    /// Build from the numeric form, validating length and range
    ///
    /// # Errors
    /// Returns `FeedbackError` on a length mismatch or a value outside 0..=2.
    pub fn from_digits(digits: &[u8], word_len: usize) -> Result<Self, FeedbackError> {
        if digits.len() != word_len {
            return Err(FeedbackError::Length {
                expected: word_len,
                got: digits.len(),
            });
        }

        digits
            .iter()
            .map(|&d| Feedback::from_digit(d))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Parse user input such as `"2 2 0 2 2"`, `"22022"`, `"GG-GG"` or `"🟩🟩⬜🟩🟩"`
    ///
    /// Whitespace and commas between entries are ignored.
    ///
    /// # Errors
    /// Returns `FeedbackError` on an unknown character or a length mismatch.
    ///
    /// # Examples
    /// ```
    /// use wordle_adaptive::core::{Feedback, FeedbackVector};
    ///
    /// let a = FeedbackVector::parse("2 1 0 2 2", 5).unwrap();
    /// let b = FeedbackVector::parse("gy-gg", 5).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_slice()[1], Feedback::PositionMismatch);
    /// ```
    pub fn parse(input: &str, word_len: usize) -> Result<Self, FeedbackError> {
        let entries = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Feedback::from_char(c).ok_or_else(|| FeedbackError::InvalidValue(c.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        if entries.len() != word_len {
            return Err(FeedbackError::Length {
                expected: word_len,
                got: entries.len(),
            });
        }

        Ok(Self(entries))
    }

    /// All positions matched
    #[must_use]
    pub fn solved(word_len: usize) -> Self {
        Self(vec![Feedback::Match; word_len])
    }

    /// Score `guess` against a known `secret` using the standard rules
    ///
    /// Matches are assigned first and consume the secret's letters; position
    /// mismatches are then assigned left to right from what remains.
    ///
    /// # Examples
    /// ```
    /// use wordle_adaptive::core::{FeedbackVector, Word};
    ///
    /// let guess = Word::new("speed").unwrap();
    /// let secret = Word::new("abide").unwrap();
    /// let fb = FeedbackVector::score(&guess, &secret);
    /// assert_eq!(fb.to_string(), "00101");
    /// ```
    ///
    /// # Panics
    /// Panics if the two words differ in length.
    #[must_use]
    pub fn score(guess: &Word, secret: &Word) -> Self {
        assert_eq!(guess.len(), secret.len(), "guess and secret lengths differ");

        let mut result = vec![Feedback::Mismatch; guess.len()];
        let mut available = [0u8; ALPHABET_LEN];

        for (i, (&g, &s)) in guess.as_bytes().iter().zip(secret.as_bytes()).enumerate() {
            if g == s {
                result[i] = Feedback::Match;
            } else {
                available[letter_index(s)] += 1;
            }
        }

        for (i, &g) in guess.as_bytes().iter().enumerate() {
            if result[i] == Feedback::Match {
                continue;
            }
            let slot = &mut available[letter_index(g)];
            if *slot > 0 {
                result[i] = Feedback::PositionMismatch;
                *slot -= 1;
            }
        }

        Self(result)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Feedback] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every position matched
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&f| f == Feedback::Match)
    }

    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|f| f.emoji()).collect()
    }
}

impl fmt::Display for FeedbackVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.0 {
            write!(f, "{}", entry.digit())?;
        }
        Ok(())
    }
}
