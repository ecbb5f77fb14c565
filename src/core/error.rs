//! Errors surfaced by the guess engine and session controller

use super::{FeedbackError, WordError};
use std::fmt;

/// Error type for engine construction and round advancement
///
/// Combinatorial search failures inside a round are retried locally; only
/// these conditions reach the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Feedback vector has the wrong length or an unknown element
    InvalidFeedback(FeedbackError),
    /// No candidate satisfies the accumulated constraints
    EngineExhausted,
    /// No dictionary words of the requested length
    DictionaryEmpty { word_len: usize },
    /// Word length outside `1..=MAX_WORD_LEN`
    InvalidWordLength(usize),
    /// A caller-supplied word (forced guess, target) is malformed
    InvalidWord(WordError),
    /// Feedback submitted after the session was solved or exhausted
    SessionFinished,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFeedback(e) => write!(f, "Invalid feedback: {e}"),
            Self::EngineExhausted => write!(f, "No candidate satisfies the feedback so far"),
            Self::DictionaryEmpty { word_len } => {
                write!(f, "Dictionary has no words of length {word_len}")
            }
            Self::InvalidWordLength(len) => write!(
                f,
                "Word length must be between 1 and {}, got {len}",
                super::MAX_WORD_LEN
            ),
            Self::InvalidWord(e) => write!(f, "Invalid word: {e}"),
            Self::SessionFinished => write!(f, "Session already finished"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidFeedback(e) => Some(e),
            Self::InvalidWord(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FeedbackError> for EngineError {
    fn from(e: FeedbackError) -> Self {
        Self::InvalidFeedback(e)
    }
}

impl From<WordError> for EngineError {
    fn from(e: WordError) -> Self {
        Self::InvalidWord(e)
    }
}
