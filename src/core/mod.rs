//! Core domain types
//!
//! Words, feedback vectors, the word predicate capability and the engine
//! error taxonomy. Nothing in here knows about tries, permutations or sessions.

mod error;
mod feedback;
mod predicate;
mod word;

pub use error::EngineError;
pub use feedback::{Feedback, FeedbackError, FeedbackVector};
pub use predicate::{AcceptAll, Predicate};
pub use word::{ALPHABET_LEN, MAX_WORD_LEN, Word, WordError, index_letter, letter_index};
