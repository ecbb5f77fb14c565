//! Word solving command
//!
//! Plays the engine against a known target and records the path it took.

use crate::core::{EngineError, FeedbackVector, Word};
use crate::dictionary::Trie;
use crate::solver::{EngineConfig, Session, SessionStatus};
use log::warn;

/// Configuration for solving a word
pub struct SolveConfig {
    pub target: String,
    pub first_guess: Option<Word>,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: String) -> Self {
        Self {
            target,
            first_guess: None,
        }
    }
}

/// Result of solving a word
pub struct SolveResult {
    pub success: bool,
    pub guesses: Vec<GuessStep>,
    pub target: String,
}

/// A single guess step in the solution
pub struct GuessStep {
    pub word: Word,
    pub feedback: FeedbackVector,
    /// Dictionary words consistent with the feedback before this guess
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Solve a specific target word
///
/// The target need not be in the dictionary, but the engine only ever guesses
/// dictionary words after the first round, so such a target cannot be found.
///
/// # Errors
///
/// Returns an error if the target has the wrong length or is not a word, or if
/// the engine cannot be constructed.
pub fn solve_word(
    trie: &Trie,
    engine_config: &EngineConfig,
    config: SolveConfig,
) -> Result<SolveResult, EngineError> {
    let target = Word::with_len(config.target.as_str(), engine_config.word_len)?;
    if !trie.contains(&target) {
        warn!("target '{target}' is not in the dictionary");
    }

    let mut session = match config.first_guess {
        Some(first) => Session::with_first_guess(trie, engine_config.clone(), first)?,
        None => Session::new(trie, engine_config.clone())?,
    };

    let mut guesses = Vec::new();
    let mut candidates_before = session.engine().consistent_words().len();

    while session.status() == SessionStatus::Guessing {
        let word = session.current_guess().clone();
        let feedback = FeedbackVector::score(&word, &target);
        session.submit(&feedback)?;

        let candidates_after = session.engine().consistent_words().len();
        guesses.push(GuessStep {
            word,
            feedback,
            candidates_before,
            candidates_after,
        });
        candidates_before = candidates_after;
    }

    Ok(SolveResult {
        success: session.status() == SessionStatus::Solved,
        guesses,
        target: config.target,
    })
}
