//! Engine configuration

use crate::core::{EngineError, MAX_WORD_LEN};

/// Parameters consumed by the guess engine and session controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Letters per word
    pub word_len: usize,
    /// Guesses allowed per session
    pub max_attempts: usize,
    /// Dictionary hits collected per permutation search before sampling one
    pub result_limit: usize,
    /// Failures tolerated for one exact shuffled buffer
    pub retry_limit: usize,
    /// Safety cap on empty-slot refills per round
    pub shuffle_limit: usize,
    /// Permutations checked per round before it is abandoned
    pub search_budget: usize,
    /// Frequency-letter shuffles tried for the seed guess
    pub seed_attempts: usize,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl EngineConfig {
    #[must_use]
    pub const fn new(word_len: usize) -> Self {
        Self {
            word_len,
            max_attempts: 6,
            result_limit: 5,
            retry_limit: 10,
            shuffle_limit: 100_000,
            search_budget: 12_000_000,
            seed_attempts: 64,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Check the word length bound
    ///
    /// # Errors
    /// Returns `EngineError::InvalidWordLength` outside `1..=MAX_WORD_LEN`.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.word_len == 0 || self.word_len > MAX_WORD_LEN {
            return Err(EngineError::InvalidWordLength(self.word_len));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(5)
    }
}
