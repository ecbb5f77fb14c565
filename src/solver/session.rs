//! Session controller
//!
//! Drives one puzzle from the seed guess to a solution or exhaustion. The
//! engine picks the guesses; the session counts attempts and records history.

use super::config::EngineConfig;
use super::engine::{Advance, GuessEngine};
use crate::core::{EngineError, FeedbackVector, Word, WordError};
use crate::dictionary::Trie;
use log::{debug, info};

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for feedback on the current guess
    Guessing,
    /// Every position matched
    Solved,
    /// Attempt budget spent or no candidate left
    Exhausted,
}

impl SessionStatus {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Guessing)
    }
}

/// One puzzle in progress
pub struct Session<'t> {
    engine: GuessEngine<'t>,
    max_attempts: usize,
    attempts: usize,
    status: SessionStatus,
    history: Vec<(Word, FeedbackVector)>,
}

impl<'t> Session<'t> {
    /// Start a session with an engine-chosen seed guess
    ///
    /// # Errors
    /// Propagates engine construction errors.
    ///
    /// # Examples
    /// ```
    /// use wordle_adaptive::core::{FeedbackVector, Word};
    /// use wordle_adaptive::dictionary::{Trie, loader::words_from_slice};
    /// use wordle_adaptive::solver::{EngineConfig, Session, SessionStatus};
    ///
    /// let trie = Trie::from_words(&words_from_slice(&["apple", "angle"], 5));
    /// let mut session = Session::new(&trie, EngineConfig::new(5).with_seed(3)).unwrap();
    /// let guess = session.current_guess().clone();
    ///
    /// session.submit(&FeedbackVector::solved(5)).unwrap();
    /// assert_eq!(session.status(), SessionStatus::Solved);
    /// assert_eq!(session.solution(), Some(&guess));
    /// ```
    pub fn new(trie: &'t Trie, config: EngineConfig) -> Result<Self, EngineError> {
        let max_attempts = config.max_attempts;
        Ok(Self::from_engine(GuessEngine::new(trie, config)?, max_attempts))
    }

    /// Start a session that opens with `first`
    ///
    /// # Errors
    /// Propagates engine construction errors.
    pub fn with_first_guess(
        trie: &'t Trie,
        config: EngineConfig,
        first: Word,
    ) -> Result<Self, EngineError> {
        let max_attempts = config.max_attempts;
        Ok(Self::from_engine(
            GuessEngine::with_first_guess(trie, config, first)?,
            max_attempts,
        ))
    }

    fn from_engine(engine: GuessEngine<'t>, max_attempts: usize) -> Self {
        Self {
            engine,
            max_attempts,
            attempts: 1,
            status: SessionStatus::Guessing,
            history: Vec::new(),
        }
    }

    /// Feed back the score of the current guess
    ///
    /// Engine exhaustion ends the session as `Exhausted` rather than erroring.
    ///
    /// # Errors
    /// `SessionFinished` once solved or exhausted, `InvalidFeedback` for a
    /// malformed vector. Neither changes the session.
    pub fn submit(&mut self, feedback: &FeedbackVector) -> Result<SessionStatus, EngineError> {
        if self.status.is_finished() {
            return Err(EngineError::SessionFinished);
        }
        self.engine.validate(feedback)?;
        self.history
            .push((self.engine.current_guess().clone(), feedback.clone()));

        if feedback.is_solved() {
            info!("solved in {} attempts", self.attempts);
            self.status = SessionStatus::Solved;
            return Ok(self.status);
        }

        if self.attempts >= self.max_attempts {
            info!("attempt budget of {} spent", self.max_attempts);
            self.status = SessionStatus::Exhausted;
            return Ok(self.status);
        }

        match self.engine.next_guess(feedback) {
            Ok(Advance::Next(_)) => self.attempts += 1,
            Ok(Advance::Solved(_)) => self.status = SessionStatus::Solved,
            Err(EngineError::EngineExhausted) => {
                info!("no candidate left after {} attempts", self.attempts);
                self.status = SessionStatus::Exhausted;
            }
            Err(e) => return Err(e),
        }
        Ok(self.status)
    }

    /// Play against a known secret until the session finishes
    ///
    /// # Errors
    /// `InvalidWord` for a secret of the wrong length; otherwise propagates
    /// `submit` errors.
    pub fn self_play(&mut self, secret: &Word) -> Result<SessionStatus, EngineError> {
        let expected = self.engine.config().word_len;
        if secret.len() != expected {
            return Err(EngineError::InvalidWord(WordError::InvalidLength {
                expected,
                got: secret.len(),
            }));
        }

        while !self.status.is_finished() {
            let feedback = FeedbackVector::score(self.engine.current_guess(), secret);
            debug!("{} -> {feedback}", self.engine.current_guess());
            self.submit(&feedback)?;
        }
        Ok(self.status)
    }

    /// The guess awaiting feedback, or the final guess once finished
    #[must_use]
    pub const fn current_guess(&self) -> &Word {
        self.engine.current_guess()
    }

    /// The solved word, if the session was solved
    #[must_use]
    pub fn solution(&self) -> Option<&Word> {
        (self.status == SessionStatus::Solved).then(|| self.engine.current_guess())
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Guesses played so far, counting the current one
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Every scored guess in order
    #[must_use]
    pub fn history(&self) -> &[(Word, FeedbackVector)] {
        &self.history
    }

    #[must_use]
    pub const fn engine(&self) -> &GuessEngine<'t> {
        &self.engine
    }
}
