//! Engine-side predicates over candidate words

use super::state::FeedbackState;
use crate::core::Predicate;

/// Full constraint check against the accumulated feedback
///
/// Locked slots must agree, no slot may repeat a letter already rejected
/// there, and every letter count must sit within its known bounds.
#[derive(Debug, Clone, Copy)]
pub struct Constraints<'s> {
    state: &'s FeedbackState,
}

impl<'s> Constraints<'s> {
    #[must_use]
    pub const fn new(state: &'s FeedbackState) -> Self {
        Self { state }
    }
}

impl Predicate for Constraints<'_> {
    fn accept(&self, letters: &[u8]) -> bool {
        self.state.is_consistent(letters)
    }
}

/// Completion check for the autocomplete shortcut
///
/// The locked run must sit at its offset; the rest of the word is held to the
/// full constraints.
#[derive(Debug, Clone, Copy)]
pub struct LockedRun<'s> {
    start: usize,
    run: &'s [u8],
    constraints: Constraints<'s>,
}

impl<'s> LockedRun<'s> {
    #[must_use]
    pub const fn new(state: &'s FeedbackState, start: usize, run: &'s [u8]) -> Self {
        Self {
            start,
            run,
            constraints: Constraints::new(state),
        }
    }
}

impl Predicate for LockedRun<'_> {
    fn accept(&self, letters: &[u8]) -> bool {
        letters
            .get(self.start..self.start + self.run.len())
            .is_some_and(|window| window == self.run)
            && self.constraints.accept(letters)
    }
}
