//! Accumulated feedback knowledge
//!
//! Per-letter knowledge is kept as a record rather than a single status so a
//! letter can be locked at one slot while its multiplicity is capped by a
//! mismatch at another.

use crate::core::{
    ALPHABET_LEN, Feedback, FeedbackError, FeedbackVector, MAX_WORD_LEN, Word, letter_index,
};
use std::ops::Range;

/// Set of slot indices, one bit per position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSet(u32);

impl SlotSet {
    #[inline]
    pub fn insert(&mut self, slot: usize) {
        debug_assert!(slot < MAX_WORD_LEN);
        self.0 |= 1 << slot;
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, slot: usize) -> bool {
        self.0 & (1 << slot) != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_WORD_LEN).filter(move |&slot| self.contains(slot))
    }
}

/// Status of a position in the latest round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Deleted,
    Present,
    Locked,
}

impl From<Feedback> for PositionStatus {
    fn from(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Mismatch => Self::Deleted,
            Feedback::PositionMismatch => Self::Present,
            Feedback::Match => Self::Locked,
        }
    }
}

/// Summary view of what is known about a letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterStatus {
    Unknown,
    PresentSomewhere,
    Locked,
    Excluded,
}

/// Everything known about one letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterKnowledge {
    /// Slots where the letter is confirmed
    pub locked: SlotSet,
    /// Position memory: slots where the letter is known not to sit
    pub tried: SlotSet,
    /// Fewest occurrences the secret can have
    pub min_count: usize,
    /// Most occurrences the secret can have, once a mismatch pins it down
    pub max_count: Option<usize>,
}

impl LetterKnowledge {
    #[must_use]
    pub fn status(&self) -> LetterStatus {
        if self.is_excluded() {
            LetterStatus::Excluded
        } else if !self.locked.is_empty() {
            LetterStatus::Locked
        } else if self.min_count > 0 {
            LetterStatus::PresentSomewhere
        } else {
            LetterStatus::Unknown
        }
    }

    /// Absent from the secret altogether
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.max_count == Some(0)
    }

    /// Whether a word holding `count` copies of the letter is consistent
    #[must_use]
    pub fn allows_count(&self, count: usize) -> bool {
        count >= self.min_count && self.max_count.is_none_or(|max| count <= max)
    }
}

/// Result of folding one feedback vector into the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    /// Letters carried into the next guess, `None` for freed slots
    pub buffer: Vec<Option<u8>>,
    /// Slots freed by a mismatch, in position order
    pub empty_slots: Vec<usize>,
    /// Present slots holding a duplicate that may move to a freed slot
    pub reusable_slots: Vec<usize>,
    /// Every position matched
    pub solved: bool,
}

/// Knowledge accumulated over a session
#[derive(Debug, Clone)]
pub struct FeedbackState {
    word_len: usize,
    guess: Word,
    round: Vec<PositionStatus>,
    letters: [LetterKnowledge; ALPHABET_LEN],
    locked: Vec<Option<u8>>,
    rounds: usize,
}

impl FeedbackState {
    /// Start from a seed guess with no feedback yet
    #[must_use]
    pub fn new(guess: Word) -> Self {
        let word_len = guess.len();
        Self {
            word_len,
            guess,
            round: Vec::new(),
            letters: [LetterKnowledge::default(); ALPHABET_LEN],
            locked: vec![None; word_len],
            rounds: 0,
        }
    }

    #[must_use]
    pub const fn word_len(&self) -> usize {
        self.word_len
    }

    /// The guess the next feedback vector refers to
    #[must_use]
    pub const fn guess(&self) -> &Word {
        &self.guess
    }

    pub(crate) fn set_guess(&mut self, guess: Word) {
        debug_assert_eq!(guess.len(), self.word_len);
        self.guess = guess;
    }

    /// Number of feedback vectors applied so far
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Position statuses from the latest round
    #[must_use]
    pub fn round(&self) -> &[PositionStatus] {
        &self.round
    }

    #[must_use]
    pub fn letter(&self, letter: u8) -> &LetterKnowledge {
        &self.letters[letter_index(letter)]
    }

    #[must_use]
    pub fn letters(&self) -> &[LetterKnowledge; ALPHABET_LEN] {
        &self.letters
    }

    /// Permanently locked letter at `slot`, if any
    #[must_use]
    pub fn locked_at(&self, slot: usize) -> Option<u8> {
        self.locked[slot]
    }

    #[must_use]
    pub fn is_locked(&self, slot: usize) -> bool {
        self.locked[slot].is_some()
    }

    /// Reject a vector that does not fit the current guess
    ///
    /// # Errors
    /// Returns `FeedbackError::Length` on a length mismatch.
    pub fn validate(&self, feedback: &FeedbackVector) -> Result<(), FeedbackError> {
        if feedback.len() == self.word_len {
            Ok(())
        } else {
            Err(FeedbackError::Length {
                expected: self.word_len,
                got: feedback.len(),
            })
        }
    }

    /// Fold feedback for the current guess into the state
    ///
    /// The vector is validated before anything is mutated, so a rejected
    /// vector leaves the state untouched.
    ///
    /// # Errors
    /// Returns `FeedbackError` if the vector does not fit the current guess.
    pub fn apply(&mut self, feedback: &FeedbackVector) -> Result<RoundPlan, FeedbackError> {
        self.validate(feedback)?;

        let statuses: Vec<PositionStatus> = feedback
            .as_slice()
            .iter()
            .map(|&f| PositionStatus::from(f))
            .collect();
        let letters: Vec<u8> = self.guess.as_bytes().to_vec();

        // occurrences confirmed this round (locked + present), per letter
        let mut confirmed = [0usize; ALPHABET_LEN];
        let mut locked_this_round = [false; ALPHABET_LEN];
        for (&b, status) in letters.iter().zip(&statuses) {
            match status {
                PositionStatus::Locked => {
                    confirmed[letter_index(b)] += 1;
                    locked_this_round[letter_index(b)] = true;
                }
                PositionStatus::Present => confirmed[letter_index(b)] += 1,
                PositionStatus::Deleted => {}
            }
        }

        let mut buffer = vec![None; self.word_len];
        let mut empty_slots = Vec::new();
        let mut reusable_slots = Vec::new();
        let mut present_seen = [0usize; ALPHABET_LEN];

        for (slot, (&b, status)) in letters.iter().zip(&statuses).enumerate() {
            let idx = letter_index(b);
            let knowledge = &mut self.letters[idx];

            match status {
                PositionStatus::Locked => {
                    knowledge.locked.insert(slot);
                    self.locked[slot] = Some(b);
                    buffer[slot] = Some(b);
                }
                PositionStatus::Present => {
                    knowledge.tried.insert(slot);
                    buffer[slot] = Some(b);
                    if present_seen[idx] > 0 || locked_this_round[idx] {
                        reusable_slots.push(slot);
                    }
                    present_seen[idx] += 1;
                }
                PositionStatus::Deleted => {
                    empty_slots.push(slot);
                    // a letter locked in an earlier round keeps its locked slots
                    knowledge.max_count = Some(confirmed[idx].max(knowledge.locked.len()));
                    if knowledge.is_excluded() {
                        knowledge.tried.clear();
                    } else {
                        knowledge.tried.insert(slot);
                    }
                }
            }
        }

        for (knowledge, &count) in self.letters.iter_mut().zip(&confirmed) {
            knowledge.min_count = knowledge.min_count.max(count);
        }

        let solved = statuses.iter().all(|&s| s == PositionStatus::Locked);
        self.round = statuses;
        self.rounds += 1;

        Ok(RoundPlan {
            buffer,
            empty_slots,
            reusable_slots,
            solved,
        })
    }

    /// First maximal run of two or more adjacent positions locked in the latest round
    #[must_use]
    pub fn first_locked_run(&self) -> Option<Range<usize>> {
        let is_locked = |i: usize| self.round.get(i) == Some(&PositionStatus::Locked);
        let start = (0..self.round.len().saturating_sub(1))
            .find(|&i| is_locked(i) && is_locked(i + 1))?;
        let mut end = start + 2;
        while is_locked(end) {
            end += 1;
        }
        Some(start..end)
    }

    /// Whether `letters` is consistent with everything learned so far
    ///
    /// Checks locked slots, position memory, and per-letter occurrence bounds.
    #[must_use]
    pub fn is_consistent(&self, letters: &[u8]) -> bool {
        if letters.len() != self.word_len {
            return false;
        }

        let mut counts = [0usize; ALPHABET_LEN];

        for (slot, &b) in letters.iter().enumerate() {
            if !b.is_ascii_lowercase() {
                return false;
            }

            if let Some(locked) = self.locked[slot] {
                if b != locked {
                    return false;
                }
            } else if self.letters[letter_index(b)].tried.contains(slot) {
                return false;
            }

            counts[letter_index(b)] += 1;
        }

        self.letters
            .iter()
            .zip(&counts)
            .all(|(knowledge, &count)| knowledge.allows_count(count))
    }
}
