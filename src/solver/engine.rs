//! Candidate search
//!
//! Decides the next guess from the accumulated feedback. A round first tries
//! to autocomplete the earliest run of adjacent locked letters through the
//! trie. Failing that, it keeps the locked and misplaced letters, fills the
//! freed slots with random eligible letters, scrambles the buffer through a
//! constrained index remapping, and searches its permutations for dictionary
//! words that satisfy every constraint. Fills are re-randomized until one
//! exact shuffled buffer has failed `retry_limit` times, or the round's
//! refill and permutation budgets run out.

use super::config::EngineConfig;
use super::permute::{Permutations, permutations};
use super::predicate::{Constraints, LockedRun};
use super::state::{FeedbackState, PositionStatus, RoundPlan};
use crate::core::{
    ALPHABET_LEN, AcceptAll, EngineError, FeedbackVector, Predicate, Word, WordError,
    index_letter, letter_index,
};
use crate::dictionary::Trie;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// High-frequency letters the seed guess is drawn from
pub const FREQUENT_LETTERS: &[u8] = b"aetsdnphiorw";

/// Dictionary hits collected for the seed guess
const SEED_RESULT_LIMIT: usize = 10;

/// Outcome of feeding one feedback vector to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Every position matched; carries the solved word
    Solved(Word),
    /// The next guess to play
    Next(Word),
}

/// Adaptive guess engine over a borrowed dictionary trie
pub struct GuessEngine<'t> {
    trie: &'t Trie,
    config: EngineConfig,
    state: FeedbackState,
    rng: StdRng,
}

impl<'t> GuessEngine<'t> {
    /// Create an engine and pick its seed guess
    ///
    /// # Errors
    /// Returns `InvalidWordLength` for an out-of-range length and
    /// `DictionaryEmpty` when the trie holds no word of that length.
    ///
    /// # Examples
    /// ```
    /// use wordle_adaptive::core::Word;
    /// use wordle_adaptive::dictionary::Trie;
    /// use wordle_adaptive::solver::{EngineConfig, GuessEngine};
    ///
    /// let words: Vec<Word> = ["apple", "angle", "ample"].iter().map(|w| Word::new(*w).unwrap()).collect();
    /// let trie = Trie::from_words(&words);
    /// let engine = GuessEngine::new(&trie, EngineConfig::new(5).with_seed(1)).unwrap();
    /// assert!(trie.contains(engine.current_guess()));
    /// ```
    pub fn new(trie: &'t Trie, config: EngineConfig) -> Result<Self, EngineError> {
        Self::check_dictionary(trie, &config)?;
        let mut rng = make_rng(config.seed);
        let seed = seed_guess(trie, &config, &mut rng)?;
        debug!("seed guess: {seed}");

        Ok(Self {
            trie,
            state: FeedbackState::new(seed),
            config,
            rng,
        })
    }

    /// Create an engine that opens with a caller-chosen guess
    ///
    /// The forced guess need not be a dictionary word.
    ///
    /// # Errors
    /// As [`GuessEngine::new`], plus `InvalidWord` when `first` has the wrong length.
    pub fn with_first_guess(
        trie: &'t Trie,
        config: EngineConfig,
        first: Word,
    ) -> Result<Self, EngineError> {
        Self::check_dictionary(trie, &config)?;
        if first.len() != config.word_len {
            return Err(EngineError::InvalidWord(WordError::InvalidLength {
                expected: config.word_len,
                got: first.len(),
            }));
        }

        Ok(Self {
            trie,
            rng: make_rng(config.seed),
            state: FeedbackState::new(first),
            config,
        })
    }

    fn check_dictionary(trie: &Trie, config: &EngineConfig) -> Result<(), EngineError> {
        config.validate()?;
        if trie.has_words_of_len(config.word_len) {
            Ok(())
        } else {
            Err(EngineError::DictionaryEmpty {
                word_len: config.word_len,
            })
        }
    }

    /// The guess awaiting feedback
    #[must_use]
    pub const fn current_guess(&self) -> &Word {
        self.state.guess()
    }

    #[must_use]
    pub const fn state(&self) -> &FeedbackState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dictionary words still consistent with every round so far
    #[must_use]
    pub fn consistent_words(&self) -> Vec<Word> {
        self.trie
            .enumerate(b"", self.config.word_len, &Constraints::new(&self.state))
    }

    /// Check a feedback vector without touching the state
    ///
    /// # Errors
    /// Returns `InvalidFeedback` on a length mismatch.
    pub fn validate(&self, feedback: &FeedbackVector) -> Result<(), EngineError> {
        self.state.validate(feedback).map_err(EngineError::from)
    }

    /// Fold feedback for the current guess in and decide the next guess
    ///
    /// # Errors
    /// Returns `InvalidFeedback` if the vector does not fit the current guess;
    /// the state is left unchanged in that case. Returns `EngineExhausted`
    /// when no candidate turns up within the round's retry bounds.
    pub fn next_guess(&mut self, feedback: &FeedbackVector) -> Result<Advance, EngineError> {
        let plan = self.state.apply(feedback)?;
        debug!(
            "round {}: {} -> {feedback}",
            self.state.rounds(),
            self.state.guess()
        );

        if plan.solved {
            return Ok(Advance::Solved(self.state.guess().clone()));
        }

        let word = match self.autocomplete() {
            Some(word) => word,
            None => self
                .permutation_search(&plan)
                .ok_or(EngineError::EngineExhausted)?,
        };

        debug!("next guess: {word}");
        self.state.set_guess(word.clone());
        Ok(Advance::Next(word))
    }

    /// Complete the earliest locked run straight from the trie
    ///
    /// Single-letter words have no runs, so they sweep the whole alphabet
    /// with an empty anchor instead.
    fn autocomplete(&mut self) -> Option<Word> {
        let (start, anchor) = match self.state.first_locked_run() {
            Some(run) => (run.start, self.state.guess().as_bytes()[run].to_vec()),
            None if self.config.word_len == 1 => (0, Vec::new()),
            None => return None,
        };

        let completions = self.trie.enumerate_substring(
            &anchor,
            start,
            self.config.word_len,
            &LockedRun::new(&self.state, start, &anchor),
        );
        debug!(
            "autocomplete '{}' at {start}: {} completions",
            String::from_utf8_lossy(&anchor),
            completions.len()
        );

        completions.choose(&mut self.rng).cloned()
    }

    fn permutation_search(&mut self, plan: &RoundPlan) -> Option<Word> {
        let scan_cost: usize = (1..=self.config.word_len).product();
        let mut budget = self.config.search_budget;
        let mut failures: FxHashMap<Vec<u8>, usize> = FxHashMap::default();
        let mut dead_sets: FxHashSet<Vec<u8>> = FxHashSet::default();

        for _ in 0..self.config.shuffle_limit {
            let (buffer, empty_slots) = relocate_reusable(plan);
            let Some(filled) = self.fill_empty_slots(buffer, &empty_slots) else {
                continue;
            };

            let shuffled = self.remap(&filled);

            // every ordering of a letter set is scanned at once, so a set
            // that failed once fails for the rest of the round
            let mut letter_set = filled;
            letter_set.sort_unstable();
            if !dead_sets.contains(&letter_set) {
                if budget < scan_cost {
                    warn!("permutation budget of {} spent", self.config.search_budget);
                    return None;
                }
                budget -= scan_cost;

                let matches = dictionary_matches(
                    self.trie,
                    &shuffled,
                    &Constraints::new(&self.state),
                    self.config.result_limit,
                );
                if let Some(word) = matches.choose(&mut self.rng) {
                    return Some(word.clone());
                }
                dead_sets.insert(letter_set);
            }

            if plan.empty_slots.is_empty() {
                warn!("no empty slots to retry");
                return None;
            }

            let tries = failures.entry(shuffled).or_insert(0);
            if *tries >= self.config.retry_limit {
                debug!("shuffled buffer failed {} times", *tries + 1);
                return None;
            }
            *tries += 1;
        }

        warn!(
            "no candidate after {} empty-slot refills",
            self.config.shuffle_limit
        );
        None
    }

    /// Fill every freed slot with a random eligible letter
    ///
    /// Returns `None` if some slot has no eligible letter even after relaxing
    /// the repetition rules.
    fn fill_empty_slots(
        &mut self,
        mut buffer: Vec<Option<u8>>,
        empty_slots: &[usize],
    ) -> Option<Vec<u8>> {
        let mut counts = [0usize; ALPHABET_LEN];
        for &b in buffer.iter().flatten() {
            counts[letter_index(b)] += 1;
        }
        let mut has_duplicate = counts.iter().any(|&c| c >= 2);

        for &slot in empty_slots {
            let mut pool = self.eligible_letters(slot, &counts, has_duplicate, true);
            if pool.is_empty() {
                pool = self.eligible_letters(slot, &counts, has_duplicate, false);
            }
            let &letter = pool.choose(&mut self.rng)?;

            let count = &mut counts[letter_index(letter)];
            *count += 1;
            has_duplicate |= *count >= 2;
            buffer[slot] = Some(letter);
        }

        buffer.into_iter().collect()
    }

    /// Letters allowed into `slot` given the buffer's current letter counts
    ///
    /// `strict` adds the repetition cap: at most two of a letter, and no new
    /// duplicate once the buffer already holds one.
    fn eligible_letters(
        &self,
        slot: usize,
        counts: &[usize; ALPHABET_LEN],
        has_duplicate: bool,
        strict: bool,
    ) -> Vec<u8> {
        self.state
            .letters()
            .iter()
            .zip(counts)
            .enumerate()
            .filter(|&(_, (knowledge, &count))| {
                !knowledge.is_excluded()
                    && !knowledge.tried.contains(slot)
                    && knowledge.max_count.is_none_or(|max| count < max)
                    && (!strict || count == 0 || (count == 1 && !has_duplicate))
            })
            .map(|(i, _)| index_letter(i))
            .collect()
    }

    /// Scramble the filled buffer through a permissible-index remapping
    ///
    /// Locked slots keep their letter. Any other slot draws from a different
    /// unlocked slot, and a misplaced slot never draws a copy of its own
    /// letter. Each drawn index is withdrawn from later slots; a slot left
    /// with no choice keeps its own letter.
    fn remap(&mut self, filled: &[u8]) -> Vec<u8> {
        let n = filled.len();
        let round = self.state.round();

        let mut allowed: Vec<Vec<usize>> = (0..n)
            .map(|i| {
                if self.state.is_locked(i) {
                    return vec![i];
                }
                let present = round.get(i) == Some(&PositionStatus::Present);
                let targets: Vec<usize> = (0..n)
                    .filter(|&j| {
                        j != i && !self.state.is_locked(j) && !(present && filled[i] == filled[j])
                    })
                    .collect();
                if targets.is_empty() { vec![i] } else { targets }
            })
            .collect();

        let mut out = filled.to_vec();
        for i in 0..n {
            let pick = allowed[i][self.rng.random_range(0..allowed[i].len())];
            out[i] = filled[pick];

            if self.state.is_locked(pick) {
                continue;
            }

            for (j, later) in allowed.iter_mut().enumerate().skip(i + 1) {
                later.retain(|&v| v != pick);
                if later.is_empty() {
                    later.push(j);
                }
            }
        }

        out
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Move duplicate misplaced letters into freed slots, freeing their old slots
fn relocate_reusable(plan: &RoundPlan) -> (Vec<Option<u8>>, Vec<usize>) {
    let mut buffer = plan.buffer.clone();
    let mut empty: VecDeque<usize> = plan.empty_slots.iter().copied().collect();

    for &slot in &plan.reusable_slots {
        if let Some(target) = empty.pop_front() {
            let letter = buffer[slot].take();
            buffer[target] = letter;
            empty.push_back(slot);
        }
    }

    (buffer, empty.into())
}

/// Distinct dictionary words among the permutations of `letters`, up to `limit`
fn dictionary_matches<P>(trie: &Trie, letters: &[u8], predicate: &P, limit: usize) -> Vec<Word>
where
    P: Predicate + ?Sized,
{
    let mut seen = FxHashSet::default();
    Permutations::new(letters)
        .filter(|p| trie.lookup(p) && predicate.accept(p))
        .filter(|p| seen.insert(p.clone()))
        .take(limit.max(1))
        .map(|p| Word::from_letters(&p))
        .collect()
}

/// Seed guess from a shuffled set of high-frequency letters
///
/// Falls back to a random dictionary word when no shuffle yields one.
fn seed_guess(trie: &Trie, config: &EngineConfig, rng: &mut StdRng) -> Result<Word, EngineError> {
    let mut letters = FREQUENT_LETTERS.to_vec();
    let in_dictionary = |p: &[u8]| trie.lookup(p);

    for _ in 0..config.seed_attempts {
        letters.shuffle(rng);
        let pick = &letters[..config.word_len];

        // frequency letters are distinct, so hits never repeat
        let mut hits = permutations(pick, &in_dictionary);
        hits.truncate(SEED_RESULT_LIMIT);

        if let Some(hit) = hits.choose(rng) {
            return Ok(Word::from_letters(hit));
        }
    }
    debug!(
        "no frequency-letter seed after {} shuffles, sampling the dictionary",
        config.seed_attempts
    );

    trie.enumerate(b"", config.word_len, &AcceptAll)
        .choose(rng)
        .cloned()
        .ok_or(EngineError::DictionaryEmpty {
            word_len: config.word_len,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::loader::words_from_slice;

    const DICT: &[&str] = &["apple", "angle", "ample", "amble"];

    fn trie(words: &[&str], len: usize) -> Trie {
        Trie::from_words(&words_from_slice(words, len))
    }

    fn config(len: usize, seed: u64) -> EngineConfig {
        EngineConfig::new(len).with_seed(seed)
    }

    fn fb(s: &str) -> FeedbackVector {
        FeedbackVector::parse(s, s.len()).unwrap()
    }

    fn forced<'t>(trie: &'t Trie, first: &str, seed: u64) -> GuessEngine<'t> {
        GuessEngine::with_first_guess(trie, config(first.len(), seed), Word::new(first).unwrap())
            .unwrap()
    }

    #[test]
    fn empty_dictionary_is_rejected() {
        let t = trie(&["pear"], 4);
        assert_eq!(
            GuessEngine::new(&t, config(5, 1)).err(),
            Some(EngineError::DictionaryEmpty { word_len: 5 })
        );
    }

    #[test]
    fn invalid_word_length_is_rejected() {
        let t = trie(DICT, 5);
        assert_eq!(
            GuessEngine::new(&t, config(0, 1)).err(),
            Some(EngineError::InvalidWordLength(0))
        );
    }

    #[test]
    fn forced_first_guess_must_fit_length() {
        let t = trie(DICT, 5);
        let result =
            GuessEngine::with_first_guess(&t, config(5, 1), Word::new("pear").unwrap());
        assert!(matches!(result, Err(EngineError::InvalidWord(_))));
    }

    #[test]
    fn seed_guess_is_a_dictionary_word() {
        // no word here can be spelled from the frequency letters, so the
        // seed falls back to sampling the dictionary
        let t = trie(DICT, 5);
        for seed in 0..5 {
            let engine = GuessEngine::new(&t, config(5, seed)).unwrap();
            assert!(t.contains(engine.current_guess()));
        }
    }

    #[test]
    fn seed_guess_prefers_frequency_letters() {
        // every ordered pair of distinct frequency letters is a word
        let mut words: Vec<String> = Vec::new();
        for &a in FREQUENT_LETTERS {
            for &b in FREQUENT_LETTERS {
                if a != b {
                    words.push(String::from_utf8(vec![a, b]).unwrap());
                }
            }
        }
        words.push("zz".to_string());
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let t = trie(&words, 2);

        for seed in 0..5 {
            let engine = GuessEngine::new(&t, config(2, seed)).unwrap();
            assert_ne!(engine.current_guess().text(), "zz");
        }
    }

    #[test]
    fn same_seed_same_guesses() {
        let t = trie(DICT, 5);
        let mut a = GuessEngine::new(&t, config(5, 42)).unwrap();
        let mut b = GuessEngine::new(&t, config(5, 42)).unwrap();
        assert_eq!(a.current_guess(), b.current_guess());

        let secret = Word::new("apple").unwrap();
        let fa = FeedbackVector::score(a.current_guess(), &secret);
        let fb = FeedbackVector::score(b.current_guess(), &secret);
        assert_eq!(a.next_guess(&fa).unwrap(), b.next_guess(&fb).unwrap());
    }

    #[test]
    fn autocomplete_finds_unique_completion() {
        let t = trie(DICT, 5);
        let mut engine = forced(&t, "apxle", 7);

        let advance = engine.next_guess(&fb("22022")).unwrap();
        assert_eq!(advance, Advance::Next(Word::new("apple").unwrap()));

        let advance = engine.next_guess(&fb("22222")).unwrap();
        assert_eq!(advance, Advance::Solved(Word::new("apple").unwrap()));
    }

    #[test]
    fn invalid_feedback_leaves_state_untouched() {
        let t = trie(DICT, 5);
        let mut engine = forced(&t, "apxle", 7);

        let err = engine.next_guess(&fb("220")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidFeedback(_)));
        assert_eq!(engine.state().rounds(), 0);
        assert_eq!(engine.current_guess().text(), "apxle");

        // the same valid vector still works afterwards
        assert_eq!(
            engine.next_guess(&fb("22022")).unwrap(),
            Advance::Next(Word::new("apple").unwrap())
        );
    }

    #[test]
    fn locked_letters_persist_into_next_guess() {
        let t = trie(
            &["crane", "crate", "grace", "trace", "brace", "caret", "react"],
            5,
        );
        let mut engine = forced(&t, "crane", 11);
        // secret "crate": c r a locked, n absent, e locked
        match engine.next_guess(&fb("22202")).unwrap() {
            Advance::Next(word) => {
                assert_eq!(word.text(), "crate");
            }
            other => panic!("expected a next guess, got {other:?}"),
        }
    }

    #[test]
    fn excluded_letters_never_reappear() {
        let words = ["toast", "roast", "boast", "coast", "feast", "beast", "yeast"];
        let t = trie(&words, 5);
        let secret = Word::new("feast").unwrap();

        for seed in 0..10 {
            let mut engine = forced(&t, "toast", seed);
            let feedback = FeedbackVector::score(engine.current_guess(), &secret);
            if let Advance::Next(next) = engine.next_guess(&feedback).unwrap() {
                // 'o' is absent; 't' is capped at its locked copy
                assert!(!next.as_bytes().contains(&b'o'), "seed {seed}: {next}");
                assert_eq!(&next.as_bytes()[2..], b"ast");
            }
        }
    }

    #[test]
    fn exhaustion_is_reported_as_an_error() {
        let t = trie(DICT, 5);
        let mut config = config(5, 5);
        config.shuffle_limit = 2_000;
        let mut engine =
            GuessEngine::with_first_guess(&t, config, Word::new("apple").unwrap()).unwrap();

        // every dictionary word shares a letter with the guess
        assert_eq!(
            engine.next_guess(&fb("00000")),
            Err(EngineError::EngineExhausted)
        );
    }

    #[test]
    fn permutation_search_outlasts_unlucky_refills() {
        // no locked letter, so only refills of both free slots with f and g
        // reach the one consistent word
        let t = trie(&["abcde", "cdefg", "fghij", "edcba", "cdxyz"], 5);

        for seed in 0..8 {
            let mut engine = forced(&t, "abcde", seed);
            assert_eq!(
                engine.next_guess(&fb("00111")),
                Ok(Advance::Next(Word::new("cdefg").unwrap())),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn permutation_budget_ends_the_round() {
        let t = trie(DICT, 5);
        let mut config = config(5, 3);
        // room for a single full scan
        config.search_budget = 120;
        let mut engine =
            GuessEngine::with_first_guess(&t, config, Word::new("apple").unwrap()).unwrap();

        assert_eq!(
            engine.next_guess(&fb("00000")),
            Err(EngineError::EngineExhausted)
        );
    }

    #[test]
    fn single_letter_words_sweep_the_alphabet() {
        let t = trie(&["a", "i", "o"], 1);
        let mut engine = forced(&t, "a", 9);

        match engine.next_guess(&fb("0")).unwrap() {
            Advance::Next(word) => assert!(word.text() == "i" || word.text() == "o"),
            other => panic!("expected a next guess, got {other:?}"),
        }
    }

    #[test]
    fn consistent_words_shrink_with_feedback() {
        let t = trie(DICT, 5);
        let mut engine = forced(&t, "amble", 2);
        assert_eq!(engine.consistent_words().len(), 4);

        let secret = Word::new("apple").unwrap();
        let feedback = FeedbackVector::score(engine.current_guess(), &secret);
        assert_eq!(feedback.to_string(), "20022");
        engine.next_guess(&feedback).unwrap();

        // amble vs apple rules out m and b
        let left: Vec<String> = engine
            .consistent_words()
            .iter()
            .map(|w| w.text().to_string())
            .collect();
        assert_eq!(left.len(), 2);
        assert!(left.contains(&"apple".to_string()));
        assert!(left.contains(&"angle".to_string()));
        assert!(left.contains(&engine.current_guess().text().to_string()));
    }

    #[test]
    fn relocation_moves_duplicates_into_freed_slots() {
        let plan = RoundPlan {
            buffer: vec![Some(b'e'), Some(b'e'), None, None, Some(b'e')],
            empty_slots: vec![2, 3],
            reusable_slots: vec![1, 4],
            solved: false,
        };
        let (buffer, empty) = relocate_reusable(&plan);
        assert_eq!(buffer, vec![Some(b'e'), None, Some(b'e'), Some(b'e'), None]);
        assert_eq!(empty, vec![1, 4]);
    }

    #[test]
    fn dictionary_matches_deduplicates_and_caps() {
        let t = trie(&["apple", "appel"], 5);
        let hits = dictionary_matches(&t, b"apple", &AcceptAll, 5);
        assert_eq!(hits.len(), 2);

        let capped = dictionary_matches(&t, b"apple", &AcceptAll, 1);
        assert_eq!(capped.len(), 1);
    }
}
