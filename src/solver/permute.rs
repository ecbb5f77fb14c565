//! Positional permutation generator
//!
//! Permutations are enumerated through a factorial-base index vector
//! `idx`, where `idx[i]` ranges over `0..len - i` and advances like an
//! odometer. Each index vector maps to one permutation by applying the swaps
//! `swap(i, i + idx[i])` in order, so the enumeration order is fixed for a
//! given input. Repeated letters are not deduplicated.
//!
//! Word lengths are capped at [`MAX_WORD_LEN`](crate::core::MAX_WORD_LEN),
//! which keeps `n!` at 40320 or below.

use crate::core::Predicate;

/// Lazy iterator over every positional permutation of a byte sequence
///
/// # Examples
/// ```
/// use wordle_adaptive::solver::permute::Permutations;
///
/// let all: Vec<Vec<u8>> = Permutations::new(b"abc").collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], b"abc");
/// ```
#[derive(Debug, Clone)]
pub struct Permutations<'a> {
    source: &'a [u8],
    idx: Vec<usize>,
    done: bool,
}

impl<'a> Permutations<'a> {
    #[must_use]
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            idx: vec![0; source.len()],
            done: false,
        }
    }

    fn current(&self) -> Vec<u8> {
        let mut out = self.source.to_vec();
        for (offset, &step) in self.idx.iter().enumerate() {
            out.swap(offset, offset + step);
        }
        out
    }

    fn advance(&mut self) {
        let n = self.idx.len();
        for i in (0..n).rev() {
            if i == 0 || self.idx[i] < n - i - 1 {
                self.idx[i] += 1;
                if i == 0 && self.idx[0] >= n {
                    self.done = true;
                }
                return;
            }
            self.idx[i] = 0;
        }
        // empty input: a single empty permutation
        self.done = true;
    }
}

impl Iterator for Permutations<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current();
        self.advance();
        Some(item)
    }
}

/// Every permutation of `sequence` accepted by `predicate`
pub fn permutations<P>(sequence: &[u8], predicate: &P) -> Vec<Vec<u8>>
where
    P: Predicate + ?Sized,
{
    Permutations::new(sequence)
        .filter(|p| predicate.accept(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AcceptAll;
    use std::collections::BTreeSet;

    fn factorial(n: usize) -> usize {
        (1..=n).product()
    }

    #[test]
    fn yields_n_factorial_sequences() {
        for n in 1..=6 {
            let input: Vec<u8> = (0..n as u8).map(|i| b'a' + i).collect();
            assert_eq!(permutations(&input, &AcceptAll).len(), factorial(n));
        }
    }

    #[test]
    fn distinct_letters_give_distinct_permutations() {
        let all = permutations(b"abcde", &AcceptAll);
        let unique: BTreeSet<_> = all.iter().cloned().collect();
        assert_eq!(unique.len(), 120);
    }

    #[test]
    fn every_result_is_a_bijection_of_positions() {
        // permute position labels so duplicates cannot hide a broken mapping
        let positions: Vec<u8> = (0..5).collect();
        for perm in Permutations::new(&positions) {
            let mut sorted = perm.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, positions);
        }
    }

    #[test]
    fn repeated_letters_are_counted_positionally() {
        let all = permutations(b"aab", &AcceptAll);
        assert_eq!(all.len(), 6);
        let unique: BTreeSet<_> = all.into_iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn enumeration_order_is_deterministic() {
        let first: Vec<_> = Permutations::new(b"apple").collect();
        let second: Vec<_> = Permutations::new(b"apple").collect();
        assert_eq!(first, second);
        assert_eq!(first[0], b"apple");
    }

    #[test]
    fn predicate_filters_results() {
        let starts_with_b = |p: &[u8]| p[0] == b'b';
        let all = permutations(b"abc", &starts_with_b);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|p| p[0] == b'b'));
    }

    #[test]
    fn single_and_empty_inputs() {
        assert_eq!(permutations(b"a", &AcceptAll), vec![b"a".to_vec()]);
        assert_eq!(permutations(b"", &AcceptAll), vec![Vec::<u8>::new()]);
    }
}
