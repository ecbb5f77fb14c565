//! Word filters passed into trie enumeration and permutation generation

/// A yes/no test over a candidate's letters
///
/// Implemented by [`AcceptAll`], the engine's constraint checkers, and any
/// `Fn(&[u8]) -> bool` closure.
pub trait Predicate {
    fn accept(&self, letters: &[u8]) -> bool;
}

/// Predicate that accepts every candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Predicate for AcceptAll {
    #[inline]
    fn accept(&self, _letters: &[u8]) -> bool {
        true
    }
}

impl<F> Predicate for F
where
    F: Fn(&[u8]) -> bool,
{
    #[inline]
    fn accept(&self, letters: &[u8]) -> bool {
        self(letters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_all_accepts() {
        assert!(AcceptAll.accept(b"anything"));
        assert!(AcceptAll.accept(b""));
    }

    #[test]
    fn closures_are_predicates() {
        let starts_with_a = |w: &[u8]| w.first() == Some(&b'a');
        assert!(starts_with_a.accept(b"apple"));
        assert!(!starts_with_a.accept(b"berry"));
    }
}
