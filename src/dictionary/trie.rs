//! Prefix tree over the dictionary
//!
//! Supports exact lookup, prefix-bounded enumeration to a fixed depth, and
//! enumeration anchored on a substring at an arbitrary offset. Traversals
//! share one path buffer that is pushed and popped along the way.

use crate::core::{Predicate, Word};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: FxHashMap<u8, TrieNode>,
    terminal: bool,
}

impl TrieNode {
    fn child(&self, letter: u8) -> Option<&Self> {
        self.children.get(&letter)
    }

    /// Follow `path` from this node
    fn descend(&self, path: &[u8]) -> Option<&Self> {
        path.iter().try_fold(self, |node, &b| node.child(b))
    }
}

/// Dictionary prefix tree
///
/// Built once, read-only afterwards. Child order is the hash map's iteration
/// order, so callers must not depend on the order of enumerated words.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from a word list
    ///
    /// # Examples
    /// ```
    /// use wordle_adaptive::core::Word;
    /// use wordle_adaptive::dictionary::Trie;
    ///
    /// let words: Vec<Word> = ["apple", "angle"].iter().map(|w| Word::new(*w).unwrap()).collect();
    /// let trie = Trie::from_words(&words);
    /// assert!(trie.lookup(b"apple"));
    /// assert!(!trie.lookup(b"ample"));
    /// ```
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a Word>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word);
        }
        trie
    }

    /// Add a word; returns false if it was already present
    pub fn insert(&mut self, word: &Word) -> bool {
        let mut node = &mut self.root;
        for &b in word.as_bytes() {
            node = node.children.entry(b).or_default();
        }

        if node.terminal {
            false
        } else {
            node.terminal = true;
            self.len += 1;
            true
        }
    }

    /// Exact membership test
    #[must_use]
    pub fn lookup(&self, letters: &[u8]) -> bool {
        self.root.descend(letters).is_some_and(|node| node.terminal)
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.lookup(word.as_bytes())
    }

    /// Number of distinct words stored
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every stored word of `target_len` letters that starts with `prefix` and
    /// satisfies `predicate`
    pub fn enumerate<P>(&self, prefix: &[u8], target_len: usize, predicate: &P) -> Vec<Word>
    where
        P: Predicate + ?Sized,
    {
        let mut out = Vec::new();
        if let Some(node) = self.root.descend(prefix) {
            let mut path = prefix.to_vec();
            Self::complete(node, target_len, predicate, &mut path, &mut out);
        }
        out
    }

    /// Like [`Trie::enumerate`], but `substring` must appear at `start_offset`
    ///
    /// Letters before the offset are generated by walking the trie; once the
    /// walk reaches the offset the substring is spliced in and the rest of the
    /// word is completed.
    pub fn enumerate_substring<P>(
        &self,
        substring: &[u8],
        start_offset: usize,
        target_len: usize,
        predicate: &P,
    ) -> Vec<Word>
    where
        P: Predicate + ?Sized,
    {
        if start_offset == 0 {
            return self.enumerate(substring, target_len, predicate);
        }

        let mut out = Vec::new();
        let mut path = Vec::with_capacity(target_len);
        Self::complete_substring(
            &self.root,
            substring,
            start_offset,
            target_len,
            predicate,
            &mut path,
            &mut out,
        );
        out
    }

    /// Whether any stored word has exactly `len` letters
    #[must_use]
    pub fn has_words_of_len(&self, len: usize) -> bool {
        fn walk(node: &TrieNode, remaining: usize) -> bool {
            if remaining == 0 {
                return node.terminal;
            }
            node.children.values().any(|child| walk(child, remaining - 1))
        }
        walk(&self.root, len)
    }

    /// Length of the longest prefix of `letters` that is a path in the trie
    ///
    /// The prefix need not end on a complete word.
    #[must_use]
    pub fn longest_matching_prefix_length(&self, letters: &[u8]) -> usize {
        let mut node = &self.root;
        for (i, &b) in letters.iter().enumerate() {
            match node.child(b) {
                Some(next) => node = next,
                None => return i,
            }
        }
        letters.len()
    }

    fn complete<P>(
        node: &TrieNode,
        target_len: usize,
        predicate: &P,
        path: &mut Vec<u8>,
        out: &mut Vec<Word>,
    ) where
        P: Predicate + ?Sized,
    {
        if path.len() >= target_len {
            if path.len() == target_len && node.terminal && predicate.accept(path) {
                out.push(Word::from_letters(path));
            }
            return;
        }

        for (&b, child) in &node.children {
            path.push(b);
            Self::complete(child, target_len, predicate, path, out);
            path.pop();
        }
    }

    fn complete_substring<P>(
        node: &TrieNode,
        substring: &[u8],
        start_offset: usize,
        target_len: usize,
        predicate: &P,
        path: &mut Vec<u8>,
        out: &mut Vec<Word>,
    ) where
        P: Predicate + ?Sized,
    {
        if path.len() == start_offset {
            if let Some(anchored) = node.descend(substring) {
                path.extend_from_slice(substring);
                Self::complete(anchored, target_len, predicate, path, out);
                path.truncate(start_offset);
            }
            return;
        }

        if path.len() >= target_len {
            return;
        }

        for (&b, child) in &node.children {
            path.push(b);
            Self::complete_substring(
                child,
                substring,
                start_offset,
                target_len,
                predicate,
                path,
                out,
            );
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AcceptAll;
    use std::collections::BTreeSet;

    fn build(words: &[&str]) -> Trie {
        let words: Vec<Word> = words.iter().map(|w| Word::new(*w).unwrap()).collect();
        Trie::from_words(&words)
    }

    fn texts(words: Vec<Word>) -> BTreeSet<String> {
        words.into_iter().map(|w| w.text().to_string()).collect()
    }

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    const WORDS: &[&str] = &["apple", "angle", "ample", "amble", "bagel", "cable"];

    #[test]
    fn lookup_finds_inserted_words_only() {
        let trie = build(WORDS);
        for word in WORDS {
            assert!(trie.lookup(word.as_bytes()), "{word} should be found");
        }
        assert!(!trie.lookup(b"apply"));
        assert!(!trie.lookup(b"appl"));
        assert!(!trie.lookup(b"zzzzz"));
        assert!(!trie.lookup(b""));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut trie = Trie::new();
        let apple = Word::new("apple").unwrap();
        assert!(trie.insert(&apple));
        assert!(!trie.insert(&apple));
        assert_eq!(trie.len(), 1);
        assert!(!trie.is_empty());
    }

    #[test]
    fn enumerate_by_prefix() {
        let trie = build(WORDS);
        assert_eq!(
            texts(trie.enumerate(b"am", 5, &AcceptAll)),
            set(&["ample", "amble"])
        );
        assert_eq!(
            texts(trie.enumerate(b"a", 5, &AcceptAll)),
            set(&["apple", "angle", "ample", "amble"])
        );
        assert_eq!(texts(trie.enumerate(b"", 5, &AcceptAll)).len(), WORDS.len());
    }

    #[test]
    fn enumerate_respects_predicate_and_length() {
        let trie = build(WORDS);
        let no_m = |w: &[u8]| !w.contains(&b'm');
        assert_eq!(
            texts(trie.enumerate(b"a", 5, &no_m)),
            set(&["apple", "angle"])
        );
        assert!(trie.enumerate(b"a", 4, &AcceptAll).is_empty());
        assert!(trie.enumerate(b"x", 5, &AcceptAll).is_empty());
    }

    #[test]
    fn enumerate_substring_anchors_at_offset() {
        let trie = build(WORDS);
        // "le" at offset 3
        assert_eq!(
            texts(trie.enumerate_substring(b"le", 3, 5, &AcceptAll)),
            set(&["apple", "angle", "ample", "amble", "cable"])
        );
        // "bl" at offset 2
        assert_eq!(
            texts(trie.enumerate_substring(b"bl", 2, 5, &AcceptAll)),
            set(&["amble", "cable"])
        );
        assert!(trie.enumerate_substring(b"zz", 1, 5, &AcceptAll).is_empty());
    }

    #[test]
    fn enumerate_substring_at_zero_is_prefix_enumeration() {
        let trie = build(WORDS);
        assert_eq!(
            texts(trie.enumerate_substring(b"ap", 0, 5, &AcceptAll)),
            texts(trie.enumerate(b"ap", 5, &AcceptAll))
        );
    }

    #[test]
    fn enumerate_substring_past_end_is_empty() {
        let trie = build(WORDS);
        assert!(trie.enumerate_substring(b"le", 4, 5, &AcceptAll).is_empty());
    }

    #[test]
    fn has_words_of_len_checks_depth() {
        let trie = build(&["apple", "pear"]);
        assert!(trie.has_words_of_len(5));
        assert!(trie.has_words_of_len(4));
        assert!(!trie.has_words_of_len(3));
        assert!(!Trie::new().has_words_of_len(5));
    }

    #[test]
    fn longest_matching_prefix() {
        let trie = build(WORDS);
        assert_eq!(trie.longest_matching_prefix_length(b"apple"), 5);
        assert_eq!(trie.longest_matching_prefix_length(b"appxx"), 3);
        assert_eq!(trie.longest_matching_prefix_length(b"zebra"), 0);
        assert_eq!(trie.longest_matching_prefix_length(b""), 0);
    }

    #[test]
    fn single_letter_words() {
        let trie = build(&["a", "i"]);
        assert_eq!(texts(trie.enumerate(b"", 1, &AcceptAll)), set(&["a", "i"]));
        assert!(trie.lookup(b"a"));
        assert!(!trie.lookup(b"b"));
    }
}
