//! Word representation
//!
//! A Word is a validated, lowercase, ASCII-alphabetic string of a runtime length.

use std::fmt;

/// Number of letters in the alphabet
pub const ALPHABET_LEN: usize = 26;

/// Longest word the engine accepts
///
/// Bounds the permutation search, which scans all `n!` orderings per refill.
pub const MAX_WORD_LEN: usize = 8;

/// A dictionary word of `len()` lowercase letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    InvalidLength { expected: usize, got: usize },
    Empty,
    TooLong(usize),
    NonAscii,
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, got } => {
                write!(f, "Word must be exactly {expected} letters, got {got}")
            }
            Self::Empty => write!(f, "Word must not be empty"),
            Self::TooLong(len) => {
                write!(f, "Word must be at most {MAX_WORD_LEN} letters, got {len}")
            }
            Self::NonAscii => write!(f, "Word must contain only ASCII letters"),
            Self::InvalidCharacters => write!(f, "Word contains invalid characters"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Create a new Word from a string of any supported length
    ///
    /// # Errors
    /// Returns `WordError` if the text is empty, longer than [`MAX_WORD_LEN`],
    /// or contains anything other than ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_adaptive::core::Word;
    ///
    /// let word = Word::new("Apple").unwrap();
    /// assert_eq!(word.text(), "apple");
    ///
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if text.len() > MAX_WORD_LEN {
            return Err(WordError::TooLong(text.len()));
        }

        if !text.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text })
    }

    /// Create a Word that must have exactly `len` letters
    ///
    /// # Errors
    /// Returns `WordError::InvalidLength` on a length mismatch, or any error from [`Word::new`].
    pub fn with_len(text: impl Into<String>, len: usize) -> Result<Self, WordError> {
        let word = Self::new(text)?;
        if word.len() == len {
            Ok(word)
        } else {
            Err(WordError::InvalidLength {
                expected: len,
                got: word.len(),
            })
        }
    }

    /// Build a word from bytes already known to be lowercase ASCII letters
    ///
    /// Used for trie paths and permutation buffers, which only ever hold validated letters.
    pub(crate) fn from_letters(letters: &[u8]) -> Self {
        debug_assert!(letters.iter().all(u8::is_ascii_lowercase));
        Self {
            text: letters.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a constructed word; present for API symmetry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the letter at a position
    ///
    /// # Panics
    /// Panics if `position >= len()`
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> u8 {
        self.as_bytes()[position]
    }

    /// Count occurrences of a letter
    #[must_use]
    pub fn count_of(&self, letter: u8) -> usize {
        self.as_bytes().iter().filter(|&&b| b == letter).count()
    }
}

/// Index of a lowercase letter in the alphabet
#[inline]
#[must_use]
pub const fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

/// Lowercase letter for an alphabet index
#[inline]
#[must_use]
pub const fn index_letter(index: usize) -> u8 {
    b'a' + index as u8
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
