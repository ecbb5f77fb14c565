//! Word list loading utilities
//!
//! Dictionary files hold one word per line of any length; only valid words of
//! the requested length are kept.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;

/// Load words of exactly `word_len` letters from a file
///
/// Lines are trimmed and lowercased; blank lines, wrong lengths and
/// non-alphabetic entries are skipped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_adaptive::dictionary::loader::load_from_file;
///
/// let words = load_from_file("words.txt", 5).unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P, word_len: usize) -> io::Result<Vec<Word>> {
    let content = fs::read_to_string(path)?;
    Ok(words_from_lines(content.lines(), word_len))
}

/// Keep the entries of `lines` that are valid words of `word_len` letters
pub fn words_from_lines<'a, I>(lines: I, word_len: usize) -> Vec<Word>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.len() == word_len {
                Word::with_len(trimmed, word_len).ok()
            } else {
                None
            }
        })
        .collect()
}

/// Convert a string slice to a Word vector of the given length
///
/// # Examples
/// ```
/// use wordle_adaptive::dictionary::loader::words_from_slice;
///
/// let words = words_from_slice(&["apple", "pear", "mango"], 5);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str], word_len: usize) -> Vec<Word> {
    words_from_lines(slice.iter().copied(), word_len)
}
