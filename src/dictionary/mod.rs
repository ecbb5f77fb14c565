//! Dictionary storage and loading
//!
//! The trie is the only view the engine has of the word list.

pub mod loader;
mod trie;

pub use trie::Trie;
