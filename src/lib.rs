//! Wordle Adaptive
//!
//! An adaptive Wordle guess engine: a dictionary trie, a constraint-driven
//! candidate search with an autocomplete shortcut for runs of locked letters,
//! and a session loop that folds feedback in round by round.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_adaptive::core::Word;
//! use wordle_adaptive::dictionary::{Trie, loader::words_from_slice};
//! use wordle_adaptive::solver::{EngineConfig, Session, SessionStatus};
//!
//! let words = words_from_slice(&["apple", "angle", "ample", "amble"], 5);
//! let trie = Trie::from_words(&words);
//!
//! let mut session = Session::new(&trie, EngineConfig::new(5).with_seed(1)).unwrap();
//! let secret = Word::new("ample").unwrap();
//! assert_eq!(session.self_play(&secret), Ok(SessionStatus::Solved));
//! ```

// Core domain types
pub mod core;

// Dictionary trie and word loading
pub mod dictionary;

// Guess engine and session loop
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
