//! Adaptive guess engine
//!
//! Feedback is folded into a [`FeedbackState`]; the [`GuessEngine`] turns
//! that state into the next guess and the [`Session`] drives the attempt loop.

pub mod config;
pub mod engine;
pub mod permute;
pub mod predicate;
pub mod session;
pub mod state;

pub use config::EngineConfig;
pub use engine::{Advance, GuessEngine};
pub use session::{Session, SessionStatus};
pub use state::FeedbackState;
