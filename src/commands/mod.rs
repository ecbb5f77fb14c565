//! Command implementations

pub mod benchmark;
pub mod play;
pub mod solve;

pub use benchmark::{BenchmarkResult, run_benchmark, sample_targets};
pub use play::{PlayError, run_play};
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_word};
