//! Benchmark command
//!
//! Self-plays the engine against many targets in parallel.

use crate::core::{EngineError, Word};
use crate::dictionary::Trie;
use crate::solver::{EngineConfig, Session, SessionStatus};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_words: usize,
    pub solved: usize,
    pub failed: usize,
    pub total_guesses: usize,
    /// Mean guesses over solved targets
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Solved targets by guess count
    pub distribution: HashMap<usize, usize>,
    pub failed_words: Vec<String>,
    pub max_attempts: usize,
    pub duration: Duration,
    pub words_per_second: f64,
}

struct Outcome {
    target: String,
    guesses: usize,
    solved: bool,
}

/// Pick `count` distinct targets from the dictionary
#[must_use]
pub fn sample_targets(words: &[Word], count: usize, seed: Option<u64>) -> Vec<Word> {
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    words.choose_multiple(&mut rng, count).cloned().collect()
}

/// Run benchmark on a set of target words
///
/// Each target gets its own session; with a fixed seed, target `i` plays with
/// seed `seed + i` so runs are reproducible regardless of thread scheduling.
///
/// # Errors
///
/// Returns an error if a session cannot be constructed.
pub fn run_benchmark(
    trie: &Trie,
    config: &EngineConfig,
    target_words: &[Word],
    forced_first: Option<&Word>,
    show_progress: bool,
) -> Result<BenchmarkResult, EngineError> {
    let pb = if show_progress {
        ProgressBar::new(target_words.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░"),
    );

    let start = Instant::now();
    let outcomes = target_words
        .par_iter()
        .enumerate()
        .map(|(i, target)| -> Result<Outcome, EngineError> {
            let mut session_config = config.clone();
            session_config.seed = config.seed.map(|s| s.wrapping_add(i as u64));

            let mut session = match forced_first {
                Some(first) => Session::with_first_guess(trie, session_config, first.clone())?,
                None => Session::new(trie, session_config)?,
            };
            let status = session.self_play(target)?;
            pb.inc(1);

            Ok(Outcome {
                target: target.text().to_string(),
                guesses: session.history().len(),
                solved: status == SessionStatus::Solved,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;
    pb.finish_with_message("Complete!");

    Ok(summarize(&outcomes, config.max_attempts, start.elapsed()))
}

fn summarize(outcomes: &[Outcome], max_attempts: usize, duration: Duration) -> BenchmarkResult {
    let mut distribution: HashMap<usize, usize> = HashMap::new();
    let mut failed_words = Vec::new();
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;

    for outcome in outcomes {
        if outcome.solved {
            *distribution.entry(outcome.guesses).or_insert(0) += 1;
            total_guesses += outcome.guesses;
            min_guesses = min_guesses.min(outcome.guesses);
            max_guesses = max_guesses.max(outcome.guesses);
        } else {
            failed_words.push(outcome.target.clone());
        }
    }

    let total_words = outcomes.len();
    let solved = total_words - failed_words.len();

    BenchmarkResult {
        total_words,
        solved,
        failed: failed_words.len(),
        total_guesses,
        average_guesses: if solved == 0 {
            0.0
        } else {
            total_guesses as f64 / solved as f64
        },
        min_guesses: if solved == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        failed_words,
        max_attempts,
        duration,
        words_per_second: total_words as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}
