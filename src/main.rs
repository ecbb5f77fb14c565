//! Wordle Adaptive - CLI
//!
//! Interactive play, single-target solving and parallel benchmarking on top of
//! the adaptive guess engine.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};
use wordle_adaptive::{
    commands::{SolveConfig, run_benchmark, run_play, sample_targets, solve_word},
    core::Word,
    dictionary::{Trie, loader::load_from_file},
    output::{print_benchmark_result, print_solve_result},
    solver::EngineConfig,
};

#[derive(Parser)]
#[command(
    name = "wordle_adaptive",
    about = "Adaptive Wordle guess engine built on a dictionary trie",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dictionary file, one word per line
    #[arg(short, long, global = true, default_value = "words.txt")]
    dict: String,

    /// Letters per word
    #[arg(short = 'l', long, global = true, default_value_t = 5)]
    length: usize,

    /// Maximum guesses per game
    #[arg(short = 'm', long, global = true, default_value_t = 6)]
    max_attempts: usize,

    /// Fixed RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Force the first guess instead of letting the engine choose
    #[arg(short = 'f', long, global = true)]
    first: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: enter the feedback for each suggested guess (default)
    Play,

    /// Solve a specific target word
    Solve {
        /// The target word to solve
        word: String,

        /// Show candidate counts for each guess
        #[arg(long)]
        details: bool,
    },

    /// Benchmark the engine against random dictionary words
    Benchmark {
        /// Number of random words to test
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

fn init_logger(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose > 0 {
        builder.filter_level(match verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = EngineConfig::new(cli.length).with_max_attempts(cli.max_attempts);
    config.seed = cli.seed;
    config.validate()?;

    let words = load_from_file(&cli.dict, cli.length)
        .with_context(|| format!("Failed to load dictionary '{}'", cli.dict))?;
    if words.is_empty() {
        bail!(
            "Dictionary '{}' has no words of length {}",
            cli.dict,
            cli.length
        );
    }
    let trie = Trie::from_words(&words);
    info!("loaded {} words of length {}", trie.len(), cli.length);

    let first = cli
        .first
        .as_deref()
        .map(|text| Word::with_len(text, cli.length))
        .transpose()
        .context("Invalid first guess")?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play(&trie, &config, first.as_ref()).context("Interactive mode failed"),
        Commands::Solve { word, details } => {
            let mut solve_config = SolveConfig::new(word);
            solve_config.first_guess = first;
            let result = solve_word(&trie, &config, solve_config)?;
            print_solve_result(&result, details);
            Ok(())
        }
        Commands::Benchmark { count, quiet } => {
            if let Some(word) = &first {
                println!("Running benchmark on {count} random words with forced first word: {word}...");
            } else {
                println!("Running benchmark on {count} random words...");
            }

            let targets = sample_targets(&words, count, cli.seed);
            let result = run_benchmark(&trie, &config, &targets, first.as_ref(), !quiet)?;
            print_benchmark_result(&result);
            Ok(())
        }
    }
}
