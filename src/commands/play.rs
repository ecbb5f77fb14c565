//! Interactive play mode
//!
//! The engine suggests a guess, the user reports the feedback the puzzle
//! showed, and the loop repeats until the word is found or the engine gives up.

use crate::core::{EngineError, FeedbackVector, Word};
use crate::dictionary::Trie;
use crate::output::formatters::colored_guess;
use crate::solver::{EngineConfig, Session, SessionStatus};
use colored::Colorize;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Failure of the interactive loop
#[derive(Debug)]
pub enum PlayError {
    Io(io::Error),
    Engine(EngineError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Engine(e) => Some(e),
        }
    }
}

impl From<io::Error> for PlayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<EngineError> for PlayError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

/// What the user typed at the feedback prompt
enum Input {
    Feedback(FeedbackVector),
    NewGame,
    Quit,
}

/// Run the interactive loop on stdin/stdout
///
/// # Errors
///
/// Returns an error on I/O failure or if the engine cannot be constructed.
pub fn run_play(trie: &Trie, config: &EngineConfig, first: Option<&Word>) -> Result<(), PlayError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play_loop(trie, config, first, &mut stdin.lock(), &mut stdout)
}

/// Interactive loop over arbitrary input and output streams
///
/// # Errors
///
/// Returns an error on I/O failure or if the engine cannot be constructed.
pub fn play_loop<R: BufRead, W: Write>(
    trie: &Trie,
    config: &EngineConfig,
    first: Option<&Word>,
    input: &mut R,
    out: &mut W,
) -> Result<(), PlayError> {
    writeln!(out, "\n{}", "Wordle Adaptive - Interactive Mode".bright_cyan().bold())?;
    writeln!(out, "After each guess, enter the feedback the puzzle showed:")?;
    writeln!(out, "  - 2/G/🟩 for a letter in the right place")?;
    writeln!(out, "  - 1/Y/🟨 for a letter in the wrong place")?;
    writeln!(out, "  - 0/-/⬜ for a letter not in the word")?;
    writeln!(out, "Commands: 'win' when solved, 'new' for a new game, 'quit' to exit\n")?;

    let mut game: u64 = 0;
    loop {
        let mut game_config = config.clone();
        game_config.seed = config.seed.map(|s| s.wrapping_add(game));
        game += 1;

        let mut session = match first {
            Some(word) => Session::with_first_guess(trie, game_config, word.clone())?,
            None => Session::new(trie, game_config)?,
        };

        let finished = loop {
            writeln!(
                out,
                "Guess {}/{}: {}",
                session.attempts(),
                session.max_attempts(),
                session.current_guess().text().to_uppercase().bright_white().bold()
            )?;

            let feedback = match read_input(input, out, config.word_len)? {
                Some(Input::Feedback(feedback)) => feedback,
                Some(Input::NewGame) => break false,
                Some(Input::Quit) | None => {
                    writeln!(out, "\nBye!")?;
                    return Ok(());
                }
            };

            match session.submit(&feedback) {
                Ok(SessionStatus::Guessing) => {}
                Ok(_) => break true,
                Err(e) => writeln!(out, "{}", e.to_string().red())?,
            }
        };

        if finished {
            print_outcome(&session, out)?;
            write!(out, "Play again? (yes/no): ")?;
            out.flush()?;
            match read_line(input)?.as_deref() {
                Some("y" | "yes") => {}
                _ => {
                    writeln!(out, "\nBye!")?;
                    return Ok(());
                }
            }
        }
        writeln!(out, "\nNew game started!\n")?;
    }
}

fn print_outcome<W: Write>(session: &Session<'_>, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    for (word, feedback) in session.history() {
        writeln!(out, "  {}", colored_guess(word, feedback))?;
    }

    if let Some(word) = session.solution() {
        let guesses = session.history().len();
        writeln!(
            out,
            "\n{}",
            format!(
                "Solved: {} in {guesses} {}",
                word.text().to_uppercase(),
                if guesses == 1 { "guess" } else { "guesses" }
            )
            .green()
            .bold()
        )
    } else {
        writeln!(
            out,
            "\n{}",
            "Out of guesses. Was the feedback entered correctly?".red().bold()
        )
    }
}

/// Prompt until the user enters valid feedback or a command; `None` on EOF
fn read_input<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    word_len: usize,
) -> io::Result<Option<Input>> {
    loop {
        write!(out, "Feedback: ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };

        match line.as_str() {
            "" => {}
            "quit" | "q" | "exit" => return Ok(Some(Input::Quit)),
            "new" | "n" => return Ok(Some(Input::NewGame)),
            "win" | "solved" => {
                return Ok(Some(Input::Feedback(FeedbackVector::solved(word_len))));
            }
            text => match FeedbackVector::parse(text, word_len) {
                Ok(feedback) => return Ok(Some(Input::Feedback(feedback))),
                Err(e) => writeln!(out, "{}", format!("Invalid feedback: {e}").red())?,
            },
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
