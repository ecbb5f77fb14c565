//! Formatting utilities for terminal output

use crate::core::{Feedback, FeedbackVector, Word};
use colored::Colorize;

/// Render a guess as coloured letter tiles
#[must_use]
pub fn colored_guess(word: &Word, feedback: &FeedbackVector) -> String {
    word.text()
        .to_uppercase()
        .chars()
        .zip(feedback.as_slice())
        .map(|(ch, &f)| {
            let tile = format!(" {ch} ");
            let tile = match f {
                Feedback::Match => tile.black().on_green().bold(),
                Feedback::PositionMismatch => tile.black().on_yellow().bold(),
                Feedback::Mismatch => tile.white().on_bright_black(),
            };
            tile.to_string()
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_guess_keeps_letters_in_order() {
        let word = Word::new("crane").unwrap();
        let feedback = FeedbackVector::parse("20100", 5).unwrap();
        let tiles = colored_guess(&word, &feedback);

        let positions: Vec<usize> = ["C", "R", "A", "N", "E"]
            .iter()
            .map(|l| tiles.find(&format!(" {l} ")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
