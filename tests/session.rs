use std::io::Write;

use wordle_adaptive::core::{FeedbackVector, Word};
use wordle_adaptive::dictionary::Trie;
use wordle_adaptive::dictionary::loader::{load_from_file, words_from_slice};
use wordle_adaptive::solver::{Advance, EngineConfig, GuessEngine, Session, SessionStatus};

const SUFFIX_FAMILY: &[&str] = &["apple", "angle", "ample", "amble"];

#[test]
fn every_target_in_a_shared_suffix_family_is_solved() {
    let words = words_from_slice(SUFFIX_FAMILY, 5);
    let trie = Trie::from_words(&words);

    for secret in &words {
        for seed in 0..8 {
            let config = EngineConfig::new(5).with_seed(seed);
            let mut session = Session::new(&trie, config).unwrap();
            assert_eq!(session.self_play(secret), Ok(SessionStatus::Solved));

            // recorded feedback is the true score of each guess
            for (word, feedback) in session.history() {
                assert_eq!(&FeedbackVector::score(word, secret), feedback);
            }
            assert!(session.history().len() <= SUFFIX_FAMILY.len());
        }
    }
}

#[test]
fn guesses_never_repeat_within_a_session() {
    let words = words_from_slice(SUFFIX_FAMILY, 5);
    let trie = Trie::from_words(&words);
    let secret = Word::new("amble").unwrap();

    let mut session = Session::new(&trie, EngineConfig::new(5).with_seed(11)).unwrap();
    session.self_play(&secret).unwrap();

    let mut guesses: Vec<&str> = session.history().iter().map(|(w, _)| w.text()).collect();
    let played = guesses.len();
    guesses.sort_unstable();
    guesses.dedup();
    assert_eq!(guesses.len(), played);
}

#[test]
fn locked_letters_stay_locked_across_rounds() {
    let words = words_from_slice(
        &["shale", "shake", "shame", "shape", "shave", "share", "shade"],
        5,
    );
    let trie = Trie::from_words(&words);
    let secret = Word::new("shave").unwrap();

    for seed in 0..6 {
        let config = EngineConfig::new(5).with_seed(seed).with_max_attempts(10);
        let mut session =
            Session::with_first_guess(&trie, config, Word::new("shxae").unwrap()).unwrap();
        assert_eq!(session.self_play(&secret), Ok(SessionStatus::Solved));

        // s, h locked in round one; every later guess keeps them
        for (word, _) in session.history() {
            assert_eq!(&word.as_bytes()[..2], b"sh");
        }
    }
}

#[test]
fn single_letter_dictionary_is_swept() {
    let words = words_from_slice(&["a", "i", "o", "u"], 1);
    let trie = Trie::from_words(&words);
    let secret = Word::new("u").unwrap();

    let config = EngineConfig::new(1).with_seed(3);
    let mut engine = GuessEngine::with_first_guess(&trie, config, Word::new("a").unwrap()).unwrap();

    let mut seen = vec![engine.current_guess().clone()];
    loop {
        let feedback = FeedbackVector::score(engine.current_guess(), &secret);
        match engine.next_guess(&feedback) {
            Ok(Advance::Solved(word)) => {
                assert_eq!(word, secret);
                break;
            }
            Ok(Advance::Next(word)) => {
                assert!(!seen.contains(&word), "{word} guessed twice");
                seen.push(word);
            }
            Err(e) => panic!("sweep stopped before reaching {secret}: {e}"),
        }
    }
    assert!(seen.len() <= 4);
}

#[test]
fn dictionary_file_round_trip() {
    let path = std::env::temp_dir().join(format!(
        "wordle_adaptive_session_{}.txt",
        std::process::id()
    ));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Apple\nangle\n\nample \npear\namble\nab3le").unwrap();
    }

    let words = load_from_file(&path, 5).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(words.len(), 4);

    let trie = Trie::from_words(&words);
    let mut session = Session::new(&trie, EngineConfig::new(5).with_seed(5)).unwrap();
    assert_eq!(
        session.self_play(&Word::new("angle").unwrap()),
        Ok(SessionStatus::Solved)
    );
}
