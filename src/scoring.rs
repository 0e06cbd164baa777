//! Pure scoring helpers shared by the live and final metrics.

use serde::Serialize;

/// Characters that make up one "word" for WPM purposes.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharState {
    Correct,
    Incorrect,
    Untyped,
}

/// Classifies every character of `text` against what has been typed so far.
pub fn classify(text: &[char], typed: &[char]) -> Vec<CharState> {
    text.iter()
        .enumerate()
        .map(|(i, expected)| match typed.get(i) {
            None => CharState::Untyped,
            Some(c) if c == expected => CharState::Correct,
            Some(_) => CharState::Incorrect,
        })
        .collect()
}

/// Number of positions where the typed text currently differs from the
/// target. Only the overlapping prefix is compared.
pub fn count_errors(text: &[char], typed: &[char]) -> usize {
    text.iter()
        .zip(typed.iter())
        .filter(|(expected, actual)| expected != actual)
        .count()
}

/// Percentage of typed characters that are correct, 100 when nothing has
/// been typed.
pub fn accuracy(typed_len: usize, errors: usize) -> u32 {
    if typed_len == 0 {
        return 100;
    }
    let correct = typed_len.saturating_sub(errors) as f64;
    (100.0 * correct / typed_len as f64).round() as u32
}

/// Net words per minute, never negative and 0 before any time has passed.
pub fn wpm(typed_len: usize, errors: usize, elapsed_secs: u64) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }
    let correct = typed_len.saturating_sub(errors) as f64;
    let minutes = elapsed_secs as f64 / 60.0;
    let wpm = ((correct / CHARS_PER_WORD) / minutes).round();
    if wpm > 0.0 {
        wpm as u32
    } else {
        0
    }
}
