use serde::Serialize;

use crate::scoring::CharState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Counters for the session in progress.
///
/// `error_count <= typed_length <= text length` holds after every engine
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionState {
    pub status: Status,
    pub elapsed_seconds: u64,
    pub typed_length: usize,
    pub error_count: usize,
}

impl SessionState {
    pub fn correct_chars(&self) -> usize {
        self.typed_length - self.error_count
    }
}

/// What the view needs to highlight after an input change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringResult {
    pub per_character: Vec<CharState>,
    /// Index of the next character to type, `None` once the text is fully typed.
    pub cursor_index: Option<usize>,
    pub live_accuracy: u32,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickResult {
    pub elapsed_seconds: u64,
    pub wpm: u32,
    /// Seconds remaining in time mode, seconds elapsed otherwise.
    pub display_countdown: u64,
    pub status: Status,
}

/// Summary shown when a session finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalResult {
    pub wpm: u32,
    pub final_accuracy: u32,
    pub elapsed_seconds: u64,
    pub correct_chars: usize,
    pub total_chars: usize,
}
