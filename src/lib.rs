// Library surface for the session engine, the headless host and tests.
// Drawing lives in the binary (main.rs + ui.rs).
pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod word_bank;
pub mod word_generator;

pub use config::{ChallengeType, Configuration, HandMode};
pub use engine::SessionEngine;
pub use error::{Error, Result};
pub use session::{FinalResult, ScoringResult, SessionState, Status, TickResult};
