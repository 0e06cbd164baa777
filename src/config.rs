use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of words generated for timed challenges; large enough that a
/// typist cannot run out before the clock does.
pub const TIME_MODE_WORD_POOL: usize = 200;

pub const DEFAULT_WORD_COUNT: u32 = 50;
pub const DEFAULT_TIME_SECS: u32 = 60;

/// Which hand the practice words are biased towards on a standard layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HandMode {
    Left,
    Right,
    #[default]
    Both,
}

/// Whether a session ends after a number of words or a number of seconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChallengeType {
    #[default]
    Words,
    Time,
}

impl ChallengeType {
    pub fn default_length(&self) -> u32 {
        match self {
            ChallengeType::Words => DEFAULT_WORD_COUNT,
            ChallengeType::Time => DEFAULT_TIME_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub hand_mode: HandMode,
    pub challenge_type: ChallengeType,
    /// Words in `Words` mode, seconds in `Time` mode.
    pub challenge_length: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            hand_mode: HandMode::Both,
            challenge_type: ChallengeType::Words,
            challenge_length: DEFAULT_WORD_COUNT,
        }
    }
}

impl Configuration {
    pub fn new(
        hand_mode: HandMode,
        challenge_type: ChallengeType,
        challenge_length: u32,
    ) -> Result<Self> {
        let config = Self {
            hand_mode,
            challenge_type,
            challenge_length,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.challenge_length == 0 {
            return Err(Error::InvalidConfig(format!(
                "challenge length must be positive for {} mode",
                self.challenge_type
            )));
        }
        Ok(())
    }

    /// How many words the challenge text should contain.
    pub fn word_count(&self) -> usize {
        match self.challenge_type {
            ChallengeType::Words => self.challenge_length as usize,
            ChallengeType::Time => TIME_MODE_WORD_POOL,
        }
    }
}
