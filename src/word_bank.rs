use include_dir::{include_dir, Dir};
use serde::Deserialize;

use crate::config::HandMode;
use crate::error::{Error, Result};

static BANK_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/banks");

/// A static list of practice words for one hand mode.
#[derive(Deserialize, Clone, Debug)]
pub struct WordBank {
    pub name: String,
    pub words: Vec<String>,
}

impl WordBank {
    pub fn for_hand(hand_mode: HandMode) -> Result<Self> {
        read_bank_from_file(&format!("{hand_mode}.json"))
    }
}

fn read_bank_from_file(file_name: &str) -> Result<WordBank> {
    let bank_error = |reason: &str| Error::WordBank {
        name: file_name.to_string(),
        reason: reason.to_string(),
    };

    let file = BANK_DIR
        .get_file(file_name)
        .ok_or_else(|| bank_error("file not found"))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| bank_error("file is not valid utf-8"))?;

    let bank: WordBank =
        serde_json::from_str(contents).map_err(|e| bank_error(&e.to_string()))?;

    if bank.words.is_empty() {
        return Err(bank_error("no words"));
    }

    log::debug!("loaded word bank '{}' ({} words)", bank.name, bank.words.len());
    Ok(bank)
}
