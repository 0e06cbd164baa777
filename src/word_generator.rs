use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Configuration;
use crate::word_bank::WordBank;

/// Builds challenge text by drawing words from a bank.
#[derive(Debug, Clone)]
pub struct WordGenerator {
    bank: WordBank,
}

impl WordGenerator {
    pub fn new(bank: WordBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    /// Draws `count` words uniformly with replacement and joins them with
    /// single spaces.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> String {
        (0..count)
            .filter_map(|_| self.bank.words.choose(&mut *rng))
            .join(" ")
    }

    /// Generates the text a session with `config` should present.
    pub fn generate_for<R: Rng + ?Sized>(&self, config: &Configuration, rng: &mut R) -> String {
        self.generate(config.word_count(), rng)
    }
}
