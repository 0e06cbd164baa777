use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ChallengeType, Configuration};
use crate::error::Result;
use crate::scoring;
use crate::session::{FinalResult, ScoringResult, SessionState, Status, TickResult};
use crate::word_bank::WordBank;
use crate::word_generator::WordGenerator;

/// Owns one typing session: the configuration, the challenge text and the
/// running counters. Driven by input changes and one tick per second.
#[derive(Debug)]
pub struct SessionEngine<R: Rng = StdRng> {
    config: Configuration,
    generator: WordGenerator,
    rng: R,
    prompt: String,
    text: Vec<char>,
    typed: Vec<char>,
    state: SessionState,
    wpm: u32,
    timer_armed: bool,
    final_result: Option<FinalResult>,
}

impl SessionEngine<StdRng> {
    pub fn new(config: Configuration) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> SessionEngine<R> {
    pub fn with_rng(config: Configuration, rng: R) -> Result<Self> {
        config.validate()?;
        let generator = WordGenerator::new(WordBank::for_hand(config.hand_mode)?);
        Self::with_generator(config, generator, rng)
    }

    /// Builds an engine that draws from a caller-supplied word list instead of
    /// the bank matching `config.hand_mode`.
    pub fn with_generator(config: Configuration, generator: WordGenerator, rng: R) -> Result<Self> {
        config.validate()?;
        let mut engine = Self {
            config,
            generator,
            rng,
            prompt: String::new(),
            text: Vec::new(),
            typed: Vec::new(),
            state: SessionState::default(),
            wpm: 0,
            timer_armed: false,
            final_result: None,
        };
        engine.reset();
        Ok(engine)
    }

    /// Replaces the configuration and starts a fresh idle session with it.
    pub fn configure(&mut self, config: Configuration) -> Result<()> {
        if let Err(e) = config.validate() {
            log::warn!("rejected configuration {config:?}: {e}");
            return Err(e);
        }
        if config.hand_mode != self.config.hand_mode {
            self.generator = WordGenerator::new(WordBank::for_hand(config.hand_mode)?);
        }
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Draws a new challenge text for the current configuration. The session
    /// keeps its text until `reset`.
    pub fn new_challenge(&mut self) -> String {
        self.generator.generate_for(&self.config, &mut self.rng)
    }

    pub fn reset(&mut self) -> SessionState {
        self.clear_session();
        self.prompt = self.new_challenge();
        self.text = self.prompt.chars().collect();
        log::debug!(
            "new {} session ({} {}, {} chars)",
            self.config.hand_mode,
            self.config.challenge_length,
            self.config.challenge_type,
            self.text.len()
        );
        self.state
    }

    /// Like `reset`, but the typist gets the same text again.
    pub fn retry(&mut self) -> SessionState {
        self.clear_session();
        log::debug!("retrying session ({} chars)", self.text.len());
        self.state
    }

    fn clear_session(&mut self) {
        self.timer_armed = false;
        self.state = SessionState::default();
        self.typed.clear();
        self.wpm = 0;
        self.final_result = None;
    }

    /// Scores the full current contents of the input field.
    pub fn on_input_changed(&mut self, typed_text: &str) -> ScoringResult {
        match self.state.status {
            Status::Finished => {
                log::trace!("ignoring input after finish");
                return self.scoring();
            }
            Status::Idle => {
                self.state.status = Status::Running;
                self.timer_armed = true;
                log::debug!("session started");
            }
            Status::Running => {}
        }

        self.typed = typed_text.chars().take(self.text.len()).collect();
        self.state.typed_length = self.typed.len();
        self.state.error_count = scoring::count_errors(&self.text, &self.typed);
        log::trace!(
            "typed {}/{} chars, {} errors",
            self.state.typed_length,
            self.text.len(),
            self.state.error_count
        );

        if self.config.challenge_type == ChallengeType::Words
            && self.state.typed_length == self.text.len()
        {
            self.finish();
        }

        self.scoring()
    }

    /// Advances the clock by one second. Returns `None` when no timer is
    /// armed, so ticks delivered before the first input, after finishing or
    /// after a reset have no effect.
    pub fn on_tick(&mut self) -> Option<TickResult> {
        if !self.timer_armed {
            log::trace!("tick ignored, timer not armed");
            return None;
        }

        self.state.elapsed_seconds += 1;
        if self.state.typed_length > 0 {
            self.wpm = scoring::wpm(
                self.state.typed_length,
                self.state.error_count,
                self.state.elapsed_seconds,
            );
        }

        if self.config.challenge_type == ChallengeType::Time
            && self.state.elapsed_seconds >= u64::from(self.config.challenge_length)
        {
            self.finish();
        }

        Some(TickResult {
            elapsed_seconds: self.state.elapsed_seconds,
            wpm: self.wpm,
            display_countdown: self.display_timer(),
            status: self.state.status,
        })
    }

    /// Stops the timer and freezes the session. Repeated calls return the
    /// same result.
    pub fn finish(&mut self) -> FinalResult {
        if let Some(result) = self.final_result {
            return result;
        }

        self.timer_armed = false;
        self.state.status = Status::Finished;
        let result = FinalResult {
            wpm: self.wpm,
            final_accuracy: self.accuracy(),
            elapsed_seconds: self.state.elapsed_seconds,
            correct_chars: self.state.correct_chars(),
            total_chars: self.state.typed_length,
        };
        log::info!(
            "session finished: {} wpm, {}% accuracy, {}s, {}/{} chars",
            result.wpm,
            result.final_accuracy,
            result.elapsed_seconds,
            result.correct_chars,
            result.total_chars
        );
        self.final_result = Some(result);
        result
    }

    pub fn scoring(&self) -> ScoringResult {
        let typed_length = self.state.typed_length;
        ScoringResult {
            per_character: scoring::classify(&self.text, &self.typed),
            cursor_index: (typed_length < self.text.len()).then_some(typed_length),
            live_accuracy: self.accuracy(),
            status: self.state.status,
        }
    }

    /// Seconds left in time mode, seconds elapsed in words mode.
    pub fn display_timer(&self) -> u64 {
        match self.config.challenge_type {
            ChallengeType::Time => {
                u64::from(self.config.challenge_length).saturating_sub(self.state.elapsed_seconds)
            }
            ChallengeType::Words => self.state.elapsed_seconds,
        }
    }

    pub fn accuracy(&self) -> u32 {
        scoring::accuracy(self.state.typed_length, self.state.error_count)
    }

    pub fn live_wpm(&self) -> u32 {
        self.wpm
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.prompt
    }

    pub fn final_result(&self) -> Option<FinalResult> {
        self.final_result
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HandMode;
    use crate::error::Error;
    use crate::scoring::CharState;
    use assert_matches::assert_matches;
    use rand::rngs::mock::StepRng;

    fn single_word_engine(word: &str, challenge_type: ChallengeType, length: u32) -> SessionEngine<StepRng> {
        let generator = WordGenerator::new(WordBank {
            name: "fixed".into(),
            words: vec![word.to_string()],
        });
        let config = Configuration::new(HandMode::Both, challenge_type, length).unwrap();
        SessionEngine::with_generator(config, generator, StepRng::new(0, 0)).unwrap()
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = single_word_engine("data", ChallengeType::Words, 1);
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.text(), "data");
        assert_eq!(engine.accuracy(), 100);
        assert_eq!(engine.live_wpm(), 0);
        assert!(!engine.is_timer_armed());
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = Configuration {
            challenge_length: 0,
            ..Configuration::default()
        };
        assert_matches!(SessionEngine::new(config), Err(Error::InvalidConfig(_)));
    }

    #[test]
    fn test_configure_rejects_without_clamping() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 2);
        let bad = Configuration {
            challenge_length: 0,
            ..*engine.config()
        };
        assert!(engine.configure(bad).is_err());
        assert_eq!(engine.config().challenge_length, 2);
    }

    #[test]
    fn test_configure_switches_bank_and_resets() {
        let config = Configuration::new(HandMode::Both, ChallengeType::Words, 3).unwrap();
        let mut engine = SessionEngine::with_rng(config, StepRng::new(0, 0)).unwrap();
        assert_eq!(engine.text(), "terminal terminal terminal");

        engine.on_input_changed("t");
        let left = Configuration::new(HandMode::Left, ChallengeType::Words, 2).unwrap();
        engine.configure(left).unwrap();
        assert_eq!(engine.text(), "we we");
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.state().typed_length, 0);
    }

    #[test]
    fn test_first_input_starts_session() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 1);
        let result = engine.on_input_changed("d");
        assert_eq!(result.status, Status::Running);
        assert!(engine.is_timer_armed());
        assert_eq!(result.cursor_index, Some(1));
        assert_eq!(result.live_accuracy, 100);
    }

    #[test]
    fn test_exact_word_finishes_perfect() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 1);
        for prefix in ["d", "da", "dat"] {
            engine.on_input_changed(prefix);
        }
        let result = engine.on_input_changed("data");
        assert_eq!(result.status, Status::Finished);
        assert_eq!(result.cursor_index, None);

        let summary = engine.final_result().unwrap();
        assert_eq!(summary.final_accuracy, 100);
        assert_eq!(summary.total_chars, 4);
        assert_eq!(summary.correct_chars, 4);
    }

    #[test]
    fn test_wrong_last_char_still_finishes() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 1);
        engine.on_input_changed("dat");
        let result = engine.on_input_changed("datx");
        assert_eq!(result.status, Status::Finished);
        assert_eq!(result.per_character[3], CharState::Incorrect);
        assert_eq!(engine.state().error_count, 1);

        let summary = engine.final_result().unwrap();
        assert_eq!(summary.final_accuracy, 75);
        assert_eq!(summary.correct_chars, 3);
        assert_eq!(summary.total_chars, 4);
    }

    #[test]
    fn test_corrected_char_uncounts_error() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 2);
        engine.on_input_changed("dx");
        assert_eq!(engine.state().error_count, 1);
        engine.on_input_changed("d");
        assert_eq!(engine.state().error_count, 0);
        let result = engine.on_input_changed("da");
        assert_eq!(engine.state().error_count, 0);
        assert_eq!(result.live_accuracy, 100);
    }

    #[test]
    fn test_overflow_input_is_clipped() {
        let mut engine = single_word_engine("ab", ChallengeType::Time, 10);
        // 200 words of "ab" in time mode
        let long = "ab ".repeat(300);
        engine.on_input_changed(&long);
        let state = engine.state();
        assert_eq!(state.typed_length, engine.text().chars().count());
        assert!(state.error_count <= state.typed_length);
    }

    #[test]
    fn test_input_after_finish_is_ignored() {
        let mut engine = single_word_engine("hi", ChallengeType::Words, 1);
        engine.on_input_changed("hi");
        let frozen = engine.state();
        let result = engine.on_input_changed("h");
        assert_eq!(result.status, Status::Finished);
        assert_eq!(engine.state(), frozen);
    }

    #[test]
    fn test_tick_before_input_is_ignored() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 1);
        assert_eq!(engine.on_tick(), None);
        assert_eq!(engine.state().elapsed_seconds, 0);
    }

    #[test]
    fn test_tick_computes_wpm() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 5);
        engine.on_input_changed("data ");
        let tick = engine.on_tick().unwrap();
        assert_eq!(tick.elapsed_seconds, 1);
        // 5 correct chars in 1 second = 60 wpm
        assert_eq!(tick.wpm, 60);
        assert_eq!(tick.display_countdown, 1);
        assert_eq!(tick.status, Status::Running);

        let tick = engine.on_tick().unwrap();
        assert_eq!(tick.wpm, 30);
        assert_eq!(tick.display_countdown, 2);
    }

    #[test]
    fn test_tick_without_typed_chars_keeps_wpm_zero() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 1);
        engine.on_input_changed("");
        let tick = engine.on_tick().unwrap();
        assert_eq!(tick.wpm, 0);
    }

    #[test]
    fn test_time_mode_finishes_without_input() {
        let mut engine = single_word_engine("data", ChallengeType::Time, 5);
        engine.on_input_changed("");
        assert_eq!(engine.display_timer(), 5);

        for expected_left in [4, 3, 2, 1] {
            let tick = engine.on_tick().unwrap();
            assert_eq!(tick.display_countdown, expected_left);
            assert_eq!(tick.status, Status::Running);
        }
        let tick = engine.on_tick().unwrap();
        assert_eq!(tick.display_countdown, 0);
        assert_eq!(tick.status, Status::Finished);

        let summary = engine.final_result().unwrap();
        assert_eq!(summary.wpm, 0);
        assert_eq!(summary.total_chars, 0);
        assert_eq!(summary.final_accuracy, 100);
        assert_eq!(summary.elapsed_seconds, 5);

        assert_eq!(engine.on_tick(), None);
    }

    #[test]
    fn test_time_mode_ignores_full_text() {
        let mut engine = single_word_engine("a", ChallengeType::Time, 3);
        let text = engine.text().to_string();
        let result = engine.on_input_changed(&text);
        assert_eq!(result.status, Status::Running);
    }

    #[test]
    fn test_reset_mid_session_cancels_timer() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 3);
        engine.on_input_changed("da");
        engine.on_tick();
        engine.on_tick();

        let state = engine.reset();
        assert_eq!(state, SessionState::default());
        assert!(!engine.is_timer_armed());
        assert_eq!(engine.on_tick(), None);

        engine.on_input_changed("d");
        for expected in 1..=3 {
            let tick = engine.on_tick().unwrap();
            assert_eq!(tick.elapsed_seconds, expected);
        }
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 1);
        engine.on_input_changed("d");
        engine.reset();
        engine.reset();
        assert_eq!(engine.status(), Status::Idle);
        assert!(!engine.is_timer_armed());
        assert_eq!(engine.final_result(), None);
    }

    #[test]
    fn test_retry_keeps_text_and_clears_state() {
        let config = Configuration::new(HandMode::Both, ChallengeType::Words, 3).unwrap();
        let mut engine = SessionEngine::with_rng(config, rand::rngs::StdRng::seed_from_u64(5)).unwrap();
        let text = engine.text().to_string();
        engine.on_input_changed("xyz");
        engine.on_tick();
        engine.finish();

        let state = engine.retry();
        assert_eq!(state, SessionState::default());
        assert_eq!(engine.text(), text);
        assert!(!engine.is_timer_armed());
        assert_eq!(engine.final_result(), None);
        assert_eq!(engine.live_wpm(), 0);
        assert_eq!(engine.on_tick(), None);
    }

    #[test]
    fn test_finish_is_terminal_and_stable() {
        let mut engine = single_word_engine("data", ChallengeType::Words, 2);
        engine.on_input_changed("da");
        engine.on_tick();
        let first = engine.finish();
        engine.on_input_changed("data data");
        assert_eq!(engine.finish(), first);
        assert_eq!(engine.on_tick(), None);
    }

    #[test]
    fn test_final_accuracy_matches_live_snapshot() {
        let mut engine = single_word_engine("abc", ChallengeType::Words, 2);
        let live = engine.on_input_changed("axc b").live_accuracy;
        assert_eq!(engine.finish().final_accuracy, live);
    }

    #[test]
    fn test_new_challenge_does_not_replace_text() {
        let config = Configuration::new(HandMode::Right, ChallengeType::Words, 4).unwrap();
        let mut engine = SessionEngine::with_rng(config, StepRng::new(0, 0)).unwrap();
        let generated = engine.new_challenge();
        assert_eq!(generated.split(' ').count(), 4);
        assert_eq!(engine.text(), "you you you you");
    }
}
