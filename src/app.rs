use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::SessionEngine;
use crate::runtime::SessionEvent;
use crate::session::{ScoringResult, Status};

/// The text-entry field the typist writes into. The engine only ever sees
/// its full contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedBuffer {
    text: String,
}

impl TypedBuffer {
    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes the last character; returns false when already empty.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Typing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Headless host: routes terminal events into the session engine and keeps
/// the latest snapshot for the view.
#[derive(Debug)]
pub struct App<R: Rng = StdRng> {
    engine: SessionEngine<R>,
    buffer: TypedBuffer,
    scoring: ScoringResult,
}

impl<R: Rng> App<R> {
    pub fn new(engine: SessionEngine<R>) -> Self {
        let scoring = engine.scoring();
        Self {
            engine,
            buffer: TypedBuffer::default(),
            scoring,
        }
    }

    pub fn engine(&self) -> &SessionEngine<R> {
        &self.engine
    }

    pub fn buffer(&self) -> &TypedBuffer {
        &self.buffer
    }

    pub fn scoring(&self) -> &ScoringResult {
        &self.scoring
    }

    pub fn screen(&self) -> Screen {
        match self.engine.status() {
            Status::Finished => Screen::Results,
            Status::Idle | Status::Running => Screen::Typing,
        }
    }

    /// Starts over with a freshly generated text.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.buffer.clear();
        self.scoring = self.engine.scoring();
    }

    /// Starts over on the same text.
    pub fn retry(&mut self) {
        self.engine.retry();
        self.buffer.clear();
        self.scoring = self.engine.scoring();
    }

    pub fn handle(&mut self, event: SessionEvent) -> Control {
        match event {
            SessionEvent::Tick => {
                self.engine.on_tick();
                if self.engine.status() == Status::Finished {
                    self.scoring = self.engine.scoring();
                }
                Control::Continue
            }
            SessionEvent::Resize => Control::Continue,
            SessionEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit
            }
            KeyCode::Tab => self.restart(),
            _ => match self.screen() {
                Screen::Typing => self.handle_typing_key(key),
                Screen::Results => match key.code {
                    KeyCode::Char('r') => self.retry(),
                    KeyCode::Char('n') => self.restart(),
                    _ => {}
                },
            },
        }
        Control::Continue
    }

    fn handle_typing_key(&mut self, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Char(c) => {
                self.buffer.push(c);
                true
            }
            KeyCode::Backspace => self.buffer.backspace(),
            _ => false,
        };

        if changed {
            self.scoring = self.engine.on_input_changed(self.buffer.as_str());
        }
    }
}
