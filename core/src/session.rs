//! Key event handling for one input session.
//!
//! `Session` sits between the platform text service and the `Engine`. It
//! turns key events into engine calls, keeps the paginated candidate list in
//! sync with the buffer, and reports committed text back to the platform.
//!
//! Key conventions follow the desktop text service: row digits select a
//! candidate on the current page, space commits the first candidate,
//! backspace edits the code, and the mode key switches between literal echo
//! and transcription.

use crate::candidate::CandidateList;
use crate::engine::{Engine, Mode};

/// Key event types that the session can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character input. Keypad digits arrive here too, since tone codes
    /// (`T35`) need digits inside the buffer.
    Char(char),
    /// Space key (commit the first candidate)
    Space,
    /// Backspace key
    Backspace,
    /// Escape key (drop the composition)
    Escape,
    /// Row digit 1-9: select a candidate on the current page
    Select(u8),
    /// Candidate page up
    PageUp,
    /// Candidate page down
    PageDown,
    /// Switch between literal and transcription mode
    ToggleMode,
}

/// Result of processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled; the composition may have changed
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
    /// Text to insert into the application; the composition is now empty
    Commit(String),
}

/// Session state: the engine plus the candidate page shown to the user.
#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    candidates: CandidateList,
}

impl Session {
    /// Wrap an engine; the page size comes from the engine's config.
    pub fn new(engine: Engine) -> Self {
        let page_size = engine.config().page_size;
        Self {
            engine,
            candidates: CandidateList::with_page_size(page_size),
        }
    }

    /// The code typed so far.
    pub fn preedit(&self) -> &str {
        self.engine.buffer()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Whether a composition is in progress.
    pub fn is_composing(&self) -> bool {
        !self.engine.buffer().is_empty()
    }

    /// Drop the composition and the candidate list.
    pub fn reset(&mut self) {
        self.engine.clear_buffer();
        self.candidates.clear();
    }

    /// Process a key event and update session state.
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        match (self.engine.mode(), key) {
            (_, KeyEvent::ToggleMode) => {
                self.engine.toggle_mode();
                self.candidates.clear();
                KeyResult::Handled
            }
            (Mode::Literal, KeyEvent::Char(c)) => self.echo(c),
            (Mode::Literal, KeyEvent::Space) => self.echo(' '),
            (Mode::Literal, _) => KeyResult::NotHandled,

            (Mode::Transliterate, KeyEvent::Char(' ') | KeyEvent::Space) => {
                if self.candidates.is_empty() {
                    KeyResult::NotHandled
                } else {
                    self.commit(0)
                }
            }
            (Mode::Transliterate, KeyEvent::Char(c)) => {
                if !self.engine.input_char(c) {
                    return KeyResult::NotHandled;
                }
                self.refresh();
                KeyResult::Handled
            }
            (Mode::Transliterate, KeyEvent::Backspace) => {
                if !self.is_composing() {
                    return KeyResult::NotHandled;
                }
                self.engine.delete_last_char();
                self.refresh();
                KeyResult::Handled
            }
            (Mode::Transliterate, KeyEvent::Escape) => {
                if !self.is_composing() {
                    return KeyResult::NotHandled;
                }
                self.reset();
                KeyResult::Handled
            }
            (Mode::Transliterate, KeyEvent::Select(n)) => {
                if !self.is_composing() {
                    return KeyResult::NotHandled;
                }
                let index = usize::from(n)
                    .checked_sub(1)
                    .and_then(|i| self.candidates.global_index(i));
                match index {
                    Some(index) => self.commit(index),
                    None => KeyResult::Handled,
                }
            }
            (Mode::Transliterate, KeyEvent::PageUp) => self.page(CandidateList::page_up),
            (Mode::Transliterate, KeyEvent::PageDown) => self.page(CandidateList::page_down),
        }
    }

    /// Literal mode: hand the character straight back as committed text.
    fn echo(&mut self, c: char) -> KeyResult {
        if !self.engine.input_char(c) {
            return KeyResult::NotHandled;
        }
        let text = self.engine.buffer().to_string();
        self.engine.clear_buffer();
        KeyResult::Commit(text)
    }

    fn page(&mut self, turn: fn(&mut CandidateList) -> bool) -> KeyResult {
        if self.candidates.is_empty() {
            return KeyResult::NotHandled;
        }
        turn(&mut self.candidates);
        KeyResult::Handled
    }

    /// Commit from the list on screen; it is refreshed after every buffer
    /// change, so it matches what the engine would rank.
    fn commit(&mut self, index: usize) -> KeyResult {
        match self.engine.commit_listed(self.candidates.candidates(), index) {
            Some(text) => {
                self.candidates.clear();
                KeyResult::Commit(text)
            }
            None => KeyResult::Handled,
        }
    }

    fn refresh(&mut self) {
        self.candidates.set_candidates(self.engine.candidates());
    }
}
