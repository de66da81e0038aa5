//! The terminal-side input collaborator.
//!
//! The engine consumes logical key events from a [`KeySource`]: a blocking
//! read plus a bounded poll used to disambiguate prefix sequences. Signal
//! and end-of-input conditions arrive in-band as [`KeyInput`] variants.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::keys::Key;

/// One unit of input from the terminal collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A decoded key press.
    Key(Key),
    /// An interrupt signal (e.g. Ctrl-C delivered by the terminal layer).
    Interrupt,
    /// The terminal was resized; the engine ignores this, redraw is the
    /// caller's concern.
    Resize(u16, u16),
    /// End of input. Non-retriable.
    Eof,
}

/// Blocking source of key events.
pub trait KeySource {
    /// Blocks until the next input unit is available.
    fn read_key(&mut self) -> io::Result<KeyInput>;

    /// Waits up to `timeout` for the next input unit. `Ok(None)` means the
    /// timeout expired, which the engine uses to commit or discard an
    /// ambiguous prefix.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>>;
}

/// A pre-recorded key script.
///
/// Used by tests and by hosts that replay macros. `read_key` yields `Eof`
/// once the script is exhausted; `poll_key` reports a timeout instead,
/// which makes ambiguity commits deterministic under test.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    queue: VecDeque<KeyInput>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_inputs<I: IntoIterator<Item = KeyInput>>(inputs: I) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
        }
    }

    pub fn push(&mut self, input: KeyInput) -> &mut Self {
        self.queue.push_back(input);
        self
    }

    pub fn push_key(&mut self, key: Key) -> &mut Self {
        self.push(KeyInput::Key(key))
    }

    /// Appends one plain character key per char of `text`.
    pub fn push_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.push_key(Key::char(c));
        }
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<KeyInput> {
        Ok(self.queue.pop_front().unwrap_or(KeyInput::Eof))
    }

    fn poll_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyInput>> {
        Ok(self.queue.pop_front())
    }
}
