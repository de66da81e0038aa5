//! Keyline core: a modal line-editing engine for interactive
//! command-line tools.
//!
//! The engine turns a stream of logical key events into buffer mutations
//! through per-mode key tables with longest-unambiguous-prefix resolution,
//! an Emacs-style widget set, a Vi operator+motion command composer, and
//! an incremental history search overlay. Terminal control, rendering,
//! and completion are collaborator concerns: the engine consumes a
//! [`KeySource`] and a [`History`] and exposes a step API
//! ([`LineEditor::feed`]) plus a blocking loop ([`LineEditor::read_line`]).
//!
//! ```
//! use keyline_core::{Key, LineEditor, ReadOutcome, ScriptedKeys};
//!
//! let mut editor = LineEditor::new();
//! let mut keys = ScriptedKeys::new();
//! keys.push_text("hello").push_key(Key::code(keyline_core::KeyCode::Enter));
//! let outcome = editor.read_line(&mut keys).unwrap();
//! assert_eq!(outcome, ReadOutcome::Line("hello".to_string()));
//! ```

pub mod buffer;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod history;
pub mod input;
pub mod keymap;
pub mod keys;
pub mod search;
pub mod vi;
pub mod widgets;

pub use buffer::LineBuffer;
pub use config::{EditMode, EditorConfig, InterruptPolicy};
pub use editor::{CharSearch, Mode, Register, RegisterKind, Registers};
pub use engine::{KeymapId, LineEditor, ReadOutcome};
pub use error::EditError;
pub use history::{History, HistoryConfig, MemoryHistory};
pub use input::{KeyInput, KeySource, ScriptedKeys};
pub use keymap::{Binding, KeyTable, Lookup};
pub use keys::{parse_key, parse_key_sequence, Key, KeyCode, Modifiers};
pub use search::{SearchDirection, SearchStatus};
pub use vi::Operator;
pub use widgets::Widget;
