//! The line editor engine: per-mode key tables, the dispatch loop with
//! ambiguous-prefix timeout handling, widget execution, history
//! navigation, and the accept/interrupt/end-of-input surfaces.
//!
//! The engine is single-threaded and synchronous: it consumes one key
//! event per step and fully applies its effect before the next.

use std::collections::{HashMap, VecDeque};
use std::mem;
use std::time::Duration;

use log::trace;

use crate::buffer::LineBuffer;
use crate::config::{EditMode, EditorConfig, InterruptPolicy};
use crate::editor::{EditorState, Mode};
use crate::error::EditError;
use crate::history::{History, MemoryHistory};
use crate::input::{KeyInput, KeySource};
use crate::keymap::{Binding, KeyTable, Lookup};
use crate::keys::{parse_key_sequence, Key, KeyCode};
use crate::search::{SearchDirection, SearchState};
use crate::vi::Composer;
use crate::widgets::Widget;

/// Identifies one of the engine's key tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeymapId {
    Emacs,
    ViInsert,
    ViMove,
    /// Auxiliary table consulted while an operator is pending.
    ViOper,
    Search,
}

impl KeymapId {
    pub fn name(&self) -> &'static str {
        match self {
            KeymapId::Emacs => "emacs",
            KeymapId::ViInsert => "vi-insert",
            KeymapId::ViMove => "vi-move",
            KeymapId::ViOper => "vi-oper",
            KeymapId::Search => "search",
        }
    }

    pub fn from_name(name: &str) -> Option<KeymapId> {
        match name {
            "emacs" => Some(KeymapId::Emacs),
            "vi-insert" => Some(KeymapId::ViInsert),
            "vi-move" => Some(KeymapId::ViMove),
            "vi-oper" => Some(KeymapId::ViOper),
            "search" => Some(KeymapId::Search),
            _ => None,
        }
    }
}

/// What a line read produced. Interrupt and end-of-input are distinct
/// conditions, never conflated with an accepted (possibly empty) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// The modal line editor.
pub struct LineEditor {
    pub(crate) config: EditorConfig,
    keymaps: HashMap<KeymapId, KeyTable>,
    pub(crate) state: EditorState,
    pub(crate) composer: Composer,
    pub(crate) search: Option<SearchState>,
    pub(crate) history: Box<dyn History>,
    /// Position while walking history with previous/next, plus the line
    /// that was being edited when the walk began.
    history_index: Option<usize>,
    saved_line: Option<LineBuffer>,
    /// Keys accumulated toward a multi-key sequence.
    pending: Vec<Key>,
    /// Keys queued for processing ahead of the input source (macros,
    /// overlay re-dispatch).
    pushback: VecDeque<Key>,
    /// The committed sequence behind the widget currently executing.
    pub(crate) last_keys: Vec<Key>,
}

impl LineEditor {
    pub fn new() -> Self {
        // The default configuration carries no user bindings, so this
        // cannot fail.
        Self::with_config(EditorConfig::default()).unwrap_or_else(|_| unreachable!())
    }

    pub fn with_config(config: EditorConfig) -> Result<Self, EditError> {
        let mut editor = Self {
            keymaps: default_keymaps(),
            state: EditorState::new(initial_mode(config.edit_mode)),
            composer: Composer::Idle,
            search: None,
            history: Box::new(MemoryHistory::new()),
            history_index: None,
            saved_line: None,
            pending: Vec::new(),
            pushback: VecDeque::new(),
            last_keys: Vec::new(),
            config,
        };
        let bindings = editor.config.bindings.clone();
        for (keymap_name, seqs) in &bindings {
            for (seq_spec, widget_name) in seqs {
                editor.rebind(keymap_name, seq_spec, widget_name)?;
            }
        }
        Ok(editor)
    }

    /// Replaces the history collaborator.
    pub fn set_history(&mut self, history: Box<dyn History>) {
        self.history = history;
        self.history_index = None;
        self.saved_line = None;
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    pub fn history_mut(&mut self) -> &mut dyn History {
        self.history.as_mut()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The currently active editing discipline.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Current buffer content.
    pub fn line(&self) -> String {
        self.state.buf.text()
    }

    /// Current cursor offset in characters.
    pub fn cursor(&self) -> usize {
        self.state.buf.cursor()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.state.buf
    }

    /// Returns and clears the bell flag set by locally recovered errors.
    pub fn take_bell(&mut self) -> bool {
        self.state.take_bell()
    }

    /// Binds a sequence in a keymap, replacing any existing binding.
    pub fn bind(&mut self, keymap: KeymapId, seq: &[Key], widget: Widget) {
        if let Some(table) = self.keymaps.get_mut(&keymap) {
            table.bind(seq, Binding::Widget(widget));
        }
    }

    /// Binds a macro: the recorded keys replay through the input queue.
    pub fn bind_macro(&mut self, keymap: KeymapId, seq: &[Key], keys: Vec<Key>) {
        if let Some(table) = self.keymaps.get_mut(&keymap) {
            table.bind(seq, Binding::Macro(keys));
        }
    }

    pub fn unbind(&mut self, keymap: KeymapId, seq: &[Key]) -> Option<Binding> {
        self.keymaps.get_mut(&keymap).and_then(|t| t.unbind(seq))
    }

    /// String-typed rebinding used by configuration data
    /// (`keymap -> sequence -> widget-name`).
    pub fn rebind(
        &mut self,
        keymap_name: &str,
        seq_spec: &str,
        widget_name: &str,
    ) -> Result<(), EditError> {
        let keymap = KeymapId::from_name(keymap_name)
            .ok_or_else(|| EditError::UnknownKeymap(keymap_name.to_string()))?;
        let seq = parse_key_sequence(seq_spec)?;
        let widget = Widget::from_name(widget_name)
            .ok_or_else(|| EditError::UnknownWidget(widget_name.to_string()))?;
        self.bind(keymap, &seq, widget);
        Ok(())
    }

    /// Sequences bound in a keymap, for introspection.
    pub fn bound_keys(&self, keymap: KeymapId) -> Vec<(Vec<Key>, Binding)> {
        self.keymaps
            .get(&keymap)
            .map(|t| t.bound_keys())
            .unwrap_or_default()
    }

    /// True while a partial key sequence is held; the caller should poll
    /// with the ambiguous timeout and call [`flush`](Self::flush) on
    /// expiry instead of blocking indefinitely.
    pub fn has_pending_input(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The configured ambiguous-prefix timeout.
    pub fn ambiguous_timeout(&self) -> Duration {
        Duration::from_millis(self.config.ambiguous_timeout_ms)
    }

    /// Begins a new logical line read: transient state is discarded,
    /// registers and char-search persist.
    pub fn start_line(&mut self) {
        self.state.reset_line(initial_mode(self.config.edit_mode));
        self.composer = Composer::Idle;
        self.search = None;
        self.history_index = None;
        self.saved_line = None;
        self.pending.clear();
        self.pushback.clear();
    }

    /// Feeds one key: resolves it against the active table and applies the
    /// effect. Returns an outcome when the key completed the line.
    pub fn feed(&mut self, key: Key) -> Option<ReadOutcome> {
        self.pushback.push_back(key);
        self.drain()
    }

    /// Commits or discards a held ambiguous sequence; the caller invokes
    /// this when the ambiguous-prefix timeout expires. A sequence with a
    /// bound action commits; a bare prefix is treated as unbound.
    pub fn flush(&mut self) -> Option<ReadOutcome> {
        if self.pending.is_empty() {
            return None;
        }
        let lookup = self.lookup_pending();
        let keys = mem::take(&mut self.pending);
        let outcome = match lookup {
            Some(Lookup::Matched(binding)) | Some(Lookup::MatchedPrefix(binding)) => {
                trace!("resolver: timeout committed {:?}", keys);
                self.last_keys = keys;
                self.apply_binding(binding)
            }
            _ => {
                trace!("resolver: timeout discarded {:?}", keys);
                self.state.ring_bell();
                None
            }
        };
        if outcome.is_some() {
            return outcome;
        }
        self.drain()
    }

    /// Drives a full line read against a key source, handling the
    /// ambiguous-prefix timeout, interrupts, and end-of-input.
    pub fn read_line(&mut self, source: &mut dyn KeySource) -> Result<ReadOutcome, EditError> {
        self.start_line();
        loop {
            let input = if self.has_pending_input() {
                match source.poll_key(self.ambiguous_timeout())? {
                    Some(input) => input,
                    None => {
                        if let Some(outcome) = self.flush() {
                            return Ok(outcome);
                        }
                        continue;
                    }
                }
            } else {
                source.read_key()?
            };
            match input {
                KeyInput::Key(key) => {
                    if let Some(outcome) = self.feed(key) {
                        return Ok(outcome);
                    }
                }
                KeyInput::Interrupt => {
                    if let Some(outcome) = self.interrupt() {
                        return Ok(outcome);
                    }
                }
                KeyInput::Resize(_, _) => {}
                KeyInput::Eof => return Ok(self.end_of_input()),
            }
        }
    }

    /// External interrupt: all transient state is cleared before the event
    /// surfaces (or the line silently restarts, per policy).
    pub fn interrupt(&mut self) -> Option<ReadOutcome> {
        self.pending.clear();
        self.pushback.clear();
        self.composer = Composer::Idle;
        self.search = None;
        self.history_index = None;
        self.saved_line = None;
        self.state
            .reset_interrupted(initial_mode(self.config.edit_mode));
        match self.config.interrupt {
            InterruptPolicy::Surface => Some(ReadOutcome::Interrupted),
            InterruptPolicy::RestartLine => None,
        }
    }

    /// End of input from the terminal collaborator. Never an empty line.
    pub fn end_of_input(&mut self) -> ReadOutcome {
        self.pending.clear();
        self.pushback.clear();
        self.composer = Composer::Idle;
        self.search = None;
        ReadOutcome::Eof
    }

    fn drain(&mut self) -> Option<ReadOutcome> {
        while let Some(key) = self.pushback.pop_front() {
            if let Some(outcome) = self.feed_one(key) {
                return Some(outcome);
            }
        }
        None
    }

    fn active_keymap_id(&self) -> Option<KeymapId> {
        match self.state.mode() {
            Mode::Search => Some(KeymapId::Search),
            Mode::Emacs => Some(KeymapId::Emacs),
            Mode::ViInsert => Some(KeymapId::ViInsert),
            Mode::ViMove => {
                if self.composer.wants_literal() {
                    None
                } else if self.composer.is_pending_op() {
                    Some(KeymapId::ViOper)
                } else {
                    Some(KeymapId::ViMove)
                }
            }
        }
    }

    fn lookup_pending(&self) -> Option<Lookup> {
        let id = self.active_keymap_id()?;
        self.keymaps.get(&id).map(|t| t.lookup(&self.pending))
    }

    fn feed_one(&mut self, key: Key) -> Option<ReadOutcome> {
        // A pending char search or replace consumes the next key
        // literally, bypassing the tables.
        if self.state.mode() == Mode::ViMove && self.composer.wants_literal() {
            self.vi_pending_literal(key);
            return None;
        }
        self.pending.push(key);
        match self.lookup_pending() {
            Some(Lookup::Matched(binding)) => {
                self.last_keys = mem::take(&mut self.pending);
                trace!("resolver: {:?} -> {:?}", self.last_keys, binding);
                self.apply_binding(binding)
            }
            Some(Lookup::MatchedPrefix(_)) | Some(Lookup::Prefix) => {
                trace!("resolver: ambiguous prefix {:?}", self.pending);
                None
            }
            Some(Lookup::Unbound) | None => {
                let keys = mem::take(&mut self.pending);
                if self.state.mode() == Mode::Search {
                    // An editing key exits the overlay and is interpreted
                    // against the displayed buffer.
                    self.search_exit_keep();
                    for (i, k) in keys.into_iter().enumerate() {
                        self.pushback.insert(i, k);
                    }
                } else {
                    trace!("resolver: unbound {:?}", keys);
                    if self.composer.is_pending_op() {
                        self.composer = Composer::Idle;
                        self.state.clear_argument();
                    }
                    self.state.ring_bell();
                }
                None
            }
        }
    }

    fn apply_binding(&mut self, binding: Binding) -> Option<ReadOutcome> {
        match binding {
            Binding::Widget(widget) => self.run_widget(widget),
            Binding::Macro(keys) => {
                for (i, k) in keys.into_iter().enumerate() {
                    self.pushback.insert(i, k);
                }
                None
            }
        }
    }

    pub(crate) fn run_widget(&mut self, widget: Widget) -> Option<ReadOutcome> {
        if self.state.mode() == Mode::Search {
            return self.search_widget(widget);
        }
        match widget {
            Widget::AcceptLine => self.accept_line(),
            Widget::Abort => {
                self.abort_line();
                None
            }
            Widget::DigitArgument => {
                if let Some(d) = self
                    .last_keys
                    .last()
                    .and_then(|k| k.text_char())
                    .and_then(|c| c.to_digit(10))
                {
                    self.state.push_digit(d);
                }
                None
            }
            Widget::PreviousHistory => {
                self.history_walk(true);
                None
            }
            Widget::NextHistory => {
                self.history_walk(false);
                None
            }
            Widget::HistorySearchBackward => {
                self.start_search(SearchDirection::Backward);
                None
            }
            Widget::HistorySearchForward => {
                self.start_search(SearchDirection::Forward);
                None
            }
            _ => {
                if self.state.mode() == Mode::ViMove {
                    self.vi_widget(widget);
                } else {
                    self.insert_widget(widget);
                }
                None
            }
        }
    }

    /// Baseline widget execution for the insert-style modes.
    fn insert_widget(&mut self, widget: Widget) {
        let count = self.state.take_count();
        match widget {
            Widget::SelfInsert => {
                if let Some(c) = self.last_keys.last().and_then(|k| k.text_char()) {
                    self.state.insert_text(&c.to_string(), count);
                }
            }
            Widget::ForwardChar => self.state.forward_char(count),
            Widget::BackwardChar => self.state.backward_char(count),
            Widget::ForwardWord => self.state.forward_word(count),
            Widget::BackwardWord => self.state.backward_word(count),
            Widget::BeginningOfLine => self.state.buf.set_cursor(0),
            Widget::EndOfLine => {
                let end = self.state.buf.len();
                self.state.buf.set_cursor(end);
            }
            Widget::DeleteChar => self.state.delete_char(count),
            Widget::BackwardDeleteChar => self.state.backward_delete_char(count),
            Widget::KillLine => self.state.kill_line(),
            Widget::BackwardKillLine => self.state.backward_kill_line(),
            Widget::KillWord => self.state.kill_word(count),
            Widget::BackwardKillWord => self.state.backward_kill_word(count),
            Widget::Yank => self.state.yank(count),
            Widget::TransposeChars => self.state.transpose_chars(count),
            Widget::ToggleCase => self.state.toggle_case(count),
            Widget::UpcaseWord => self.state.upcase_word(count),
            Widget::DowncaseWord => self.state.downcase_word(count),
            Widget::CapitalizeWord => self.state.capitalize_word(count),
            Widget::ViCmdMode => {
                // Escape from insert commits the text and steps back one
                // column, standard vi boundary behavior.
                self.composer = Composer::Idle;
                self.state.clear_argument();
                if self.state.buf.cursor() > 0 {
                    self.state.backward_char(1);
                }
                self.state.set_mode(Mode::ViMove);
            }
            _ => self.state.ring_bell(),
        }
    }

    pub(crate) fn accept_line(&mut self) -> Option<ReadOutcome> {
        let text = self.state.buf.text();
        self.composer = Composer::Idle;
        self.state.clear_argument();
        self.history_index = None;
        self.saved_line = None;
        if self.config.auto_add_history && !text.trim().is_empty() {
            self.history.add(&text);
        }
        Some(ReadOutcome::Line(text))
    }

    /// Abandons the current line content and any composition in flight.
    fn abort_line(&mut self) {
        self.pending.clear();
        self.composer = Composer::Idle;
        self.state.clear_argument();
        self.state.buf.clear();
        self.history_index = None;
        self.saved_line = None;
        self.state.ring_bell();
    }

    /// Walks history toward older (`true`) or newer entries, recalling the
    /// entry into the buffer with the cursor at its end. Walking past the
    /// newest entry restores the line that was being edited.
    fn history_walk(&mut self, older: bool) {
        let count = self.state.take_count();
        for _ in 0..count {
            if older {
                let next = match self.history_index {
                    None => {
                        let Some(last) = self.history.last_index() else {
                            self.state.ring_bell();
                            break;
                        };
                        self.saved_line = Some(self.state.buf.clone());
                        last
                    }
                    Some(0) => {
                        self.state.ring_bell();
                        break;
                    }
                    Some(i) => i - 1,
                };
                self.history_index = Some(next);
                if let Some(entry) = self.history.get(next) {
                    self.state.buf = LineBuffer::from_str(entry);
                }
            } else {
                match self.history_index {
                    None => {
                        self.state.ring_bell();
                        break;
                    }
                    Some(i) => {
                        if self.history.last_index().is_some_and(|last| i < last) {
                            self.history_index = Some(i + 1);
                            if let Some(entry) = self.history.get(i + 1) {
                                self.state.buf = LineBuffer::from_str(entry);
                            }
                        } else {
                            self.history_index = None;
                            self.state.buf =
                                self.saved_line.take().unwrap_or_default();
                        }
                    }
                }
            }
        }
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_mode(edit_mode: EditMode) -> Mode {
    match edit_mode {
        EditMode::Emacs => Mode::Emacs,
        EditMode::Vi => Mode::ViInsert,
    }
}

fn default_keymaps() -> HashMap<KeymapId, KeyTable> {
    let mut keymaps = HashMap::new();
    keymaps.insert(KeymapId::Emacs, emacs_keymap());
    keymaps.insert(KeymapId::ViInsert, vi_insert_keymap());
    keymaps.insert(KeymapId::ViMove, vi_move_keymap());
    keymaps.insert(KeymapId::ViOper, vi_oper_keymap());
    keymaps.insert(KeymapId::Search, search_keymap());
    keymaps
}

fn emacs_keymap() -> KeyTable {
    use Widget::*;
    let mut t = KeyTable::new();
    t.set_fallback(Some(Binding::Widget(SelfInsert)));
    t.bind_widget(BeginningOfLine, &[&[Key::ctrl('a')], &[Key::code(KeyCode::Home)]]);
    t.bind_widget(EndOfLine, &[&[Key::ctrl('e')], &[Key::code(KeyCode::End)]]);
    t.bind_widget(ForwardChar, &[&[Key::ctrl('f')], &[Key::code(KeyCode::Right)]]);
    t.bind_widget(BackwardChar, &[&[Key::ctrl('b')], &[Key::code(KeyCode::Left)]]);
    t.bind_widget(
        ForwardWord,
        &[&[Key::alt('f')], &[Key::new(KeyCode::Right, crate::keys::Modifiers::CTRL)]],
    );
    t.bind_widget(
        BackwardWord,
        &[&[Key::alt('b')], &[Key::new(KeyCode::Left, crate::keys::Modifiers::CTRL)]],
    );
    t.bind_widget(
        BackwardDeleteChar,
        &[&[Key::code(KeyCode::Backspace)], &[Key::ctrl('h')]],
    );
    t.bind_widget(DeleteChar, &[&[Key::code(KeyCode::Delete)], &[Key::ctrl('d')]]);
    t.bind_widget(
        AcceptLine,
        &[&[Key::code(KeyCode::Enter)], &[Key::ctrl('j')], &[Key::ctrl('m')]],
    );
    t.bind_widget(KillLine, &[&[Key::ctrl('k')]]);
    t.bind_widget(BackwardKillLine, &[&[Key::ctrl('u')]]);
    t.bind_widget(
        BackwardKillWord,
        &[&[Key::ctrl('w')], &[Key::new(KeyCode::Backspace, crate::keys::Modifiers::ALT)]],
    );
    t.bind_widget(KillWord, &[&[Key::alt('d')]]);
    t.bind_widget(Yank, &[&[Key::ctrl('y')]]);
    t.bind_widget(TransposeChars, &[&[Key::ctrl('t')]]);
    t.bind_widget(UpcaseWord, &[&[Key::alt('u')]]);
    t.bind_widget(DowncaseWord, &[&[Key::alt('l')]]);
    t.bind_widget(CapitalizeWord, &[&[Key::alt('c')]]);
    t.bind_widget(PreviousHistory, &[&[Key::code(KeyCode::Up)], &[Key::ctrl('p')]]);
    t.bind_widget(NextHistory, &[&[Key::code(KeyCode::Down)], &[Key::ctrl('n')]]);
    t.bind_widget(HistorySearchBackward, &[&[Key::ctrl('r')]]);
    t.bind_widget(HistorySearchForward, &[&[Key::ctrl('s')]]);
    t.bind_widget(Abort, &[&[Key::ctrl('g')]]);
    for d in '0'..='9' {
        t.bind(&[Key::alt(d)], Binding::Widget(DigitArgument));
    }
    t
}

fn vi_insert_keymap() -> KeyTable {
    use Widget::*;
    let mut t = KeyTable::new();
    t.set_fallback(Some(Binding::Widget(SelfInsert)));
    t.bind_widget(ViCmdMode, &[&[Key::code(KeyCode::Esc)]]);
    t.bind_widget(
        AcceptLine,
        &[&[Key::code(KeyCode::Enter)], &[Key::ctrl('j')], &[Key::ctrl('m')]],
    );
    t.bind_widget(
        BackwardDeleteChar,
        &[&[Key::code(KeyCode::Backspace)], &[Key::ctrl('h')]],
    );
    t.bind_widget(DeleteChar, &[&[Key::code(KeyCode::Delete)]]);
    t.bind_widget(BackwardKillWord, &[&[Key::ctrl('w')]]);
    t.bind_widget(BackwardKillLine, &[&[Key::ctrl('u')]]);
    t.bind_widget(ForwardChar, &[&[Key::code(KeyCode::Right)]]);
    t.bind_widget(BackwardChar, &[&[Key::code(KeyCode::Left)]]);
    t.bind_widget(PreviousHistory, &[&[Key::code(KeyCode::Up)]]);
    t.bind_widget(NextHistory, &[&[Key::code(KeyCode::Down)]]);
    t.bind_widget(HistorySearchBackward, &[&[Key::ctrl('r')]]);
    t.bind_widget(HistorySearchForward, &[&[Key::ctrl('s')]]);
    t.bind_widget(Abort, &[&[Key::ctrl('g')]]);
    t
}

/// Motions shared between the move-mode table and the pending-operator
/// table.
fn bind_vi_motions(t: &mut KeyTable) {
    use Widget::*;
    t.bind_widget(
        BackwardChar,
        &[
            &[Key::char('h')],
            &[Key::code(KeyCode::Left)],
            &[Key::ctrl('h')],
            &[Key::code(KeyCode::Backspace)],
        ],
    );
    t.bind_widget(
        ForwardChar,
        &[&[Key::char('l')], &[Key::code(KeyCode::Right)], &[Key::char(' ')]],
    );
    t.bind_widget(ViDigitOrBeginningOfLine, &[&[Key::char('0')]]);
    for d in '1'..='9' {
        t.bind(&[Key::char(d)], Binding::Widget(DigitArgument));
    }
    t.bind_widget(ViFirstNonBlank, &[&[Key::char('^')]]);
    t.bind_widget(EndOfLine, &[&[Key::char('$')], &[Key::code(KeyCode::End)]]);
    t.bind_widget(ViForwardWord, &[&[Key::char('w')]]);
    t.bind_widget(ViBackwardWord, &[&[Key::char('b')]]);
    t.bind_widget(ViEndWord, &[&[Key::char('e')]]);
    t.bind_widget(ViFindChar, &[&[Key::char('f')]]);
    t.bind_widget(ViFindCharBackward, &[&[Key::char('F')]]);
    t.bind_widget(ViTillChar, &[&[Key::char('t')]]);
    t.bind_widget(ViTillCharBackward, &[&[Key::char('T')]]);
    t.bind_widget(ViRepeatCharSearch, &[&[Key::char(';')]]);
    t.bind_widget(ViReverseCharSearch, &[&[Key::char(',')]]);
    t.bind_widget(ViMatchBracket, &[&[Key::char('%')]]);
    t.bind_widget(ViDelete, &[&[Key::char('d')]]);
    t.bind_widget(ViChange, &[&[Key::char('c')]]);
    t.bind_widget(ViYank, &[&[Key::char('y')]]);
    t.bind_widget(ViCmdMode, &[&[Key::code(KeyCode::Esc)]]);
}

fn vi_move_keymap() -> KeyTable {
    use Widget::*;
    let mut t = KeyTable::new();
    bind_vi_motions(&mut t);
    t.bind_widget(ViDeleteToEol, &[&[Key::char('D')]]);
    t.bind_widget(ViChangeToEol, &[&[Key::char('C')]]);
    t.bind_widget(ViChangeWholeLine, &[&[Key::char('S')]]);
    t.bind_widget(ViYankWholeLine, &[&[Key::char('Y')]]);
    t.bind_widget(ViDeleteChar, &[&[Key::char('x')]]);
    t.bind_widget(ViBackwardDeleteChar, &[&[Key::char('X')]]);
    t.bind_widget(ViSubstitute, &[&[Key::char('s')]]);
    t.bind_widget(ViReplaceChars, &[&[Key::char('r')]]);
    t.bind_widget(ToggleCase, &[&[Key::char('~')]]);
    t.bind_widget(ViPutAfter, &[&[Key::char('p')]]);
    t.bind_widget(ViPutBefore, &[&[Key::char('P')]]);
    t.bind_widget(ViInsert, &[&[Key::char('i')]]);
    t.bind_widget(ViInsertBol, &[&[Key::char('I')]]);
    t.bind_widget(ViAppend, &[&[Key::char('a')]]);
    t.bind_widget(ViAppendEol, &[&[Key::char('A')]]);
    t.bind_widget(
        PreviousHistory,
        &[&[Key::char('k')], &[Key::code(KeyCode::Up)], &[Key::ctrl('p')]],
    );
    t.bind_widget(
        NextHistory,
        &[&[Key::char('j')], &[Key::code(KeyCode::Down)], &[Key::ctrl('n')]],
    );
    t.bind_widget(
        AcceptLine,
        &[&[Key::code(KeyCode::Enter)], &[Key::ctrl('j')], &[Key::ctrl('m')]],
    );
    t.bind_widget(KillLine, &[&[Key::ctrl('k')]]);
    t.bind_widget(BackwardKillLine, &[&[Key::ctrl('u')]]);
    t.bind_widget(BackwardKillWord, &[&[Key::ctrl('w')]]);
    t.bind_widget(TransposeChars, &[&[Key::ctrl('t')]]);
    t.bind_widget(HistorySearchBackward, &[&[Key::ctrl('r')]]);
    t.bind_widget(HistorySearchForward, &[&[Key::ctrl('s')]]);
    t.bind_widget(Abort, &[&[Key::ctrl('g')]]);
    t
}

fn vi_oper_keymap() -> KeyTable {
    let mut t = KeyTable::new();
    bind_vi_motions(&mut t);
    t
}

fn search_keymap() -> KeyTable {
    use Widget::*;
    let mut t = KeyTable::new();
    t.set_fallback(Some(Binding::Widget(SelfInsert)));
    t.bind_widget(HistorySearchBackward, &[&[Key::ctrl('r')]]);
    t.bind_widget(HistorySearchForward, &[&[Key::ctrl('s')]]);
    t.bind_widget(
        BackwardDeleteChar,
        &[&[Key::code(KeyCode::Backspace)], &[Key::ctrl('h')]],
    );
    t.bind_widget(
        AcceptLine,
        &[&[Key::code(KeyCode::Enter)], &[Key::ctrl('j')], &[Key::ctrl('m')]],
    );
    t.bind_widget(Abort, &[&[Key::ctrl('g')]]);
    t
}
