//! Vi command composer: a layered state machine over the key resolver and
//! editor state. It accumulates counts, holds at most one pending operator,
//! resolves motions (including character search and bracket match), and
//! applies the composed effect atomically.
//!
//! Count distribution follows vi: an operator count and a motion count
//! multiply, so `2d3w` deletes the same span as `6dw`.

use log::debug;

use crate::editor::{CharSearch, Mode, RegisterKind};
use crate::engine::LineEditor;
use crate::keys::{Key, KeyCode};
use crate::widgets::Widget;

/// A pending vi operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Change,
    Yank,
}

/// Composer state. A tagged union keeps illegal combinations (two pending
/// operators, a pending replace inside a pending search) unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Composer {
    /// Default move-mode state.
    Idle,
    /// An operator key has been read; awaiting a motion.
    PendingOp { op: Operator, count: usize },
    /// A character-search motion awaits its target character.
    PendingChar {
        forward: bool,
        till: bool,
        count: usize,
        op: Option<Operator>,
    },
    /// `r` awaits the replacement character.
    PendingReplace { count: usize },
}

impl Composer {
    /// True when the next key must be consumed literally, bypassing the
    /// key tables.
    pub(crate) fn wants_literal(&self) -> bool {
        matches!(self, Composer::PendingChar { .. } | Composer::PendingReplace { .. })
    }

    pub(crate) fn is_pending_op(&self) -> bool {
        matches!(self, Composer::PendingOp { .. })
    }
}

/// Motions the composer can resolve against an operator or apply directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    CharLeft,
    CharRight,
    BeginningOfLine,
    FirstNonBlank,
    EndOfLine,
    WordRight,
    WordLeft,
    WordEnd,
    MatchBracket,
}

fn vi_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphanumeric() || c == '_' {
        1
    } else {
        2
    }
}

/// Start of the next word, `count` words forward.
fn word_right(chars: &[char], mut pos: usize, count: usize) -> usize {
    for _ in 0..count {
        if pos >= chars.len() {
            break;
        }
        let class = vi_class(chars[pos]);
        if class != 0 {
            while pos < chars.len() && vi_class(chars[pos]) == class {
                pos += 1;
            }
        }
        while pos < chars.len() && vi_class(chars[pos]) == 0 {
            pos += 1;
        }
    }
    pos
}

/// Start of the previous word, `count` words back.
fn word_left(chars: &[char], mut pos: usize, count: usize) -> usize {
    for _ in 0..count {
        while pos > 0 && vi_class(chars[pos - 1]) == 0 {
            pos -= 1;
        }
        if pos == 0 {
            break;
        }
        let class = vi_class(chars[pos - 1]);
        while pos > 0 && vi_class(chars[pos - 1]) == class {
            pos -= 1;
        }
    }
    pos
}

/// Last character of the `count`-th word end, stepping off the current one.
fn word_end(chars: &[char], mut pos: usize, count: usize) -> usize {
    for _ in 0..count {
        pos += 1;
        while pos < chars.len() && vi_class(chars[pos]) == 0 {
            pos += 1;
        }
        if pos >= chars.len() {
            return chars.len().saturating_sub(1);
        }
        let class = vi_class(chars[pos]);
        while pos + 1 < chars.len() && vi_class(chars[pos + 1]) == class {
            pos += 1;
        }
    }
    pos.min(chars.len().saturating_sub(1))
}

/// Resolves a character search from `cursor`. Returns the motion target,
/// or `None` when the target character does not occur `count` times.
///
/// A `;`/`,` repeat of a till-search starts one further out so the cursor
/// does not get stuck against an adjacent target.
pub(crate) fn char_search_target(
    chars: &[char],
    cursor: usize,
    search: CharSearch,
    count: usize,
    repeat: bool,
) -> Option<usize> {
    let mut remaining = count.max(1);
    if search.forward {
        let skip = if repeat && search.till { 2 } else { 1 };
        let mut i = cursor.saturating_add(skip);
        while i < chars.len() {
            if chars[i] == search.target {
                remaining -= 1;
                if remaining == 0 {
                    return Some(if search.till { i - 1 } else { i });
                }
            }
            i += 1;
        }
        None
    } else {
        let skip = if repeat && search.till { 2 } else { 1 };
        let mut i = cursor as isize - skip as isize;
        while i >= 0 {
            if chars[i as usize] == search.target {
                remaining -= 1;
                if remaining == 0 {
                    let found = i as usize;
                    return Some(if search.till { found + 1 } else { found });
                }
            }
            i -= 1;
        }
        None
    }
}

/// Locates the bracket partner for the bracket at or after `cursor`,
/// honoring nesting depth for that bracket type only. Returns
/// `(bracket_pos, match_pos)`.
pub(crate) fn match_bracket(chars: &[char], cursor: usize) -> Option<(usize, usize)> {
    const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];
    let mut pos = cursor;
    let (open, close, outward) = loop {
        let c = *chars.get(pos)?;
        if let Some(&(open, close)) = PAIRS.iter().find(|&&(o, c2)| c == o || c == c2) {
            break (open, close, c == close);
        }
        pos += 1;
    };
    let mut depth = 1usize;
    if outward {
        // Scan left for the opening bracket.
        let mut i = pos as isize - 1;
        while i >= 0 {
            let c = chars[i as usize];
            if c == close {
                depth += 1;
            } else if c == open {
                depth -= 1;
                if depth == 0 {
                    return Some((pos, i as usize));
                }
            }
            i -= 1;
        }
        None
    } else {
        let mut i = pos + 1;
        while i < chars.len() {
            let c = chars[i];
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return Some((pos, i));
                }
            }
            i += 1;
        }
        None
    }
}

impl LineEditor {
    /// Handles a widget resolved while in vi move mode (or its pending
    /// operator sub-mode).
    pub(crate) fn vi_widget(&mut self, widget: Widget) {
        use Widget::*;
        match widget {
            ViCmdMode => {
                // Escape: cancel any composition; idempotent otherwise.
                self.composer = Composer::Idle;
                self.state.clear_argument();
            }
            ViInsert => self.enter_insert(None),
            ViInsertBol => {
                let bol = self.state.buf.first_non_blank().unwrap_or(0);
                self.enter_insert(Some(bol));
            }
            ViAppend => {
                let pos = (self.state.buf.cursor() + 1).min(self.state.buf.len());
                self.enter_insert(Some(pos));
            }
            ViAppendEol => {
                let end = self.state.buf.len();
                self.enter_insert(Some(end));
            }

            ViDelete => self.vi_operator(Operator::Delete),
            ViChange => self.vi_operator(Operator::Change),
            ViYank => self.vi_operator(Operator::Yank),

            ViDigitOrBeginningOfLine => {
                if self.state.has_argument() {
                    self.state.push_digit(0);
                } else {
                    self.vi_motion(Motion::BeginningOfLine);
                }
            }
            BackwardChar => self.vi_motion(Motion::CharLeft),
            ForwardChar => self.vi_motion(Motion::CharRight),
            BeginningOfLine => self.vi_motion(Motion::BeginningOfLine),
            ViFirstNonBlank => self.vi_motion(Motion::FirstNonBlank),
            EndOfLine => self.vi_motion(Motion::EndOfLine),
            ViForwardWord => self.vi_motion(Motion::WordRight),
            ViBackwardWord => self.vi_motion(Motion::WordLeft),
            ViEndWord => self.vi_motion(Motion::WordEnd),
            ViMatchBracket => self.vi_motion(Motion::MatchBracket),

            ViFindChar => self.begin_char_search(true, false),
            ViFindCharBackward => self.begin_char_search(false, false),
            ViTillChar => self.begin_char_search(true, true),
            ViTillCharBackward => self.begin_char_search(false, true),
            ViRepeatCharSearch => self.repeat_char_search(false),
            ViReverseCharSearch => self.repeat_char_search(true),

            ViDeleteChar => self.vi_delete_chars(Operator::Delete, true),
            ViSubstitute => self.vi_delete_chars(Operator::Change, true),
            ViBackwardDeleteChar => self.vi_delete_chars(Operator::Delete, false),
            ViDeleteToEol => {
                let (start, end) = (self.state.buf.cursor(), self.state.buf.len());
                self.apply_operator(Operator::Delete, start, end, RegisterKind::Charwise);
            }
            ViChangeToEol => {
                let (start, end) = (self.state.buf.cursor(), self.state.buf.len());
                self.apply_operator(Operator::Change, start, end, RegisterKind::Charwise);
            }
            ViChangeWholeLine => self.vi_whole_line(Operator::Change),
            ViYankWholeLine => self.vi_whole_line(Operator::Yank),
            ViReplaceChars => {
                let count = self.state.take_count();
                self.composer = Composer::PendingReplace { count };
            }
            ViPutAfter => self.vi_put(true),
            ViPutBefore => self.vi_put(false),

            ToggleCase => {
                let count = self.state.take_count();
                self.state.toggle_case(count);
            }
            TransposeChars => {
                let count = self.state.take_count();
                self.state.transpose_chars(count);
            }
            KillLine => {
                self.state.clear_argument();
                self.state.kill_line();
            }
            BackwardKillLine => {
                self.state.clear_argument();
                self.state.backward_kill_line();
            }
            BackwardKillWord => {
                let count = self.state.take_count();
                self.state.backward_kill_word(count);
            }

            _ => {
                // Anything else is not a move-mode action.
                self.composer = Composer::Idle;
                self.state.clear_argument();
                self.state.ring_bell();
            }
        }
    }

    /// Consumes the literal key awaited by a pending char search or
    /// pending replace.
    pub(crate) fn vi_pending_literal(&mut self, key: Key) {
        let composer = self.composer;
        self.composer = Composer::Idle;
        if key.code == KeyCode::Esc {
            // Cancelled with no change.
            self.state.clear_argument();
            return;
        }
        let Some(c) = key.text_char() else {
            self.state.ring_bell();
            return;
        };
        match composer {
            Composer::PendingChar {
                forward,
                till,
                count,
                op,
            } => {
                let search = CharSearch {
                    target: c,
                    forward,
                    till,
                };
                self.state.char_search = Some(search);
                self.exec_char_search(search, count, op, false);
            }
            Composer::PendingReplace { count } => {
                let cursor = self.state.buf.cursor();
                let avail = self.state.buf.len().saturating_sub(cursor);
                if avail == 0 {
                    self.state.ring_bell();
                    return;
                }
                let n = count.min(avail);
                for i in cursor..cursor + n {
                    self.state.buf.replace_char(i, c);
                }
                self.state.buf.set_cursor(cursor + n - 1);
            }
            _ => self.state.ring_bell(),
        }
    }

    fn enter_insert(&mut self, cursor: Option<usize>) {
        if let Some(pos) = cursor {
            self.state.buf.set_cursor(pos);
        }
        self.composer = Composer::Idle;
        self.state.clear_argument();
        self.state.set_mode(Mode::ViInsert);
    }

    fn vi_operator(&mut self, op: Operator) {
        match self.composer {
            Composer::Idle => {
                let count = self.state.take_count();
                debug!("vi: pending operator {op:?} count {count}");
                self.composer = Composer::PendingOp { op, count };
            }
            Composer::PendingOp { op: pending, .. } if pending == op => {
                // Doubled operator: the whole current line, regardless of
                // cursor position. The count scales lines, and this buffer
                // is a single logical line.
                self.state.clear_argument();
                self.composer = Composer::Idle;
                self.vi_whole_line(op);
            }
            _ => {
                self.composer = Composer::Idle;
                self.state.clear_argument();
                self.state.ring_bell();
            }
        }
    }

    fn vi_whole_line(&mut self, op: Operator) {
        self.state.clear_argument();
        let end = self.state.buf.len();
        self.apply_operator(op, 0, end, RegisterKind::Linewise);
    }

    /// `x` / `X` / `s`: character spans relative to the cursor.
    fn vi_delete_chars(&mut self, op: Operator, forward: bool) {
        let count = self.state.take_count();
        let cursor = self.state.buf.cursor();
        let (start, end) = if forward {
            (cursor, (cursor + count).min(self.state.buf.len()))
        } else {
            (cursor.saturating_sub(count), cursor)
        };
        if start == end {
            self.state.ring_bell();
            return;
        }
        self.apply_operator(op, start, end, RegisterKind::Charwise);
    }

    fn begin_char_search(&mut self, forward: bool, till: bool) {
        let motion_count = self.state.take_count();
        let (count, op) = match self.composer {
            Composer::PendingOp { op, count } => (count.saturating_mul(motion_count), Some(op)),
            _ => (motion_count, None),
        };
        self.composer = Composer::PendingChar {
            forward,
            till,
            count,
            op,
        };
    }

    fn repeat_char_search(&mut self, reverse: bool) {
        let motion_count = self.state.take_count();
        let (count, op) = match self.composer {
            Composer::PendingOp { op, count } => (count.saturating_mul(motion_count), Some(op)),
            _ => (motion_count, None),
        };
        self.composer = Composer::Idle;
        let Some(mut search) = self.state.char_search else {
            self.state.ring_bell();
            return;
        };
        if reverse {
            search.forward = !search.forward;
        }
        self.exec_char_search(search, count, op, true);
    }

    fn exec_char_search(
        &mut self,
        search: CharSearch,
        count: usize,
        op: Option<Operator>,
        repeat: bool,
    ) {
        let cursor = self.state.buf.cursor();
        let target = char_search_target(self.state.buf.chars(), cursor, search, count, repeat);
        let Some(target) = target else {
            // Target absent: the motion is a no-op and any pending
            // operator is cancelled rather than applied to nothing.
            self.state.ring_bell();
            return;
        };
        match op {
            None => {
                self.state.buf.set_cursor(target.min(self.vi_last_column()));
            }
            Some(op) => {
                let (start, end) = if search.forward {
                    (cursor, target + 1)
                } else {
                    (target, cursor)
                };
                self.apply_operator(op, start, end, RegisterKind::Charwise);
            }
        }
    }

    /// Applies a motion: moves the cursor in move mode, or resolves the
    /// pending operator against the motion's span.
    fn vi_motion(&mut self, motion: Motion) {
        let motion_count = self.state.take_count();
        let pending = match self.composer {
            Composer::PendingOp { op, count } => Some((op, count)),
            _ => None,
        };
        self.composer = Composer::Idle;
        let cursor = self.state.buf.cursor();
        let chars = self.state.buf.chars();
        let len = chars.len();

        match pending {
            None => {
                let target = match motion {
                    Motion::CharLeft => cursor.saturating_sub(motion_count),
                    Motion::CharRight => cursor + motion_count,
                    Motion::BeginningOfLine => 0,
                    Motion::FirstNonBlank => match self.state.buf.first_non_blank() {
                        Some(i) => i,
                        None => {
                            return;
                        }
                    },
                    Motion::EndOfLine => len,
                    Motion::WordRight => word_right(chars, cursor, motion_count),
                    Motion::WordLeft => word_left(chars, cursor, motion_count),
                    Motion::WordEnd => word_end(chars, cursor, motion_count),
                    Motion::MatchBracket => match match_bracket(chars, cursor) {
                        Some((_, m)) => m,
                        None => {
                            self.state.ring_bell();
                            return;
                        }
                    },
                };
                self.state.buf.set_cursor(target.min(self.vi_last_column()));
            }
            Some((op, op_count)) => {
                let eff = op_count.saturating_mul(motion_count);
                let span = match motion {
                    Motion::CharLeft => Some((cursor.saturating_sub(eff), cursor)),
                    Motion::CharRight => Some((cursor, (cursor + eff).min(len))),
                    Motion::BeginningOfLine => Some((0, cursor)),
                    Motion::FirstNonBlank => {
                        let t = self.state.buf.first_non_blank().unwrap_or(0);
                        Some((t.min(cursor), t.max(cursor)))
                    }
                    Motion::EndOfLine => Some((cursor, len)),
                    Motion::WordRight => {
                        if op == Operator::Change {
                            // `cw` acts through the end of the word.
                            let t = word_end(chars, cursor, eff);
                            Some((cursor, (t + 1).min(len)))
                        } else {
                            Some((cursor, word_right(chars, cursor, eff)))
                        }
                    }
                    Motion::WordLeft => Some((word_left(chars, cursor, eff), cursor)),
                    Motion::WordEnd => {
                        let t = word_end(chars, cursor, eff);
                        Some((cursor, (t + 1).min(len)))
                    }
                    Motion::MatchBracket => match_bracket(chars, cursor)
                        .map(|(b, m)| (b.min(m).min(cursor), b.max(m) + 1)),
                };
                match span {
                    None => self.state.ring_bell(),
                    Some((start, end)) if start == end => {
                        // Zero-length span: nothing to operate on.
                        self.state.ring_bell();
                    }
                    Some((start, end)) => {
                        self.apply_operator(op, start, end, RegisterKind::Charwise);
                    }
                }
            }
        }
    }

    fn apply_operator(&mut self, op: Operator, start: usize, end: usize, kind: RegisterKind) {
        let text = self.state.buf.slice(start, end);
        debug!("vi: {op:?} span {start}..{end} ({kind:?})");
        if !text.is_empty() {
            self.state.registers.record(None, text, kind);
        }
        match op {
            Operator::Yank => {}
            Operator::Delete => {
                self.state.buf.kill_range(start, end);
                self.state.buf.set_cursor(start.min(self.vi_last_column()));
            }
            Operator::Change => {
                self.state.buf.kill_range(start, end);
                self.state.buf.set_cursor(start);
                self.enter_insert(None);
            }
        }
    }

    fn vi_put(&mut self, after: bool) {
        let count = self.state.take_count();
        let register = self.state.registers.unnamed().clone();
        if register.is_empty() {
            self.state.ring_bell();
            return;
        }
        let text = register.text.repeat(count);
        let n = text.chars().count();
        match register.kind {
            RegisterKind::Charwise => {
                let pos = if after {
                    (self.state.buf.cursor() + 1).min(self.state.buf.len())
                } else {
                    self.state.buf.cursor()
                };
                self.state.buf.insert_at(pos, &text);
                self.state.buf.set_cursor(pos + n - 1);
            }
            RegisterKind::Linewise => {
                // One logical line: line-wise content lands at the line's
                // end or start with no separator.
                let pos = if after { self.state.buf.len() } else { 0 };
                self.state.buf.insert_at(pos, &text);
                self.state.buf.set_cursor(pos);
            }
        }
    }

    /// Highest cursor column reachable in move mode (the last character).
    fn vi_last_column(&self) -> usize {
        self.state.buf.len().saturating_sub(1)
    }
}
