//! The closed set of named editing actions, and the baseline (Emacs-style)
//! operations on [`EditorState`].
//!
//! Widgets are identified by readline-style kebab-case names so that
//! binding files can refer to them as data. The action set is fixed:
//! dispatch is a match over this enum, not open-ended virtual calls.

use crate::editor::{EditorState, RegisterKind};

/// Every action a key sequence can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    // Basics
    SelfInsert,
    AcceptLine,
    Abort,
    DigitArgument,

    // Movement
    ForwardChar,
    BackwardChar,
    ForwardWord,
    BackwardWord,
    BeginningOfLine,
    EndOfLine,

    // Deletion and kills
    DeleteChar,
    BackwardDeleteChar,
    KillLine,
    BackwardKillLine,
    KillWord,
    BackwardKillWord,

    // Register and misc editing
    Yank,
    TransposeChars,
    ToggleCase,
    UpcaseWord,
    DowncaseWord,
    CapitalizeWord,

    // History
    PreviousHistory,
    NextHistory,
    HistorySearchBackward,
    HistorySearchForward,

    // Vi mode switches
    ViCmdMode,
    ViInsert,
    ViInsertBol,
    ViAppend,
    ViAppendEol,

    // Vi operators
    ViDelete,
    ViChange,
    ViYank,

    // Vi direct editing
    ViDeleteChar,
    ViBackwardDeleteChar,
    ViSubstitute,
    ViDeleteToEol,
    ViChangeToEol,
    ViChangeWholeLine,
    ViYankWholeLine,
    ViReplaceChars,
    ViPutAfter,
    ViPutBefore,

    // Vi motions
    ViFirstNonBlank,
    ViDigitOrBeginningOfLine,
    ViForwardWord,
    ViBackwardWord,
    ViEndWord,
    ViFindChar,
    ViFindCharBackward,
    ViTillChar,
    ViTillCharBackward,
    ViRepeatCharSearch,
    ViReverseCharSearch,
    ViMatchBracket,
}

const WIDGET_NAMES: &[(Widget, &str)] = &[
    (Widget::SelfInsert, "self-insert"),
    (Widget::AcceptLine, "accept-line"),
    (Widget::Abort, "abort"),
    (Widget::DigitArgument, "digit-argument"),
    (Widget::ForwardChar, "forward-char"),
    (Widget::BackwardChar, "backward-char"),
    (Widget::ForwardWord, "forward-word"),
    (Widget::BackwardWord, "backward-word"),
    (Widget::BeginningOfLine, "beginning-of-line"),
    (Widget::EndOfLine, "end-of-line"),
    (Widget::DeleteChar, "delete-char"),
    (Widget::BackwardDeleteChar, "backward-delete-char"),
    (Widget::KillLine, "kill-line"),
    (Widget::BackwardKillLine, "backward-kill-line"),
    (Widget::KillWord, "kill-word"),
    (Widget::BackwardKillWord, "backward-kill-word"),
    (Widget::Yank, "yank"),
    (Widget::TransposeChars, "transpose-chars"),
    (Widget::ToggleCase, "toggle-case"),
    (Widget::UpcaseWord, "upcase-word"),
    (Widget::DowncaseWord, "downcase-word"),
    (Widget::CapitalizeWord, "capitalize-word"),
    (Widget::PreviousHistory, "previous-history"),
    (Widget::NextHistory, "next-history"),
    (Widget::HistorySearchBackward, "history-incremental-search-backward"),
    (Widget::HistorySearchForward, "history-incremental-search-forward"),
    (Widget::ViCmdMode, "vi-cmd-mode"),
    (Widget::ViInsert, "vi-insert"),
    (Widget::ViInsertBol, "vi-insert-bol"),
    (Widget::ViAppend, "vi-append"),
    (Widget::ViAppendEol, "vi-append-eol"),
    (Widget::ViDelete, "vi-delete"),
    (Widget::ViChange, "vi-change"),
    (Widget::ViYank, "vi-yank"),
    (Widget::ViDeleteChar, "vi-delete-char"),
    (Widget::ViBackwardDeleteChar, "vi-backward-delete-char"),
    (Widget::ViSubstitute, "vi-substitute"),
    (Widget::ViDeleteToEol, "vi-delete-to-eol"),
    (Widget::ViChangeToEol, "vi-change-to-eol"),
    (Widget::ViChangeWholeLine, "vi-change-whole-line"),
    (Widget::ViYankWholeLine, "vi-yank-whole-line"),
    (Widget::ViReplaceChars, "vi-replace-chars"),
    (Widget::ViPutAfter, "vi-put-after"),
    (Widget::ViPutBefore, "vi-put-before"),
    (Widget::ViFirstNonBlank, "vi-first-non-blank"),
    (Widget::ViDigitOrBeginningOfLine, "vi-digit-or-beginning-of-line"),
    (Widget::ViForwardWord, "vi-forward-word"),
    (Widget::ViBackwardWord, "vi-backward-word"),
    (Widget::ViEndWord, "vi-end-word"),
    (Widget::ViFindChar, "vi-find-char"),
    (Widget::ViFindCharBackward, "vi-find-char-backward"),
    (Widget::ViTillChar, "vi-till-char"),
    (Widget::ViTillCharBackward, "vi-till-char-backward"),
    (Widget::ViRepeatCharSearch, "vi-repeat-char-search"),
    (Widget::ViReverseCharSearch, "vi-reverse-char-search"),
    (Widget::ViMatchBracket, "vi-match-bracket"),
];

impl Widget {
    /// The widget's binding-file name.
    pub fn name(&self) -> &'static str {
        WIDGET_NAMES
            .iter()
            .find(|entry| entry.0 == *self)
            .map(|entry| entry.1)
            .unwrap_or("unknown")
    }

    /// Resolves a binding-file name back to a widget.
    pub fn from_name(name: &str) -> Option<Widget> {
        WIDGET_NAMES
            .iter()
            .find(|entry| entry.1 == name)
            .map(|entry| entry.0)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Target of an emacs forward-word motion: skip separators, then the word.
pub(crate) fn forward_word_target(chars: &[char], mut pos: usize, count: usize) -> usize {
    for _ in 0..count {
        while pos < chars.len() && !is_word_char(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && is_word_char(chars[pos]) {
            pos += 1;
        }
    }
    pos
}

/// Target of an emacs backward-word motion.
pub(crate) fn backward_word_target(chars: &[char], mut pos: usize, count: usize) -> usize {
    for _ in 0..count {
        while pos > 0 && !is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
    }
    pos
}

impl EditorState {
    pub(crate) fn insert_text(&mut self, text: &str, count: usize) {
        for _ in 0..count {
            self.buf.insert_str(text);
        }
    }

    pub(crate) fn forward_char(&mut self, count: usize) {
        self.buf.move_by(count as isize);
    }

    pub(crate) fn backward_char(&mut self, count: usize) {
        self.buf.move_by(-(count as isize));
    }

    pub(crate) fn forward_word(&mut self, count: usize) {
        let target = forward_word_target(self.buf.chars(), self.buf.cursor(), count);
        self.buf.set_cursor(target);
    }

    pub(crate) fn backward_word(&mut self, count: usize) {
        let target = backward_word_target(self.buf.chars(), self.buf.cursor(), count);
        self.buf.set_cursor(target);
    }

    pub(crate) fn delete_char(&mut self, count: usize) {
        self.buf.delete(count);
    }

    pub(crate) fn backward_delete_char(&mut self, count: usize) {
        self.buf.backspace(count);
    }

    fn kill_to(&mut self, target: usize) {
        let cursor = self.buf.cursor();
        let (start, end) = if target >= cursor {
            (cursor, target)
        } else {
            (target, cursor)
        };
        if start == end {
            return;
        }
        let killed = self.buf.kill_range(start, end);
        self.registers.record(None, killed, RegisterKind::Charwise);
    }

    /// Kill from the cursor to the end of the line.
    pub(crate) fn kill_line(&mut self) {
        self.kill_to(self.buf.len());
    }

    /// Kill from the start of the line to the cursor.
    pub(crate) fn backward_kill_line(&mut self) {
        self.kill_to(0);
    }

    pub(crate) fn kill_word(&mut self, count: usize) {
        let target = forward_word_target(self.buf.chars(), self.buf.cursor(), count);
        self.kill_to(target);
    }

    pub(crate) fn backward_kill_word(&mut self, count: usize) {
        let target = backward_word_target(self.buf.chars(), self.buf.cursor(), count);
        self.kill_to(target);
    }

    /// Insert the unnamed register at the cursor, leaving the cursor after
    /// the inserted text.
    pub(crate) fn yank(&mut self, count: usize) {
        let text = self.registers.unnamed().text.clone();
        if text.is_empty() {
            self.ring_bell();
            return;
        }
        for _ in 0..count {
            self.buf.insert_str(&text);
        }
    }

    /// Swap the characters around the cursor, advancing; at the end of the
    /// line the last two characters are swapped. A no-op at the start of
    /// the buffer or with fewer than two characters.
    pub(crate) fn transpose_chars(&mut self, count: usize) {
        for _ in 0..count {
            let len = self.buf.len();
            let cursor = self.buf.cursor();
            if len < 2 || cursor == 0 {
                return;
            }
            if cursor == len {
                let a = self.buf.char_at(len - 2).unwrap_or(' ');
                let b = self.buf.char_at(len - 1).unwrap_or(' ');
                self.buf.replace_char(len - 2, b);
                self.buf.replace_char(len - 1, a);
            } else {
                let a = self.buf.char_at(cursor - 1).unwrap_or(' ');
                let b = self.buf.char_at(cursor).unwrap_or(' ');
                self.buf.replace_char(cursor - 1, b);
                self.buf.replace_char(cursor, a);
                self.buf.set_cursor(cursor + 1);
            }
        }
    }

    /// Toggle the case of `count` characters starting at the cursor,
    /// advancing over them.
    pub(crate) fn toggle_case(&mut self, count: usize) {
        let len = self.buf.len();
        let cursor = self.buf.cursor();
        if cursor >= len {
            return;
        }
        let end = (cursor + count).min(len);
        for i in cursor..end {
            if let Some(c) = self.buf.char_at(i) {
                let flipped = if c.is_uppercase() {
                    c.to_lowercase().next().unwrap_or(c)
                } else if c.is_lowercase() {
                    c.to_uppercase().next().unwrap_or(c)
                } else {
                    c
                };
                self.buf.replace_char(i, flipped);
            }
        }
        // Advance past the toggled run, staying on the line's last char.
        self.buf.set_cursor(end.min(len.saturating_sub(1)));
    }

    fn transform_words(&mut self, count: usize, f: impl Fn(char, bool) -> char) {
        let mut pos = self.buf.cursor();
        for _ in 0..count {
            while pos < self.buf.len() && !is_word_char(self.buf.char_at(pos).unwrap_or(' ')) {
                pos += 1;
            }
            let mut first = true;
            while pos < self.buf.len() && is_word_char(self.buf.char_at(pos).unwrap_or(' ')) {
                let c = self.buf.char_at(pos).unwrap_or(' ');
                self.buf.replace_char(pos, f(c, first));
                first = false;
                pos += 1;
            }
        }
        self.buf.set_cursor(pos);
    }

    pub(crate) fn upcase_word(&mut self, count: usize) {
        self.transform_words(count, |c, _| c.to_uppercase().next().unwrap_or(c));
    }

    pub(crate) fn downcase_word(&mut self, count: usize) {
        self.transform_words(count, |c, _| c.to_lowercase().next().unwrap_or(c));
    }

    pub(crate) fn capitalize_word(&mut self, count: usize) {
        self.transform_words(count, |c, first| {
            if first {
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c.to_lowercase().next().unwrap_or(c)
            }
        });
    }
}
