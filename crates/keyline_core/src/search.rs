//! Incremental history search overlay.
//!
//! The overlay intercepts keys to build a pattern, walks the history
//! collaborator for substring matches, and swaps the visible buffer to the
//! matched entry. Successful transitions (typing, deepening, reversing)
//! push snapshots so backspace navigates back through them before it starts
//! shortening the pattern; aborting restores the exact pre-search buffer.

use log::debug;

use crate::buffer::LineBuffer;
use crate::editor::Mode;
use crate::engine::{LineEditor, ReadOutcome};
use crate::widgets::Widget;

/// Search direction: backward walks toward older entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Backward,
    Forward,
}

#[derive(Debug, Clone)]
struct Snapshot {
    pattern: String,
    current: Option<usize>,
    direction: SearchDirection,
}

/// State alive only while the overlay is active.
#[derive(Debug)]
pub(crate) struct SearchState {
    direction: SearchDirection,
    pattern: String,
    /// History index of the currently displayed match.
    current: Option<usize>,
    /// Set when the pattern stopped matching; the last good match stays
    /// displayed.
    failing: bool,
    /// Pre-search buffer and cursor, restored on abort.
    saved: LineBuffer,
    prior_mode: Mode,
    stack: Vec<Snapshot>,
}

/// A snapshot of the overlay for rendering layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStatus {
    pub direction: SearchDirection,
    pub pattern: String,
    pub failing: bool,
}

impl LineEditor {
    /// Enters the search overlay, capturing the restore point.
    pub(crate) fn start_search(&mut self, direction: SearchDirection) {
        self.composer = crate::vi::Composer::Idle;
        self.state.clear_argument();
        let prior_mode = self.state.mode();
        self.search = Some(SearchState {
            direction,
            pattern: String::new(),
            current: None,
            failing: false,
            saved: self.state.buf.clone(),
            prior_mode,
            stack: Vec::new(),
        });
        self.state.set_mode(Mode::Search);
        debug!("search: enter ({direction:?})");
    }

    /// Overlay rendering info, when the overlay is active.
    pub fn search_status(&self) -> Option<SearchStatus> {
        self.search.as_ref().map(|s| SearchStatus {
            direction: s.direction,
            pattern: s.pattern.clone(),
            failing: s.failing,
        })
    }

    /// Handles a widget resolved while the overlay is active.
    pub(crate) fn search_widget(&mut self, widget: Widget) -> Option<ReadOutcome> {
        match widget {
            Widget::SelfInsert => {
                if let Some(c) = self.last_keys.last().and_then(|k| k.text_char()) {
                    self.search_insert(c);
                }
                None
            }
            Widget::HistorySearchBackward => {
                self.search_repeat(SearchDirection::Backward);
                None
            }
            Widget::HistorySearchForward => {
                self.search_repeat(SearchDirection::Forward);
                None
            }
            Widget::BackwardDeleteChar => {
                self.search_backspace();
                None
            }
            Widget::AcceptLine => {
                // Accept the displayed entry as the submitted line.
                self.search_exit_keep();
                self.accept_line()
            }
            Widget::Abort => {
                self.search_abort();
                None
            }
            _ => {
                // Editing keys fall out of the overlay and are interpreted
                // against the displayed buffer.
                self.search_exit_keep();
                self.run_widget(widget)
            }
        }
    }

    fn entry_matches(&self, search: &SearchState, index: usize) -> bool {
        let Some(entry) = self.history.get(index) else {
            return false;
        };
        if self.config.search_ignore_case {
            entry.to_lowercase().contains(&search.pattern.to_lowercase())
        } else {
            entry.contains(&search.pattern)
        }
    }

    /// Scans from `anchor` (inclusive) in `direction` for a match.
    fn find_from(
        &self,
        search: &SearchState,
        anchor: usize,
        direction: SearchDirection,
    ) -> Option<usize> {
        let last = self.history.last_index()?;
        match direction {
            SearchDirection::Backward => (0..=anchor.min(last))
                .rev()
                .find(|&i| self.entry_matches(search, i)),
            SearchDirection::Forward => {
                (anchor..=last).find(|&i| self.entry_matches(search, i))
            }
        }
    }

    fn show_match(&mut self, index: usize) {
        if let Some(entry) = self.history.get(index) {
            self.state.buf = LineBuffer::from_str(entry);
        }
    }

    fn search_insert(&mut self, c: char) {
        let Some(mut search) = self.search.take() else {
            return;
        };
        search.stack.push(Snapshot {
            pattern: search.pattern.clone(),
            current: search.current,
            direction: search.direction,
        });
        search.pattern.push(c);
        let anchor = match search.direction {
            SearchDirection::Backward => search
                .current
                .or_else(|| self.history.last_index())
                .unwrap_or(0),
            SearchDirection::Forward => search.current.unwrap_or(0),
        };
        match self.find_from(&search, anchor, search.direction) {
            Some(i) => {
                search.current = Some(i);
                search.failing = false;
                self.show_match(i);
            }
            None => {
                // Retain the last good match; flag the miss.
                search.failing = true;
                self.state.ring_bell();
            }
        }
        self.search = Some(search);
    }

    fn search_repeat(&mut self, direction: SearchDirection) {
        let Some(mut search) = self.search.take() else {
            return;
        };
        if search.pattern.is_empty() {
            self.state.ring_bell();
            self.search = Some(search);
            return;
        }
        let snapshot = Snapshot {
            pattern: search.pattern.clone(),
            current: search.current,
            direction: search.direction,
        };
        search.direction = direction;
        // Advance from just past the current match, or from the far end on
        // the first search.
        let anchor = match (search.current, direction) {
            (Some(i), SearchDirection::Backward) => i.checked_sub(1),
            (Some(i), SearchDirection::Forward) => {
                if self.history.last_index().is_some_and(|last| i < last) {
                    Some(i + 1)
                } else {
                    None
                }
            }
            (None, SearchDirection::Backward) => self.history.last_index(),
            (None, SearchDirection::Forward) => {
                if self.history.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
        };
        let found = anchor.and_then(|a| self.find_from(&search, a, direction));
        match found {
            Some(i) => {
                search.stack.push(snapshot);
                search.current = Some(i);
                search.failing = false;
                self.show_match(i);
            }
            None => {
                // Stop at the oldest/newest entry with a bell; the last
                // good match stays.
                search.failing = true;
                self.state.ring_bell();
            }
        }
        self.search = Some(search);
    }

    fn search_backspace(&mut self) {
        let Some(mut search) = self.search.take() else {
            return;
        };
        if search.failing {
            search.failing = false;
            self.search = Some(search);
            return;
        }
        match search.stack.pop() {
            Some(snapshot) => {
                search.pattern = snapshot.pattern;
                search.current = snapshot.current;
                search.direction = snapshot.direction;
                match search.current {
                    Some(i) => self.show_match(i),
                    None => self.state.buf = search.saved.clone(),
                }
            }
            None => {
                self.state.ring_bell();
            }
        }
        self.search = Some(search);
    }

    /// Leaves the overlay keeping whatever the buffer currently shows.
    pub(crate) fn search_exit_keep(&mut self) {
        if let Some(search) = self.search.take() {
            self.state.set_mode(search.prior_mode);
            debug!("search: exit");
        }
    }

    /// Aborts the overlay, restoring the exact pre-search buffer and
    /// cursor and discarding all search state.
    pub(crate) fn search_abort(&mut self) {
        if let Some(search) = self.search.take() {
            self.state.buf = search.saved;
            self.state.set_mode(search.prior_mode);
            debug!("search: abort");
        }
    }
}
