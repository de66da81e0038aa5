//! Key tables: prefix trees mapping key sequences to bindings.
//!
//! Each editing mode owns one table. Lookup distinguishes a unique match
//! from an ambiguous one (the sequence is bound but also prefixes longer
//! bound sequences), because ambiguity forces the reader to wait for more
//! input before committing.

use std::collections::HashMap;

use crate::keys::Key;
use crate::widgets::Widget;

/// What a key sequence resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A named editing action.
    Widget(Widget),
    /// A recorded key sequence played back through the input queue.
    Macro(Vec<Key>),
}

/// Result of resolving an accumulated key sequence against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Exactly one bound sequence matches; commit immediately.
    Matched(Binding),
    /// The sequence is bound, but longer bound sequences share it as a
    /// prefix. The reader must wait (bounded) for another key before
    /// committing.
    MatchedPrefix(Binding),
    /// A strict prefix of at least one bound sequence; not itself bound.
    Prefix,
    /// No bound sequence matches.
    Unbound,
}

#[derive(Debug, Default)]
struct Node {
    binding: Option<Binding>,
    children: HashMap<Key, Node>,
}

impl Node {
    fn is_empty(&self) -> bool {
        self.binding.is_none() && self.children.is_empty()
    }
}

/// A per-mode mapping from key sequences to bindings.
#[derive(Debug, Default)]
pub struct KeyTable {
    root: Node,
    /// Binding consulted for a single unbound plain-character key.
    /// Insert-style tables set this to `self-insert`.
    fallback: Option<Binding>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback binding for unbound plain-character keys.
    pub fn set_fallback(&mut self, binding: Option<Binding>) {
        self.fallback = binding;
    }

    /// Binds a sequence, replacing any existing binding for it.
    pub fn bind(&mut self, seq: &[Key], binding: Binding) {
        if seq.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for key in seq {
            node = node.children.entry(*key).or_default();
        }
        node.binding = Some(binding);
    }

    /// Convenience for binding a widget to several sequences at once.
    pub fn bind_widget(&mut self, widget: Widget, seqs: &[&[Key]]) {
        for seq in seqs {
            self.bind(seq, Binding::Widget(widget));
        }
    }

    /// Removes the binding for a sequence, pruning empty branches.
    /// Returns the removed binding, if any.
    pub fn unbind(&mut self, seq: &[Key]) -> Option<Binding> {
        fn remove(node: &mut Node, seq: &[Key]) -> Option<Binding> {
            match seq.split_first() {
                None => node.binding.take(),
                Some((key, rest)) => {
                    let child = node.children.get_mut(key)?;
                    let removed = remove(child, rest);
                    if child.is_empty() {
                        node.children.remove(key);
                    }
                    removed
                }
            }
        }
        remove(&mut self.root, seq)
    }

    /// Resolves an accumulated sequence.
    pub fn lookup(&self, seq: &[Key]) -> Lookup {
        let mut node = &self.root;
        for (i, key) in seq.iter().enumerate() {
            match node.children.get(key) {
                Some(child) => node = child,
                None => {
                    // A lone printable key may fall through to the table's
                    // text fallback (e.g. self-insert in insert modes).
                    if i == 0 && seq.len() == 1 && seq[0].is_text() {
                        if let Some(fb) = &self.fallback {
                            return Lookup::Matched(fb.clone());
                        }
                    }
                    return Lookup::Unbound;
                }
            }
        }
        match (&node.binding, node.children.is_empty()) {
            (Some(b), true) => Lookup::Matched(b.clone()),
            (Some(b), false) => Lookup::MatchedPrefix(b.clone()),
            (None, false) => Lookup::Prefix,
            (None, true) => Lookup::Unbound,
        }
    }

    /// All bound sequences, sorted by length then by notation, for
    /// introspection and binding dumps.
    pub fn bound_keys(&self) -> Vec<(Vec<Key>, Binding)> {
        fn walk(node: &Node, prefix: &mut Vec<Key>, out: &mut Vec<(Vec<Key>, Binding)>) {
            if let Some(b) = &node.binding {
                out.push((prefix.clone(), b.clone()));
            }
            for (key, child) in &node.children {
                prefix.push(*key);
                walk(child, prefix, out);
                prefix.pop();
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut Vec::new(), &mut out);
        out.sort_by(|(a, _), (b, _)| {
            a.len().cmp(&b.len()).then_with(|| {
                let an: Vec<String> = a.iter().map(|k| k.to_string()).collect();
                let bn: Vec<String> = b.iter().map(|k| k.to_string()).collect();
                an.cmp(&bn)
            })
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(spec: &str) -> Vec<Key> {
        crate::keys::parse_key_sequence(spec).unwrap()
    }

    #[test]
    fn unique_sequence_matches() {
        let mut table = KeyTable::new();
        table.bind(&seq("C-a"), Binding::Widget(Widget::BeginningOfLine));
        assert_eq!(
            table.lookup(&seq("C-a")),
            Lookup::Matched(Binding::Widget(Widget::BeginningOfLine))
        );
        assert_eq!(table.lookup(&seq("C-b")), Lookup::Unbound);
    }

    #[test]
    fn prefix_is_ambiguous() {
        let mut table = KeyTable::new();
        table.bind(&seq("g"), Binding::Widget(Widget::Abort));
        table.bind(&seq("g g"), Binding::Widget(Widget::BeginningOfLine));
        assert_eq!(
            table.lookup(&seq("g")),
            Lookup::MatchedPrefix(Binding::Widget(Widget::Abort))
        );
        assert_eq!(
            table.lookup(&seq("g g")),
            Lookup::Matched(Binding::Widget(Widget::BeginningOfLine))
        );
    }

    #[test]
    fn strict_prefix_without_binding() {
        let mut table = KeyTable::new();
        table.bind(&seq("C-x C-u"), Binding::Widget(Widget::BackwardKillLine));
        assert_eq!(table.lookup(&seq("C-x")), Lookup::Prefix);
        assert_eq!(table.lookup(&seq("C-x q")), Lookup::Unbound);
    }

    #[test]
    fn fallback_applies_to_plain_chars_only() {
        let mut table = KeyTable::new();
        table.set_fallback(Some(Binding::Widget(Widget::SelfInsert)));
        assert_eq!(
            table.lookup(&[Key::char('q')]),
            Lookup::Matched(Binding::Widget(Widget::SelfInsert))
        );
        assert_eq!(table.lookup(&[Key::ctrl('q')]), Lookup::Unbound);
        assert_eq!(table.lookup(&seq("C-x q")), Lookup::Unbound);
    }

    #[test]
    fn rebinding_replaces_and_unbind_prunes() {
        let mut table = KeyTable::new();
        table.bind(&seq("C-x u"), Binding::Widget(Widget::Abort));
        table.bind(&seq("C-x u"), Binding::Widget(Widget::Yank));
        assert_eq!(
            table.lookup(&seq("C-x u")),
            Lookup::Matched(Binding::Widget(Widget::Yank))
        );
        assert_eq!(table.unbind(&seq("C-x u")), Some(Binding::Widget(Widget::Yank)));
        assert_eq!(table.lookup(&seq("C-x")), Lookup::Unbound);
        assert_eq!(table.unbind(&seq("C-x u")), None);
    }

    #[test]
    fn bound_keys_sorted_by_length() {
        let mut table = KeyTable::new();
        table.bind(&seq("g g"), Binding::Widget(Widget::BeginningOfLine));
        table.bind(&seq("a"), Binding::Widget(Widget::Abort));
        let bound = table.bound_keys();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].0, seq("a"));
        assert_eq!(bound[1].0, seq("g g"));
    }
}
