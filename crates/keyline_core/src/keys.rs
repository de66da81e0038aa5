//! Logical key events consumed by the engine.
//!
//! The engine never sees raw terminal bytes; escape-sequence decoding is the
//! input layer's job. A [`Key`] is a decoded code plus modifier flags, and a
//! key sequence is simply an ordered slice of keys.

use std::fmt;

use bitflags::bitflags;

use crate::error::EditError;

/// Platform-agnostic key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable (or at least textual) character key.
    Char(char),
    Esc,
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key, 1-based.
    F(u8),
}

bitflags! {
    /// Modifier flags held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

/// A single logical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl Key {
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// A plain character key with no modifiers.
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::empty())
    }

    /// Control chord, e.g. `Key::ctrl('r')`.
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// Alt (meta) chord, e.g. `Key::alt('b')`.
    pub fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::ALT)
    }

    /// A non-character key with no modifiers.
    pub fn code(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// True for a plain character key (no CTRL/ALT), i.e. a key that can
    /// fall back to text insertion when unbound.
    pub fn is_text(&self) -> bool {
        matches!(self.code, KeyCode::Char(_))
            && !self.mods.intersects(Modifiers::CTRL | Modifiers::ALT)
    }

    /// The character carried by a `Char` key, if any.
    pub fn text_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

fn named_code(name: &str) -> Option<KeyCode> {
    let code = match name {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" => KeyCode::PageUp,
        "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        "minus" => KeyCode::Char('-'),
        _ => {
            if let Some(n) = name.strip_prefix('f') {
                if let Ok(n) = n.parse::<u8>() {
                    if (1..=12).contains(&n) {
                        return Some(KeyCode::F(n));
                    }
                }
            }
            return None;
        }
    };
    Some(code)
}

fn code_name(code: KeyCode) -> Option<&'static str> {
    let name = match code {
        KeyCode::Esc => "esc",
        KeyCode::Enter => "enter",
        KeyCode::Tab => "tab",
        KeyCode::BackTab => "backtab",
        KeyCode::Backspace => "backspace",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pgup",
        KeyCode::PageDown => "pgdn",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Char(' ') => "space",
        _ => return None,
    };
    Some(name)
}

/// Parses a single key token, e.g. `a`, `C-r`, `M-b`, `C-M-x`, `esc`, `f5`.
pub fn parse_key(token: &str) -> Result<Key, EditError> {
    let mut mods = Modifiers::empty();
    let mut rest = token;
    loop {
        if let Some(r) = rest.strip_prefix("C-") {
            mods |= Modifiers::CTRL;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("M-") {
            mods |= Modifiers::ALT;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("S-") {
            mods |= Modifiers::SHIFT;
            rest = r;
        } else {
            break;
        }
    }
    let code = if rest.chars().count() == 1 {
        KeyCode::Char(rest.chars().next().unwrap_or(' '))
    } else {
        match named_code(rest) {
            Some(code) => code,
            None => return Err(EditError::InvalidKeyNotation(token.to_string())),
        }
    };
    Ok(Key::new(code, mods))
}

/// Parses a whitespace-separated sequence of key tokens.
pub fn parse_key_sequence(spec: &str) -> Result<Vec<Key>, EditError> {
    let mut keys = Vec::new();
    for token in spec.split_whitespace() {
        keys.push(parse_key(token)?);
    }
    if keys.is_empty() {
        return Err(EditError::InvalidKeyNotation(spec.to_string()));
    }
    Ok(keys)
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(Modifiers::CTRL) {
            write!(f, "C-")?;
        }
        if self.mods.contains(Modifiers::ALT) {
            write!(f, "M-")?;
        }
        if self.mods.contains(Modifiers::SHIFT) {
            write!(f, "S-")?;
        }
        if let Some(name) = code_name(self.code) {
            write!(f, "{name}")
        } else {
            match self.code {
                KeyCode::Char(c) => write!(f, "{c}"),
                KeyCode::F(n) => write!(f, "f{n}"),
                // All non-char codes are covered by code_name above.
                _ => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_and_modified() {
        assert_eq!(parse_key("a").unwrap(), Key::char('a'));
        assert_eq!(parse_key("C-r").unwrap(), Key::ctrl('r'));
        assert_eq!(parse_key("M-b").unwrap(), Key::alt('b'));
        assert_eq!(
            parse_key("C-M-x").unwrap(),
            Key::new(KeyCode::Char('x'), Modifiers::CTRL | Modifiers::ALT)
        );
        assert_eq!(parse_key("esc").unwrap(), Key::code(KeyCode::Esc));
        assert_eq!(parse_key("f5").unwrap(), Key::code(KeyCode::F(5)));
        assert_eq!(parse_key("space").unwrap(), Key::char(' '));
    }

    #[test]
    fn parse_sequence() {
        let seq = parse_key_sequence("C-x C-u").unwrap();
        assert_eq!(seq, vec![Key::ctrl('x'), Key::ctrl('u')]);
        assert!(parse_key_sequence("").is_err());
        assert!(parse_key("notakey").is_err());
    }

    #[test]
    fn display_round_trip() {
        for token in ["a", "C-r", "M-b", "esc", "enter", "space", "f7", "C-M-x"] {
            let key = parse_key(token).unwrap();
            assert_eq!(parse_key(&key.to_string()).unwrap(), key);
        }
    }

    #[test]
    fn text_keys() {
        assert!(Key::char('x').is_text());
        assert!(!Key::ctrl('x').is_text());
        assert!(!Key::code(KeyCode::Left).is_text());
        assert_eq!(Key::char('x').text_char(), Some('x'));
    }
}
