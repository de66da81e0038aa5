//! Shared harness: a fluent key-script builder and editors prewired the
//! way the scenarios need them.

#![allow(dead_code)]

use keyline_core::{
    EditMode, EditorConfig, Key, KeyCode, KeyInput, LineEditor, MemoryHistory, ReadOutcome,
    ScriptedKeys,
};

/// Fluent builder for a scripted key stream.
#[derive(Debug, Default, Clone)]
pub struct KeyScript {
    inputs: Vec<KeyInput>,
}

impl KeyScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// One plain character key per char.
    pub fn text(mut self, text: &str) -> Self {
        for c in text.chars() {
            self.inputs.push(KeyInput::Key(Key::char(c)));
        }
        self
    }

    pub fn key(mut self, key: Key) -> Self {
        self.inputs.push(KeyInput::Key(key));
        self
    }

    pub fn ctrl(self, c: char) -> Self {
        self.key(Key::ctrl(c))
    }

    pub fn alt(self, c: char) -> Self {
        self.key(Key::alt(c))
    }

    pub fn escape(self) -> Self {
        self.key(Key::code(KeyCode::Esc))
    }

    pub fn enter(self) -> Self {
        self.key(Key::code(KeyCode::Enter))
    }

    pub fn backspace(self) -> Self {
        self.key(Key::code(KeyCode::Backspace))
    }

    pub fn left(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.inputs.push(KeyInput::Key(Key::code(KeyCode::Left)));
        }
        self
    }

    pub fn right(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.inputs.push(KeyInput::Key(Key::code(KeyCode::Right)));
        }
        self
    }

    pub fn up(self) -> Self {
        self.key(Key::code(KeyCode::Up))
    }

    pub fn down(self) -> Self {
        self.key(Key::code(KeyCode::Down))
    }

    pub fn interrupt(mut self) -> Self {
        self.inputs.push(KeyInput::Interrupt);
        self
    }

    pub fn into_source(self) -> ScriptedKeys {
        ScriptedKeys::from_inputs(self.inputs)
    }
}

pub fn emacs_editor() -> LineEditor {
    LineEditor::new()
}

pub fn vi_editor() -> LineEditor {
    let config = EditorConfig {
        edit_mode: EditMode::Vi,
        ..EditorConfig::default()
    };
    LineEditor::with_config(config).expect("default vi config")
}

pub fn editor_with_history(mode: EditMode, entries: &[&str]) -> LineEditor {
    let config = EditorConfig {
        edit_mode: mode,
        ..EditorConfig::default()
    };
    let mut editor = LineEditor::with_config(config).expect("default config");
    let mut history = MemoryHistory::new();
    for entry in entries {
        use keyline_core::History;
        history.add(entry);
    }
    editor.set_history(Box::new(history));
    editor
}

/// Runs the script through a full line read.
pub fn read(editor: &mut LineEditor, script: KeyScript) -> ReadOutcome {
    let mut source = script.into_source();
    editor.read_line(&mut source).expect("scripted read")
}

/// Runs the script and asserts the accepted line.
pub fn assert_line(editor: &mut LineEditor, script: KeyScript, expected: &str) {
    match read(editor, script) {
        ReadOutcome::Line(line) => assert_eq!(line, expected),
        other => panic!("expected accepted line {expected:?}, got {other:?}"),
    }
}

/// Convenience for one-shot vi scenarios: seed text, escape to move mode,
/// run the tail of the script, accept, and compare.
pub fn assert_vi(seed: &str, tail: KeyScript, expected: &str) {
    let mut editor = vi_editor();
    let mut script = KeyScript::new().text(seed).escape();
    script.inputs.extend(tail.inputs);
    assert_line(&mut editor, script.enter(), expected);
}
