//! Interactive demo driver for the keyline engine.
//!
//! This binary is the thin glue the engine expects around itself: it
//! decodes terminal events with crossterm, feeds logical keys through the
//! step API, and echoes the buffer after every step. Accepted lines are
//! printed back; Ctrl-D on an empty line ends the session.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode as CtKeyCode, KeyEventKind, KeyModifiers},
    style::Print,
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};
use log::debug;

use keyline_core::{
    EditMode, EditorConfig, Key, KeyCode, KeyInput, LineEditor, Mode, Modifiers, ReadOutcome,
    SearchDirection,
};

/// Keyline interactive demo.
#[derive(Parser, Debug)]
#[command(author, version, about = "Modal line editor demo", long_about = None)]
struct Cli {
    /// Start in vi editing mode instead of emacs.
    #[arg(long)]
    vi: bool,

    /// Configuration file (TOML); defaults to the standard location.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Prompt text.
    #[arg(long, default_value = "keyline> ")]
    prompt: String,
}

/// Keeps the terminal usable if anything below bails out.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn load_config(cli: &Cli) -> Result<EditorConfig> {
    let mut config = match &cli.config {
        Some(path) => EditorConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => match EditorConfig::default_path() {
            Some(path) if path.exists() => EditorConfig::load_from_file(&path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            _ => EditorConfig::default(),
        },
    };
    if cli.vi {
        config.edit_mode = EditMode::Vi;
    }
    Ok(config)
}

/// Maps a crossterm key event to an engine input. Ctrl-C becomes the
/// interrupt signal; everything else is a logical key.
fn map_key(event: event::KeyEvent) -> Option<KeyInput> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if let CtKeyCode::Char('c') = event.code {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(KeyInput::Interrupt);
        }
    }
    let code = match event.code {
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Esc => KeyCode::Esc,
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Tab => KeyCode::Tab,
        CtKeyCode::BackTab => KeyCode::BackTab,
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Insert => KeyCode::Insert,
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }
    // SHIFT is already folded into the character for Char keys.
    if event.modifiers.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)) {
        mods |= Modifiers::SHIFT;
    }
    Some(KeyInput::Key(Key::new(code, mods)))
}

fn mode_tag(mode: Mode) -> &'static str {
    match mode {
        Mode::Emacs => "",
        Mode::ViInsert => "[i] ",
        Mode::ViMove => "[n] ",
        Mode::Search => "",
    }
}

/// Redraws the prompt line in place.
fn redraw(out: &mut impl Write, prompt: &str, editor: &LineEditor) -> io::Result<()> {
    out.queue(cursor::MoveToColumn(0))?;
    out.queue(Clear(ClearType::CurrentLine))?;
    if let Some(status) = editor.search_status() {
        let tag = match status.direction {
            SearchDirection::Backward => "reverse-i-search",
            SearchDirection::Forward => "i-search",
        };
        let marker = if status.failing { "failing " } else { "" };
        out.queue(Print(format!(
            "({marker}{tag})`{}': {}",
            status.pattern,
            editor.line()
        )))?;
    } else {
        out.queue(Print(mode_tag(editor.mode())))?;
        out.queue(Print(prompt))?;
        out.queue(Print(editor.line()))?;
        let column = mode_tag(editor.mode()).len()
            + prompt.chars().count()
            + editor.buffer().width_to_cursor();
        out.queue(cursor::MoveToColumn(column as u16))?;
    }
    out.flush()
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let mut editor = LineEditor::with_config(config).context("applying key bindings")?;
    let mut out = io::stdout();
    let _guard = RawModeGuard::enable()?;

    'session: loop {
        editor.start_line();
        let outcome = loop {
            redraw(&mut out, &cli.prompt, &editor)?;

            let input = if editor.has_pending_input() {
                if event::poll(editor.ambiguous_timeout())? {
                    read_input(&mut editor)?
                } else {
                    // Ambiguous-prefix timeout: commit or discard.
                    if let Some(outcome) = editor.flush() {
                        break outcome;
                    }
                    continue;
                }
            } else {
                read_input(&mut editor)?
            };

            let Some(input) = input else { continue };
            let step = match input {
                KeyInput::Key(key) => editor.feed(key),
                KeyInput::Interrupt => editor.interrupt(),
                KeyInput::Resize(_, _) => None,
                KeyInput::Eof => Some(editor.end_of_input()),
            };
            if editor.take_bell() {
                out.queue(Print('\u{7}'))?;
            }
            if let Some(outcome) = step {
                break outcome;
            }
        };

        redraw(&mut out, &cli.prompt, &editor)?;
        out.queue(Print("\r\n"))?;
        out.flush()?;
        match outcome {
            ReadOutcome::Line(line) => {
                debug!("accepted: {line:?}");
                out.queue(Print(format!("-> {line}\r\n")))?;
                out.flush()?;
            }
            ReadOutcome::Interrupted => {
                out.queue(Print("^C\r\n"))?;
                out.flush()?;
            }
            ReadOutcome::Eof => break 'session,
        }
    }
    Ok(())
}

/// Reads one terminal event, folding Ctrl-D on an empty buffer into
/// end-of-input the way a raw terminal reports stream end.
fn read_input(editor: &mut LineEditor) -> Result<Option<KeyInput>> {
    match event::read()? {
        Event::Key(key) => {
            if let CtKeyCode::Char('d') = key.code {
                if key.modifiers.contains(KeyModifiers::CONTROL) && editor.line().is_empty() {
                    return Ok(Some(KeyInput::Eof));
                }
            }
            Ok(map_key(key))
        }
        Event::Resize(w, h) => Ok(Some(KeyInput::Resize(w, h))),
        _ => Ok(None),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli)
}
