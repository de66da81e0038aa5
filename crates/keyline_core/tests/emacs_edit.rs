//! Emacs-mode line editing: word motions and kills, line kills, numeric
//! arguments, case transforms, transpose, and yank.

mod common;

use common::{assert_line, emacs_editor, read, KeyScript};
use keyline_core::{Key, KeyCode, ReadOutcome};

fn assert_emacs(script: KeyScript, expected: &str) {
    let mut editor = emacs_editor();
    assert_line(&mut editor, script.enter(), expected);
}

#[test]
fn delete_previous_word() {
    let script = KeyScript::new().text("This is a test").alt('b').ctrl('k');
    assert_emacs(script, "This is a ");

    // Repeated backward kills eventually empty the buffer and then no-op.
    let script = KeyScript::new()
        .text("This is a test")
        .ctrl('w')
        .ctrl('w')
        .ctrl('w')
        .ctrl('w')
        .ctrl('w')
        .ctrl('w');
    assert_emacs(script, "");
}

#[test]
fn delete_next_word() {
    // Kill-word at the end of the line is a no-op.
    let script = KeyScript::new().text("This is a test").alt('d');
    assert_emacs(script, "This is a test");

    let script = KeyScript::new().text("This is a test").alt('b').alt('d');
    assert_emacs(script, "This is a ");
}

#[test]
fn move_to_end_and_back() {
    let script = KeyScript::new()
        .text("This is a test")
        .alt('b')
        .text("X")
        .ctrl('e')
        .text("X");
    assert_emacs(script, "This is a XtestX");

    let script = KeyScript::new()
        .text("This is a test")
        .alt('b')
        .alt('b')
        .text("X")
        .ctrl('e')
        .text("X");
    assert_emacs(script, "This is Xa testX");
}

#[test]
fn previous_word_stops_at_line_start() {
    let script = KeyScript::new()
        .text("This is a test")
        .alt('b')
        .alt('b')
        .alt('b')
        .alt('b')
        .alt('b')
        .text("X");
    assert_emacs(script, "XThis is a test");
}

#[test]
fn line_start_motion() {
    let script = KeyScript::new().text("This is a test").ctrl('a').text("X");
    assert_emacs(script, "XThis is a test");

    let script = KeyScript::new()
        .text("This is a test")
        .ctrl('a')
        .right(1)
        .text("X");
    assert_emacs(script, "TXhis is a test");
}

#[test]
fn backward_kill_line() {
    let script = KeyScript::new().text("This is a test").ctrl('u');
    assert_emacs(script, "");

    let script = KeyScript::new().text("This is a test").left(1).ctrl('u');
    assert_emacs(script, "t");

    let script = KeyScript::new().text("This is a test").left(2).ctrl('u');
    assert_emacs(script, "st");
}

#[test]
fn left_right_and_backspace() {
    let script = KeyScript::new()
        .text("This is a test")
        .left(1)
        .right(1)
        .backspace();
    assert_emacs(script, "This is a tes");

    // Backspace at offset zero is a no-op.
    let script = KeyScript::new().text("ab").ctrl('a').backspace().text("X");
    assert_emacs(script, "Xab");
}

#[test]
fn digit_argument_moves_chars() {
    let script = KeyScript::new()
        .text("0123456789")
        .alt('8')
        .ctrl('b')
        .alt('2')
        .ctrl('f')
        .ctrl('k');
    assert_emacs(script, "0123");
}

#[test]
fn digit_argument_self_insert() {
    let script = KeyScript::new().alt('4').text("0");
    assert_emacs(script, "0000");

    // Multi-digit argument.
    let script = KeyScript::new().alt('1').alt('2').text("x");
    assert_emacs(script, "xxxxxxxxxxxx");
}

#[test]
fn digit_argument_moves_words() {
    let script = KeyScript::new()
        .text("abc def ghi klm nop")
        .alt('2')
        .alt('b')
        .ctrl('k');
    assert_emacs(script, "abc def ghi ");
}

#[test]
fn case_transforms() {
    let script = KeyScript::new()
        .text("abc def ghi klm nop")
        .ctrl('a')
        .alt('3')
        .alt('u')
        .alt('b')
        .alt('3')
        .alt('c')
        .alt('b')
        .alt('l');
    assert_emacs(script, "ABC DEF Ghi Klm nop");
}

#[test]
fn transpose_with_argument() {
    let script = KeyScript::new().text("abcd").alt('b').right(1).ctrl('t');
    assert_emacs(script, "bacd");

    let script = KeyScript::new()
        .text("abcd")
        .alt('b')
        .right(1)
        .alt('2')
        .ctrl('t');
    assert_emacs(script, "bcad");
}

#[test]
fn kill_then_yank_round_trip() {
    let script = KeyScript::new().text("abcdef").ctrl('u').ctrl('y').ctrl('y');
    assert_emacs(script, "abcdefabcdef");
}

#[test]
fn kill_overwrites_register() {
    // The register holds only the most recent kill.
    let script = KeyScript::new()
        .text("one two")
        .ctrl('w')
        .ctrl('w')
        .ctrl('y');
    assert_emacs(script, "one ");
}

#[test]
fn abort_discards_the_line() {
    let mut editor = emacs_editor();
    let script = KeyScript::new().text("This is a test").ctrl('g').enter();
    assert_line(&mut editor, script, "");
    assert!(editor.take_bell());
}

#[test]
fn unbound_key_bells_and_keeps_state() {
    let mut editor = emacs_editor();
    let script = KeyScript::new()
        .text("abc")
        .key(Key::code(KeyCode::F(5)))
        .text("d")
        .enter();
    assert_line(&mut editor, script, "abcd");
    assert!(editor.take_bell());
}

#[test]
fn history_walk_restores_edited_line() {
    let mut editor = emacs_editor();
    assert_line(&mut editor, KeyScript::new().text("first").enter(), "first");
    assert_line(&mut editor, KeyScript::new().text("second").enter(), "second");

    let script = KeyScript::new().text("draft").up().up().down().down().enter();
    assert_line(&mut editor, script, "draft");

    // "draft" was accepted above, so it is now the newest entry.
    let script = KeyScript::new().up().up().enter();
    assert_line(&mut editor, script, "second");
}

#[test]
fn interrupt_policy_surfaces_by_default() {
    let mut editor = emacs_editor();
    let outcome = read(&mut editor, KeyScript::new().text("half a line").interrupt());
    assert_eq!(outcome, ReadOutcome::Interrupted);
    assert_eq!(editor.line(), "");
}
