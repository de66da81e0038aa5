//! Vi move-mode behavior: counts, operators against motions, doubled
//! operators, character search, bracket matching, replace, and puts.

mod common;

use common::{assert_line, assert_vi, vi_editor, KeyScript};
use keyline_core::{Key, KeyCode, ReadOutcome};

fn left_keys() -> [Key; 3] {
    [Key::char('h'), Key::code(KeyCode::Left), Key::ctrl('h')]
}

fn right_keys() -> [Key; 3] {
    [Key::char('l'), Key::code(KeyCode::Right), Key::char(' ')]
}

#[test]
fn move_left_variants() {
    for left in left_keys() {
        let tail = KeyScript::new().key(left).key(left).key(left).text("iX");
        assert_vi("0123456789", tail, "012345X6789");

        let tail = KeyScript::new().text("3").key(left).text("iX");
        assert_vi("0123456789", tail, "012345X6789");

        let tail = KeyScript::new().text("13").key(left).text("iX");
        assert_vi(
            "0123456789ABCDEFHIJLMNOPQRSTUVWXYZ",
            tail,
            "0123456789ABCDEFHIJLXMNOPQRSTUVWXYZ",
        );
    }
}

#[test]
fn delete_move_left() {
    for left in left_keys() {
        let tail = KeyScript::new().text("13d").key(left);
        assert_vi(
            "0123456789ABCDEFHIJLMNOPQRSTUVWXYZ",
            tail,
            "0123456789ABCDEFHIJLZ",
        );

        let tail = KeyScript::new().text("d").key(left).text("d").key(left);
        assert_vi(
            "0123456789ABCDEFHIJLMNOPQRSTUVWXYZ",
            tail,
            "0123456789ABCDEFHIJLMNOPQRSTUVWZ",
        );
    }
}

#[test]
fn change_and_yank_move_left() {
    for left in left_keys() {
        let tail = KeyScript::new().text("13c").key(left).text("_HI");
        assert_vi(
            "0123456789ABCDEFHIJLMNOPQRSTUVWXYZ",
            tail,
            "0123456789ABCDEFHIJL_HIZ",
        );

        let tail = KeyScript::new().text("c").key(left).text("X");
        assert_vi("word", tail, "woXd");

        let tail = KeyScript::new().text("3y").key(left).text("p");
        assert_vi("word", tail, "wordwor");
    }
}

#[test]
fn move_right_variants() {
    for right in right_keys() {
        let tail = KeyScript::new()
            .text("0")
            .key(right)
            .key(right)
            .key(right)
            .text("iX");
        assert_vi("0123456789", tail, "012X3456789");

        let tail = KeyScript::new().text("012").key(right).text("iX");
        assert_vi("0123456789ABCDEFHIJK", tail, "0123456789ABXCDEFHIJK");
    }
}

#[test]
fn operators_against_move_right() {
    for right in right_keys() {
        let tail = KeyScript::new().text("05d").key(right);
        assert_vi("a bunch of words", tail, "ch of words");

        let tail = KeyScript::new().text("0d").key(right).text("d").key(right);
        assert_vi("a bunch of words", tail, "bunch of words");

        let tail = KeyScript::new().text("010c").key(right).text("XXX");
        assert_vi("a bunch of words", tail, "XXX words");

        let tail = KeyScript::new().text("010y").key(right).text("$p");
        assert_vi("a bunch of words", tail, "a bunch of wordsa bunch of");
    }
}

#[test]
fn kill_to_eol_and_bol() {
    assert_vi("hello", KeyScript::new().ctrl('k'), "hell");

    let tail = KeyScript::new().left(3).ctrl('k');
    assert_vi("This is a test", tail, "This is a ");

    let tail = KeyScript::new().left(3).ctrl('u');
    assert_vi("all work and no play", tail, "play");

    let tail = KeyScript::new().text("0").ctrl('u');
    assert_vi("donkey punch", tail, "donkey punch");
}

#[test]
fn transpose_chars() {
    let tail = KeyScript::new()
        .text("0")
        .right(1)
        .ctrl('t')
        .ctrl('t')
        .ctrl('t')
        .ctrl('t')
        .ctrl('t');
    assert_vi("abcdef", tail, "bcdefa");

    // Nothing happens at offset zero.
    let tail = KeyScript::new().text("0").ctrl('t');
    assert_vi("abcdef", tail, "abcdef");

    // At the end of the line the last two characters swap.
    let tail = KeyScript::new().text("$").ctrl('t');
    assert_vi("abcdef", tail, "abcdfe");
}

#[test]
fn backward_kill_word_is_alnum_based() {
    let tail = KeyScript::new().ctrl('w').ctrl('w');
    assert_vi("oily rancid badgers", tail, "oily s");

    let tail = KeyScript::new().ctrl('w').ctrl('w');
    assert_vi("pasty bulimic rats !!!!!", tail, "pasty !");

    // A count applies the kill repeatedly.
    let tail = KeyScript::new().text("2").ctrl('w');
    assert_vi("pasty bulimic rats !!!!!", tail, "pasty !");
}

#[test]
fn vim_capital_extensions() {
    // D deletes to end of line.
    let tail = KeyScript::new().left(2).text("Dadaid");
    assert_vi("banana", tail, "bandaid");

    // C changes to end of line.
    let tail = KeyScript::new().left(3).text("Cyo");
    assert_vi("yogurt", tail, "yoyo");

    // S changes the whole line.
    let tail = KeyScript::new().left(3).text("Sdogfishhead");
    assert_vi("great lakes brewery", tail, "dogfishhead");
}

#[test]
fn end_of_line_operations() {
    let tail = KeyScript::new().left(10).text("$a is tasty!");
    assert_vi("chicken sushimi", tail, "chicken sushimi is tasty!");

    assert_vi("chicken sushimi", KeyScript::new().text("0lld$"), "ch");
    assert_vi(
        "chicken sushimi",
        KeyScript::new().text("0llc$opsticks"),
        "chopsticks",
    );
    assert_vi(
        "chicken sushimi",
        KeyScript::new().text("0lly$$p"),
        "chicken sushimiicken sushimi",
    );
}

#[test]
fn first_non_blank() {
    assert_vi(" foo bar", KeyScript::new().text("^dw"), " bar");
}

#[test]
fn bracket_match_motion() {
    // Close paren with nesting, brackets of other types ignored.
    assert_vi("ab((cdef[[))", KeyScript::new().text("%aX"), "ab(X(cdef[[))");

    // From the first open paren.
    let tail = KeyScript::new().text("0").right(2).text("%aX");
    assert_vi("ab((cdef[[))", tail, "ab((cdef[[))X");

    // No match leaves the cursor in place.
    assert_vi("abcd))", KeyScript::new().text("%aX"), "abcd))X");
    assert_vi("(abcd(d", KeyScript::new().text("0%aX"), "(Xabcd(d");

    // Operators over the match span are inclusive at both ends.
    assert_vi("ab(def)hij", KeyScript::new().text("0lld%"), "abhij");
    assert_vi("ab(def)", KeyScript::new().text("0lld%"), "ab");
    assert_vi(
        "ab(def)hij",
        KeyScript::new().text("0lly%$p"),
        "ab(def)hij(def)",
    );
    assert_vi("ab(def)hij", KeyScript::new().text("0llc%X"), "abXhij");
}

#[test]
fn word_right_motions() {
    let tail = KeyScript::new().text("0ww").ctrl('u');
    assert_vi("buttery frog necks", tail, "necks");

    let tail = KeyScript::new().left(5).text("w").ctrl('k');
    assert_vi("buttery frog    foo", tail, "buttery frog    ");

    let tail = KeyScript::new().text("05w").ctrl('u');
    assert_vi("a big batch of buttery frog livers", tail, "frog livers");

    assert_vi(
        "a big batch of buttery frog livers",
        KeyScript::new().text("05dw"),
        "frog livers",
    );
    assert_vi(
        "another big batch of buttery frog livers",
        KeyScript::new().text("0ldw"),
        "abig batch of buttery frog livers",
    );
}

#[test]
fn yank_words_and_put() {
    assert_vi(
        "big brown pickles",
        KeyScript::new().text("02yw$piz"),
        "big brown picklesbig brownz ",
    );
    assert_vi(
        "big brown pickles",
        KeyScript::new().text("02yw$Piz"),
        "big brown picklebig brownz s",
    );
}

#[test]
fn change_word_acts_through_word_end() {
    assert_vi(
        "big brown pickles",
        KeyScript::new().text("0wcwgreen"),
        "big green pickles",
    );
    assert_vi(
        "big brown pickles",
        KeyScript::new().text("02cwlittle bitty"),
        "little bitty pickles",
    );
}

#[test]
fn word_left_motions() {
    let tail = KeyScript::new().text("bb").ctrl('k');
    assert_vi("lucious lark liquid    ", tail, "lucious ");

    let tail = KeyScript::new().left(2).text("b").ctrl('u');
    assert_vi("lucious lark liquid", tail, "liquid");

    let tail = KeyScript::new().text("3b").ctrl('k');
    assert_vi("lively lolling lark liquid", tail, "lively ");
}

#[test]
fn end_word_motions() {
    let tail = KeyScript::new().text("0e").text("D");
    assert_vi("putrid pidgen porridge", tail, "putri");

    let tail = KeyScript::new().text("0e").text("D");
    assert_vi("    putrid pidgen porridge", tail, "    putri");

    let tail = KeyScript::new().text("05l3e").ctrl('u');
    assert_vi("putrid pidgen porridge and mash", tail, "d mash");
}

#[test]
fn insert_at_beginning_of_line() {
    assert_vi(
        "dessicated dog droppings",
        KeyScript::new().text("Itasty "),
        "tasty dessicated dog droppings",
    );
}

#[test]
fn backward_delete_char() {
    let tail = KeyScript::new().left(1).text("XXX");
    assert_vi("gross animal stuff", tail, "gross animal ff");

    let tail = KeyScript::new().left(1).text("50X");
    assert_vi("gross animal stuff", tail, "ff");
}

#[test]
fn delete_char_under_cursor() {
    assert_vi("thing to delete", KeyScript::new().text("bbxxx"), "thing delete");
    assert_vi("thing to delete", KeyScript::new().text("bb99x"), "thing ");
}

#[test]
fn toggle_case_advances() {
    assert_vi("big.LITTLE", KeyScript::new().text("0~~~~~~~~~~"), "BIG.little");
    assert_vi("big.LITTLE", KeyScript::new().text("020~"), "BIG.little");
}

#[test]
fn replace_chars() {
    assert_vi("abcdefhij", KeyScript::new().text("0rXiY"), "YXbcdefhij");
    assert_vi("abcdefhij", KeyScript::new().text("04rXiY"), "XXXYXefhij");
    assert_vi("abcdefhij", KeyScript::new().text("099rZ"), "ZZZZZZZZZ");

    // Escape instead of a character cancels with no change.
    let tail = KeyScript::new().text("0r").escape().text("iX");
    assert_vi("abcdefhij", tail, "Xabcdefhij");
}

#[test]
fn char_search_forward() {
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("03ffiX"),
        "aaaafaaaafaaaaXfaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("0ffffffiX"),
        "aaaafaaaafaaaaXfaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("0ff;;iX"),
        "aaaafaaaafaaaaXfaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("0ff;,iX"),
        "aaaaXfaaaafaaaafaaaaf",
    );
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("0fX3;iY"),
        "aaaaXaaaaXaaaaXaaaaYX",
    );
    assert_vi("aaaafaaaafaaaafaaaaf", KeyScript::new().text("03dff"), "aaaaf");
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("0fX2d;"),
        "aaaaaaaaX",
    );
}

#[test]
fn char_search_backward() {
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("3FfiX"),
        "aaaaXfaaaafaaaafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("FfFfFfiX"),
        "aaaaXfaaaafaaaafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("Ff;iX"),
        "aaaafaaaaXfaaaafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("Ff;,iX"),
        "aaaafaaaafaaaaXfaaaaf",
    );
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("FX2;iY"),
        "aaaaYXaaaaXaaaaXaaaaX",
    );
    assert_vi("aaaafaaaafaaaafaaaaf", KeyScript::new().text("3dFf"), "aaaaf");
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("FX2d;"),
        "aaaaXaaaaX",
    );
}

#[test]
fn char_search_till_forward() {
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("03tfiX"),
        "aaaafaaaafaaaXafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("0tftftfiX"),
        "aaaXafaaaafaaaafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("0tf;;iX"),
        "aaaafaaaafaaaXafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("02tf;,iX"),
        "aaaafaaaafXaaaafaaaaf",
    );
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("0tX3;iY"),
        "aaaaXaaaaXaaaaXaaaYaX",
    );
    assert_vi("aaaafaaaafaaaafaaaaf", KeyScript::new().text("03dtf"), "faaaaf");
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("0tX2d;iY"),
        "aaaYXaaaaX",
    );
}

#[test]
fn char_search_till_backward() {
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("3TfiX"),
        "aaaafXaaaafaaaafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("TfTfTfiX"),
        "aaaafaaaafaaaafXaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("Tf;;iX"),
        "aaaafXaaaafaaaafaaaaf",
    );
    assert_vi(
        "aaaafaaaafaaaafaaaaf",
        KeyScript::new().text("2Tf;,iX"),
        "aaaafaaaXafaaaafaaaaf",
    );
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("TX2;iY"),
        "aaaaXYaaaaXaaaaXaaaaX",
    );
    assert_vi("aaaafaaaafaaaafaaaaf", KeyScript::new().text("3dTf"), "aaaaff");
    assert_vi(
        "aaaaXaaaaXaaaaXaaaaX",
        KeyScript::new().text("TX2d;iY"),
        "aaaaXYaaaaX",
    );
}

#[test]
fn char_search_miss_cancels_operator() {
    // No 'z' in the buffer: the motion is a no-op and the pending delete
    // is cancelled rather than applied to an empty span.
    let mut editor = vi_editor();
    let script = KeyScript::new().text("abc").escape().text("0dfz").enter();
    assert_line(&mut editor, script, "abc");
    assert!(editor.take_bell());
}

#[test]
fn doubled_operators_take_the_whole_line() {
    assert_vi("abcdef", KeyScript::new().text("dd"), "");
    // Including with the cursor at offset zero.
    assert_vi("abcdef", KeyScript::new().text("0dd"), "");
    assert_vi("abcdef", KeyScript::new().text("yyp"), "abcdefabcdef");
    assert_vi("abcdef", KeyScript::new().text("Yp"), "abcdefabcdef");
    assert_vi("abcdef", KeyScript::new().text("ccsuck"), "suck");
}

#[test]
fn count_distribution_over_operator_and_motion() {
    let seed = "one two three four five six seven eight";
    let expected = "seven eight";
    assert_vi(seed, KeyScript::new().text("02d3w"), expected);
    assert_vi(seed, KeyScript::new().text("06dw"), expected);
    assert_vi(seed, KeyScript::new().text("0d6w"), expected);
}

#[test]
fn escape_in_move_mode_is_idempotent() {
    let mut editor = vi_editor();
    let script = KeyScript::new()
        .text("steady")
        .escape()
        .escape()
        .escape()
        .text("iX")
        .enter();
    assert_line(&mut editor, script, "steadXy");
}

#[test]
fn escape_cancels_pending_operator() {
    // d, Escape, then a motion: the operator must not fire.
    let tail = KeyScript::new().text("d").escape().text("0iX");
    assert_vi("abcdef", tail, "Xabcdef");
}

#[test]
fn substitute_chars() {
    assert_vi("abcdef", KeyScript::new().text("02sXY"), "XYcdef");
}

#[test]
fn vi_history_navigation() {
    let mut editor = vi_editor();
    assert_line(&mut editor, KeyScript::new().text("line1").enter(), "line1");
    assert_line(&mut editor, KeyScript::new().text("line2").enter(), "line2");

    let script = KeyScript::new().text("li").escape().text("kk").enter();
    assert_line(&mut editor, script, "line1");

    // Walking down past the newest entry restores the in-progress line.
    let script = KeyScript::new().text("li").escape().text("kkjj").enter();
    assert_line(&mut editor, script, "li");
}

#[test]
fn interrupt_surfaces_and_clears_state() {
    let mut editor = vi_editor();
    let script = KeyScript::new().text("partial").escape().text("3d").interrupt();
    let outcome = common::read(&mut editor, script);
    assert_eq!(outcome, ReadOutcome::Interrupted);
    assert_eq!(editor.line(), "");

    // The next read starts clean.
    assert_line(&mut editor, KeyScript::new().text("fresh").enter(), "fresh");
}

#[test]
fn eof_is_distinct_from_empty_line() {
    let mut editor = vi_editor();
    let outcome = common::read(&mut editor, KeyScript::new());
    assert_eq!(outcome, ReadOutcome::Eof);

    let mut editor = vi_editor();
    let outcome = common::read(&mut editor, KeyScript::new().enter());
    assert_eq!(outcome, ReadOutcome::Line(String::new()));
}
