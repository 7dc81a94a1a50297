use insta::assert_snapshot;
use jsonsax::{Parser, Recorder};

fn events(input: &str) -> String {
    let mut recorder = Recorder::validating();
    Parser::<4>::new().parse(input.as_bytes(), &mut recorder);
    recorder.render()
}

fn events_unchecked(input: &str) -> String {
    let mut recorder = Recorder::new();
    Parser::<4>::new().parse(input.as_bytes(), &mut recorder);
    recorder.render()
}

#[test]
fn member_then_item_routing() {
    assert_snapshot!(events(r#"{"k": [1, "two", {"three": 3}], "f": false}"#), @r#"
    {
    key "k"
    [
    item 1
    item "two"
    {
    key "three"
    value 3
    }
    ]
    key "f"
    value false
    }
    "#);
}

#[test]
fn consecutive_roots() {
    assert_snapshot!(events("[] {} [null]"), @r"
    [
    ]
    {
    }
    [
    item null
    ]
    ");
}

#[test]
fn truncated_document() {
    assert_snapshot!(events(r#"{"a": [1, 2"#), @r#"
    {
    key "a"
    [
    item 1
    error unexpected character at byte 11
    error malformed structure at byte 11
    "#);
}

#[test]
fn unchecked_keyword_typo_is_a_number() {
    assert_snapshot!(events_unchecked("[ture, 1]"), @r"
    [
    item t
    item 1
    ]
    ");
}

#[test]
fn unchecked_stray_closers_still_fire() {
    assert_snapshot!(events_unchecked("]}"), @r"
    ]
    }
    ");
}

#[test]
fn nul_terminates_input() {
    assert_snapshot!(events("[1]\0[2]"), @r"
    [
    item 1
    ]
    ");
}

#[test]
fn overflowed_container_children_follow_the_last_tracked_frame() {
    let mut recorder = Recorder::validating();
    let mut parser = Parser::<1>::new();
    parser.parse(br#"[[[{"k":1}]]]"#, &mut recorder);
    assert_eq!(parser.depth(), 1);
    assert_snapshot!(recorder.render(), @r#"
    [
    [
    [
    {
    error nesting exceeds the maximum depth at byte 3
    item "k"
    item 1
    }
    ]
    ]
    ]
    "#);
}
