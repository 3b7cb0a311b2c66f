//! Text edit application.

use insta::assert_snapshot;
use rstest::rstest;

use crate::{EditError, Fix, TextEdit, apply_edits, apply_first_non_overlapping};

#[test]
fn edits_apply_against_original_offsets() {
    let source = "t('a');\nt('b');\n";
    let edits = [
        TextEdit::replace(8..9, "i18n.t"),
        TextEdit::replace(0..1, "i18n.t"),
        TextEdit::insert(0, "import { i18n } from 'i18n';\n"),
    ];

    let output = apply_edits(source, &edits).expect("apply");

    assert_snapshot!(output.trim_end(), @r"
    import { i18n } from 'i18n';
    i18n.t('a');
    i18n.t('b');
    ");
}

#[test]
fn insertions_at_one_offset_keep_their_order() {
    let edits = [TextEdit::insert(1, "b"), TextEdit::insert(1, "c")];

    assert_eq!(apply_edits("ad", &edits).as_deref(), Ok("abcd"));
}

#[rstest]
#[case::before(TextEdit::insert(2, "<"), "ab<[x]ef")]
#[case::after(TextEdit::insert(4, ">"), "ab[x]>ef")]
fn insertions_touching_a_replacement_stay_outside(#[case] insert: TextEdit, #[case] expected: &str) {
    let edits = [TextEdit::replace(2..4, "[x]"), insert];

    assert_eq!(apply_edits("abcdef", &edits).as_deref(), Ok(expected));
}

#[rstest]
#[case::overlap(
    vec![TextEdit::replace(0..3, "x"), TextEdit::replace(2..4, "y")],
    EditError::Overlap { first: 0..3, second: 2..4 }
)]
#[case::insert_inside(
    vec![TextEdit::replace(0..3, "x"), TextEdit::insert(1, "y")],
    EditError::Overlap { first: 0..3, second: 1..1 }
)]
#[case::out_of_bounds(
    vec![TextEdit::replace(4..9, "x")],
    EditError::OutOfBounds { start: 4, end: 9, len: 6 }
)]
#[case::inverted(
    vec![TextEdit::Replace { range: 3..1, text: String::new() }],
    EditError::InvertedRange { start: 3, end: 1 }
)]
fn invalid_edits_are_rejected(#[case] edits: Vec<TextEdit>, #[case] expected: EditError) {
    assert_eq!(apply_edits("abcdef", &edits), Err(expected));
}

#[test]
fn edits_must_respect_character_boundaries() {
    let err = apply_edits("é", &[TextEdit::insert(1, "x")]).expect_err("mid-character");

    assert_eq!(err, EditError::NotCharBoundary { offset: 1 });
}

#[test]
fn overlapping_fixes_are_skipped_in_order() {
    let source = "foo(bar);";
    let fixes = [
        Fix::new("rename call", vec![TextEdit::replace(0..3, "baz")]),
        Fix::new("rewrite whole call", vec![TextEdit::replace(0..8, "qux()")]),
        Fix::new("rename argument", vec![TextEdit::replace(4..7, "arg")]),
    ];

    let result = apply_first_non_overlapping(source, &fixes).expect("apply");

    assert_eq!(result.output(), "baz(arg);");
    assert_eq!(result.applied(), [0, 2]);
    assert_eq!(result.skipped(), [1]);
}

#[test]
fn fixes_serialise_with_operation_tags() {
    let mut fix = Fix::new("migrate", vec![TextEdit::insert(0, "a")]);
    fix.push(TextEdit::replace(1..2, "b"));

    let json = serde_json::to_value(&fix).expect("serialise");

    assert_eq!(
        json,
        serde_json::json!({
            "description": "migrate",
            "edits": [
                { "op": "insert", "offset": 0, "text": "a" },
                { "op": "replace", "range": { "start": 1, "end": 2 }, "text": "b" }
            ]
        })
    );
}
