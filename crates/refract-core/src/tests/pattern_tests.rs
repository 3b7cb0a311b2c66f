//! Pattern construction and validation.

use insta::assert_snapshot;
use refract_syntax::NodeKind;
use rstest::rstest;

use crate::{ChildPattern, ImportedName, Pattern, PatternError, PatternNode};

fn any_capture(name: &str) -> PatternNode {
    PatternNode::capture(name, PatternNode::Any)
}

#[test]
fn capture_names_are_sorted_and_unique() {
    let pattern = Pattern::new(PatternNode::call(
        any_capture("callee"),
        PatternNode::sequence([any_capture("b"), any_capture("a")]),
    ))
    .expect("valid pattern");

    assert_eq!(pattern.capture_names().collect::<Vec<_>>(), ["a", "b", "callee"]);
}

#[test]
fn alternation_branches_may_share_capture_names() {
    let pattern = Pattern::new(PatternNode::alternation([
        PatternNode::capture("value", PatternNode::kind(NodeKind::String)),
        PatternNode::capture("value", PatternNode::kind(NodeKind::TemplateString)),
    ]))
    .expect("valid pattern");

    assert_eq!(pattern.capture_names().collect::<Vec<_>>(), ["value"]);
}

#[rstest]
#[case::conjunction(
    PatternNode::all([any_capture("x"), any_capture("x")]),
    PatternError::duplicate_capture("x")
)]
#[case::nested(
    PatternNode::capture("x", PatternNode::node(NodeKind::CallExpression, [ChildPattern::field("function", any_capture("x"))])),
    PatternError::duplicate_capture("x")
)]
#[case::sequence_items(
    PatternNode::sequence([any_capture("x"), any_capture("x")]),
    PatternError::duplicate_capture("x")
)]
#[case::props(
    PatternNode::props([("a", any_capture("x")), ("b", any_capture("x"))]),
    PatternError::duplicate_capture("x")
)]
#[case::repetition(
    PatternNode::sequence_with_rest(Vec::<PatternNode>::new(), any_capture("rest")),
    PatternError::CaptureInRepetition { name: String::from("rest") }
)]
#[case::empty_name(any_capture(""), PatternError::EmptyCaptureName)]
#[case::empty_alternation(
    PatternNode::alternation(Vec::<PatternNode>::new()),
    PatternError::EmptyCombinator { combinator: "alternation" }
)]
#[case::empty_conjunction(
    PatternNode::all(Vec::<PatternNode>::new()),
    PatternError::EmptyCombinator { combinator: "conjunction" }
)]
#[case::no_modules(
    PatternNode::imported(Vec::<String>::new(), [ImportedName::Default]),
    PatternError::NoModules
)]
#[case::no_exports(PatternNode::imported(["m"], Vec::<ImportedName>::new()), PatternError::NoExports)]
#[case::other_kind(PatternNode::kind(NodeKind::Other), PatternError::UnnamedKind)]
#[case::duplicate_key(
    PatternNode::props_only([("id", PatternNode::Any), ("id", PatternNode::Absent)]),
    PatternError::DuplicateProperty { key: String::from("id") }
)]
fn invalid_patterns_are_rejected(#[case] root: PatternNode, #[case] expected: PatternError) {
    assert_eq!(Pattern::new(root), Err(expected));
}

#[test]
fn alternation_inside_repetition_still_rejects_captures() {
    let rest = PatternNode::alternation([PatternNode::Any, any_capture("late")]);
    let err = Pattern::new(PatternNode::sequence_with_rest([any_capture("first")], rest))
        .expect_err("capture in rest");

    assert_snapshot!(err.to_string(), @"capture 'late' cannot be declared inside a repeated sequence element");
}

#[test]
fn pattern_errors_render_readably() {
    let err = Pattern::try_from(PatternNode::all([any_capture("id"), any_capture("id")]))
        .expect_err("duplicate");

    assert_snapshot!(err.to_string(), @"capture 'id' is declared more than once");
}

#[test]
fn identical_patterns_compare_equal() {
    let build = || {
        Pattern::new(PatternNode::jsx_element(
            PatternNode::imported(["@lingui/react"], [ImportedName::named("Trans")]),
            PatternNode::props_only([("id", any_capture("id"))]),
        ))
        .expect("valid pattern")
    };

    assert_eq!(build(), build());
}
