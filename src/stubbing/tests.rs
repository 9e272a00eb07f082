//! Tests for the fluent stubbing API.

use crate::controller::DoubleController;
use crate::{args, methods};
use serde_json::{json, Value};

fn controller() -> DoubleController {
    DoubleController::from_config(&methods! {"method" => "DEFAULT"})
}

#[test]
fn test_returns_replaces_default() {
    let c = controller();
    c.stubs("method").returns(json!("NEW"));
    assert_eq!(c.dispatch("method", args![]).unwrap(), json!("NEW"));
}

#[test]
fn test_with_wins_only_on_equal_args() {
    let c = controller();
    c.stubs("method").with(args!["ARG"]).returns(json!("RESULT"));

    assert_eq!(c.dispatch("method", args!["ARG"]).unwrap(), json!("RESULT"));
    assert_eq!(c.dispatch("method", args!["OTHER"]).unwrap(), json!("DEFAULT"));
    assert_eq!(c.dispatch("method", args![]).unwrap(), json!("DEFAULT"));
}

#[test]
fn test_with_is_structural_not_textual() {
    let c = controller();
    c.stubs("method").with(args![1]).returns(json!("INT"));

    assert_eq!(c.dispatch("method", args![1]).unwrap(), json!("INT"));
    assert_eq!(c.dispatch("method", args!["1"]).unwrap(), json!("DEFAULT"));
}

#[test]
fn test_on_predicate() {
    let c = controller();
    c.stubs("method").on(|args| args.len() == 2).returns(json!("PAIR"));

    assert_eq!(c.dispatch("method", args![1, 2]).unwrap(), json!("PAIR"));
    assert_eq!(c.dispatch("method", args![1]).unwrap(), json!("DEFAULT"));
}

#[test]
fn test_at_occurrence() {
    let c = controller();
    c.stubs("method").at(1).returns(json!("RESULT"));

    assert_eq!(c.dispatch("method", args![]).unwrap(), json!("DEFAULT"));
    assert_eq!(c.dispatch("method", args![]).unwrap(), json!("RESULT"));
    assert_eq!(c.dispatch("method", args![]).unwrap(), json!("DEFAULT"));
}

#[test]
fn test_matching_glob_patterns() {
    let c = controller();
    c.stubs("method")
        .matching(vec!["*.txt".to_string()])
        .returns(json!("TEXT"));

    assert_eq!(c.dispatch("method", args!["notes.txt"]).unwrap(), json!("TEXT"));
    assert_eq!(c.dispatch("method", args!["notes.rs"]).unwrap(), json!("DEFAULT"));
}

#[test]
fn test_calls_receives_argument_list() {
    let c = controller();
    c.stubs("method").calls(|args| json!(args.len()));

    assert_eq!(c.dispatch("method", args![1, 2, 3]).unwrap(), json!(3));
}

#[test]
fn test_combined_constraints() {
    let c = controller();
    c.stubs("method")
        .with(args!["ARG"])
        .at(1)
        .returns(json!("RESULT"));

    // First call matches args but not occurrence.
    assert_eq!(c.dispatch("method", args!["ARG"]).unwrap(), json!("DEFAULT"));
    // Second call matches both.
    assert_eq!(c.dispatch("method", args!["ARG"]).unwrap(), json!("RESULT"));
    // Second occurrence already spent; wrong args fall through anyway.
    assert_eq!(c.dispatch("method", args!["ARG"]).unwrap(), json!("DEFAULT"));
}

#[test]
fn test_later_rules_take_precedence_at_equal_specificity() {
    let c = controller();
    c.stubs("method").with(args!["ARG"]).returns(json!("FIRST"));
    c.stubs("method").with(args!["ARG"]).returns(json!("SECOND"));

    assert_eq!(c.dispatch("method", args!["ARG"]).unwrap(), json!("SECOND"));
}

#[test]
fn test_narrow_rule_falls_through_to_older_default() {
    let c = controller();
    c.stubs("method").returns(json!("NEWER_DEFAULT"));
    c.stubs("method").with(args!["ARG"]).returns(json!("NARROW"));

    assert_eq!(c.dispatch("method", args!["ARG"]).unwrap(), json!("NARROW"));
    assert_eq!(c.dispatch("method", args!["X"]).unwrap(), json!("NEWER_DEFAULT"));
}

#[test]
fn test_null_return_is_a_real_answer() {
    let c = controller();
    c.stubs("method").with(args!["NONE"]).returns(Value::Null);

    assert_eq!(c.dispatch("method", args!["NONE"]).unwrap(), Value::Null);
}
