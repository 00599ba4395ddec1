//! Tests for rule normalization and associated-item lookup.

use omni_similar::{
    RawRule, Rule, RuleSide, RuleTable, SimilarError, find_associated, normalize_rules,
};
use serde_json::json;

fn rule(antecedent: &[&str], consequent: &[&str], confidence: f64) -> Rule {
    Rule::new(antecedent.iter().copied(), consequent.iter().copied(), confidence).unwrap()
}

#[test]
fn test_association_order_preservation() {
    let rules = RuleTable::new(vec![
        rule(&["A"], &["y", "z"], 0.5),
        rule(&["A"], &["x", "y"], 0.9),
    ]);
    assert_eq!(find_associated("A", &rules), vec!["x", "y", "z"]);
}

#[test]
fn test_no_matching_rule_returns_empty() {
    let rules = RuleTable::new(vec![rule(&["A"], &["x"], 0.9)]);
    assert!(find_associated("B", &rules).is_empty());
    assert!(find_associated("A", &RuleTable::default()).is_empty());
}

#[test]
fn test_multi_item_antecedent_matches_on_membership() {
    let rules = RuleTable::new(vec![
        rule(&["milk", "bread"], &["butter"], 0.8),
        rule(&["eggs"], &["bacon"], 0.95),
    ]);
    assert_eq!(find_associated("bread", &rules), vec!["butter"]);
}

#[test]
fn test_equal_confidence_keeps_input_order() {
    let rules = RuleTable::new(vec![
        rule(&["A"], &["first"], 0.7),
        rule(&["A"], &["second"], 0.7),
        rule(&["A"], &["third"], 0.7),
    ]);
    assert_eq!(find_associated("A", &rules), vec!["first", "second", "third"]);
}

#[test]
fn test_min_confidence_filter() {
    let rules = RuleTable::new(vec![
        rule(&["A"], &["x"], 0.9),
        rule(&["A"], &["y"], 0.2),
    ]);
    let strong = rules.with_min_confidence(0.5);
    assert_eq!(strong.len(), 1);
    assert_eq!(find_associated("A", &strong), vec!["x"]);
}

// =========================================================================
// Normalization
// =========================================================================

#[test]
fn test_string_sides_are_split_on_whitespace() {
    let rules = RuleTable::from_values(&[
        json!({"antecedents": "A  B", "consequents": "x y x", "confidence": 0.4}),
        json!({"antecedents": ["A"], "consequents": ["z"], "confidence": 0.6}),
    ])
    .unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.rules()[0].confidence(), 0.6);
    assert_eq!(rules.rules()[1].consequent(), ["x", "y"]);
    assert!(rules.rules()[1].applies_to("B"));
    assert_eq!(find_associated("A", &rules), vec!["z", "x", "y"]);
}

#[test]
fn test_singular_field_aliases() {
    let raw = RawRule::from_value(&json!({
        "antecedent": "A",
        "consequent": ["x"],
        "confidence": 1.0
    }))
    .unwrap();
    assert_eq!(raw.antecedents, RuleSide::Text("A".to_string()));
}

#[test]
fn test_non_set_side_is_malformed() {
    let result = RuleTable::from_values(&[
        json!({"antecedents": "A", "consequents": "x", "confidence": 0.4}),
        json!({"antecedents": 42, "consequents": "x", "confidence": 0.4}),
    ]);
    match result {
        Err(SimilarError::MalformedInput { field, .. }) => assert!(field.starts_with("row 1")),
        other => panic!("expected MalformedInput, got {other:?}"),
    }
}

#[test]
fn test_confidence_out_of_range_is_malformed() {
    for confidence in [-0.1, 1.5, f64::NAN] {
        let raw = RawRule {
            antecedents: RuleSide::Text("A".to_string()),
            consequents: RuleSide::Text("x".to_string()),
            confidence,
        };
        assert!(matches!(
            normalize_rules(vec![raw]),
            Err(SimilarError::MalformedInput { .. })
        ));
    }
}

#[test]
fn test_empty_side_is_malformed() {
    assert!(matches!(
        Rule::new(["A"], Vec::<String>::new(), 0.5),
        Err(SimilarError::MalformedInput { .. })
    ));
    assert!(matches!(
        RuleTable::from_values(&[json!({
            "antecedents": "  ",
            "consequents": "x",
            "confidence": 0.5
        })]),
        Err(SimilarError::MalformedInput { .. })
    ));
}
