//! Tests for tag-set (Jaccard) similarity and set-based pool search.

use std::collections::HashSet;

use omni_similar::{
    CandidatePool, Item, SimilarConfig, SimilarError, jaccard, rank, search_by_set,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

fn set(tokens: &[&str]) -> HashSet<String> {
    tokens.iter().map(|t| (*t).to_string()).collect()
}

fn random_set(rng: &mut StdRng) -> HashSet<String> {
    let size = rng.gen_range(0..6);
    (0..size).map(|_| format!("t{}", rng.gen_range(0..8))).collect()
}

// =========================================================================
// Jaccard properties
// =========================================================================

#[test]
fn test_jaccard_bounds_and_symmetry() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let a = random_set(&mut rng);
        let b = random_set(&mut rng);
        let ab = jaccard(&a, &b);
        let ba = jaccard(&b, &a);
        assert!((0.0..=1.0).contains(&ab));
        assert_eq!(ab.to_bits(), ba.to_bits());
    }
}

#[test]
fn test_jaccard_identity() {
    let a = set(&["Vegan", "Hydrating"]);
    assert!((jaccard(&a, &a) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_jaccard_empty_vs_empty_is_zero() {
    let empty: HashSet<String> = HashSet::new();
    assert_eq!(jaccard(&empty, &empty), 0.0);
}

#[test]
fn test_jaccard_disjoint_is_zero() {
    assert_eq!(jaccard(&set(&["a"]), &set(&["b"])), 0.0);
}

// =========================================================================
// search_by_set
// =========================================================================

#[test]
fn test_search_by_set_end_to_end_example() {
    let pool = CandidatePool::new(vec![
        Item::new("1", "Cream", ["a", "b", "c"], ["water"]),
        Item::new("2", "Serum", ["a", "b"], ["water"]),
    ])
    .unwrap();

    let table = search_by_set(&pool, ["a", "b"]).unwrap();
    assert!((table.score_of("1").unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert!((table.score_of("2").unwrap() - 1.0).abs() < 1e-12);

    let ranked = rank(&table);
    assert_eq!(ranked.rank_of("2"), Some(1));
    assert_eq!(ranked.rank_of("1"), Some(2));
}

#[test]
fn test_search_by_set_dedups_query_tokens() {
    let pool =
        CandidatePool::new(vec![Item::new("1", "Cream", ["a", "b", "c"], ["water"])]).unwrap();
    let once = search_by_set(&pool, ["a", "b"]).unwrap();
    let repeated = search_by_set(&pool, ["a", "a", "b", "b", "b"]).unwrap();
    assert_eq!(once.score_of("1"), repeated.score_of("1"));
}

#[test]
fn test_search_by_set_keeps_every_candidate_in_pool_order() {
    let pool = CandidatePool::new(vec![
        Item::new("z", "Z", ["x"], ["water"]),
        Item::new("a", "A", ["y"], ["water"]),
        Item::new("m", "M", ["q"], ["water"]),
    ])
    .unwrap();
    let table = search_by_set(&pool, ["nothing"]).unwrap();
    let ids: Vec<_> = table.rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
    assert!(table.rows().iter().all(|row| row.score == 0.0));
}

#[test]
fn test_search_by_set_carries_display_fields() {
    let item = Item::from_value(
        &json!({"id": "P1", "name": "Glow Cream", "tags": "Vegan, Hydrating", "text": "Water"}),
        &SimilarConfig::default(),
    )
    .unwrap();
    let pool = CandidatePool::new(vec![item]).unwrap();
    let table = search_by_set(&pool, ["Vegan"]).unwrap();
    assert_eq!(table.rows()[0].name, "Glow Cream");
    assert_eq!(table.rows()[0].detail, "Vegan, Hydrating");
    assert!((table.rows()[0].score - 0.5).abs() < 1e-12);
}

#[test]
fn test_non_string_tag_field_is_malformed() {
    let result = Item::from_value(
        &json!({"id": "P1", "name": "Glow Cream", "tags": ["Vegan"], "text": "Water"}),
        &SimilarConfig::default(),
    );
    assert!(matches!(result, Err(SimilarError::MalformedInput { .. })));
}

#[test]
fn test_duplicate_pool_identifier_is_rejected() {
    let result = CandidatePool::new(vec![
        Item::new("1", "A", ["a"], ["water"]),
        Item::new("1", "B", ["b"], ["water"]),
    ]);
    assert!(matches!(result, Err(SimilarError::DuplicateIdentifier(id)) if id == "1"));
}
