//! Snapshot tests for fusion contract stability.
//!
//! These tests lock the fused order and score shape for a fixed input.
//! If behavior changes intentionally, update snapshots in a reviewable commit.

use insta::assert_json_snapshot;
use omni_similar::{DEFAULT_RRF_K, ItemId, RankRow, RankTable, fuse};
use serde_json::json;

fn ranks(pairs: &[(&str, usize)]) -> RankTable {
    RankTable::from_rows(
        pairs
            .iter()
            .map(|&(id, rank)| RankRow {
                id: ItemId::new(id),
                name: format!("Item {id}"),
                score: 0.0,
                detail: String::new(),
                rank,
            })
            .collect(),
    )
    .unwrap()
}

fn round6(v: f64) -> String {
    format!("{v:.6}")
}

#[test]
fn snapshot_rrf_outer_join_contract_v1() {
    let rank_a = ranks(&[("1", 1), ("2", 2)]);
    let rank_b = ranks(&[("2", 1), ("3", 1)]);

    let fused = fuse(&rank_a, &rank_b, DEFAULT_RRF_K).unwrap();

    let view: Vec<_> = fused
        .rows()
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "rank": r.rank,
                "rank_a": r.rank_a.position(),
                "rank_b": r.rank_b.position(),
                "fused_score": round6(r.fused_score),
            })
        })
        .collect();

    assert_json_snapshot!("rrf_outer_join_contract_v1", view);
}
