//! Basic Reciprocal Rank Fusion over two rank tables.

use std::collections::HashMap;

use crate::config::validate_rrf_k;
use crate::error::Result;
use crate::ranker::{RankTable, by_score_then_id};
use crate::types::ItemId;

use super::types::{FusedRow, FusedTable, SignalRank};

/// Full outer join of `rank_a` and `rank_b` scored by RRF.
///
/// Every identifier from either input appears once. A missing rank is
/// [`SignalRank::Absent`] and adds nothing, so single-signal items are kept
/// but trail items confirmed by both. Rows are ordered by fused score
/// descending, then identifier ascending, and get dense 1-based ranks.
///
/// # Errors
///
/// Returns [`crate::SimilarError::InvalidConfig`] for a negative or
/// non-finite `k`.
pub fn fuse(rank_a: &RankTable, rank_b: &RankTable, k: f64) -> Result<FusedTable> {
    validate_rrf_k(k)?;

    let mut fusion_map: HashMap<ItemId, FusedRow> = HashMap::new();

    for row in rank_a.rows() {
        fusion_map.insert(
            row.id.clone(),
            FusedRow {
                id: row.id.clone(),
                name: row.name.clone(),
                rank_a: SignalRank::Ranked(row.rank),
                rank_b: SignalRank::Absent,
                score_a: Some(row.score),
                score_b: None,
                fused_score: 0.0,
                rank: 0,
            },
        );
    }

    for row in rank_b.rows() {
        if let Some(entry) = fusion_map.get_mut(&row.id) {
            entry.rank_b = SignalRank::Ranked(row.rank);
            entry.score_b = Some(row.score);
        } else {
            fusion_map.insert(
                row.id.clone(),
                FusedRow {
                    id: row.id.clone(),
                    name: row.name.clone(),
                    rank_a: SignalRank::Absent,
                    rank_b: SignalRank::Ranked(row.rank),
                    score_a: None,
                    score_b: Some(row.score),
                    fused_score: 0.0,
                    rank: 0,
                },
            );
        }
    }

    let mut rows: Vec<_> = fusion_map
        .into_values()
        .map(|mut row| {
            row.fused_score = row.rank_a.contribution(k) + row.rank_b.contribution(k);
            row
        })
        .collect();
    rows.sort_by(|a, b| by_score_then_id(a.fused_score, &a.id, b.fused_score, &b.id));
    for (pos, row) in rows.iter_mut().enumerate() {
        row.rank = pos + 1;
    }

    if log::log_enabled!(log::Level::Debug) {
        let in_both = rows.iter().filter(|row| row.in_both()).count();
        log::debug!(
            "fuse: {} + {} ranked rows -> {} fused ({} in both, k={k})",
            rank_a.len(),
            rank_b.len(),
            rows.len(),
            in_both
        );
    }

    Ok(FusedTable { rows })
}
