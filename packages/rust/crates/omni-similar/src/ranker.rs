//! Score tables and dense ranking.
//!
//! Ordering is score descending, then identifier ascending, so every
//! distinct input row gets a distinct rank in `1..=N`.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, SimilarError};
use crate::types::ItemId;

fn check_score(id: &ItemId, score: f64) -> Result<()> {
    if score.is_finite() && (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(SimilarError::malformed(
            format!("score[{id}]"),
            format!("expected a finite value in [0, 1], got {score}"),
        ))
    }
}

/// One scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    /// Candidate identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Similarity score in [0, 1]
    pub score: f64,
    /// Field the score was computed from, for display
    pub detail: String,
}

/// Scores for every candidate of one signal, in pool order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreTable {
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    /// Validate rows: unique identifiers, finite scores in [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::DuplicateIdentifier`] or
    /// [`SimilarError::MalformedInput`] for an out-of-range score.
    pub fn new(rows: Vec<ScoreRow>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(&row.id) {
                return Err(SimilarError::DuplicateIdentifier(row.id.to_string()));
            }
            check_score(&row.id, row.score)?;
        }
        Ok(Self { rows })
    }

    /// Rows in pool order.
    #[must_use]
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// Score for `id`, if present.
    #[must_use]
    pub fn score_of(&self, id: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.id.as_str() == id)
            .map(|row| row.score)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A scored candidate with its dense 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankRow {
    /// Candidate identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Similarity score in [0, 1]
    pub score: f64,
    /// Field the score was computed from
    pub detail: String,
    /// 1 = most relevant
    pub rank: usize,
}

/// Rows ordered by rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankTable {
    rows: Vec<RankRow>,
}

impl RankTable {
    /// Adopt a ranking produced elsewhere.
    ///
    /// Ranks must be >= 1, scores finite in [0, 1] and identifiers unique;
    /// ranks need not be dense. Rows are reordered by rank, then identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::DuplicateIdentifier`] or
    /// [`SimilarError::MalformedInput`] for a zero rank or a bad score.
    pub fn from_rows(mut rows: Vec<RankRow>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(&row.id) {
                return Err(SimilarError::DuplicateIdentifier(row.id.to_string()));
            }
            if row.rank == 0 {
                return Err(SimilarError::malformed(
                    format!("rank[{}]", row.id),
                    "ranks are 1-based",
                ));
            }
            check_score(&row.id, row.score)?;
        }
        rows.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.id.cmp(&b.id)));
        Ok(Self { rows })
    }

    /// Rows ordered by ascending rank.
    #[must_use]
    pub fn rows(&self) -> &[RankRow] {
        &self.rows
    }

    /// Rank of `id`, if present.
    #[must_use]
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.rows
            .iter()
            .find(|row| row.id.as_str() == id)
            .map(|row| row.rank)
    }

    /// Identifiers in rank order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.rows.iter().map(|row| &row.id)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Score descending, identifier ascending.
pub(crate) fn by_score_then_id(
    score_a: f64,
    id_a: &ItemId,
    score_b: f64,
    id_b: &ItemId,
) -> Ordering {
    score_b.total_cmp(&score_a).then_with(|| id_a.cmp(id_b))
}

/// Assign dense ranks to a score table.
#[must_use]
pub fn rank(table: &ScoreTable) -> RankTable {
    let mut rows = table.rows.clone();
    rows.sort_by(|a, b| by_score_then_id(a.score, &a.id, b.score, &b.id));

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(pos, row)| RankRow {
            id: row.id,
            name: row.name,
            score: row.score,
            detail: row.detail,
            rank: pos + 1,
        })
        .collect();
    RankTable { rows }
}
