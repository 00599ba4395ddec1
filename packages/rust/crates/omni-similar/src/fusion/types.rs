//! Shared types for rank fusion.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::ItemId;

use super::kernels::rrf_term;

/// Position of an item in one input ranking.
///
/// `Absent` means the item was not in that ranking's pool; it orders after
/// every finite rank and contributes nothing to the fused score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum SignalRank {
    /// 1-based rank
    Ranked(usize),
    /// Not ranked by this signal
    Absent,
}

impl SignalRank {
    /// RRF contribution: `1 / (k + rank)`, or `0.0` when absent.
    #[must_use]
    pub fn contribution(self, k: f64) -> f64 {
        match self {
            Self::Ranked(rank) => rrf_term(k, rank),
            Self::Absent => 0.0,
        }
    }

    /// Finite rank, if any.
    #[must_use]
    pub fn position(self) -> Option<usize> {
        match self {
            Self::Ranked(rank) => Some(rank),
            Self::Absent => None,
        }
    }
}

impl From<Option<usize>> for SignalRank {
    fn from(rank: Option<usize>) -> Self {
        rank.map_or(Self::Absent, Self::Ranked)
    }
}

impl Ord for SignalRank {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Ranked(a), Self::Ranked(b)) => a.cmp(b),
            (Self::Ranked(_), Self::Absent) => Ordering::Less,
            (Self::Absent, Self::Ranked(_)) => Ordering::Greater,
            (Self::Absent, Self::Absent) => Ordering::Equal,
        }
    }
}

impl PartialOrd for SignalRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One row of the outer join of two rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusedRow {
    /// Item identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Rank in the first input
    pub rank_a: SignalRank,
    /// Rank in the second input
    pub rank_b: SignalRank,
    /// Raw score in the first input
    pub score_a: Option<f64>,
    /// Raw score in the second input
    pub score_b: Option<f64>,
    /// `Σ 1 / (k + rank)` over the inputs that rank the item
    pub fused_score: f64,
    /// Dense 1-based overall rank
    pub rank: usize,
}

impl FusedRow {
    /// True when both inputs ranked the item.
    #[must_use]
    pub fn in_both(&self) -> bool {
        self.rank_a != SignalRank::Absent && self.rank_b != SignalRank::Absent
    }
}

/// Fused rows ordered by overall rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FusedTable {
    pub(crate) rows: Vec<FusedRow>,
}

impl FusedTable {
    /// Rows ordered by ascending overall rank.
    #[must_use]
    pub fn rows(&self) -> &[FusedRow] {
        &self.rows
    }

    /// Row for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FusedRow> {
        self.rows.iter().find(|row| row.id.as_str() == id)
    }

    /// Identifiers in overall rank order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.rows.iter().map(|row| &row.id)
    }

    /// Keep the best `limit` rows.
    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
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
