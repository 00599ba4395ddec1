//! Tag-set overlap (Jaccard) scoring.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::Result;
use crate::ranker::{ScoreRow, ScoreTable};
use crate::types::CandidatePool;

/// Jaccard similarity `|a ∩ b| / |a ∪ b|`.
///
/// Two empty sets score `0.0`: an empty tag set carries no signal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|token| large.contains(*token)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Score every pool item's tag set against `query_tokens`.
///
/// Query tokens are deduplicated first. The table keeps pool order.
///
/// # Errors
///
/// Propagates [`crate::SimilarError`] from [`ScoreTable::new`]; a pool built
/// through [`CandidatePool::new`] never triggers it.
pub fn search_by_set<S: AsRef<str>>(
    pool: &CandidatePool,
    query_tokens: impl IntoIterator<Item = S>,
) -> Result<ScoreTable> {
    let query: HashSet<String> = query_tokens
        .into_iter()
        .map(|token| token.as_ref().to_string())
        .collect();
    if query.is_empty() {
        log::warn!("search_by_set: empty query tag set, every candidate scores 0.0");
    }

    let rows = pool
        .items()
        .iter()
        .map(|item| ScoreRow {
            id: item.id.clone(),
            name: item.name.clone(),
            score: jaccard(&item.tags, &query),
            detail: item.raw_tags.clone(),
        })
        .collect();

    log::debug!(
        "search_by_set: scored {} candidates against {} query tags",
        pool.len(),
        query.len()
    );
    ScoreTable::new(rows)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::jaccard;

    fn set(tokens: &[&str]) -> HashSet<String> {
        tokens.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let score = jaccard(&set(&["a", "b", "c"]), &set(&["a", "b"]));
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        assert!(jaccard(&set(&[]), &set(&[])).abs() < f64::EPSILON);
        assert!(jaccard(&set(&["a"]), &set(&[])).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jaccard_is_case_sensitive() {
        assert!(jaccard(&set(&["Vegan"]), &set(&["vegan"])).abs() < f64::EPSILON);
    }
}
