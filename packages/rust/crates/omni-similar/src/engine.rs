//! End-to-end similar-item search: two signals, two rankings, one fused order.

use serde::Serialize;

use crate::config::SimilarConfig;
use crate::error::Result;
use crate::fusion::{FusedTable, fuse};
use crate::ranker::{RankTable, rank};
use crate::set_similarity::search_by_set;
use crate::text_similarity::search_by_text;
use crate::types::{CandidatePool, Catalog};

/// Per-signal rankings and their fusion for one search.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarResults {
    /// Ranking by tag-set overlap
    pub by_tags: RankTable,
    /// Ranking by ingredient TF-IDF cosine
    pub by_text: RankTable,
    /// RRF of the two, truncated to the configured limit
    pub fused: FusedTable,
}

/// Stateless search entry point; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: SimilarConfig,
}

impl SimilarityEngine {
    /// Engine with validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimilarError::InvalidConfig`] for out-of-range settings.
    pub fn new(config: SimilarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings in use.
    #[must_use]
    pub fn config(&self) -> &SimilarConfig {
        &self.config
    }

    /// Rank catalog items against the item `reference_id`.
    ///
    /// The pool is scoped per [`SimilarConfig::pool_scope`] and never contains
    /// the reference item.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimilarError::UnknownIdentifier`] if the reference is
    /// not in the catalog and [`crate::SimilarError::EmptyCorpus`] if its pool
    /// is empty.
    pub fn find_similar(&self, catalog: &Catalog, reference_id: &str) -> Result<SimilarResults> {
        let reference = catalog.get(reference_id)?;
        let pool = CandidatePool::scoped(catalog, reference, self.config.pool_scope);
        log::debug!(
            "find_similar: reference '{}' ({:?}), {} candidates of {}",
            reference.id,
            reference.category,
            pool.len(),
            catalog.len()
        );

        let query_tags: Vec<&str> = reference.tags.iter().map(String::as_str).collect();
        self.rank_pool(&pool, &query_tags, &reference.text)
    }

    /// Rank an explicit pool against query tags and query ingredient tokens.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimilarError::EmptyCorpus`] for an empty pool.
    pub fn rank_pool<T: AsRef<str>, U: AsRef<str>>(
        &self,
        pool: &CandidatePool,
        query_tags: &[T],
        query_text: &[U],
    ) -> Result<SimilarResults> {
        let by_tags = rank(&search_by_set(pool, query_tags)?);
        let by_text = rank(&search_by_text(pool, query_text)?);
        let mut fused = fuse(&by_tags, &by_text, self.config.rrf_k)?;
        if let Some(limit) = self.config.limit {
            fused.truncate(limit);
        }
        Ok(SimilarResults {
            by_tags,
            by_text,
            fused,
        })
    }
}
