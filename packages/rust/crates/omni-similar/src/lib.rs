//! omni-similar - Similar-item ranking with Reciprocal Rank Fusion
//!
//! Ranks catalog items against a reference item with two independent signals
//! and fuses the two rankings:
//! - Tag overlap (Jaccard) over case-sensitive tag sets
//! - Ingredient similarity (TF-IDF cosine) over delimiter-split token lists
//! - RRF fusion tolerant of items ranked by only one signal
//!
//! Association-rule lookup is a separate entry point over a precomputed
//! rule table.
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-similar/src/
//! ├── lib.rs              # Re-exports (this file)
//! ├── error.rs            # SimilarError
//! ├── config.rs           # SimilarConfig, PoolScope (YAML)
//! ├── tokenize.rs         # DelimitedTokenizer
//! ├── types.rs            # ItemId, Item, Catalog, CandidatePool
//! ├── set_similarity.rs   # jaccard, search_by_set
//! ├── text_similarity.rs  # VectorSpaceModel, search_by_text
//! ├── ranker.rs           # ScoreTable, RankTable, rank
//! ├── fusion/             # rrf_term, SignalRank, FusedTable, fuse
//! ├── association/        # RuleTable, normalize_rules, find_associated
//! └── engine.rs           # SimilarityEngine
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_similar::{Catalog, SimilarConfig, SimilarityEngine};
//!
//! let catalog = Catalog::from_values(&rows, &SimilarConfig::default())?;
//! let engine = SimilarityEngine::new(SimilarConfig::default())?;
//! let results = engine.find_similar(&catalog, "P1042")?;
//! for row in results.fused.rows() {
//!     println!("{} {} {:.4}", row.rank, row.name, row.fused_score);
//! }
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

pub mod association;
mod config;
mod engine;
mod error;
pub mod fusion;
mod ranker;
mod set_similarity;
mod text_similarity;
mod tokenize;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use association::{RawRule, Rule, RuleSide, RuleTable, find_associated, normalize_rules};
pub use config::{PoolScope, SimilarConfig};
pub use engine::{SimilarResults, SimilarityEngine};
pub use error::{Result, SimilarError};
pub use fusion::{DEFAULT_RRF_K, FusedRow, FusedTable, SignalRank, fuse, rrf_term};
pub use ranker::{RankRow, RankTable, ScoreRow, ScoreTable, rank};
pub use set_similarity::{jaccard, search_by_set};
pub use text_similarity::{SparseVector, VectorSpaceModel, search_by_document, search_by_text};
pub use tokenize::DelimitedTokenizer;
pub use types::{CandidatePool, Catalog, CatalogRecord, Item, ItemId, RawId};
