//! Reciprocal Rank Fusion of two independent rankings.
//!
//! Layout: `kernels` (RRF term), `types` (`SignalRank`, `FusedRow`, `FusedTable`), `rrf` (`fuse`).
//!
//! Fusing rank positions instead of raw scores sidesteps the scale mismatch
//! between tag overlap and TF-IDF cosine.

mod kernels;
mod rrf;
mod types;

pub use kernels::rrf_term;
pub use rrf::fuse;
pub use types::{FusedRow, FusedTable, SignalRank};

/// Default RRF k parameter (high recall).
pub const DEFAULT_RRF_K: f64 = 60.0;
