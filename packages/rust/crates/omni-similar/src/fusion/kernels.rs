//! RRF term kernel.

/// RRF term for a 1-based rank: `1 / (k + rank)`.
#[inline]
#[must_use]
pub fn rrf_term(k: f64, rank: usize) -> f64 {
    let rank_u32 = u32::try_from(rank).unwrap_or(u32::MAX);
    1.0 / (k + f64::from(rank_u32))
}

#[cfg(test)]
mod tests {
    use super::rrf_term;

    #[test]
    fn test_rrf_term() {
        assert!((rrf_term(60.0, 1) - (1.0 / 61.0)).abs() < 1e-12);
        assert!((rrf_term(60.0, 2) - (1.0 / 62.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rrf_term_decreases_with_rank() {
        assert!(rrf_term(10.0, 1) > rrf_term(10.0, 2));
        assert!(rrf_term(0.0, 1) > rrf_term(0.0, 1000));
    }

    #[test]
    fn test_rrf_term_saturates_huge_ranks() {
        assert!(rrf_term(60.0, usize::MAX) > 0.0);
    }
}
