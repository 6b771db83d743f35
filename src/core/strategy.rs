//! Pluggable patient matching strategies.

use async_trait::async_trait;

use crate::error::MpiResult;
use crate::types::{DemographicQuery, MatchResult};

/// A patient matching strategy.
///
/// The strategy has full control over how it matches: it may query the
/// store directly or work in memory.
///
/// # Contract
///
/// Given N cleaned queries, implementations return exactly N results in
/// input order. Each result carries either no patient ids ("no match") or
/// a non-empty ascending-id list (single or ambiguous match).
#[async_trait]
pub trait MatchingStrategy: Send + Sync {
    /// Finds matching patients for each query in the batch.
    async fn find_matches(&self, queries: &[DemographicQuery]) -> MpiResult<Vec<MatchResult>>;
}

/// Probabilistic patient matching.
///
/// Reserved for a future probabilistic matcher; until one lands this
/// strategy reports "no match" for every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilisticMatchStrategy;

#[async_trait]
impl MatchingStrategy for ProbabilisticMatchStrategy {
    async fn find_matches(&self, queries: &[DemographicQuery]) -> MpiResult<Vec<MatchResult>> {
        Ok((0..queries.len()).map(MatchResult::no_match).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probabilistic_strategy_returns_no_matches() {
        let strategy = ProbabilisticMatchStrategy;
        let queries = vec![DemographicQuery::default(); 3];
        let results = strategy.find_matches(&queries).await.unwrap();
        assert_eq!(results.len(), 3);
        for (index, result) in results.iter().enumerate() {
            assert_eq!(result.query_index, index);
            assert!(result.patient_ids.is_empty());
        }
    }
}
