//! Transient match result types. Never persisted.

use serde::{Deserialize, Serialize};

use super::DemographicQuery;

/// The ids matched for one query, tied back to its position in the batch.
///
/// `patient_ids` is empty for "no match", and holds ascending ids for a
/// single or ambiguous (multi-) match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Position of the originating query in the input batch.
    pub query_index: usize,
    /// Matching internal patient ids, ascending.
    pub patient_ids: Vec<i64>,
}

impl MatchResult {
    /// A result with no matches for the given query position.
    pub fn no_match(query_index: usize) -> Self {
        Self {
            query_index,
            patient_ids: Vec::new(),
        }
    }
}

/// An original (pre-clean) query decorated with its resolved patient ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchedQuery {
    /// The query as submitted by the caller.
    #[serde(flatten)]
    pub query: DemographicQuery,
    /// Resolved internal patient ids. Exactly one for a single match or a
    /// newly created unverified patient; more than one for an ambiguous
    /// match; empty only when the query had no usable searchable field.
    pub patient_ids: Vec<i64>,
}

/// Summary counts for one matching batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchCounts {
    /// Number of queries in the batch.
    pub total: usize,
    /// Queries that resolved to exactly one id (matched or newly created).
    pub single: usize,
    /// Queries that resolved to more than one id (ambiguous match).
    pub multiple: usize,
    /// Queries with no usable searchable field at all. Excluded even from
    /// creation.
    pub zero: usize,
}

/// The full outcome of a matching batch: one decorated entry per input
/// query, in input order, plus aggregate counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOutcome {
    /// One decorated entry per input query, in input order.
    pub queries: Vec<MatchedQuery>,
    /// Aggregate counts for the batch.
    pub counts: MatchCounts,
}
