//! Strict single-record linking gate.

use crate::demographics::validate::validate_for_linking;
use crate::error::MpiResult;
use crate::types::DemographicQuery;

/// Validation gate for the single-record linking entry point.
///
/// Unlike [`MatchingService`](super::MatchingService), this path rejects
/// malformed or insufficient input immediately with a descriptive error
/// naming the violated rule. It performs no persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkageService;

impl LinkageService {
    /// Creates the service.
    pub fn new() -> Self {
        Self
    }

    /// Validates a record for patient linking.
    ///
    /// Fails on the first invalid field, then on the minimum-information
    /// threshold: (NHS number AND date of birth) OR (given name AND family
    /// name AND sex AND postcode AND date of birth).
    pub fn link(&self, query: &DemographicQuery) -> MpiResult<()> {
        validate_for_linking(query)?;
        Ok(())
    }
}
