//! Core trait seams for the MPI subsystem.
//!
//! Services depend on these traits, not on the PostgreSQL implementations
//! in [`crate::backends`], so store access can be swapped or faked in
//! tests.

mod repository;
mod strategy;
mod tracker;

pub use repository::PatientRepository;
pub use strategy::{MatchingStrategy, ProbabilisticMatchStrategy};
pub use tracker::TraceStatusTracker;
