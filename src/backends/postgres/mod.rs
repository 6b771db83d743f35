//! PostgreSQL implementations of the core MPI traits.

mod config;
mod exact_match;
mod repository;
pub mod schema;
mod tracker;

pub use config::{PostgresConfig, PostgresSslMode, connect};
pub use exact_match::SqlExactMatchStrategy;
pub use repository::PostgresPatientRepository;
pub use tracker::PostgresTraceStatusTracker;
