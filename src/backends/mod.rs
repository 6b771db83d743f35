//! Store backend implementations.

pub mod postgres;
