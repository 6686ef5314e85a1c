//! Shared test utilities for printshop integration tests.

pub mod builders;

pub use builders::*;
