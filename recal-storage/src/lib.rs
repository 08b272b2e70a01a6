//! SQLite persistence for the learning store.
//!
//! Write-serialized connection, versioned migrations, STRICT tables. The
//! `SqliteLearningStore` implements `recal_core::traits::LearningStore`
//! with atomic per-key upserts and a transactional batch usage increment.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use store::SqliteLearningStore;
