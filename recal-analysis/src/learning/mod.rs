//! Shop-taught learning rules: application engine and the in-memory store.
//!
//! Runs after all inference fallbacks, so taught corrections override
//! machine-inferred guesses and never the other way around.

pub mod engine;
pub mod store;

pub use engine::{apply_learning_rules, LearningOutcome};
pub use store::InMemoryLearningStore;
