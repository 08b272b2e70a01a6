//! Core types, errors, configuration, and collaborator traits for RECAL.
//!
//! No I/O lives here. The analysis pipeline (`recal-analysis`) and the
//! SQLite learning store (`recal-storage`) both build on this crate and
//! never on each other.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;
