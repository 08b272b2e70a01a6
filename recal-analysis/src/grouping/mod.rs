//! Document-level aggregation: one row per canonical operation.

pub mod grouper;

pub use grouper::{group_calibrations, operation_key, recommended_operation};
