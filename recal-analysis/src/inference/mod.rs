//! Inference fallbacks: additive, never destructive, and only for
//! operations the rule-based pass missed entirely.

pub mod assist;
pub mod component;
pub mod merge;
pub mod proximity;

pub use assist::run_assist_pass;
pub use component::{infer_from_adas_parts, infer_from_repairs};
pub use merge::merge_missing_inferred;
pub use proximity::infer_steering_proximity;
