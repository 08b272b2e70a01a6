//! Pipeline orchestration.

pub mod analyzer;
pub mod diagnostics;

pub use analyzer::{AnalysisReport, AnalysisRequest, EstimateAnalyzer, ScrubOutcome};
pub use diagnostics::AnalysisDiagnostics;
