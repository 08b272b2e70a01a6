//! Analysis confidence scoring.

pub mod scorer;

pub use scorer::{
    build_analysis_confidence, AnalysisConfidence, ConfidenceInputs, ConfidenceLabel,
    ExtractionConfidence,
};
