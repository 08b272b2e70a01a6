//! Domain types for the estimate-to-calibration pipeline.

pub mod collections;
pub mod estimate;
pub mod learning;
pub mod matches;
pub mod vehicle;

pub use estimate::{AdasPart, AdasPartHit, DetectedRepair, OperationType, RepairKind, RepairLine};
pub use learning::{
    LearningAction, LearningEvent, LearningRule, LearningRuleDraft, NewLearningEvent,
    ReviewStatus,
};
pub use matches::{
    CalibrationMatch, CanonicalSystem, GroupedCalibration, MatchSource, ScrubResult, VehicleRef,
};
pub use vehicle::{
    AssistExtraction, AssistOperation, AssistVehicle, AdasSystemRef, TriggerMapping,
    VehicleRecord, VinInfo,
};
