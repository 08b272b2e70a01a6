//! Configuration system for RECAL.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod assist_config;
pub mod learning_config;
pub mod limits_config;
pub mod recal_config;

pub use assist_config::AssistConfig;
pub use learning_config::LearningConfig;
pub use limits_config::LimitsConfig;
pub use recal_config::RecalConfig;
