//! Collaborator traits (ports) the pipeline is built against.
//! The core owns the interfaces; adapters live with the API layer or in
//! `recal-storage`.

pub mod assist;
pub mod catalog;
pub mod learning_store;
pub mod vin_decoder;

pub use assist::AssistClient;
pub use catalog::VehicleCatalog;
pub use learning_store::LearningStore;
pub use vin_decoder::VinDecoder;
