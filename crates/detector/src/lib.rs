pub mod backend;
pub mod config;
pub mod labels;
pub mod logging;
pub mod postprocessing;
pub mod serialization;
pub mod service;

// Re-export commonly used types for convenience
pub use backend::{InferenceBackend, InferenceOutput};
pub use config::DetectorConfig;
pub use postprocessing::Detection;
pub use serialization::PhotoReport;
pub use service::DetectionService;
