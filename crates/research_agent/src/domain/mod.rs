pub mod config;
pub mod error;
pub mod event;

pub use config::{PipelineConfig, TextGenConfig};
pub use error::DomainError;
pub use event::TelemetryEvent;
