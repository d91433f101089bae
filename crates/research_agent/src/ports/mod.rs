pub mod telemetry_port;
pub mod text_generation_port;

pub use telemetry_port::TelemetryPort;
pub use text_generation_port::{Generation, GenerationRequest, TextGenerationPort};
