pub mod adapters;
pub mod capability;
pub mod domain;
pub mod ports;
pub mod runtime;

pub use adapters::{HttpTextGenClient, LoggerTelemetry, NullTelemetry};
pub use capability::{ExternalSearcher, ResearchParser, SearchOutcome, research_prompt};
pub use domain::{DomainError, PipelineConfig, TelemetryEvent, TextGenConfig};
pub use ports::{Generation, GenerationRequest, TelemetryPort, TextGenerationPort};
pub use runtime::{AggregatedCandidates, PipelineContext, ResultAggregator, fallback_material};
