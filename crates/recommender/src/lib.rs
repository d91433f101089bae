pub mod heuristic;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod synthesizer;

pub use heuristic::{fallback_recommendations, heuristic_recommendations};
pub use parse::{ParseResult, extract_balanced_object, parse_recommendations};
pub use pipeline::{
    Metadata, RecommendationPipeline, RecommendationRequest, RecommendationResponse,
    request_digest,
};
pub use synthesizer::{RecommendationSynthesizer, Synthesis, SynthesisMethod};

pub const MAX_RECOMMENDATIONS: usize = 3;
