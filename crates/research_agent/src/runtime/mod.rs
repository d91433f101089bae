pub mod aggregator;
pub mod context;
pub mod settle;

pub use aggregator::{
    AggregatedCandidates, CATALOG_TOP, MAX_CANDIDATES, MAX_SYNTHESIZED, ResultAggregator,
    fallback_material, insight_line, merge_candidates, synthesized_candidate,
};
pub use context::PipelineContext;
pub use settle::settle;
