mod material;
mod provenance;
mod recommendation;
mod requirement;
mod research;

pub use material::{
    BIODEGRADABLE_LABEL, COMPOSTABLE_LABEL, LIMITED_RECYCLING_LABEL, MaterialProperties,
    PERSISTENT_LABEL, RECYCLABLE_LABEL, ScoredMaterial, UNVERIFIED_LABEL,
};
pub use provenance::{ConfidenceLevel, DataProvenance, DataSource};
pub use recommendation::{Recommendation, ScoreVector};
pub use requirement::{
    CurrentMaterial, ExtractedRequirements, FeatureKey, Importance, Requirement,
};
pub use research::{Citation, CitationKind, Confidence, ExternalFinding, ResearchReport};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Clamps a score into `[0, 100]`. Non-finite input collapses to 0.
pub fn clamp_score(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(SCORE_MIN, SCORE_MAX)
    } else {
        SCORE_MIN
    }
}
