use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use catalog_scorer::{CatalogScorer, MaterialScorer};
use core_types::{
    ConfidenceLevel, CurrentMaterial, DataProvenance, ExtractedRequirements, Recommendation,
    Requirement, ScoredMaterial,
};
use log::{error, info};
use requirement_extractor::RequirementExtractor;
use research_agent::runtime::settle::panic_message;
use research_agent::{
    AggregatedCandidates, DomainError, ExternalSearcher, NullTelemetry, PipelineConfig,
    PipelineContext, ResultAggregator, TelemetryEvent, TelemetryPort,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::MAX_RECOMMENDATIONS;
use crate::heuristic::fallback_recommendations;
use crate::synthesizer::{RecommendationSynthesizer, SynthesisMethod};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub requirements: Vec<Requirement>,
    pub current_material: CurrentMaterial,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub db_search_result_count: usize,
    pub external_result_count: usize,
    pub confidence_level: ConfidenceLevel,
    /// Unix milliseconds.
    pub timestamp: u64,
    pub request_digest: String,
    pub data_provenance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<ScoredMaterial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendationResponse {
    /// Envelope for an unexpected failure; still carries usable recommendations.
    pub fn failed(request_digest: String, err: &DomainError) -> Self {
        Self {
            recommendations: fallback_recommendations(),
            metadata: Metadata {
                db_search_result_count: 0,
                external_result_count: 0,
                confidence_level: ConfidenceLevel::Error,
                timestamp: now_millis(),
                request_digest,
                data_provenance: DataProvenance::failed(&err.to_string()).label(),
            },
            candidates: Vec::new(),
            error: Some(err.to_string()),
        }
    }
}

/// Request-scoped flow from raw requirements to the final top three.
pub struct RecommendationPipeline<S: MaterialScorer = CatalogScorer> {
    extractor: RequirementExtractor,
    aggregator: ResultAggregator<S>,
    synthesizer: RecommendationSynthesizer,
    telemetry: Arc<dyn TelemetryPort>,
}

impl RecommendationPipeline<CatalogScorer> {
    pub fn from_config(config: &PipelineConfig) -> Result<Self, DomainError> {
        Ok(Self::new(
            CatalogScorer::default(),
            ExternalSearcher::from_config(&config.research)?,
            RecommendationSynthesizer::from_config(&config.synthesis)?,
        ))
    }

    pub fn offline() -> Result<Self, DomainError> {
        Self::from_config(&PipelineConfig::offline())
    }
}

impl<S: MaterialScorer> RecommendationPipeline<S> {
    pub fn new(
        scorer: S,
        searcher: ExternalSearcher,
        synthesizer: RecommendationSynthesizer,
    ) -> Self {
        Self {
            extractor: RequirementExtractor,
            aggregator: ResultAggregator::new(scorer, searcher),
            synthesizer,
            telemetry: Arc::new(NullTelemetry),
        }
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetryPort>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn extract(&self, request: &RecommendationRequest) -> ExtractedRequirements {
        self.extractor.extract(&request.requirements)
    }

    pub fn aggregate(&self, request: &RecommendationRequest) -> AggregatedCandidates {
        let ctx = PipelineContext::new(self.telemetry.as_ref());
        self.aggregator
            .aggregate(&self.extract(request), &request.current_material, &ctx)
    }

    /// Never fails and never panics outward: errors become a fallback envelope.
    pub fn run(&self, request: &RecommendationRequest) -> RecommendationResponse {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_run(request)))
            .unwrap_or_else(|payload| {
                Err(DomainError::Internal(panic_message(payload.as_ref())))
            });
        match outcome {
            Ok(response) => response,
            Err(err) => {
                error!("recommendation pipeline failed: {err}");
                self.telemetry
                    .emit(&TelemetryEvent::new("pipeline.failed", err.to_string()));
                RecommendationResponse::failed(request_digest(request), &err)
            }
        }
    }

    pub fn try_run(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, DomainError> {
        let ctx = PipelineContext::new(self.telemetry.as_ref());
        let extracted = self.extract(request);
        let aggregated = self
            .aggregator
            .aggregate(&extracted, &request.current_material, &ctx);
        let synthesis = self.synthesizer.synthesize(
            &aggregated.candidates,
            aggregated.research.as_ref(),
            &request.current_material,
            &request.requirements,
            &ctx,
        );
        validate(&synthesis.recommendations)?;

        let confidence_level = if aggregated.is_fallback() {
            ConfidenceLevel::Fallback
        } else if synthesis.method == SynthesisMethod::Llm {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Low
        };
        info!(
            "recommended {} materials from {} candidates ({:?})",
            synthesis.recommendations.len(),
            aggregated.candidates.len(),
            confidence_level
        );

        Ok(RecommendationResponse {
            recommendations: synthesis.recommendations,
            metadata: Metadata {
                db_search_result_count: aggregated.catalog_result_count,
                external_result_count: aggregated.external_result_count(),
                confidence_level,
                timestamp: now_millis(),
                request_digest: request_digest(request),
                data_provenance: aggregated.provenance.label(),
            },
            candidates: aggregated.candidates,
            error: None,
        })
    }
}

fn validate(recommendations: &[Recommendation]) -> Result<(), DomainError> {
    if recommendations.is_empty() || recommendations.len() > MAX_RECOMMENDATIONS {
        return Err(DomainError::Internal(format!(
            "recommendation count {} outside 1..={MAX_RECOMMENDATIONS}",
            recommendations.len()
        )));
    }
    let bounded = |r: &Recommendation| {
        r.scores.is_bounded()
            && r.total_score.is_finite()
            && (0.0..=100.0).contains(&r.total_score)
    };
    match recommendations.iter().find(|r| !bounded(r)) {
        Some(bad) => Err(DomainError::Internal(format!(
            "recommendation {} has out-of-range scores",
            bad.material_name
        ))),
        None => Ok(()),
    }
}

/// SHA-256 of the canonical JSON request, hex encoded.
pub fn request_digest(request: &RecommendationRequest) -> String {
    let bytes = serde_json::to_vec(request).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    format!("{:x}", hasher.finalize())
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
