use std::thread;

use catalog_scorer::{CatalogScorer, MaterialScorer};
use core_types::{
    COMPOSTABLE_LABEL, CurrentMaterial, DataProvenance, DataSource, ExternalFinding,
    ExtractedRequirements, LIMITED_RECYCLING_LABEL, MaterialProperties, ResearchReport,
    SCORE_MAX, SCORE_MIN, ScoredMaterial, UNVERIFIED_LABEL,
};
use log::{error, info, warn};
use serde::Serialize;

use crate::capability::{ExternalSearcher, SearchOutcome};
use crate::domain::{DomainError, TelemetryEvent};
use crate::runtime::context::PipelineContext;
use crate::runtime::settle::settle;

pub const MAX_CANDIDATES: usize = 5;
pub const CATALOG_TOP: usize = 3;
pub const MAX_SYNTHESIZED: usize = 2;

const SYNTHESIZED_MATCH_BASE: f64 = 80.0;
const SYNTHESIZED_MATCH_STEP: f64 = 5.0;
const SYNTHESIZED_SUSTAINABILITY: f64 = 75.0;
const SYNTHESIZED_TENSILE: f64 = 40.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCandidates {
    pub candidates: Vec<ScoredMaterial>,
    pub provenance: DataProvenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchReport>,
    pub catalog_result_count: usize,
}

impl AggregatedCandidates {
    pub fn failed(err: &DomainError) -> Self {
        Self {
            candidates: vec![fallback_material()],
            provenance: DataProvenance::failed(&err.to_string()),
            research: None,
            catalog_result_count: 0,
        }
    }

    pub fn external_result_count(&self) -> usize {
        self.research.as_ref().map_or(0, |r| r.findings.len())
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance.is_fallback()
    }
}

/// Runs the catalog scorer and the external searcher side by side and merges them into
/// a bounded candidate list.
///
/// Both branches are joined before merging, so `aggregate` waits as long as the slower
/// one. The only deadline on the research branch is the port's own; `HttpTextGenClient`
/// enforces `TextGenConfig::timeout`, while a custom port that never returns blocks the call.
#[derive(Clone)]
pub struct ResultAggregator<S: MaterialScorer = CatalogScorer> {
    scorer: S,
    searcher: ExternalSearcher,
}

impl<S: MaterialScorer> ResultAggregator<S> {
    pub fn new(scorer: S, searcher: ExternalSearcher) -> Self {
        Self { scorer, searcher }
    }

    /// Never fails: any error collapses to the single fallback candidate.
    pub fn aggregate(
        &self,
        requirements: &ExtractedRequirements,
        current: &CurrentMaterial,
        ctx: &PipelineContext<'_>,
    ) -> AggregatedCandidates {
        match self.try_aggregate(requirements, current, ctx) {
            Ok(out) => out,
            Err(err) => {
                error!("aggregation failed, using fallback candidate: {err}");
                ctx.telemetry
                    .emit(&TelemetryEvent::new("aggregate.fallback", err.to_string()));
                AggregatedCandidates::failed(&err)
            }
        }
    }

    pub fn try_aggregate(
        &self,
        requirements: &ExtractedRequirements,
        current: &CurrentMaterial,
        ctx: &PipelineContext<'_>,
    ) -> Result<AggregatedCandidates, DomainError> {
        let (catalog, research) = thread::scope(|scope| {
            let catalog = scope.spawn(|| self.scorer.score_all(requirements, current));
            let research = self
                .searcher
                .is_configured()
                .then(|| scope.spawn(|| self.searcher.search(requirements, current, None)));
            (
                settle(catalog.join()),
                research.map(|h| settle(h.join()).and_then(|r| r)),
            )
        });

        let catalog = catalog.unwrap_or_else(|err| {
            warn!("catalog scoring failed: {err}");
            ctx.telemetry
                .emit(&TelemetryEvent::new("catalog.failed", err.to_string()));
            Vec::new()
        });
        let research = match research {
            None => {
                ctx.telemetry
                    .emit(&TelemetryEvent::new("research.unavailable", "not configured"));
                None
            }
            Some(Ok(SearchOutcome::Found(report))) => {
                ctx.telemetry.emit(&TelemetryEvent::new(
                    "research.found",
                    report.findings.len().to_string(),
                ));
                Some(report)
            }
            Some(Ok(SearchOutcome::Unavailable(reason))) => {
                info!("external research unavailable: {reason}");
                ctx.telemetry
                    .emit(&TelemetryEvent::new("research.unavailable", reason));
                None
            }
            Some(Err(err)) => {
                warn!("external research failed: {err}");
                ctx.telemetry
                    .emit(&TelemetryEvent::new("research.failed", err.to_string()));
                None
            }
        };

        let findings = research.as_ref().map_or(&[][..], |r| r.findings.as_slice());
        let catalog_result_count = catalog.len().min(CATALOG_TOP);
        let candidates = merge_candidates(catalog, findings);
        validate(&candidates)?;

        let mut sources = Vec::new();
        if catalog_result_count > 0 {
            sources.push(DataSource::OrganicPolymerDatabase);
        }
        if !findings.is_empty() {
            sources.push(DataSource::ExternalResearch);
        }
        let provenance = if sources.is_empty() {
            ctx.telemetry
                .emit(&TelemetryEvent::new("aggregate.fallback", "no source results"));
            DataProvenance::fallback()
        } else {
            DataProvenance::from_sources(&sources)
        };

        Ok(AggregatedCandidates {
            candidates,
            provenance,
            research,
            catalog_result_count,
        })
    }
}

/// Catalog top entries first, then entries synthesized from surplus findings.
///
/// Insights are attached by position: the i-th catalog entry receives the i-th
/// finding whether or not the names agree. This is a weak correlation, not a join.
pub fn merge_candidates(
    catalog: Vec<ScoredMaterial>,
    findings: &[ExternalFinding],
) -> Vec<ScoredMaterial> {
    let mut merged = catalog.into_iter().take(CATALOG_TOP).collect::<Vec<_>>();
    let catalog_count = merged.len();
    for (candidate, finding) in merged.iter_mut().zip(findings) {
        candidate.external_insight = Some(insight_line(finding));
    }
    merged.extend(
        findings
            .iter()
            .skip(catalog_count)
            .take(MAX_SYNTHESIZED)
            .enumerate()
            .map(|(i, finding)| synthesized_candidate(finding, i)),
    );
    if merged.is_empty() {
        merged.push(fallback_material());
    }
    merged.truncate(MAX_CANDIDATES);
    merged
}

pub fn insight_line(finding: &ExternalFinding) -> String {
    let mut line = format!(
        "{}: {} ({} confidence)",
        finding.source_label,
        finding.name,
        finding.confidence.as_str()
    );
    if let Some(citation) = finding.citations.first() {
        line.push_str(&format!("; source: {}", citation.title));
    }
    line
}

/// Placeholder for a material only the external source mentioned.
pub fn synthesized_candidate(finding: &ExternalFinding, index: usize) -> ScoredMaterial {
    ScoredMaterial {
        name: finding.name.clone(),
        composition: finding.name.clone(),
        properties: MaterialProperties {
            tensile_strength: Some(SYNTHESIZED_TENSILE),
            biodegradability: UNVERIFIED_LABEL.to_string(),
            recyclability: UNVERIFIED_LABEL.to_string(),
            ..MaterialProperties::default()
        },
        sustainability_score: SYNTHESIZED_SUSTAINABILITY,
        match_score: SYNTHESIZED_MATCH_BASE - SYNTHESIZED_MATCH_STEP * index as f64,
        advantages: vec![format!(
            "Identified by external research ({} confidence)",
            finding.confidence.as_str()
        )],
        considerations: vec!["Properties not verified against the catalog".to_string()],
        external_insight: Some(insight_line(finding)),
    }
    .clamped()
}

pub fn fallback_material() -> ScoredMaterial {
    ScoredMaterial {
        name: "PLA/PBAT blend".to_string(),
        composition: "PLA + PBAT".to_string(),
        properties: MaterialProperties {
            tensile_strength: Some(35.0),
            biodegradability: COMPOSTABLE_LABEL.to_string(),
            recyclability: LIMITED_RECYCLING_LABEL.to_string(),
            carbon_footprint: Some(1.5),
            ..MaterialProperties::default()
        },
        sustainability_score: 80.0,
        match_score: 50.0,
        advantages: vec![
            "Commercially established compostable film blend".to_string(),
            "Runs on conventional blown-film equipment".to_string(),
        ],
        considerations: vec!["Moderate barrier performance".to_string()],
        external_insight: None,
    }
}

fn validate(candidates: &[ScoredMaterial]) -> Result<(), DomainError> {
    if candidates.is_empty() || candidates.len() > MAX_CANDIDATES {
        return Err(DomainError::Internal(format!(
            "candidate count {} outside 1..={MAX_CANDIDATES}",
            candidates.len()
        )));
    }
    let in_range = |v: f64| v.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&v);
    match candidates
        .iter()
        .find(|c| !in_range(c.match_score) || !in_range(c.sustainability_score))
    {
        Some(bad) => Err(DomainError::Internal(format!(
            "candidate {} has out-of-range scores",
            bad.name
        ))),
        None => Ok(()),
    }
}
