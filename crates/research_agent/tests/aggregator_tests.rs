use std::sync::Arc;

use catalog_scorer::{CatalogScorer, MaterialScorer};
use core_types::{
    CurrentMaterial, DataSource, ExtractedRequirements, MaterialProperties, ScoredMaterial,
};
use material_catalog::{BUILTIN_MATERIALS, MaterialCatalog};
use proptest::prelude::*;
use research_agent::runtime::{MAX_CANDIDATES, fallback_material};
use research_agent::{
    DomainError, ExternalSearcher, Generation, GenerationRequest, LoggerTelemetry,
    PipelineContext, ResultAggregator, TextGenerationPort,
};

struct FixedPort(String);

impl TextGenerationPort for FixedPort {
    fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DomainError> {
        Ok(Generation::Text(self.0.clone()))
    }
}

struct UnavailablePort;

impl TextGenerationPort for UnavailablePort {
    fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DomainError> {
        Ok(Generation::Unavailable("unauthorized (401)".to_string()))
    }
}

struct FailingPort;

impl TextGenerationPort for FailingPort {
    fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DomainError> {
        Err(DomainError::PortError("http error 502".to_string()))
    }
}

struct PanickingPort;

impl TextGenerationPort for PanickingPort {
    fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DomainError> {
        panic!("research worker crashed")
    }
}

/// Emits a score the aggregator must reject.
struct BrokenScorer;

impl MaterialScorer for BrokenScorer {
    fn score_all(&self, _: &ExtractedRequirements, _: &CurrentMaterial) -> Vec<ScoredMaterial> {
        vec![ScoredMaterial {
            name: "broken".to_string(),
            composition: "?".to_string(),
            properties: MaterialProperties::default(),
            sustainability_score: 70.0,
            match_score: f64::NAN,
            advantages: Vec::new(),
            considerations: Vec::new(),
            external_insight: None,
        }]
    }
}

fn findings_text(n: usize) -> String {
    let names = ["Alpha film", "Beta film", "Gamma film", "Delta film", "Epsilon film"];
    let mut out = String::from("1. Recommended materials\n");
    for i in 0..n {
        out.push_str(&format!(
            "- Material: {}\n  Confidence: high\n",
            names[i % names.len()].replace("film", &format!("film {i}"))
        ));
    }
    out
}

fn searcher(port: impl TextGenerationPort + 'static) -> ExternalSearcher {
    ExternalSearcher::new(Arc::new(port), 0.2, 4000).expect("searcher")
}

fn unconfigured() -> ExternalSearcher {
    ExternalSearcher::unconfigured().expect("searcher")
}

fn first_two_catalog() -> CatalogScorer {
    CatalogScorer::new(MaterialCatalog::from_materials(BUILTIN_MATERIALS[..2].to_vec()))
}

fn requirements() -> ExtractedRequirements {
    ExtractedRequirements {
        tensile_strength: Some(65.0),
        oxygen_permeability: Some(1.5),
        ..ExtractedRequirements::default()
    }
}

fn current() -> CurrentMaterial {
    CurrentMaterial::new("PET/AL/PE", &["高バリア", "生分解性が望ましい"])
}

#[test]
fn unconfigured_searcher_returns_catalog_top_three() {
    let telemetry = LoggerTelemetry::default();
    let ctx = PipelineContext::new(&telemetry);
    let aggregator = ResultAggregator::new(CatalogScorer::default(), unconfigured());

    let out = aggregator.aggregate(&requirements(), &current(), &ctx);
    let expected = CatalogScorer::default()
        .score_all(&requirements(), &current())
        .into_iter()
        .take(3)
        .collect::<Vec<_>>();
    assert_eq!(out.candidates, expected);
    assert!(!out.provenance.contains(DataSource::ExternalResearch));
    assert_eq!(out.provenance.label(), "Organic Polymer Database");
    assert_eq!(out.catalog_result_count, 3);
    assert_eq!(out.external_result_count(), 0);
    assert!(telemetry.names().contains(&"research.unavailable".to_string()));
}

#[test]
fn both_sources_empty_yields_single_fallback() {
    let telemetry = LoggerTelemetry::default();
    let ctx = PipelineContext::new(&telemetry);
    let aggregator =
        ResultAggregator::new(CatalogScorer::new(MaterialCatalog::empty()), unconfigured());

    let out = aggregator.aggregate(&requirements(), &current(), &ctx);
    assert_eq!(out.candidates, vec![fallback_material()]);
    assert_eq!(out.provenance.label(), "Fallback Data");
    assert_eq!(out.provenance.error, None);
}

#[test]
fn surplus_findings_become_two_synthesized_entries() {
    let telemetry = LoggerTelemetry::default();
    let ctx = PipelineContext::new(&telemetry);
    let aggregator =
        ResultAggregator::new(first_two_catalog(), searcher(FixedPort(findings_text(5))));

    let out = aggregator.aggregate(&requirements(), &current(), &ctx);
    assert_eq!(out.candidates.len(), 4);
    assert_eq!(out.external_result_count(), 5);
    assert_eq!(
        out.provenance.label(),
        "Organic Polymer Database + External Research"
    );

    // catalog entries are annotated by position
    let insight = out.candidates[0].external_insight.as_deref().expect("insight");
    assert_eq!(insight, "External Research: Alpha film 0 (high confidence)");
    assert!(out.candidates[1]
        .external_insight
        .as_deref()
        .is_some_and(|s| s.contains("Beta film 1")));

    let synthesized = &out.candidates[2..];
    assert_eq!(synthesized[0].name, "Gamma film 2");
    assert_eq!(synthesized[0].match_score, 80.0);
    assert_eq!(synthesized[1].name, "Delta film 3");
    assert_eq!(synthesized[1].match_score, 75.0);
    assert!(synthesized.iter().all(|m| m.sustainability_score == 75.0));
}

#[test]
fn external_only_results_skip_fallback() {
    let telemetry = LoggerTelemetry::default();
    let ctx = PipelineContext::new(&telemetry);
    let aggregator = ResultAggregator::new(
        CatalogScorer::new(MaterialCatalog::empty()),
        searcher(FixedPort(findings_text(3))),
    );

    let out = aggregator.aggregate(&requirements(), &current(), &ctx);
    let names = out.candidates.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Alpha film 0", "Beta film 1"]);
    assert_eq!(out.provenance.label(), "External Research");
}

#[test]
fn failed_or_unavailable_research_keeps_catalog_results() {
    let cases: Vec<(Box<dyn Fn() -> ExternalSearcher>, &str)> = vec![
        (Box::new(|| searcher(FailingPort)), "research.failed"),
        (Box::new(|| searcher(PanickingPort)), "research.failed"),
        (Box::new(|| searcher(UnavailablePort)), "research.unavailable"),
    ];
    for (make, event) in cases {
        let telemetry = LoggerTelemetry::default();
        let ctx = PipelineContext::new(&telemetry);
        let aggregator = ResultAggregator::new(CatalogScorer::default(), make());
        let out = aggregator.aggregate(&requirements(), &current(), &ctx);
        assert_eq!(out.candidates.len(), 3, "{event}");
        assert!(out.candidates.iter().all(|c| c.external_insight.is_none()));
        assert_eq!(out.provenance.label(), "Organic Polymer Database");
        assert!(telemetry.names().contains(&event.to_string()), "{event}");
    }
}

#[test]
fn invalid_scores_collapse_to_error_fallback() {
    let telemetry = LoggerTelemetry::default();
    let ctx = PipelineContext::new(&telemetry);
    let aggregator = ResultAggregator::new(BrokenScorer, unconfigured());

    assert!(matches!(
        aggregator.try_aggregate(&requirements(), &current(), &ctx),
        Err(DomainError::Internal(_))
    ));

    let out = aggregator.aggregate(&requirements(), &current(), &ctx);
    assert_eq!(out.candidates, vec![fallback_material()]);
    assert!(out.is_fallback());
    assert!(out.provenance.error.is_some());
    assert!(out.provenance.label().starts_with("Fallback Data (error:"));
    assert!(telemetry.names().contains(&"aggregate.fallback".to_string()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn aggregate_length_is_always_between_one_and_five(
        catalog_size in 0usize..=BUILTIN_MATERIALS.len(),
        finding_count in 0usize..8,
        configured in any::<bool>(),
    ) {
        let scorer = CatalogScorer::new(MaterialCatalog::from_materials(
            BUILTIN_MATERIALS[..catalog_size].to_vec(),
        ));
        let search = if configured {
            searcher(FixedPort(findings_text(finding_count)))
        } else {
            unconfigured()
        };
        let telemetry = LoggerTelemetry::default();
        let ctx = PipelineContext::new(&telemetry);
        let out = ResultAggregator::new(scorer, search).aggregate(&requirements(), &current(), &ctx);
        prop_assert!((1..=MAX_CANDIDATES).contains(&out.candidates.len()));
        for c in &out.candidates {
            prop_assert!((0.0..=100.0).contains(&c.match_score));
            prop_assert!((0.0..=100.0).contains(&c.sustainability_score));
        }
    }
}
