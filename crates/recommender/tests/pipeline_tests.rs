use std::sync::Arc;

use catalog_scorer::CatalogScorer;
use core_types::{ConfidenceLevel, CurrentMaterial, Importance, Requirement};
use material_catalog::MaterialCatalog;
use recommender::{
    ParseResult, RecommendationPipeline, RecommendationRequest, RecommendationSynthesizer,
    SynthesisMethod, fallback_recommendations, parse_recommendations, request_digest,
};
use research_agent::{
    DomainError, ExternalSearcher, Generation, GenerationRequest, LoggerTelemetry,
    PipelineContext, TextGenerationPort,
};

const MODEL_REPLY: &str = r#"Here you go:
```json
{"recommendations": [
  {"materialName": "PLA", "compositionParts": ["PLA"],
   "scores": {"physical": 120, "environmental": 90, "cost": 70, "safety": 95, "supply": 80},
   "totalScore": 88.6, "reasoning": "r", "features": ["biodegradable"],
   "dataSources": ["Organic Polymer Database"]},
  {"materialName": "PBS/PBAT",
   "scores": {"physical": 80, "environmental": 85, "cost": 75, "safety": 90, "supply": 70}},
  {"materialName": "Broken", "scores": {"physical": 80}},
  {"materialName": "Cellophane",
   "scores": {"physical": 70, "environmental": 70, "cost": 70, "safety": 70, "supply": 70}},
  {"materialName": "Extra",
   "scores": {"physical": 60, "environmental": 60, "cost": 60, "safety": 60, "supply": 60}}
]}
```"#;

struct FixedPort(&'static str);

impl TextGenerationPort for FixedPort {
    fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DomainError> {
        Ok(Generation::Text(self.0.to_string()))
    }
}

struct FailingPort;

impl TextGenerationPort for FailingPort {
    fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DomainError> {
        Err(DomainError::PortError("connection refused".to_string()))
    }
}

struct PanickingPort;

impl TextGenerationPort for PanickingPort {
    fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DomainError> {
        panic!("synthesis backend crashed")
    }
}

fn request() -> RecommendationRequest {
    RecommendationRequest {
        requirements: vec![
            Requirement::new("引張強度", "65", Importance::High).with_unit("MPa"),
            Requirement::new("色", "透明", Importance::Low),
        ],
        current_material: CurrentMaterial::new("PET/AL/PE", &["高バリア"]),
    }
}

fn synthesizer(port: impl TextGenerationPort + 'static) -> RecommendationSynthesizer {
    RecommendationSynthesizer::new(Arc::new(port), 0.3, 4000)
}

fn research(port: impl TextGenerationPort + 'static) -> ExternalSearcher {
    ExternalSearcher::new(Arc::new(port), 0.2, 4000).expect("searcher")
}

fn offline_searcher() -> ExternalSearcher {
    ExternalSearcher::unconfigured().expect("searcher")
}

#[test]
fn model_reply_is_validated_clamped_and_capped() {
    let ParseResult::Ok(recs) = parse_recommendations(MODEL_REPLY) else {
        panic!("reply should parse");
    };
    let names = recs.iter().map(|r| r.material_name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["PLA", "PBS/PBAT", "Cellophane"]);

    assert_eq!(recs[0].scores.physical, 100.0);
    assert_eq!(recs[0].total_score, 89.0);
    assert_eq!(recs[1].composition_parts, vec!["PBS", "PBAT"]);
    assert_eq!(recs[1].total_score, 80.0);
    assert_eq!(recs[1].data_sources, vec!["AI Analysis"]);
    assert_eq!(recs[1].reasoning, "");
}

#[test]
fn unusable_replies_are_malformed() {
    for reply in [
        "I cannot help with that.",
        "{\"recommendations\": \"none\"}",
        "{\"recommendations\": []}",
        "{\"items\": [{\"materialName\": \"PLA\"}]}",
        "{\"recommendations\": [{\"materialName\": \"  \", \"scores\": {\"physical\": 1, \"environmental\": 1, \"cost\": 1, \"safety\": 1, \"supply\": 1}}]}",
    ] {
        assert_eq!(
            parse_recommendations(reply),
            ParseResult::Malformed(reply.to_string()),
            "{reply}"
        );
    }
}

#[test]
fn synthesizer_prefers_model_then_falls_back() {
    let candidates = CatalogScorer::default()
        .catalog()
        .materials()
        .iter()
        .take(3)
        .map(|m| {
            catalog_scorer::score_material(
                m,
                &Default::default(),
                &CurrentMaterial::new("PE", &[]),
            )
        })
        .collect::<Vec<_>>();
    let current = CurrentMaterial::new("PE", &[]);
    let telemetry = LoggerTelemetry::default();
    let ctx = PipelineContext::new(&telemetry);

    let llm = synthesizer(FixedPort(MODEL_REPLY)).synthesize(
        &candidates,
        None,
        &current,
        &[],
        &ctx,
    );
    assert_eq!(llm.method, SynthesisMethod::Llm);
    assert!(telemetry.take().is_empty());

    for s in [
        synthesizer(FixedPort("not json at all")),
        synthesizer(FailingPort),
        RecommendationSynthesizer::unconfigured(),
    ] {
        let out = s.synthesize(&candidates, None, &current, &[], &ctx);
        assert_eq!(out.method, SynthesisMethod::Heuristic);
        assert_eq!(out.recommendations.len(), 3);
        assert_eq!(telemetry.names(), vec!["synthesis.fallback"]);
        telemetry.take();
    }
}

#[test]
fn offline_pipeline_uses_catalog_and_heuristic() {
    let pipeline = RecommendationPipeline::offline().expect("pipeline");
    let response = pipeline.run(&request());

    let names = response
        .recommendations
        .iter()
        .map(|r| r.material_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["CNF-coated paper", "PLA", "PEF"]);
    assert_eq!(response.recommendations[0].total_score, 86.0);

    let meta = &response.metadata;
    assert_eq!(meta.confidence_level, ConfidenceLevel::Low);
    assert_eq!(meta.db_search_result_count, 3);
    assert_eq!(meta.external_result_count, 0);
    assert_eq!(meta.data_provenance, "Organic Polymer Database");
    assert_eq!(meta.request_digest.len(), 64);
    assert_eq!(meta.request_digest, request_digest(&request()));
    assert!(meta.timestamp > 0);
    assert_eq!(response.candidates.len(), 3);
    assert_eq!(response.error, None);
}

#[test]
fn research_findings_raise_supply_and_sources() {
    let telemetry = Arc::new(LoggerTelemetry::default());
    let pipeline = RecommendationPipeline::new(
        CatalogScorer::default(),
        research(FixedPort(
            "1. Recommended materials\n- Material: PLA\n  Confidence: high\n",
        )),
        RecommendationSynthesizer::unconfigured(),
    )
    .with_telemetry(telemetry.clone());

    let response = pipeline.run(&request());
    assert_eq!(response.metadata.external_result_count, 1);
    assert_eq!(
        response.metadata.data_provenance,
        "Organic Polymer Database + External Research"
    );

    let pla = &response.recommendations[1];
    assert_eq!(pla.material_name, "PLA");
    assert_eq!(pla.scores.supply, 85.0);
    assert_eq!(pla.total_score, 87.0);
    assert_eq!(
        pla.data_sources,
        vec!["Organic Polymer Database", "External Research", "AI Analysis"]
    );
    assert_eq!(
        response.recommendations[0].data_sources,
        vec!["Organic Polymer Database"]
    );

    // insight attaches to the first catalog entry by position, not by name
    assert_eq!(
        response.candidates[0].external_insight.as_deref(),
        Some("External Research: PLA (high confidence)")
    );
    assert!(telemetry.names().contains(&"synthesis.fallback".to_string()));
}

#[test]
fn model_synthesis_reports_high_confidence() {
    let pipeline = RecommendationPipeline::new(
        CatalogScorer::default(),
        offline_searcher(),
        synthesizer(FixedPort(MODEL_REPLY)),
    );
    let response = pipeline.run(&request());
    assert_eq!(response.metadata.confidence_level, ConfidenceLevel::High);
    assert_eq!(response.recommendations.len(), 3);
}

#[test]
fn empty_sources_report_fallback_confidence() {
    let pipeline = RecommendationPipeline::new(
        CatalogScorer::new(MaterialCatalog::empty()),
        offline_searcher(),
        RecommendationSynthesizer::unconfigured(),
    );
    let response = pipeline.run(&request());
    assert_eq!(response.metadata.confidence_level, ConfidenceLevel::Fallback);
    assert_eq!(response.metadata.data_provenance, "Fallback Data");
    assert_eq!(response.recommendations.len(), 1);
    assert_eq!(response.recommendations[0].material_name, "PLA/PBAT blend");
}

#[test]
fn unexpected_failure_returns_error_envelope() {
    let telemetry = Arc::new(LoggerTelemetry::default());
    let pipeline = RecommendationPipeline::new(
        CatalogScorer::default(),
        offline_searcher(),
        synthesizer(PanickingPort),
    )
    .with_telemetry(telemetry.clone());

    let response = pipeline.run(&request());
    assert_eq!(response.metadata.confidence_level, ConfidenceLevel::Error);
    assert_eq!(response.recommendations, fallback_recommendations());
    assert!(response
        .error
        .as_deref()
        .is_some_and(|e| e.contains("synthesis backend crashed")));
    assert!(response
        .metadata
        .data_provenance
        .starts_with("Fallback Data (error:"));
    assert!(telemetry.names().contains(&"pipeline.failed".to_string()));
}

#[test]
fn response_serializes_with_camel_case_envelope() {
    let response = RecommendationPipeline::offline()
        .expect("pipeline")
        .run(&request());
    let json = serde_json::to_value(&response).expect("json");
    assert_eq!(json["metadata"]["confidenceLevel"], "low");
    assert_eq!(json["metadata"]["dbSearchResultCount"], 3);
    assert!(json["recommendations"][0]["totalScore"].is_number());
    assert!(json["recommendations"][0]["compositionParts"].is_array());
    assert!(json.get("error").is_none());
}

#[test]
fn request_round_trips_from_json() {
    let raw = r#"{
        "requirements": [{"name": "酸素透過度", "value": "1.5", "unit": "cc", "importance": "high"}],
        "currentMaterial": {"composition": "PET/AL/PE", "properties": ["生分解性"]}
    }"#;
    let parsed: RecommendationRequest = serde_json::from_str(raw).expect("request");
    assert_eq!(parsed.requirements[0].importance, Importance::High);
    assert_eq!(parsed.current_material.properties, vec!["生分解性"]);
}
