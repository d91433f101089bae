use std::sync::Arc;

use core_types::{CurrentMaterial, Recommendation, Requirement, ResearchReport, ScoredMaterial};
use log::{debug, info, warn};
use research_agent::{
    DomainError, Generation, GenerationRequest, HttpTextGenClient, PipelineContext,
    TelemetryEvent, TextGenConfig, TextGenerationPort,
};
use serde::Serialize;

use crate::heuristic::heuristic_recommendations;
use crate::parse::{ParseResult, parse_recommendations};
use crate::prompt::synthesis_prompt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisMethod {
    Llm,
    Heuristic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Synthesis {
    pub recommendations: Vec<Recommendation>,
    pub method: SynthesisMethod,
}

/// Final top-three selection. Uses the model when configured and its reply parses,
/// otherwise the deterministic heuristic.
#[derive(Clone)]
pub struct RecommendationSynthesizer {
    port: Option<Arc<dyn TextGenerationPort>>,
    temperature: f32,
    max_output_tokens: u32,
}

impl RecommendationSynthesizer {
    pub fn new(
        port: Arc<dyn TextGenerationPort>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            port: Some(port),
            temperature,
            max_output_tokens,
        }
    }

    pub fn unconfigured() -> Self {
        let defaults = TextGenConfig::synthesis_default();
        Self {
            port: None,
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
        }
    }

    pub fn from_config(config: &TextGenConfig) -> Result<Self, DomainError> {
        if !config.is_configured() {
            info!("model synthesis disabled: no credential configured");
            return Ok(Self::unconfigured());
        }
        let client = HttpTextGenClient::new(config.clone())?;
        Ok(Self::new(
            Arc::new(client),
            config.temperature,
            config.max_output_tokens,
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.port.is_some()
    }

    pub fn synthesize(
        &self,
        candidates: &[ScoredMaterial],
        research: Option<&ResearchReport>,
        current: &CurrentMaterial,
        requirements: &[Requirement],
        ctx: &PipelineContext<'_>,
    ) -> Synthesis {
        match self.model_recommendations(candidates, current, requirements) {
            Ok(recommendations) => Synthesis {
                recommendations,
                method: SynthesisMethod::Llm,
            },
            Err(reason) => {
                ctx.telemetry
                    .emit(&TelemetryEvent::new("synthesis.fallback", reason));
                Synthesis {
                    recommendations: heuristic_recommendations(candidates, research),
                    method: SynthesisMethod::Heuristic,
                }
            }
        }
    }

    /// `Err` carries the reason the heuristic path is taken.
    fn model_recommendations(
        &self,
        candidates: &[ScoredMaterial],
        current: &CurrentMaterial,
        requirements: &[Requirement],
    ) -> Result<Vec<Recommendation>, String> {
        let Some(port) = self.port.as_ref() else {
            return Err("synthesis not configured".to_string());
        };
        let request = GenerationRequest {
            prompt: synthesis_prompt(candidates, current, requirements),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };
        match port.generate(&request) {
            Ok(Generation::Text(text)) => match parse_recommendations(&text) {
                ParseResult::Ok(recommendations) => Ok(recommendations),
                ParseResult::Malformed(raw) => {
                    warn!("model reply was not usable JSON, using heuristic");
                    debug!("unusable model reply: {raw}");
                    Err("malformed model reply".to_string())
                }
            },
            Ok(Generation::Unavailable(reason)) => {
                info!("model synthesis unavailable: {reason}");
                Err(reason)
            }
            Err(err) => {
                warn!("model synthesis failed: {err}");
                Err(err.to_string())
            }
        }
    }
}
