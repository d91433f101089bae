use std::sync::Arc;

use core_types::{CurrentMaterial, ExtractedRequirements, ResearchReport};
use log::{debug, info};

use crate::adapters::HttpTextGenClient;
use crate::capability::parser::ResearchParser;
use crate::capability::prompt::research_prompt;
use crate::domain::{DomainError, TextGenConfig};
use crate::ports::{Generation, GenerationRequest, TextGenerationPort};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(ResearchReport),
    Unavailable(String),
}

/// Issues one research query and mines the answer. An unconfigured searcher reports
/// `Unavailable` instead of failing.
#[derive(Clone)]
pub struct ExternalSearcher {
    port: Option<Arc<dyn TextGenerationPort>>,
    parser: ResearchParser,
    temperature: f32,
    max_output_tokens: u32,
}

impl ExternalSearcher {
    pub fn new(
        port: Arc<dyn TextGenerationPort>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            port: Some(port),
            parser: ResearchParser::compile()?,
            temperature,
            max_output_tokens,
        })
    }

    pub fn unconfigured() -> Result<Self, DomainError> {
        let defaults = TextGenConfig::research_default();
        Ok(Self {
            port: None,
            parser: ResearchParser::compile()?,
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
        })
    }

    pub fn from_config(config: &TextGenConfig) -> Result<Self, DomainError> {
        if !config.is_configured() {
            info!("external research disabled: no credential configured");
            return Self::unconfigured();
        }
        let client = HttpTextGenClient::new(config.clone())?;
        Self::new(Arc::new(client), config.temperature, config.max_output_tokens)
    }

    pub fn is_configured(&self) -> bool {
        self.port.is_some()
    }

    pub fn search(
        &self,
        requirements: &ExtractedRequirements,
        current: &CurrentMaterial,
        override_query: Option<&str>,
    ) -> Result<SearchOutcome, DomainError> {
        let Some(port) = self.port.as_ref() else {
            return Ok(SearchOutcome::Unavailable(
                "research capability not configured".to_string(),
            ));
        };
        let request = GenerationRequest {
            prompt: research_prompt(requirements, current, override_query),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };
        match port.generate(&request)? {
            Generation::Text(text) => {
                debug!("research answer received ({} chars)", text.len());
                Ok(SearchOutcome::Found(self.parser.parse(&text)))
            }
            Generation::Unavailable(reason) => Ok(SearchOutcome::Unavailable(reason)),
        }
    }
}
