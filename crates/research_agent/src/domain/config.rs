use std::time::Duration;

use log::warn;

pub const RESEARCH_ENV_PREFIX: &str = "MATERIALS_RESEARCH";
pub const SYNTHESIS_ENV_PREFIX: &str = "MATERIALS_SYNTHESIS";
pub const TIMEOUT_ENV: &str = "MATERIALS_TEXTGEN_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for one text-generation capability.
/// A missing credential is a valid, unconfigured state.
#[derive(Clone, Debug, PartialEq)]
pub struct TextGenConfig {
    pub credential: Option<String>,
    pub base_endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

impl TextGenConfig {
    pub fn research_default() -> Self {
        Self {
            credential: None,
            base_endpoint: "https://api.perplexity.ai".to_string(),
            model: "sonar-pro".to_string(),
            temperature: 0.2,
            max_output_tokens: 4000,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn synthesis_default() -> Self {
        Self {
            credential: None,
            base_endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_output_tokens: 4000,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credential
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    pub fn with_credential(mut self, credential: &str) -> Self {
        self.credential = Some(credential.to_string());
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.base_endpoint = endpoint.to_string();
        self
    }

    /// Overlays `<PREFIX>_API_KEY`, `<PREFIX>_ENDPOINT` and `<PREFIX>_MODEL` from `lookup`.
    pub fn overlay<F>(mut self, prefix: &str, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: String| lookup(&key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(format!("{prefix}_API_KEY")) {
            self.credential = Some(key);
        }
        if let Some(endpoint) = non_empty(format!("{prefix}_ENDPOINT")) {
            self.base_endpoint = endpoint;
        }
        if let Some(model) = non_empty(format!("{prefix}_MODEL")) {
            self.model = model;
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    pub research: TextGenConfig,
    pub synthesis: TextGenConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            research: TextGenConfig::research_default(),
            synthesis: TextGenConfig::synthesis_default(),
        }
    }
}

impl PipelineConfig {
    /// Both capabilities unconfigured; the pipeline runs on catalog data and heuristics only.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = lookup(TIMEOUT_ENV)
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!("ignoring invalid {TIMEOUT_ENV}={raw}");
                    None
                }
            })
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let mut research = TextGenConfig::research_default().overlay(RESEARCH_ENV_PREFIX, &lookup);
        let mut synthesis =
            TextGenConfig::synthesis_default().overlay(SYNTHESIS_ENV_PREFIX, &lookup);
        research.timeout = timeout;
        synthesis.timeout = timeout;
        Self {
            research,
            synthesis,
        }
    }
}
