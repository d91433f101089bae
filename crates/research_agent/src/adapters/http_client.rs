use log::{debug, warn};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, TextGenConfig};
use crate::ports::{Generation, GenerationRequest, TextGenerationPort};

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone, Debug)]
pub struct HttpTextGenClient {
    config: TextGenConfig,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl HttpTextGenClient {
    pub fn new(config: TextGenConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::PortError(format!("failed to build http client: {e}")))?;
        Ok(Self { config, client })
    }

    fn timeout_outcome(&self, err: &reqwest::Error) -> Generation {
        warn!("text generation timed out after {:?}", self.config.timeout);
        Generation::Unavailable(format!("timed out: {err}"))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_endpoint.trim_end_matches('/')
        )
    }
}

impl TextGenerationPort for HttpTextGenClient {
    fn generate(&self, request: &GenerationRequest) -> Result<Generation, DomainError> {
        let Some(credential) = self
            .config
            .credential
            .as_deref()
            .filter(|c| !c.trim().is_empty())
        else {
            return Ok(Generation::Unavailable("credential not configured".to_string()));
        };

        let url = self.endpoint();
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };
        debug!("text generation request to {url} ({} chars)", request.prompt.len());

        let resp = match self.client.post(&url).bearer_auth(credential).json(&body).send() {
            Ok(resp) => resp,
            Err(e) if timed_out(&e) => return Ok(self.timeout_outcome(&e)),
            Err(e) => {
                return Err(DomainError::PortError(format!("failed to reach {url}: {e}")));
            }
        };

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("text generation rejected credential ({status})");
            return Ok(Generation::Unavailable(format!("unauthorized ({status})")));
        }

        // the deadline covers the body too, so a stalled body is a timeout like a stalled connect
        let raw = match resp.text() {
            Ok(raw) => raw,
            Err(e) if timed_out(&e) => return Ok(self.timeout_outcome(&e)),
            Err(e) => {
                return Err(DomainError::PortError(format!("failed to read response body: {e}")));
            }
        };
        if !status.is_success() {
            return Err(DomainError::PortError(format!("http error {status}: {raw}")));
        }

        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| DomainError::PortError(format!("invalid response body: {e}")))?;
        parsed
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .map(Generation::Text)
            .ok_or_else(|| DomainError::PortError("response carried no content".to_string()))
    }
}

/// Body-read timeouts can surface as decode errors wrapping an io timeout.
fn timed_out(err: &reqwest::Error) -> bool {
    if err.is_timeout() {
        return true;
    }
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::TimedOut)
        {
            return true;
        }
        source = cause.source();
    }
    false
}
