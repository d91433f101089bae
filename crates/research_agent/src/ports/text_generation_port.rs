use crate::domain::DomainError;

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Either generated text or an explicit signal that the capability cannot serve the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generation {
    Text(String),
    Unavailable(String),
}

pub trait TextGenerationPort: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<Generation, DomainError>;
}
