use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures crossing a component boundary. Degraded-but-usable outcomes are not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    InvalidInput(String),
    /// Transport failure or unusable reply from a text-generation service.
    PortError(String),
    Internal(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::PortError(msg) => write!(f, "text generation failed: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl Error for DomainError {}
