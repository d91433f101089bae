use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    OrganicPolymerDatabase,
    ExternalResearch,
    AiAnalysis,
    FallbackData,
}

impl DataSource {
    pub fn label(self) -> &'static str {
        match self {
            DataSource::OrganicPolymerDatabase => "Organic Polymer Database",
            DataSource::ExternalResearch => "External Research",
            DataSource::AiAnalysis => "AI Analysis",
            DataSource::FallbackData => "Fallback Data",
        }
    }
}

/// Which sources contributed to an aggregated candidate list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProvenance {
    pub sources: Vec<DataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DataProvenance {
    pub fn from_sources(sources: &[DataSource]) -> Self {
        let mut out = Vec::with_capacity(sources.len());
        for s in sources {
            if !out.contains(s) {
                out.push(*s);
            }
        }
        Self {
            sources: out,
            error: None,
        }
    }

    pub fn fallback() -> Self {
        Self::from_sources(&[DataSource::FallbackData])
    }

    pub fn failed(message: &str) -> Self {
        Self {
            sources: vec![DataSource::FallbackData],
            error: Some(message.to_string()),
        }
    }

    pub fn contains(&self, source: DataSource) -> bool {
        self.sources.contains(&source)
    }

    pub fn is_fallback(&self) -> bool {
        self.contains(DataSource::FallbackData)
    }

    pub fn label(&self) -> String {
        let joined = self
            .sources
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(" + ");
        match &self.error {
            Some(err) => format!("{joined} (error: {err})"),
            None => joined,
        }
    }
}

/// Confidence attached to the final recommendation envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Low,
    Error,
    Fallback,
}
