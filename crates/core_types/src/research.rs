use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Paper,
    Report,
    Patent,
    Web,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub kind: CitationKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFinding {
    pub name: String,
    pub source_label: String,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
}

/// Structured view of one research response. Parsing is best effort, so any list may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchReport {
    pub findings: Vec<ExternalFinding>,
    pub trends: Vec<String>,
    pub considerations: Vec<String>,
    pub citations: Vec<Citation>,
    #[serde(skip)]
    pub raw_text: String,
}

impl ResearchReport {
    /// First finding whose name overlaps `name` case-insensitively in either direction.
    pub fn correlated_finding(&self, name: &str) -> Option<&ExternalFinding> {
        let target = name.trim().to_lowercase();
        if target.is_empty() {
            return None;
        }
        self.findings.iter().find(|f| {
            let candidate = f.name.trim().to_lowercase();
            !candidate.is_empty() && (candidate.contains(&target) || target.contains(&candidate))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(name: &str) -> ExternalFinding {
        ExternalFinding {
            name: name.to_string(),
            source_label: "test".to_string(),
            confidence: Confidence::Medium,
            citations: Vec::new(),
        }
    }

    #[test]
    fn correlation_matches_substring_in_both_directions() {
        let report = ResearchReport {
            findings: vec![finding("PLA"), finding("Cellulose nanofiber coated paper")],
            ..ResearchReport::default()
        };
        assert_eq!(
            report.correlated_finding("pla (polylactic acid)").map(|f| f.name.as_str()),
            Some("PLA")
        );
        assert_eq!(
            report.correlated_finding("cellulose nanofiber").map(|f| f.name.as_str()),
            Some("Cellulose nanofiber coated paper")
        );
        assert!(report.correlated_finding("PBAT").is_none());
    }

    #[test]
    fn empty_names_never_correlate() {
        let report = ResearchReport {
            findings: vec![finding("  ")],
            ..ResearchReport::default()
        };
        assert!(report.correlated_finding("PLA").is_none());
        assert!(report.correlated_finding("").is_none());
    }
}
