use serde::{Deserialize, Serialize};

use crate::clamp_score;

pub const BIODEGRADABLE_LABEL: &str = "Biodegradable";
pub const COMPOSTABLE_LABEL: &str = "Biodegradable (compostable)";
pub const PERSISTENT_LABEL: &str = "Persistent";
pub const RECYCLABLE_LABEL: &str = "Recyclable";
pub const LIMITED_RECYCLING_LABEL: &str = "Limited recycling";
pub const UNVERIFIED_LABEL: &str = "Unverified";

/// Normalized property subset carried alongside a scored candidate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensile_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melting_point: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_permeability: Option<f64>,
    pub biodegradability: String,
    pub recyclability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_footprint: Option<f64>,
}

impl MaterialProperties {
    pub fn is_biodegradable(&self) -> bool {
        self.biodegradability.contains(BIODEGRADABLE_LABEL)
    }

    pub fn is_recyclable(&self) -> bool {
        self.recyclability.contains(RECYCLABLE_LABEL)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMaterial {
    pub name: String,
    pub composition: String,
    pub properties: MaterialProperties,
    pub sustainability_score: f64,
    pub match_score: f64,
    #[serde(default)]
    pub advantages: Vec<String>,
    #[serde(default)]
    pub considerations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_insight: Option<String>,
}

impl ScoredMaterial {
    /// Keeps both scores finite and inside `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            sustainability_score: clamp_score(self.sustainability_score),
            match_score: clamp_score(self.match_score),
            ..self
        }
    }
}
