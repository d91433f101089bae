use serde::{Deserialize, Serialize};

use crate::clamp_score;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub physical: f64,
    pub environmental: f64,
    pub cost: f64,
    pub safety: f64,
    pub supply: f64,
}

impl ScoreVector {
    pub fn clamped(self) -> Self {
        Self {
            physical: clamp_score(self.physical),
            environmental: clamp_score(self.environmental),
            cost: clamp_score(self.cost),
            safety: clamp_score(self.safety),
            supply: clamp_score(self.supply),
        }
    }

    pub fn mean(&self) -> f64 {
        (self.physical + self.environmental + self.cost + self.safety + self.supply) / 5.0
    }

    /// Rounded mean of the five axes, clamped.
    pub fn total(&self) -> f64 {
        clamp_score(self.mean().round())
    }

    pub fn is_bounded(&self) -> bool {
        [
            self.physical,
            self.environmental,
            self.cost,
            self.safety,
            self.supply,
        ]
        .iter()
        .all(|v| v.is_finite() && (0.0..=100.0).contains(v))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub material_name: String,
    pub composition_parts: Vec<String>,
    pub scores: ScoreVector,
    pub total_score: f64,
    pub reasoning: String,
    pub features: Vec<String>,
    pub data_sources: Vec<String>,
}
