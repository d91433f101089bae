use core_types::{DataSource, Recommendation, ScoreVector, clamp_score};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::MAX_RECOMMENDATIONS;

/// Outcome of decoding a model reply. `Malformed` keeps the raw text for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseResult {
    Ok(Vec<Recommendation>),
    Malformed(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecommendation {
    material_name: String,
    #[serde(default)]
    composition_parts: Vec<String>,
    scores: ScoreVector,
    #[serde(default)]
    total_score: Option<f64>,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    data_sources: Vec<String>,
}

impl RawRecommendation {
    fn into_recommendation(self) -> Option<Recommendation> {
        let name = self.material_name.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let scores = self.scores.clamped();
        let total_score = self
            .total_score
            .filter(|t| t.is_finite())
            .map(|t| clamp_score(t.round()))
            .unwrap_or_else(|| scores.total());
        let composition_parts = if self.composition_parts.is_empty() {
            split_composition(&name)
        } else {
            self.composition_parts
        };
        let data_sources = if self.data_sources.is_empty() {
            vec![DataSource::AiAnalysis.label().to_string()]
        } else {
            self.data_sources
        };
        Some(Recommendation {
            material_name: name,
            composition_parts,
            scores,
            total_score,
            reasoning: self.reasoning,
            features: self.features,
            data_sources,
        })
    }
}

/// Decodes the first balanced `{...}` block of a reply into at most three recommendations.
/// Entries missing a name or any score axis are dropped individually.
pub fn parse_recommendations(text: &str) -> ParseResult {
    let Some(block) = extract_balanced_object(text) else {
        return ParseResult::Malformed(text.to_string());
    };
    let Ok(value) = serde_json::from_str::<Value>(block) else {
        return ParseResult::Malformed(text.to_string());
    };
    let Some(entries) = value.get("recommendations").and_then(Value::as_array) else {
        return ParseResult::Malformed(text.to_string());
    };

    let recommendations = entries
        .iter()
        .filter_map(|entry| match RawRecommendation::deserialize(entry) {
            Ok(raw) => raw.into_recommendation(),
            Err(e) => {
                debug!("dropping malformed recommendation entry: {e}");
                None
            }
        })
        .take(MAX_RECOMMENDATIONS)
        .collect::<Vec<_>>();

    if recommendations.is_empty() {
        ParseResult::Malformed(text.to_string())
    } else {
        ParseResult::Ok(recommendations)
    }
}

/// Returns the first `{...}` span whose braces balance, ignoring braces inside strings.
pub fn extract_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits `PLA/PBAT` or `PLA + PBAT` into its named parts.
pub fn split_composition(composition: &str) -> Vec<String> {
    composition
        .split(['/', '+'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
