use core_types::{ExtractedRequirements, FeatureKey, Requirement};
use log::debug;

/// Ordered name patterns. The first feature with a matching pattern wins.
const FEATURE_PATTERNS: &[(FeatureKey, &[&str])] = &[
    (FeatureKey::TensileStrength, &["引張強度", "引張強さ", "tensile"]),
    (FeatureKey::Elongation, &["伸び", "elongation"]),
    (FeatureKey::ImpactStrength, &["衝撃強度", "衝撃", "impact"]),
    (FeatureKey::HeatSealStrength, &["ヒートシール", "シール強度", "heat seal"]),
    (FeatureKey::OxygenPermeability, &["酸素透過", "酸素バリア", "oxygen"]),
    (
        FeatureKey::WaterVaporPermeability,
        &["水蒸気透過", "透湿", "water vapor", "moisture"],
    ),
    (FeatureKey::LightBlocking, &["遮光", "light"]),
    (FeatureKey::HeatResistance, &["耐熱", "heat resistance"]),
    (FeatureKey::ColdResistance, &["耐寒", "耐冷", "cold"]),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct RequirementExtractor;

impl RequirementExtractor {
    /// Builds the fixed-schema feature set. Unmatched names and unparseable values are skipped;
    /// a later requirement overwrites an earlier one mapped to the same feature.
    pub fn extract(&self, requirements: &[Requirement]) -> ExtractedRequirements {
        let mut out = ExtractedRequirements::default();
        for req in requirements {
            let Some(key) = self.match_feature(&req.name) else {
                debug!("requirement '{}' matches no known feature", req.name);
                continue;
            };
            match parse_leading_float(&req.value) {
                Some(v) => out.set(key, v),
                None => debug!(
                    "requirement '{}' has non-numeric value '{}'",
                    req.name, req.value
                ),
            }
        }
        out
    }

    pub fn match_feature(&self, name: &str) -> Option<FeatureKey> {
        let lower = name.to_lowercase();
        FEATURE_PATTERNS
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| lower.contains(p)))
            .map(|(key, _)| *key)
    }
}

/// Parses the longest leading decimal literal, ignoring any trailing text. Non-finite results yield `None`.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            end = j;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
