use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub importance: Importance,
}

impl Requirement {
    pub fn new(name: &str, value: &str, importance: Importance) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            unit: None,
            importance,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }
}

/// Closed set of numeric features a requirement can be mapped onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKey {
    TensileStrength,
    Elongation,
    ImpactStrength,
    HeatSealStrength,
    OxygenPermeability,
    WaterVaporPermeability,
    LightBlocking,
    HeatResistance,
    ColdResistance,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 9] = [
        FeatureKey::TensileStrength,
        FeatureKey::Elongation,
        FeatureKey::ImpactStrength,
        FeatureKey::HeatSealStrength,
        FeatureKey::OxygenPermeability,
        FeatureKey::WaterVaporPermeability,
        FeatureKey::LightBlocking,
        FeatureKey::HeatResistance,
        FeatureKey::ColdResistance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FeatureKey::TensileStrength => "引張強度",
            FeatureKey::Elongation => "伸び率",
            FeatureKey::ImpactStrength => "衝撃強度",
            FeatureKey::HeatSealStrength => "ヒートシール強度",
            FeatureKey::OxygenPermeability => "酸素透過度",
            FeatureKey::WaterVaporPermeability => "水蒸気透過度",
            FeatureKey::LightBlocking => "遮光性",
            FeatureKey::HeatResistance => "耐熱温度",
            FeatureKey::ColdResistance => "耐寒温度",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FeatureKey::TensileStrength => "MPa",
            FeatureKey::Elongation => "%",
            FeatureKey::ImpactStrength => "kJ/m²",
            FeatureKey::HeatSealStrength => "N/15mm",
            FeatureKey::OxygenPermeability => "cc/m²·day·atm",
            FeatureKey::WaterVaporPermeability => "g/m²·day",
            FeatureKey::LightBlocking => "%",
            FeatureKey::HeatResistance => "°C",
            FeatureKey::ColdResistance => "°C",
        }
    }
}

/// Fixed-schema numeric view of a requirement list. Every present value is finite.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensile_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elongation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_seal_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_permeability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_vapor_permeability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_blocking: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_resistance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cold_resistance: Option<f64>,
}

impl ExtractedRequirements {
    pub fn get(&self, key: FeatureKey) -> Option<f64> {
        match key {
            FeatureKey::TensileStrength => self.tensile_strength,
            FeatureKey::Elongation => self.elongation,
            FeatureKey::ImpactStrength => self.impact_strength,
            FeatureKey::HeatSealStrength => self.heat_seal_strength,
            FeatureKey::OxygenPermeability => self.oxygen_permeability,
            FeatureKey::WaterVaporPermeability => self.water_vapor_permeability,
            FeatureKey::LightBlocking => self.light_blocking,
            FeatureKey::HeatResistance => self.heat_resistance,
            FeatureKey::ColdResistance => self.cold_resistance,
        }
    }

    pub fn set(&mut self, key: FeatureKey, value: f64) {
        let slot = match key {
            FeatureKey::TensileStrength => &mut self.tensile_strength,
            FeatureKey::Elongation => &mut self.elongation,
            FeatureKey::ImpactStrength => &mut self.impact_strength,
            FeatureKey::HeatSealStrength => &mut self.heat_seal_strength,
            FeatureKey::OxygenPermeability => &mut self.oxygen_permeability,
            FeatureKey::WaterVaporPermeability => &mut self.water_vapor_permeability,
            FeatureKey::LightBlocking => &mut self.light_blocking,
            FeatureKey::HeatResistance => &mut self.heat_resistance,
            FeatureKey::ColdResistance => &mut self.cold_resistance,
        };
        *slot = Some(value);
    }

    /// Present features in schema order.
    pub fn present(&self) -> Vec<(FeatureKey, f64)> {
        FeatureKey::ALL
            .iter()
            .filter_map(|k| self.get(*k).map(|v| (*k, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}

const BIODEGRADABILITY_MARKERS: [&str; 4] = ["生分解", "biodegrad", "コンポスト", "compost"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentMaterial {
    pub composition: String,
    #[serde(default)]
    pub properties: Vec<String>,
}

impl CurrentMaterial {
    pub fn new(composition: &str, properties: &[&str]) -> Self {
        Self {
            composition: composition.to_string(),
            properties: properties.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn mentions_biodegradability(&self) -> bool {
        self.properties.iter().any(|p| {
            let lower = p.to_lowercase();
            BIODEGRADABILITY_MARKERS.iter().any(|m| lower.contains(m))
        })
    }
}
