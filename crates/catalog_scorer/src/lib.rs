use core_types::{
    BIODEGRADABLE_LABEL, COMPOSTABLE_LABEL, CurrentMaterial, ExtractedRequirements,
    LIMITED_RECYCLING_LABEL, MaterialProperties, PERSISTENT_LABEL, RECYCLABLE_LABEL,
    ScoredMaterial,
};
use material_catalog::{CatalogMaterial, MaterialCatalog, MaterialType};

pub const MATCH_SCORE_CEILING: f64 = 95.0;
pub const BARRIER_THRESHOLD: f64 = 2.0;
pub const TENSILE_TOLERANCE: f64 = 20.0;

const BARRIER_POINTS: f64 = 30.0;
const TENSILE_POINTS: f64 = 25.0;
const BIODEGRADABLE_POINTS: f64 = 20.0;
const BIOMASS_POINTS: f64 = 15.0;
const LOW_CARBON_POINTS: f64 = 10.0;

const BIOMASS_BONUS_THRESHOLD: f64 = 50.0;
const LOW_CARBON_THRESHOLD: f64 = 0.6;
const SUSTAINABILITY_BASE: f64 = 70.0;
const SUSTAINABILITY_BIOMASS_WEIGHT: f64 = 0.25;

pub trait MaterialScorer: Send + Sync {
    fn score_all(
        &self,
        requirements: &ExtractedRequirements,
        current: &CurrentMaterial,
    ) -> Vec<ScoredMaterial>;
}

/// Points awarded to one candidate, before the ceiling is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MatchBreakdown {
    pub barrier: f64,
    pub tensile: f64,
    pub biodegradable: f64,
    pub biomass: f64,
    pub low_carbon: f64,
}

impl MatchBreakdown {
    pub fn raw(&self) -> f64 {
        self.barrier + self.tensile + self.biodegradable + self.biomass + self.low_carbon
    }

    pub fn match_score(&self) -> f64 {
        self.raw().clamp(0.0, MATCH_SCORE_CEILING)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CatalogScorer {
    catalog: MaterialCatalog,
}

impl CatalogScorer {
    pub fn new(catalog: MaterialCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }
}

impl MaterialScorer for CatalogScorer {
    fn score_all(
        &self,
        requirements: &ExtractedRequirements,
        current: &CurrentMaterial,
    ) -> Vec<ScoredMaterial> {
        let mut scored = self
            .catalog
            .materials()
            .iter()
            .map(|m| score_material(m, requirements, current))
            .collect::<Vec<_>>();
        // stable: ties keep catalog order
        scored.sort_by(|l, r| r.match_score.total_cmp(&l.match_score));
        scored
    }
}

pub fn match_breakdown(
    material: &CatalogMaterial,
    requirements: &ExtractedRequirements,
    current: &CurrentMaterial,
) -> MatchBreakdown {
    let props = &material.properties;
    let sus = &material.sustainability;
    let mut out = MatchBreakdown::default();

    if requirements
        .oxygen_permeability
        .is_some_and(|req| req < BARRIER_THRESHOLD)
        && props.oxygen_permeability < BARRIER_THRESHOLD
    {
        out.barrier = BARRIER_POINTS;
    }
    if requirements
        .tensile_strength
        .is_some_and(|req| (props.tensile_strength - req).abs() < TENSILE_TOLERANCE)
    {
        out.tensile = TENSILE_POINTS;
    }
    if sus.biodegradable && current.mentions_biodegradability() {
        out.biodegradable = BIODEGRADABLE_POINTS;
    }
    if material.biomass_content() > BIOMASS_BONUS_THRESHOLD {
        out.biomass = BIOMASS_POINTS;
    }
    if sus.carbon_footprint < LOW_CARBON_THRESHOLD {
        out.low_carbon = LOW_CARBON_POINTS;
    }
    out
}

pub fn sustainability_score(material: &CatalogMaterial) -> f64 {
    (SUSTAINABILITY_BASE + SUSTAINABILITY_BIOMASS_WEIGHT * material.biomass_content())
        .clamp(0.0, MATCH_SCORE_CEILING)
}

pub fn score_material(
    material: &CatalogMaterial,
    requirements: &ExtractedRequirements,
    current: &CurrentMaterial,
) -> ScoredMaterial {
    let breakdown = match_breakdown(material, requirements, current);
    ScoredMaterial {
        name: material.name.to_string(),
        composition: material.formula.to_string(),
        properties: normalized_properties(material),
        sustainability_score: sustainability_score(material),
        match_score: breakdown.match_score(),
        advantages: advantages(material),
        considerations: considerations(material),
        external_insight: None,
    }
    .clamped()
}

fn normalized_properties(material: &CatalogMaterial) -> MaterialProperties {
    let sus = &material.sustainability;
    let biodegradability = if sus.biodegradable && material.is_compostable() {
        COMPOSTABLE_LABEL
    } else if sus.biodegradable {
        BIODEGRADABLE_LABEL
    } else {
        PERSISTENT_LABEL
    };
    let recyclability = if material.is_recyclable() {
        RECYCLABLE_LABEL
    } else {
        LIMITED_RECYCLING_LABEL
    };
    MaterialProperties {
        tensile_strength: Some(material.properties.tensile_strength),
        melting_point: Some(material.properties.melting_point),
        density: Some(material.properties.density),
        oxygen_permeability: Some(material.properties.oxygen_permeability),
        biodegradability: biodegradability.to_string(),
        recyclability: recyclability.to_string(),
        carbon_footprint: Some(sus.carbon_footprint),
    }
}

fn advantages(material: &CatalogMaterial) -> Vec<String> {
    let sus = &material.sustainability;
    let biomass = material.biomass_content();
    [
        Some(type_advantage(material.material_type).to_string()),
        sus.biodegradable.then(|| {
            if material.is_compostable() {
                "Biodegradable and industrially compostable".to_string()
            } else {
                "Biodegradable at end of life".to_string()
            }
        }),
        (biomass > 0.0).then(|| format!("Biomass content {biomass}%")),
        (sus.carbon_footprint < 1.0)
            .then(|| format!("Low carbon footprint ({} kg-CO2/kg)", sus.carbon_footprint)),
        (material.properties.density < 1.0)
            .then(|| format!("Lightweight (density {} g/cm³)", material.properties.density)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn type_advantage(t: MaterialType) -> &'static str {
    match t {
        MaterialType::Bioplastic => "Bioplastic processable on existing film lines",
        MaterialType::Recycled => "Recycled resin reduces virgin feedstock demand",
        MaterialType::BioBased => "Bio-based drop-in for conventional resin",
        MaterialType::Cellulose => "Cellulose derived from renewable wood pulp",
    }
}

fn considerations(material: &CatalogMaterial) -> Vec<String> {
    let props = &material.properties;
    [
        (props.melting_point < 150.0).then(|| {
            format!(
                "Low melting point ({}°C) limits hot-fill and retort use",
                props.melting_point
            )
        }),
        (props.tensile_strength < 50.0).then(|| {
            format!(
                "Moderate tensile strength ({} MPa) may need a thicker gauge",
                props.tensile_strength
            )
        }),
        (material.biomass_content() >= 100.0)
            .then(|| "Fully biomass-derived feedstock depends on crop supply".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect()
}
