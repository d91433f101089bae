use core_types::{
    Confidence, DataSource, Recommendation, ResearchReport, ScoreVector, ScoredMaterial,
};
use research_agent::fallback_material;

use crate::MAX_RECOMMENDATIONS;
use crate::parse::split_composition;

const PHYSICAL_BASE: f64 = 70.0;
const PHYSICAL_TENSILE_WEIGHT: f64 = 0.3;
const PHYSICAL_CEILING: f64 = 95.0;
const COST_BASE: f64 = 80.0;
const COST_RANK_STEP: f64 = 5.0;
const SAFETY_SCORE: f64 = 90.0;
const SUPPLY_CORRELATED: f64 = 85.0;
const SUPPLY_UNCORRELATED: f64 = 75.0;
const HIGH_SUSTAINABILITY: f64 = 80.0;
const LOW_CARBON: f64 = 1.0;

/// Deterministic ranking used whenever model synthesis is unavailable or unusable.
pub fn heuristic_recommendations(
    candidates: &[ScoredMaterial],
    research: Option<&ResearchReport>,
) -> Vec<Recommendation> {
    candidates
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .enumerate()
        .map(|(rank, material)| {
            let finding = research.and_then(|r| r.correlated_finding(&material.name));
            let scores = heuristic_scores(material, rank, finding.is_some());

            let mut data_sources = vec![DataSource::OrganicPolymerDatabase.label().to_string()];
            if let Some(finding) = finding {
                data_sources.push(DataSource::ExternalResearch.label().to_string());
                if finding.confidence == Confidence::High {
                    data_sources.push(DataSource::AiAnalysis.label().to_string());
                }
            }

            Recommendation {
                material_name: material.name.clone(),
                composition_parts: split_composition(&material.composition),
                total_score: scores.total(),
                scores,
                reasoning: reasoning(material),
                features: features(material),
                data_sources,
            }
        })
        .collect()
}

pub fn heuristic_scores(material: &ScoredMaterial, rank: usize, correlated: bool) -> ScoreVector {
    let tensile = material.properties.tensile_strength.unwrap_or(0.0);
    ScoreVector {
        physical: (PHYSICAL_BASE + PHYSICAL_TENSILE_WEIGHT * tensile).min(PHYSICAL_CEILING),
        environmental: material.sustainability_score,
        cost: COST_BASE - COST_RANK_STEP * rank as f64,
        safety: SAFETY_SCORE,
        supply: if correlated {
            SUPPLY_CORRELATED
        } else {
            SUPPLY_UNCORRELATED
        },
    }
    .clamped()
}

/// Returned when the pipeline itself fails.
pub fn fallback_recommendations() -> Vec<Recommendation> {
    heuristic_recommendations(&[fallback_material()], None)
}

fn features(material: &ScoredMaterial) -> Vec<String> {
    let props = &material.properties;
    [
        props.is_biodegradable().then_some("biodegradable"),
        props.is_recyclable().then_some("recyclable"),
        (material.sustainability_score > HIGH_SUSTAINABILITY).then_some("high sustainability"),
        props
            .carbon_footprint
            .is_some_and(|cf| cf < LOW_CARBON)
            .then_some("low carbon"),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect()
}

fn reasoning(material: &ScoredMaterial) -> String {
    material
        .advantages
        .iter()
        .take(2)
        .chain(material.considerations.first())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(". ")
}
