use core_types::{CurrentMaterial, Importance, Requirement, ScoredMaterial};

/// Rubric weights in percent: performance, sustainability, practicality, safety, future readiness.
pub const RUBRIC_WEIGHTS: [(&str, u8); 5] = [
    ("Performance match", 30),
    ("Sustainability", 35),
    ("Practicality (cost, processing)", 20),
    ("Safety and regulatory fit", 10),
    ("Future readiness (supply, policy)", 5),
];

pub fn synthesis_prompt(
    candidates: &[ScoredMaterial],
    current: &CurrentMaterial,
    requirements: &[Requirement],
) -> String {
    let mut out = String::from(
        "You are a packaging materials engineer. Choose the best three replacement materials.\n\n",
    );
    out.push_str(&format!("Current composition: {}\n", current.composition));
    if !current.properties.is_empty() {
        out.push_str(&format!("Current properties: {}\n", current.properties.join(", ")));
    }

    out.push_str("\nRequirements:\n");
    for req in requirements {
        let unit = req.unit.as_deref().map(|u| format!(" {u}")).unwrap_or_default();
        out.push_str(&format!(
            "- {}: {}{} (importance: {})\n",
            req.name,
            req.value,
            unit,
            importance_label(req.importance)
        ));
    }

    out.push_str("\nCandidates:\n");
    for (i, c) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} [{}] match {:.0}, sustainability {:.0}; advantages: {}; considerations: {}\n",
            i + 1,
            c.name,
            c.composition,
            c.match_score,
            c.sustainability_score,
            c.advantages.join("; "),
            c.considerations.join("; ")
        ));
        if let Some(insight) = &c.external_insight {
            out.push_str(&format!("   external: {insight}\n"));
        }
    }

    out.push_str(
        "\nGrade each axis A (90-100), B (75-89), C (60-74) or D (below 60) and convert to a number.\nWeights:\n",
    );
    for (axis, weight) in RUBRIC_WEIGHTS {
        out.push_str(&format!("- {axis}: {weight}%\n"));
    }
    out.push_str(
        "\nReply with JSON only:\n\
         {\"recommendations\": [{\"materialName\": \"...\", \"compositionParts\": [\"...\"], \
         \"scores\": {\"physical\": 0, \"environmental\": 0, \"cost\": 0, \"safety\": 0, \"supply\": 0}, \
         \"totalScore\": 0, \"reasoning\": \"...\", \"features\": [\"...\"], \"dataSources\": [\"...\"]}]}\n",
    );
    out
}

fn importance_label(importance: Importance) -> &'static str {
    match importance {
        Importance::High => "high",
        Importance::Medium => "medium",
        Importance::Low => "low",
    }
}
