use core_types::{CurrentMaterial, ExtractedRequirements};

/// One `- label: value unit` line per present feature; absent features are omitted.
pub fn requirement_lines(requirements: &ExtractedRequirements) -> Vec<String> {
    requirements
        .present()
        .into_iter()
        .map(|(key, value)| format!("- {}: {} {}", key.label(), value, key.unit()))
        .collect()
}

pub fn research_prompt(
    requirements: &ExtractedRequirements,
    current: &CurrentMaterial,
    override_query: Option<&str>,
) -> String {
    if let Some(query) = override_query.map(str::trim).filter(|q| !q.is_empty()) {
        return query.to_string();
    }

    let mut out = String::new();
    out.push_str(
        "Research sustainable alternative packaging materials for the material below.\n\n",
    );
    out.push_str(&format!("Current composition: {}\n", current.composition));
    if !current.properties.is_empty() {
        out.push_str(&format!(
            "Current properties: {}\n",
            current.properties.join(", ")
        ));
    }
    let lines = requirement_lines(requirements);
    if !lines.is_empty() {
        out.push_str("\nRequired performance:\n");
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push_str(
        "\nAnswer with these numbered sections:\n\
         1. Recommended materials: for each one write `Material: <name>`, \
         `Confidence: high|medium|low` and `Source: <title>, <authors>, <year>`.\n\
         2. Technology trends: bullet list.\n\
         3. Considerations: bullet list of challenges and caveats.\n\
         4. References: one citation per line as \"title\" (authors, year), with URLs where available.\n",
    );
    out
}
