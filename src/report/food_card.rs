//! Food Detail Card
//!
//! Markdown article for a single food, in the order the details view shows
//! it: overview, evidence and scores, serving information, key compounds,
//! mechanisms, then the optional notes and food combinations.

use crate::catalog::Food;
use crate::utils::display::{category_label, format_score};

/// Render the detail card. `in_stack` adds a one-line status under the title.
pub fn render(food: &Food, in_stack: bool) -> String {
    let mut sections = Vec::new();

    let mut title = vec![format!("# {}", food.name)];
    if in_stack {
        title.push("*In your stack*".to_string());
    }
    sections.push(title.join("\n\n"));

    sections.push(overview(food));
    sections.push(evidence(food));
    sections.push(serving(food));

    if !food.key_compounds.is_empty() {
        sections.push(bullet_section("Key Compounds", &food.key_compounds));
    }
    if !food.mechanisms.is_empty() {
        sections.push(bullet_section("Mechanisms of Action", &food.mechanisms));
    }

    if let Some(notes) = &food.side_effects {
        sections.push(format!("## Important Notes\n\n{}", notes));
    }

    if !food.interactions.is_empty() {
        sections.push(bullet_section("Food Combinations", &food.interactions));
    }

    let mut result = sections.join("\n\n");
    result.push('\n');
    result
}

fn overview(food: &Food) -> String {
    format!(
        "## Overview\n\n{}\n\n**Category**: {}",
        food.description,
        category_label(&food.category)
    )
}

fn evidence(food: &Food) -> String {
    let mut lines = vec!["## Evidence & Scores".to_string(), String::new()];

    let mut evidence_line = format!("- **Evidence Score**: {}", format_score(food.evidence.score));
    if let Some(studies) = food.evidence.studies.filter(|s| *s > 0) {
        evidence_line.push_str(&format!(" ({} studies)", studies));
    }
    lines.push(evidence_line);

    if !food.evidence.breakdown.is_empty() {
        let parts: Vec<String> = food
            .evidence
            .breakdown
            .iter()
            .map(|(key, value)| match value.as_str() {
                Some(text) => format!("{}: {}", key, text),
                None => format!("{}: {}", key, value),
            })
            .collect();
        lines.push(format!("- **Breakdown**: {}", parts.join(", ")));
    }

    lines.push(format!(
        "- **Anti-Inflammatory Score**: {}",
        format_score(food.anti_inflammatory)
    ));

    lines.join("\n")
}

fn serving(food: &Food) -> String {
    let mut lines = vec!["## Serving Information".to_string(), String::new()];
    lines.push(format!("- **Serving Size**: {}", food.serving_size));
    lines.push(format!("- **Recommended Frequency**: {}", food.frequency));
    lines.push(format!("- **Typical Cost**: {}", food.cost_display()));
    if let Some(preparation) = &food.preparation {
        lines.push(format!("- **Preparation**: {}", preparation));
    }
    lines.join("\n")
}

fn bullet_section(title: &str, items: &[String]) -> String {
    let mut lines = vec![format!("## {}", title), String::new()];
    lines.extend(items.iter().map(|item| format!("- {}", item)));
    lines.join("\n")
}
