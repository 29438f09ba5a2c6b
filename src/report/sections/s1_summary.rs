//! S1: Stack Summary

use crate::report::sections::section_title;
use crate::summary::StackSummary;
use crate::utils::display::{category_label, format_score};

pub fn generate(summary: &StackSummary) -> String {
    let mut lines = vec![section_title("STACK SUMMARY")];

    lines.push(format!("Total Foods: {}", summary.total_foods));
    lines.push(format!(
        "Average Anti-Inflammatory Score: {}",
        format_score(summary.avg_anti_inflammatory)
    ));
    lines.push(format!(
        "Average Evidence Score: {}",
        format_score(summary.avg_evidence)
    ));

    if !summary.top_categories.is_empty() {
        let top: Vec<String> = summary
            .top_categories
            .iter()
            .map(|c| category_label(&c.category))
            .collect();
        lines.push(format!("Top Categories: {}", top.join(", ")));
    }

    lines.push(format!("Estimated Daily Cost: {}", summary.daily_cost));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{CategoryCount, DailyCost};

    #[test]
    fn test_summary_block() {
        let summary = StackSummary {
            total_foods: 2,
            avg_anti_inflammatory: 7.75,
            avg_evidence: 7.5,
            top_categories: vec![
                CategoryCount { category: "healthy_fats".to_string(), count: 1 },
                CategoryCount { category: "spices".to_string(), count: 1 },
            ],
            daily_cost: DailyCost::Estimated(3.0),
        };

        let text = generate(&summary);
        assert!(text.starts_with("STACK SUMMARY\n--------------------\n"));
        assert!(text.contains("Total Foods: 2"));
        assert!(text.contains("Average Evidence Score: 7.5/10"));
        assert!(text.contains("Top Categories: healthy fats, spices"));
        assert!(text.ends_with("Estimated Daily Cost: $3.00"));
    }
}
