//! Display helpers shared by the report and the food card.

/// Human label for a category id: "healthy_fats" -> "healthy fats"
pub fn category_label(category: &str) -> String {
    category.replace('_', " ")
}

/// Shopping list heading for a category id: "healthy_fats" -> "HEALTHY FATS"
pub fn category_heading(category: &str) -> String {
    category_label(category).to_uppercase()
}

/// Format a stack multiplier without trailing zeros
///
/// 2.0 -> "2", 1.5 -> "1.5", 0.75 -> "0.75"
pub fn format_multiplier(multiplier: f64) -> String {
    let rendered = format!("{:.2}", multiplier);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a dollar amount: 3.0 -> "$3.00"
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a 0-10 score for display: "8.0/10"
pub fn format_score(score: f64) -> String {
    format!("{:.1}/10", score)
}
