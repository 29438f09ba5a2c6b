//! S2: Foods in the Stack
//!
//! One numbered block per food, in stack order. The multiplier is shown next
//! to the name when it differs from a single serving.

use crate::catalog::Food;
use crate::report::sections::section_title;
use crate::stack::{StackEntry, DEFAULT_MULTIPLIER};
use crate::utils::display::{category_label, format_multiplier, format_score};

pub fn generate(entries: &[(&StackEntry, &Food)]) -> String {
    let mut blocks = vec![section_title("FOODS IN YOUR STACK")];

    for (index, (entry, food)) in entries.iter().enumerate() {
        blocks.push(food_block(index + 1, entry, food));
    }

    blocks.join("\n\n")
}

fn food_block(position: usize, entry: &StackEntry, food: &Food) -> String {
    let mut lines = Vec::new();

    if entry.multiplier == DEFAULT_MULTIPLIER {
        lines.push(format!("{}. {}", position, food.name));
    } else {
        lines.push(format!(
            "{}. {} (x{})",
            position,
            food.name,
            format_multiplier(entry.multiplier)
        ));
    }

    lines.push(format!("   Category: {}", category_label(&food.category)));
    lines.push(format!("   Serving: {}", food.serving_size));
    lines.push(format!("   Frequency: {}", food.frequency));
    if let Some(preparation) = &food.preparation {
        lines.push(format!("   Preparation: {}", preparation));
    }
    lines.push(format!("   Cost: {}", food.cost_display()));
    lines.push(format!(
        "   Anti-Inflammatory Score: {}",
        format_score(food.anti_inflammatory)
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_foods;

    #[test]
    fn test_food_blocks() {
        let foods = parse_foods(
            r#"[
                {"id": "turmeric", "name": "Turmeric", "category": "spices", "servingSize": "1 tsp",
                 "frequency": "Daily", "preparation": "With black pepper", "cost": "$0.20/day",
                 "antiInflammatoryScore": 95},
                {"id": "kale", "name": "Kale", "category": "leafy_greens", "servingSize": "1 cup",
                 "frequency": "3x/week", "antiInflammatoryScore": 7}
            ]"#,
        )
        .unwrap();

        let mut turmeric = StackEntry::new("turmeric");
        turmeric.multiplier = 2.0;
        let kale = StackEntry::new("kale");

        let text = generate(&[(&turmeric, &foods[0]), (&kale, &foods[1])]);

        assert!(text.contains("1. Turmeric (x2)\n   Category: spices\n   Serving: 1 tsp"));
        assert!(text.contains("   Preparation: With black pepper"));
        assert!(text.contains("   Anti-Inflammatory Score: 9.5/10"));
        assert!(text.contains("2. Kale\n   Category: leafy greens"));
        assert!(text.contains("   Cost: varies"));
    }
}
