//! S4: Shopping List
//!
//! Foods grouped by category, categories in the order they first appear in
//! the stack, one checkbox line per food.

use crate::catalog::Food;
use crate::report::sections::section_title;
use crate::stack::StackEntry;
use crate::utils::display::category_heading;

pub fn generate(entries: &[(&StackEntry, &Food)]) -> String {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for (_, food) in entries {
        match groups.iter_mut().find(|(category, _)| *category == food.category) {
            Some((_, names)) => names.push(food.name.as_str()),
            None => groups.push((food.category.as_str(), vec![food.name.as_str()])),
        }
    }

    let mut blocks = vec![section_title("SHOPPING LIST")];
    for (category, names) in groups {
        let mut lines = vec![format!("{}:", category_heading(category))];
        lines.extend(names.iter().map(|name| format!("  □ {}", name)));
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}
