//! Stack Summary
//!
//! Aggregates shown alongside the stack and at the top of the export:
//! counts, average scores, the three most common categories and the
//! estimated daily cost.

use std::fmt;

use crate::catalog::{Catalog, Food};
use crate::stack::{Stack, StackEntry};
use crate::utils::display::format_money;
use crate::utils::normalization::mean_score;

pub const TOP_CATEGORY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Estimated spend per day for the whole stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DailyCost {
    Estimated(f64),
    /// No food in the stack has a numeric cost
    Varies,
}

impl fmt::Display for DailyCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyCost::Estimated(amount) => write!(f, "{}", format_money(*amount)),
            DailyCost::Varies => write!(f, "varies"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackSummary {
    pub total_foods: usize,
    pub avg_anti_inflammatory: f64,
    pub avg_evidence: f64,
    pub top_categories: Vec<CategoryCount>,
    pub daily_cost: DailyCost,
}

/// Stack entries paired with their catalog food, dropping unknown ids.
pub fn resolved_entries<'a>(catalog: &'a Catalog, stack: &'a Stack) -> Vec<(&'a StackEntry, &'a Food)> {
    stack
        .entries()
        .iter()
        .filter_map(|entry| match catalog.food(&entry.food_id) {
            Some(food) => Some((entry, food)),
            None => {
                tracing::debug!("Stack entry '{}' not in catalog, skipping", entry.food_id);
                None
            }
        })
        .collect()
}

/// Category frequencies, most common first, ties in first-seen order.
pub fn category_distribution<'a, I>(foods: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a Food>,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    for food in foods {
        match counts.iter_mut().find(|c| c.category == food.category) {
            Some(existing) => existing.count += 1,
            None => counts.push(CategoryCount {
                category: food.category.clone(),
                count: 1,
            }),
        }
    }
    // Stable: equal counts keep first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Sum of numeric daily costs scaled by multiplier.
pub fn daily_cost(entries: &[(&StackEntry, &Food)]) -> DailyCost {
    let priced: Vec<f64> = entries
        .iter()
        .filter_map(|(entry, food)| food.daily_cost.map(|cost| cost * entry.multiplier))
        .collect();

    if priced.is_empty() {
        DailyCost::Varies
    } else {
        DailyCost::Estimated(priced.iter().sum())
    }
}

pub fn summarize(catalog: &Catalog, stack: &Stack) -> StackSummary {
    let entries = resolved_entries(catalog, stack);

    let mut top_categories = category_distribution(entries.iter().map(|(_, food)| *food));
    top_categories.truncate(TOP_CATEGORY_LIMIT);

    StackSummary {
        total_foods: entries.len(),
        avg_anti_inflammatory: mean_score(entries.iter().map(|(_, f)| f.anti_inflammatory)),
        avg_evidence: mean_score(entries.iter().map(|(_, f)| f.evidence.score)),
        top_categories,
        daily_cost: daily_cost(&entries),
    }
}
