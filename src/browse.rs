//! Browse: Filter and Sort the Catalog
//!
//! Pure function of (catalog, category filter, search text, sort key). The
//! catalog is never mutated; every call recomputes the list from scratch.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::{Catalog, Food};

/// Category chip selection. `"all"` passes every food.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, food: &Food) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => food.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Name,
    #[default]
    AntiInflammatory,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "antiInflammatory" => Ok(SortKey::AntiInflammatory),
            other => Err(format!(
                "unknown sort key '{}' (expected 'name' or 'antiInflammatory')",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::AntiInflammatory => write!(f, "antiInflammatory"),
        }
    }
}

/// Grid or list rendering of the browse results. Carried, never computed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Active top-level view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Browse,
    Templates,
    MyStack,
}

/// Filter/sort inputs. Not persisted; defaults on every start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseQuery {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortKey,
}

impl BrowseQuery {
    /// Case-insensitive substring match on name or description.
    fn matches_search(&self, food: &Food) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        food.name.to_lowercase().contains(&needle)
            || food.description.to_lowercase().contains(&needle)
    }
}

/// Derive the display list for a query.
pub fn browse<'a>(catalog: &'a Catalog, query: &BrowseQuery) -> Vec<&'a Food> {
    let mut foods: Vec<&Food> = catalog
        .foods()
        .iter()
        .filter(|food| query.category.matches(food) && query.matches_search(food))
        .collect();

    // sort_by is stable: ties keep catalog order
    match query.sort {
        SortKey::Name => foods.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::AntiInflammatory => foods.sort_by(|a, b| {
            b.anti_inflammatory
                .partial_cmp(&a.anti_inflammatory)
                .unwrap_or(Ordering::Equal)
        }),
    }

    foods
}

/// Collate names the way a locale-aware comparison does for Latin text:
/// base letters first (accents and case ignored), then case-folded text,
/// then the exact text.
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// "Ëlderberry" -> "elderberry"
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
