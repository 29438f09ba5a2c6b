//! Stack (Selection) Model
//!
//! The user's chosen foods, each with a serving multiplier. Entries keep
//! insertion order for display and hold at most one entry per food id.
//!
//! Serialized form (durable slot):
//!   `[{"foodId": "turmeric", "multiplier": 2.0}, ...]`
//! Older saves stored whole food records (`[{"id": "turmeric", ...}]`); those
//! are read with multiplier 1 and rewritten in the current shape on the next
//! save.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::StackError;

pub const MIN_MULTIPLIER: f64 = 0.5;
pub const MAX_MULTIPLIER: f64 = 5.0;
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Check a multiplier lies in [0.5, 5].
pub fn validate_multiplier(value: f64) -> Result<f64, StackError> {
    if value.is_finite() && (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&value) {
        Ok(value)
    } else {
        Err(StackError::InvalidMultiplier { value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackEntry {
    pub food_id: String,
    pub multiplier: f64,
}

impl StackEntry {
    pub fn new(food_id: impl Into<String>) -> Self {
        Self {
            food_id: food_id.into(),
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

/// Either the current entry shape or a legacy bare food record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersistedEntry {
    Current {
        #[serde(rename = "foodId")]
        food_id: String,
        #[serde(default = "default_multiplier")]
        multiplier: f64,
    },
    Legacy {
        id: String,
    },
}

fn default_multiplier() -> f64 {
    DEFAULT_MULTIPLIER
}

/// Outcome of replacing the stack from a list of food ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replacement {
    pub applied: Vec<String>,
    /// Ids the catalog does not know
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    entries: Vec<StackEntry>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, food_id: &str) -> bool {
        self.entries.iter().any(|e| e.food_id == food_id)
    }

    pub fn get(&self, food_id: &str) -> Option<&StackEntry> {
        self.entries.iter().find(|e| e.food_id == food_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.food_id.as_str())
    }

    pub fn id_set(&self) -> FxHashSet<&str> {
        self.ids().collect()
    }

    /// Append a food with multiplier 1. No-op when already present.
    pub fn add(&mut self, food_id: &str) -> bool {
        if self.contains(food_id) {
            return false;
        }
        self.entries.push(StackEntry::new(food_id));
        true
    }

    /// Drop the entry for `food_id`, if any.
    pub fn remove(&mut self, food_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.food_id != food_id);
        self.entries.len() != before
    }

    /// Replace the multiplier of an existing entry.
    ///
    /// Returns `Ok(false)` when the food is not in the stack. An out-of-range
    /// value is rejected and the entry keeps its previous multiplier.
    pub fn set_multiplier(&mut self, food_id: &str, value: f64) -> Result<bool, StackError> {
        let value = validate_multiplier(value)?;
        match self.entries.iter_mut().find(|e| e.food_id == food_id) {
            Some(entry) => {
                entry.multiplier = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.entries.is_empty();
        self.entries.clear();
        changed
    }

    /// Empty the stack and refill it from `food_ids`, each with multiplier 1.
    ///
    /// Ids unknown to the catalog are skipped; repeated ids collapse to one
    /// entry.
    pub fn replace_with<'a, I>(&mut self, food_ids: I, catalog: &Catalog) -> Replacement
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.entries.clear();

        let mut replacement = Replacement::default();
        for food_id in food_ids {
            if !catalog.contains_food(food_id) {
                let missing = StackError::MissingReference {
                    food_id: food_id.to_string(),
                };
                tracing::debug!("Skipping template entry: {}", missing);
                replacement.skipped.push(food_id.to_string());
                continue;
            }
            if self.add(food_id) {
                replacement.applied.push(food_id.to_string());
            }
        }
        replacement
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }

    /// Parse a serialized stack, accepting the legacy bare-record shape.
    pub fn from_json(json: &str) -> Result<Self, StackError> {
        let persisted: Vec<PersistedEntry> =
            serde_json::from_str(json).map_err(|e| StackError::corrupt(e.to_string()))?;

        let mut stack = Stack::new();
        for entry in persisted {
            let (food_id, multiplier) = match entry {
                PersistedEntry::Current { food_id, multiplier } => (food_id, multiplier),
                PersistedEntry::Legacy { id } => (id, DEFAULT_MULTIPLIER),
            };

            let multiplier = validate_multiplier(multiplier).map_err(|e| {
                StackError::corrupt(format!("entry '{}': {}", food_id, e))
            })?;

            if stack.contains(&food_id) {
                tracing::debug!("Dropping duplicate stored entry '{}'", food_id);
                continue;
            }
            stack.entries.push(StackEntry { food_id, multiplier });
        }
        Ok(stack)
    }
}
