//! Food Catalog
//!
//! Read-only foods, synergies and diet templates supplied as JSON files.
//! Raw records keep the legacy field shapes of the source data; they are
//! normalized into `Food` exactly once, here, so nothing downstream branches
//! on score scale or field names again.
//!
//! Expected directory structure:
//!   - foods.json      (array of food records)
//!   - synergies.json  (array of `{ foods: [a, b], strength, description, recommendation }`)
//!   - templates.json  (array of `{ id, name, description, foods: [...], popularity, icon }`)

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::display::format_money;
use crate::utils::normalization::{normalize_first, normalize_score};

pub const FOODS_FILE: &str = "foods.json";
pub const SYNERGIES_FILE: &str = "synergies.json";
pub const TEMPLATES_FILE: &str = "templates.json";

// ============================================================================
// Raw records (external schema)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFood {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    serving_size: String,
    #[serde(default)]
    frequency: String,
    #[serde(default)]
    preparation: Option<String>,
    #[serde(default)]
    cost: Option<RawCost>,
    #[serde(default)]
    cost_per_day: Option<f64>,
    #[serde(default)]
    key_compounds: Vec<String>,
    #[serde(default)]
    mechanisms: Vec<String>,
    #[serde(default)]
    side_effects: Option<String>,
    #[serde(default)]
    interactions: Option<Vec<String>>,
    #[serde(default)]
    evidence: Option<RawEvidence>,
    #[serde(default)]
    evidence_score: Option<f64>,
    #[serde(default)]
    anti_inflammatory_score: Option<f64>,
    #[serde(default)]
    anti_inflammatory_potential: Option<f64>,
}

/// `cost` is free text ("$0.50/day") in most records, a bare number in some.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCost {
    Amount(f64),
    Text(String),
}

/// `evidence` is either a bare score or a structured object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEvidence {
    Score(f64),
    Detailed {
        #[serde(default)]
        score: f64,
        #[serde(default)]
        studies: Option<u64>,
        #[serde(flatten)]
        breakdown: BTreeMap<String, Value>,
    },
}

// ============================================================================
// Canonical records
// ============================================================================

/// Evidence behind a food, score on the 0-10 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evidence {
    pub score: f64,
    pub studies: Option<u64>,
    /// Any extra fields of the structured evidence object (e.g. "human": 12)
    pub breakdown: BTreeMap<String, Value>,
}

/// A catalog food with normalized scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub serving_size: String,
    pub frequency: String,
    pub preparation: Option<String>,
    pub cost_text: Option<String>,
    /// Numeric cost per day, when the record provides one
    pub daily_cost: Option<f64>,
    pub key_compounds: Vec<String>,
    pub mechanisms: Vec<String>,
    pub side_effects: Option<String>,
    pub interactions: Vec<String>,
    pub evidence: Evidence,
    /// Anti-inflammatory score, 0-10
    pub anti_inflammatory: f64,
}

impl Food {
    /// Cost as shown to the user: the record's text, else the numeric daily
    /// cost, else "varies".
    pub fn cost_display(&self) -> String {
        match (&self.cost_text, self.daily_cost) {
            (Some(text), _) if !text.trim().is_empty() => text.clone(),
            (_, Some(amount)) => format!("{}/day", format_money(amount)),
            _ => "varies".to_string(),
        }
    }
}

impl From<RawFood> for Food {
    fn from(raw: RawFood) -> Self {
        let (cost_text, cost_amount) = match raw.cost {
            Some(RawCost::Text(text)) => (Some(text), None),
            Some(RawCost::Amount(amount)) => (None, Some(amount)),
            None => (None, None),
        };

        let evidence = match raw.evidence {
            Some(RawEvidence::Detailed { score, studies, breakdown }) => Evidence {
                score: normalize_score(score),
                studies,
                breakdown,
            },
            Some(RawEvidence::Score(score)) => Evidence {
                score: normalize_score(score),
                ..Evidence::default()
            },
            None => Evidence {
                score: normalize_first(&[raw.evidence_score]),
                ..Evidence::default()
            },
        };

        let anti_inflammatory = normalize_first(&[
            raw.anti_inflammatory_score,
            raw.anti_inflammatory_potential,
        ]);

        Food {
            id: raw.id,
            name: raw.name,
            category: raw.category,
            description: raw.description,
            serving_size: raw.serving_size,
            frequency: raw.frequency,
            preparation: raw.preparation,
            cost_text,
            daily_cost: raw
                .cost_per_day
                .or(cost_amount)
                .filter(|c| c.is_finite() && *c >= 0.0),
            key_compounds: raw.key_compounds,
            mechanisms: raw.mechanisms,
            side_effects: raw.side_effects.filter(|s| !s.trim().is_empty()),
            interactions: raw.interactions.unwrap_or_default(),
            evidence,
            anti_inflammatory,
        }
    }
}

/// A documented interaction between exactly two foods (order-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synergy {
    pub foods: [String; 2],
    #[serde(default, alias = "severity")]
    pub strength: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl Synergy {
    pub fn involves(&self, food_id: &str) -> bool {
        self.foods.iter().any(|f| f == food_id)
    }
}

/// A predefined set of foods that replaces the stack in one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub foods: Vec<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub icon: Option<String>,
}

// ============================================================================
// Catalog
// ============================================================================

/// All three collections plus id indexes built once at load time.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    foods: Vec<Food>,
    synergies: Vec<Synergy>,
    templates: Vec<Template>,
    food_index: FxHashMap<String, usize>,
    template_index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-normalized collections.
    ///
    /// Food and template ids are unique: the first record with an id wins.
    pub fn new(foods: Vec<Food>, synergies: Vec<Synergy>, templates: Vec<Template>) -> Self {
        let mut food_index = FxHashMap::default();
        let mut unique_foods = Vec::with_capacity(foods.len());
        for food in foods {
            if food_index.contains_key(&food.id) {
                tracing::warn!("Duplicate food id '{}' in catalog, keeping the first", food.id);
                continue;
            }
            food_index.insert(food.id.clone(), unique_foods.len());
            unique_foods.push(food);
        }

        let mut template_index = FxHashMap::default();
        let mut unique_templates = Vec::with_capacity(templates.len());
        for template in templates {
            if template_index.contains_key(&template.id) {
                tracing::warn!("Duplicate template id '{}' in catalog, keeping the first", template.id);
                continue;
            }
            template_index.insert(template.id.clone(), unique_templates.len());
            unique_templates.push(template);
        }

        Self {
            foods: unique_foods,
            synergies,
            templates: unique_templates,
            food_index,
            template_index,
        }
    }

    /// Parse all three collections from JSON text.
    pub fn from_json(foods: &str, synergies: &str, templates: &str) -> Result<Self> {
        Ok(Self::new(
            parse_foods(foods)?,
            parse_synergies(synergies)?,
            parse_templates(templates)?,
        ))
    }

    /// Load the catalog from a data directory.
    ///
    /// A missing or malformed collection is logged and treated as empty, so
    /// the rest of the application stays usable.
    pub fn load_dir(dir: &Path) -> Self {
        tracing::info!("Loading catalog from {:?}", dir);

        let foods = read_collection(dir, FOODS_FILE, parse_foods);
        let synergies = read_collection(dir, SYNERGIES_FILE, parse_synergies);
        let templates = read_collection(dir, TEMPLATES_FILE, parse_templates);

        let catalog = Self::new(foods, synergies, templates);
        tracing::info!(
            "Catalog loaded: {} foods, {} synergies, {} templates",
            catalog.foods.len(),
            catalog.synergies.len(),
            catalog.templates.len()
        );
        catalog
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn synergies(&self) -> &[Synergy] {
        &self.synergies
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn food(&self, id: &str) -> Option<&Food> {
        self.food_index.get(id).map(|&idx| &self.foods[idx])
    }

    pub fn contains_food(&self, id: &str) -> bool {
        self.food_index.contains_key(id)
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.template_index.get(id).map(|&idx| &self.templates[idx])
    }

    /// Distinct categories in first-seen catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for food in &self.foods {
            if !seen.contains(&food.category.as_str()) {
                seen.push(&food.category);
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

pub fn parse_foods(json: &str) -> Result<Vec<Food>> {
    let raw: Vec<RawFood> = parse_records(json, "food")?;
    Ok(raw.into_iter().map(Food::from).collect())
}

pub fn parse_synergies(json: &str) -> Result<Vec<Synergy>> {
    parse_records(json, "synergy")
}

pub fn parse_templates(json: &str) -> Result<Vec<Template>> {
    parse_records(json, "template")
}

/// Parse a JSON array record by record.
///
/// Only a document that is not a JSON array fails; a malformed element is
/// logged with its id (or index) and skipped.
fn parse_records<R: DeserializeOwned>(json: &str, kind: &str) -> Result<Vec<R>> {
    let elements: Vec<Value> = serde_json::from_str(json)
        .with_context(|| format!("Failed to parse {} collection as a JSON array", kind))?;

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let label = match element.get("id").and_then(Value::as_str) {
            Some(id) => format!("'{}'", id),
            None => format!("#{}", index),
        };
        match serde_json::from_value::<R>(element) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping {} record {}: {}", kind, label, e),
        }
    }
    Ok(records)
}

fn read_collection<T, F>(dir: &Path, file: &str, parse: F) -> Vec<T>
where
    F: Fn(&str) -> Result<Vec<T>>,
{
    let path = dir.join(file);
    if !path.exists() {
        tracing::info!("{:?} not found, treating collection as empty", path);
        return Vec::new();
    }

    let loaded = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {:?}", path))
        .and_then(|contents| parse(&contents));

    match loaded {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Ignoring {:?}: {:#}", path, e);
            Vec::new()
        }
    }
}
