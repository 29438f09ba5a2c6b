//! Session: the application state owner
//!
//! One `Session` holds the catalog, the stack, the durable store and the
//! ephemeral browse parameters. The presentation layer sends intents to it
//! and reads derived views back; nothing lives in globals.
//!
//! Every effective stack mutation is saved to the durable slot and announced
//! to observers. Saving is best-effort: a failure is logged and the in-memory
//! stack stays authoritative.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::browse::{browse, BrowseQuery, CategoryFilter, SortKey, Tab, ViewMode};
use crate::catalog::{Catalog, Food};
use crate::error::{ExportError, StackError};
use crate::report::{food_card, ReportGenerator};
use crate::stack::{Replacement, Stack};
use crate::store::{KeyValueStore, MemoryStore, STACK_SLOT};
use crate::summary::{summarize, StackSummary};
use crate::synergy::{synergies_for, SynergyMatch};
use crate::templates::{previews, TemplatePreview};

pub const CLEAR_PROMPT: &str = "Are you sure you want to clear your entire food stack?";
pub const REPLACE_PROMPT: &str = "This will replace your current stack. Continue?";

/// What an intent did to the stack.
#[derive(Debug, Clone, PartialEq)]
pub enum StackChange {
    Added { food_id: String },
    Removed { food_id: String },
    MultiplierSet { food_id: String, multiplier: f64 },
    Cleared,
    TemplateApplied { template_id: String, replacement: Replacement },
}

pub type Observer = Box<dyn FnMut(&StackChange, &Stack) + Send>;

/// Ephemeral UI parameters, reset on every start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseState {
    pub query: BrowseQuery,
    pub view: ViewMode,
    pub tab: Tab,
}

pub struct Session {
    catalog: Catalog,
    stack: Stack,
    store: Box<dyn KeyValueStore>,
    browse: BrowseState,
    observers: Vec<Observer>,
}

impl Session {
    /// Create a session and restore the stack from the durable slot.
    pub fn open(catalog: Catalog, store: Box<dyn KeyValueStore>) -> Self {
        let stack = load(&*store, &catalog);
        Self {
            catalog,
            stack,
            store,
            browse: BrowseState::default(),
            observers: Vec::new(),
        }
    }

    /// Session backed by a throwaway in-memory store.
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::open(catalog, Box::new(MemoryStore::new()))
    }

    /// Register a callback run after every effective stack change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&StackChange, &Stack) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Write the whole stack to the durable slot.
    pub fn save(&mut self) -> Result<()> {
        let json = self
            .stack
            .to_json()
            .with_context(|| "Failed to serialize stack")?;
        self.store.set(STACK_SLOT, &json)
    }

    fn commit(&mut self, change: StackChange) -> StackChange {
        if let Err(e) = self.save() {
            tracing::warn!("Stack not persisted: {:#}", e);
        }
        for observer in self.observers.iter_mut() {
            observer(&change, &self.stack);
        }
        change
    }

    // ------------------------------------------------------------------
    // Browse intents
    // ------------------------------------------------------------------

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.browse.query.category = category;
    }

    pub fn set_search(&mut self, search: &str) {
        self.browse.query.search = search.to_string();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.browse.query.sort = sort;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.browse.view = view;
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.browse.tab = tab;
    }

    // ------------------------------------------------------------------
    // Stack intents
    // ------------------------------------------------------------------

    /// Add a catalog food. Unknown ids and foods already stacked are no-ops.
    pub fn add_item(&mut self, food_id: &str) -> Option<StackChange> {
        if !self.catalog.contains_food(food_id) {
            tracing::debug!(
                "Ignoring add: {}",
                StackError::MissingReference { food_id: food_id.to_string() }
            );
            return None;
        }
        if !self.stack.add(food_id) {
            return None;
        }
        Some(self.commit(StackChange::Added {
            food_id: food_id.to_string(),
        }))
    }

    pub fn remove_item(&mut self, food_id: &str) -> Option<StackChange> {
        if !self.stack.remove(food_id) {
            return None;
        }
        Some(self.commit(StackChange::Removed {
            food_id: food_id.to_string(),
        }))
    }

    /// The catalog card button: add when absent, remove when present.
    pub fn toggle_item(&mut self, food_id: &str) -> Option<StackChange> {
        if self.stack.contains(food_id) {
            self.remove_item(food_id)
        } else {
            self.add_item(food_id)
        }
    }

    /// Change a stacked food's multiplier; invalid values keep the old one.
    pub fn set_multiplier(&mut self, food_id: &str, value: f64) -> Option<StackChange> {
        match self.stack.set_multiplier(food_id, value) {
            Ok(true) => Some(self.commit(StackChange::MultiplierSet {
                food_id: food_id.to_string(),
                multiplier: value,
            })),
            Ok(false) => None,
            Err(e) => {
                tracing::debug!("Rejected multiplier for '{}': {}", food_id, e);
                None
            }
        }
    }

    /// Empty the stack once `confirm` accepts `CLEAR_PROMPT`.
    pub fn clear_all<F>(&mut self, confirm: F) -> Option<StackChange>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(CLEAR_PROMPT) {
            return None;
        }
        self.stack.clear();
        Some(self.commit(StackChange::Cleared))
    }

    /// Replace the stack with a template's foods.
    ///
    /// `confirm` is only asked when the stack already has foods. Template
    /// foods missing from the catalog are skipped.
    pub fn apply_template<F>(&mut self, template_id: &str, confirm: F) -> Option<StackChange>
    where
        F: FnOnce(&str) -> bool,
    {
        let Some(template) = self.catalog.template(template_id) else {
            tracing::debug!("Ignoring unknown template '{}'", template_id);
            return None;
        };

        if !self.stack.is_empty() && !confirm(REPLACE_PROMPT) {
            return None;
        }

        let replacement = self
            .stack
            .replace_with(template.foods.iter().map(String::as_str), &self.catalog);
        tracing::info!(
            "Template '{}' applied: {} foods, {} skipped",
            template.name,
            replacement.applied.len(),
            replacement.skipped.len()
        );

        self.browse.tab = Tab::MyStack;
        Some(self.commit(StackChange::TemplateApplied {
            template_id: template_id.to_string(),
            replacement,
        }))
    }

    /// Render the export text for the current stack.
    pub fn export(&self, generated_on: NaiveDate) -> Result<String, ExportError> {
        ReportGenerator::new().generate(&self.catalog, &self.stack, generated_on)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn browse_state(&self) -> &BrowseState {
        &self.browse
    }

    pub fn is_in_stack(&self, food_id: &str) -> bool {
        self.stack.contains(food_id)
    }

    pub fn display_list(&self) -> Vec<&Food> {
        browse(&self.catalog, &self.browse.query)
    }

    pub fn synergies(&self) -> Vec<SynergyMatch<'_>> {
        synergies_for(&self.catalog, &self.stack)
    }

    pub fn summary(&self) -> StackSummary {
        summarize(&self.catalog, &self.stack)
    }

    pub fn template_previews(&self) -> Vec<TemplatePreview> {
        previews(&self.catalog)
    }

    pub fn food_card(&self, food_id: &str) -> Option<String> {
        self.catalog
            .food(food_id)
            .map(|food| food_card::render(food, self.stack.contains(food_id)))
    }
}

/// Read the stack slot once at startup.
///
/// An absent slot is an empty stack; an unreadable or corrupt one is logged
/// and replaced by an empty stack.
fn load(store: &dyn KeyValueStore, catalog: &Catalog) -> Stack {
    let raw = match store.get(STACK_SLOT) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Stack::new(),
        Err(e) => {
            tracing::warn!("Could not read saved stack, starting empty: {:#}", e);
            return Stack::new();
        }
    };

    match Stack::from_json(&raw) {
        Ok(stack) => {
            let unknown = stack.ids().filter(|id| !catalog.contains_food(id)).count();
            if unknown > 0 {
                tracing::warn!("Saved stack references {} foods missing from the catalog", unknown);
            }
            tracing::info!("Restored stack with {} foods", stack.len());
            stack
        }
        Err(e) => {
            tracing::warn!("Discarding saved stack: {}", e);
            Stack::new()
        }
    }
}
