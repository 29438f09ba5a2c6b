//! Food Stack Builder
//!
//! Browse a catalog of anti-inflammatory foods, collect a personal stack with
//! serving multipliers, surface food synergies and export a plain-text report.
//!
//! Layout:
//! - `catalog`: food, synergy and template records loaded from JSON
//! - `browse`: category filter, search and sort over the catalog
//! - `stack` / `store`: the selection and its durable slot
//! - `synergy` / `summary`: derived views over the stack
//! - `report`: export text and per-food detail cards
//! - `session`: owns all state and applies user intents

pub mod utils;
pub mod error;
pub mod catalog;
pub mod store;
pub mod stack;
pub mod browse;
pub mod synergy;
pub mod summary;
pub mod report;
pub mod templates;
pub mod config;
pub mod session;
pub mod shared;

// Re-export commonly used types
pub use browse::{browse, BrowseQuery, CategoryFilter, SortKey, Tab, ViewMode};
pub use catalog::{Catalog, Food, Synergy, Template};
pub use config::Config;
pub use error::{ExportError, StackError};
pub use report::{export_filename, write_export, ReportGenerator};
pub use session::{Session, StackChange};
pub use shared::SharedSession;
pub use stack::{Stack, StackEntry};
pub use store::{FileStore, KeyValueStore, MemoryStore, STACK_SLOT};
pub use summary::{summarize, DailyCost, StackSummary};
pub use synergy::{synergies_for, SynergyMatch};
pub use templates::TemplatePreview;
