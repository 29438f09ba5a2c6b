//! Stack Report Module
//!
//! Renders the stack as a plain-text export and single foods as Markdown
//! detail cards.
//!
//! ## Export sections
//! 1. Summary - counts, average scores, top categories, daily cost
//! 2. Foods - itemized list with serving, frequency, preparation, cost, score
//! 3. Synergies - only when the stack contains a documented pair
//! 4. Shopping List - foods grouped by category
//!
//! The generator adds the header before S1 and the disclaimer after S4.

pub mod sections;
pub mod generator;
pub mod food_card;

pub use generator::{export_filename, write_export, ReportGenerator, RULE_WIDTH};
