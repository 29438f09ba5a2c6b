//! Utility modules shared by the views and the report
//!
//! - Normalization: score scale handling
//! - Display: labels and number formatting

pub mod normalization;
pub mod display;

pub use normalization::{mean_score, normalize_score};
