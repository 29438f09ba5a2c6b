//! Report Generator
//!
//! Main entry point for the plain-text stack export. Orchestrates the four
//! sections (S1-S4) between a header and a disclaimer footer.
//!
//! Public API (consumed by the session and the CLI):
//! - ReportGenerator::new() -> Self
//! - ReportGenerator::generate(catalog, stack, generated_on) -> Result<String, ExportError>

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::error::ExportError;
use crate::report::sections::{s1_summary, s2_foods, s3_synergies, s4_shopping};
use crate::stack::Stack;
use crate::summary::{resolved_entries, summarize};
use crate::synergy::synergies_for;

/// Width of the `=` rules around the report.
pub const RULE_WIDTH: usize = 40;

const TITLE: &str = "MY ANTI-INFLAMMATORY FOOD STACK";
const DISCLAIMER: &str =
    "Note: Consult with a healthcare provider before making significant dietary changes.";

/// Export generator - stateless text generator.
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the export text for a stack.
    ///
    /// Output is fully determined by the inputs; the date is the only
    /// generation context and is supplied by the caller.
    pub fn generate(
        &self,
        catalog: &Catalog,
        stack: &Stack,
        generated_on: NaiveDate,
    ) -> Result<String, ExportError> {
        if stack.is_empty() {
            return Err(ExportError::EmptyStack);
        }

        let entries = resolved_entries(catalog, stack);
        let summary = summarize(catalog, stack);
        let synergies = synergies_for(catalog, stack);

        let mut sections = Vec::new();

        sections.push(generate_header(generated_on));

        // S1: Summary
        sections.push(s1_summary::generate(&summary));

        // S2: Foods
        sections.push(s2_foods::generate(&entries));

        // S3: Synergies (conditional)
        if let Some(section) = s3_synergies::generate(&synergies) {
            sections.push(section);
        }

        // S4: Shopping list
        sections.push(s4_shopping::generate(&entries));

        sections.push(generate_footer());

        let mut result = sections.join("\n\n");
        result.push('\n');
        Ok(result)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_header(generated_on: NaiveDate) -> String {
    format!(
        "{}\n{}\n\nGenerated: {}",
        TITLE,
        "=".repeat(RULE_WIDTH),
        generated_on.format("%B %-d, %Y")
    )
}

fn generate_footer() -> String {
    format!("{}\n{}", "=".repeat(RULE_WIDTH), DISCLAIMER)
}

/// Date-stamped export file name: "food-stack-2026-10-18.txt"
pub fn export_filename(date: NaiveDate) -> String {
    format!("food-stack-{}.txt", date.format("%Y-%m-%d"))
}

/// Write an export into `dir`, returning the file path.
pub fn write_export(dir: &Path, date: NaiveDate, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;
    let path = dir.join(export_filename(date));
    fs::write(&path, contents).with_context(|| format!("Failed to write export {:?}", path))?;
    Ok(path)
}
