//! Export report sections, in output order.

pub mod s1_summary;
pub mod s2_foods;
pub mod s3_synergies;
pub mod s4_shopping;

/// Width of the dashed rule under each section title.
pub const SECTION_RULE_WIDTH: usize = 20;

/// "TITLE\n--------------------"
pub fn section_title(title: &str) -> String {
    format!("{}\n{}", title, "-".repeat(SECTION_RULE_WIDTH))
}
