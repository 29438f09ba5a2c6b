//! Diet Template Previews
//!
//! Card data for the templates view: how many foods a template brings, their
//! average anti-inflammatory score and the first few names.

use crate::catalog::{Catalog, Template};
use crate::utils::normalization::mean_score;

/// Names shown on a template card before "+N more".
pub const PREVIEW_NAMES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePreview {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    /// Food ids listed by the template, known to the catalog or not
    pub food_count: usize,
    /// Average over the distinct foods the catalog knows, 0 when it knows none
    pub avg_anti_inflammatory: f64,
    pub preview_names: Vec<String>,
    pub more: usize,
    pub popularity: Option<f64>,
}

pub fn preview(catalog: &Catalog, template: &Template) -> TemplatePreview {
    // Catalog order, each food once, however the template lists them
    let known: Vec<_> = catalog
        .foods()
        .iter()
        .filter(|food| template.foods.contains(&food.id))
        .collect();

    TemplatePreview {
        id: template.id.clone(),
        name: template.name.clone(),
        description: template.description.clone(),
        icon: template.icon.clone(),
        food_count: template.foods.len(),
        avg_anti_inflammatory: mean_score(known.iter().map(|f| f.anti_inflammatory)),
        preview_names: known
            .iter()
            .take(PREVIEW_NAMES)
            .map(|f| f.name.clone())
            .collect(),
        more: template.foods.len().saturating_sub(PREVIEW_NAMES),
        popularity: template.popularity,
    }
}

/// Previews for every catalog template, in catalog order.
pub fn previews(catalog: &Catalog) -> Vec<TemplatePreview> {
    catalog
        .templates()
        .iter()
        .map(|t| preview(catalog, t))
        .collect()
}
