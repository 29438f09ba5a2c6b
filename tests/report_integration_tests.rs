//! Report Integration Tests
//!
//! Full export text for small hand-built catalogs, plus a sanity pass over
//! the bundled sample data.

use std::path::PathBuf;

use chrono::NaiveDate;
use food_stack_builder::{
    export_filename, write_export, Catalog, ExportError, ReportGenerator, Session, Stack,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn two_food_catalog() -> Catalog {
    Catalog::from_json(
        r#"[
            {"id": "olive_oil", "name": "Olive Oil", "category": "healthy_fats",
             "servingSize": "2 tbsp", "frequency": "Daily", "costPerDay": 1.0,
             "evidence": {"score": 9}, "antiInflammatoryScore": 80},
            {"id": "spinach", "name": "Spinach", "category": "leafy_greens",
             "servingSize": "2 cups", "frequency": "Daily", "preparation": "Raw or wilted",
             "costPerDay": 1.0, "evidenceScore": 6, "antiInflammatoryScore": 7}
        ]"#,
        r#"[{"foods": ["spinach", "olive_oil"], "strength": "moderate",
             "description": "Fat improves carotenoid uptake",
             "recommendation": "Dress greens with oil"}]"#,
        "[]",
    )
    .unwrap()
}

#[test]
fn test_full_export_text() {
    let mut session = Session::in_memory(two_food_catalog());
    session.add_item("olive_oil");
    session.add_item("spinach");
    session.set_multiplier("olive_oil", 2.0);

    let text = session.export(date()).unwrap();

    let expected = "\
MY ANTI-INFLAMMATORY FOOD STACK
========================================

Generated: October 18, 2026

STACK SUMMARY
--------------------
Total Foods: 2
Average Anti-Inflammatory Score: 7.5/10
Average Evidence Score: 7.5/10
Top Categories: healthy fats, leafy greens
Estimated Daily Cost: $3.00

FOODS IN YOUR STACK
--------------------

1. Olive Oil (x2)
   Category: healthy fats
   Serving: 2 tbsp
   Frequency: Daily
   Cost: $1.00/day
   Anti-Inflammatory Score: 8.0/10

2. Spinach
   Category: leafy greens
   Serving: 2 cups
   Frequency: Daily
   Preparation: Raw or wilted
   Cost: $1.00/day
   Anti-Inflammatory Score: 7.0/10

FOOD SYNERGIES
--------------------

✓ Spinach + Olive Oil [moderate]
  Fat improves carotenoid uptake
  Recommendation: Dress greens with oil

SHOPPING LIST
--------------------

HEALTHY FATS:
  □ Olive Oil

LEAFY GREENS:
  □ Spinach

========================================
Note: Consult with a healthcare provider before making significant dietary changes.
";
    assert_eq!(text, expected);
}

#[test]
fn test_export_skips_unknown_entries() {
    let mut stack = Stack::new();
    stack.add("ghost");
    stack.add("spinach");

    let text = ReportGenerator::new()
        .generate(&two_food_catalog(), &stack, date())
        .unwrap();
    assert!(text.contains("Total Foods: 1"));
    assert!(text.contains("1. Spinach"));
    assert!(!text.contains("ghost"));
}

#[test]
fn test_empty_stack_export_refused() {
    let session = Session::in_memory(two_food_catalog());
    assert_eq!(session.export(date()), Err(ExportError::EmptyStack));
}

#[test]
fn test_export_written_to_dated_file() {
    let mut session = Session::in_memory(two_food_catalog());
    session.add_item("spinach");
    let text = session.export(date()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_export(&dir.path().join("exports"), date(), &text).unwrap();
    assert!(path.ends_with(export_filename(date())));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn test_sample_catalog_export() {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut session = Session::in_memory(Catalog::load_dir(&data_dir));
    session.apply_template("mediterranean", |_| true);

    let text = session.export(date()).unwrap();
    assert!(text.contains("Total Foods: 6"));
    assert!(text.contains("✓ Spinach + Extra Virgin Olive Oil [moderate]"));
    assert!(text.contains("FATTY FISH:\n  □ Wild Salmon\n  □ Sardines"));
}
