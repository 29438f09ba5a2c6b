//! Stack Integration Tests
//!
//! Drive a session over the bundled sample catalog with a file-backed store,
//! the way the CLI does, and check state survives a restart.

use std::path::PathBuf;

use food_stack_builder::browse::{CategoryFilter, SortKey};
use food_stack_builder::session::{CLEAR_PROMPT, REPLACE_PROMPT};
use food_stack_builder::{Catalog, FileStore, KeyValueStore, Session, StackChange, STACK_SLOT};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn open(state_dir: &std::path::Path) -> Session {
    Session::open(
        Catalog::load_dir(&data_dir()),
        Box::new(FileStore::new(state_dir)),
    )
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = Catalog::load_dir(&data_dir());
    assert!(catalog.foods().len() >= 10);
    assert!(!catalog.synergies().is_empty());
    assert!(!catalog.templates().is_empty());

    // Every score lands on the 0-10 scale regardless of source field or scale
    for food in catalog.foods() {
        assert!(
            (0.0..=10.0).contains(&food.anti_inflammatory),
            "{} scored {}",
            food.id,
            food.anti_inflammatory
        );
    }

    // Legacy 0-100 value
    let cherries = catalog.food("tart_cherries").unwrap();
    assert_eq!(cherries.anti_inflammatory, 7.5);
}

#[test]
fn test_missing_data_dir_gives_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(
        Catalog::load_dir(&dir.path().join("nope")),
        Box::new(FileStore::new(dir.path())),
    );
    assert!(session.catalog().is_empty());
    assert!(session.display_list().is_empty());
    assert!(session.template_previews().is_empty());
}

#[test]
fn test_stack_survives_restart() {
    let state = tempfile::tempdir().unwrap();

    {
        let mut session = open(state.path());
        session.add_item("turmeric");
        session.add_item("salmon");
        session.set_multiplier("salmon", 2.0);
    }

    let session = open(state.path());
    assert_eq!(
        session.stack().ids().collect::<Vec<_>>(),
        vec!["turmeric", "salmon"]
    );
    assert_eq!(session.stack().get("salmon").map(|e| e.multiplier), Some(2.0));
}

#[test]
fn test_corrupt_slot_recovers_and_is_overwritten() {
    let state = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(state.path());
    store.set(STACK_SLOT, "not json at all").unwrap();

    let mut session = open(state.path());
    assert!(session.stack().is_empty());

    session.add_item("ginger");
    let saved = store.get(STACK_SLOT).unwrap().unwrap();
    assert_eq!(saved, r#"[{"foodId":"ginger","multiplier":1.0}]"#);
}

#[test]
fn test_out_of_range_multiplier_in_slot_is_corrupt() {
    let state = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(state.path());
    store
        .set(STACK_SLOT, r#"[{"foodId":"ginger","multiplier":12}]"#)
        .unwrap();

    let session = open(state.path());
    assert!(session.stack().is_empty());
}

#[test]
fn test_template_then_synergies() {
    let state = tempfile::tempdir().unwrap();
    let mut session = open(state.path());

    let change = session.apply_template("golden_spice", |_| unreachable!());
    assert!(matches!(change, Some(StackChange::TemplateApplied { .. })));
    assert_eq!(
        session.stack().ids().collect::<Vec<_>>(),
        vec!["turmeric", "black_pepper", "ginger", "olive_oil"]
    );
    assert!(session.stack().entries().iter().all(|e| e.multiplier == 1.0));

    let titles: Vec<String> = session.synergies().iter().map(|m| m.title()).collect();
    assert_eq!(
        titles,
        vec!["Turmeric + Black Pepper", "Turmeric + Extra Virgin Olive Oil"]
    );
}

#[test]
fn test_confirmations_gate_destructive_intents() {
    let state = tempfile::tempdir().unwrap();
    let mut session = open(state.path());
    session.add_item("walnuts");

    let mut prompts = Vec::new();
    assert!(session
        .apply_template("mediterranean", |p| {
            prompts.push(p.to_string());
            false
        })
        .is_none());
    assert!(session
        .clear_all(|p| {
            prompts.push(p.to_string());
            false
        })
        .is_none());

    assert_eq!(prompts, vec![REPLACE_PROMPT, CLEAR_PROMPT]);
    assert_eq!(session.stack().ids().collect::<Vec<_>>(), vec!["walnuts"]);

    // Declined intents leave the persisted slot alone too
    let reopened = open(state.path());
    assert_eq!(reopened.stack().ids().collect::<Vec<_>>(), vec!["walnuts"]);
}

#[test]
fn test_browse_over_sample_catalog() {
    let state = tempfile::tempdir().unwrap();
    let mut session = open(state.path());

    session.set_category(CategoryFilter::parse("berries"));
    let ids: Vec<&str> = session.display_list().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["blueberries", "tart_cherries"]);

    session.set_category(CategoryFilter::All);
    session.set_search("omega-3");
    session.set_sort(SortKey::Name);
    let names: Vec<&str> = session.display_list().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Walnuts", "Wild Salmon"]);

    session.set_search("zzz");
    assert!(session.display_list().is_empty());
}
