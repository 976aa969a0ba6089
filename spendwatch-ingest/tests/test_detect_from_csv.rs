use chrono::NaiveDate;
use spendwatch_core::suggestions::{MOBILE_TIP, SPLIT_ENTRY, TRANSPORT_TIP, VERIFY_ENTRY};
use spendwatch_core::{category_totals, detect_at, index_by_expense_id, month_total, DetectionConfig};
use spendwatch_ingest::{parse_expense_csv, ExpenseStore};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("expenses.csv")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()
}

#[test]
fn test_fixture_parses() {
    let expenses = parse_expense_csv(fixture_path()).unwrap();
    // one row has an unreadable amount
    assert_eq!(expenses.len(), 27);
    assert_eq!(expenses[0].description.as_deref(), Some("Swiggy party order"));
    assert!(expenses.iter().any(|e| e.parsed_date().is_none()));
}

/// Real-data regression: the three planted spikes come back in rank order.
#[test]
fn test_detect_planted_spikes() {
    let expenses = parse_expense_csv(fixture_path()).unwrap();
    let results = detect_at(&expenses, &DetectionConfig::default(), today());

    let descriptions: Vec<&str> = results
        .iter()
        .map(|r| r.expense.description.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(
        descriptions,
        vec!["Uber to airport", "Swiggy party order", "Annual recharge pack"]
    );

    let uber = &results[0];
    assert_eq!(uber.category_median, 120.0);
    assert_eq!(uber.category_count, 6);
    assert_eq!(uber.suggestions, vec![VERIFY_ENTRY, SPLIT_ENTRY, TRANSPORT_TIP]);

    let food = &results[1];
    assert_eq!(food.z_score, Some(5.17));

    let recharge = &results[2];
    assert_eq!(recharge.z_score, None);
    assert_eq!(recharge.ratio, Some(3.34));
    assert!(recharge.suggestions.contains(&MOBILE_TIP));
}

/// Old spend outside the window never becomes comparison history.
#[test]
fn test_short_window_drops_history() {
    let expenses = parse_expense_csv(fixture_path()).unwrap();
    let cfg = DetectionConfig::new(14, 3.5, 5).unwrap();
    let results = detect_at(&expenses, &cfg, today());
    assert!(results.is_empty(), "got {} results", results.len());
}

#[test]
fn test_stricter_sensitivity_keeps_only_strong_outliers() {
    let expenses = parse_expense_csv(fixture_path()).unwrap();
    let cfg = DetectionConfig::new(45, 6.0, 5).unwrap();
    let results = detect_at(&expenses, &cfg, today());
    let index = index_by_expense_id(&results);

    // z=5.17 food spike drops out; the flat-history ratio path is unaffected
    assert_eq!(results.len(), 2);
    assert!(index.values().all(|r| r.expense.category != "Food & Tiffin"));
}

#[test]
fn test_summaries_over_fixture() {
    let expenses = parse_expense_csv(fixture_path()).unwrap();
    assert_eq!(month_total(&expenses, 2026, 1), 14707.0);

    let totals = category_totals(&expenses);
    assert_eq!(totals[0].0, "Rent/Housing");
    assert_eq!(totals[0].1, 24000.0);
}

#[test]
fn test_import_into_store_then_detect() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ExpenseStore::open(dir.path().join("expenses.json")).unwrap();
    let added = store.import(parse_expense_csv(fixture_path()).unwrap()).unwrap();
    assert_eq!(added, 27);

    let reopened = ExpenseStore::open(store.path()).unwrap();
    let results = detect_at(reopened.list(), &DetectionConfig::default(), today());
    assert_eq!(results.len(), 3);
}
