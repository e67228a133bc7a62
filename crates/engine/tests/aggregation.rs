use engine::{
    Amount, CategoryTotals, ExpenseEntry, compute_category_totals, compute_summary,
};

fn entry(id: &str, category: &str, amount: impl Into<Amount>) -> ExpenseEntry {
    ExpenseEntry::new(id, category, amount)
}

fn parse(raw: &str) -> Vec<ExpenseEntry> {
    serde_json::from_str(raw).unwrap()
}

fn histories() -> Vec<Vec<ExpenseEntry>> {
    vec![
        vec![],
        vec![entry("a", "food", 10.0)],
        vec![
            entry("a", "food", 1000.0),
            entry("b", "food", 500.0),
            entry("c", "transport", 300.0),
        ],
        vec![
            entry("a", "", 200.0),
            entry("b", "rent", Amount::NAN),
            entry("c", "rent", 0.25),
            entry("d", "fun", f64::INFINITY),
            entry("e", "", -50.0),
        ],
        parse(r#"[{"category":"food","amount":"abc"},{"category":"bills","amount":"120"},{}]"#),
    ]
}

#[test]
fn count_is_history_length() {
    for entries in histories() {
        assert_eq!(compute_summary(&entries).count, entries.len());
    }
}

#[test]
fn total_is_sum_of_coerced_amounts() {
    for entries in histories() {
        let expected: f64 = entries.iter().map(|e| e.amount.coerced()).sum();
        assert_eq!(compute_summary(&entries).total, expected);
    }
}

#[test]
fn max_is_largest_coerced_amount_or_empty() {
    for entries in histories() {
        let expected = entries
            .iter()
            .map(|e| e.amount.coerced())
            .reduce(f64::max);
        assert_eq!(compute_summary(&entries).max, expected);
    }
    assert_ne!(compute_summary(&[]).max, Some(0.0));
}

#[test]
fn grouping_preserves_total() {
    for entries in histories() {
        let totals = compute_category_totals(&entries);
        assert_eq!(totals.total(), compute_summary(&entries).total);
    }
}

#[test]
fn empty_history() {
    let summary = compute_summary(&[]);
    assert_eq!(summary.total, 0.0);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.max, None);
    assert!(summary.is_empty());
    assert_eq!(compute_category_totals(&[]), CategoryTotals::new());
}

#[test]
fn two_categories_with_repeat() {
    let entries = vec![
        entry("a", "food", 1000.0),
        entry("b", "food", 500.0),
        entry("c", "transport", 300.0),
    ];
    let summary = compute_summary(&entries);
    assert_eq!(summary.total, 1800.0);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.max, Some(1000.0));

    let totals = compute_category_totals(&entries);
    let pairs: Vec<_> = totals.iter().collect();
    assert_eq!(pairs, vec![("food", 1500.0), ("transport", 300.0)]);
}

#[test]
fn empty_category_uses_fallback() {
    let totals = compute_category_totals(&[entry("a", "", 200.0)]);
    let pairs: Vec<_> = totals.iter().collect();
    assert_eq!(pairs, vec![("egyeb", 200.0)]);
}

#[test]
fn non_numeric_amount_counts_as_zero() {
    let entries = parse(r#"[{"id":"a","category":"food","amount":"abc"}]"#);
    let summary = compute_summary(&entries);
    assert_eq!(summary.total, 0.0);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.max, Some(0.0));
    assert_eq!(compute_category_totals(&entries).get("food"), Some(0.0));
}

#[test]
fn aggregate_reads_store_once() {
    use engine::{EntryStore, MemoryStore};

    let mut store = MemoryStore::new();
    store.append(entry("a", "food", 1000.0)).unwrap();
    store.append(entry("b", "transport", 300.0)).unwrap();

    let (summary, totals) = engine::aggregate(&store);
    assert_eq!(summary.count, 2);
    assert_eq!(totals.len(), 2);
}
