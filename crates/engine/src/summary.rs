//! Aggregation of stored entries into summary statistics and per-category
//! totals.
//!
//! Both reductions are pure and total: an amount that is not a finite number
//! counts as 0, an empty category groups under
//! [`FALLBACK_CATEGORY`](crate::FALLBACK_CATEGORY), and an empty history is a
//! valid input.
use std::collections::HashMap;

use serde::Serialize;

use crate::{
    ExpenseEntry,
    format::{EMPTY_PLACEHOLDER, capitalize, format_forint},
};

/// Summary statistics over a sequence of entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of all coerced amounts.
    pub total: f64,
    /// Number of entries, including those whose amount is not a number.
    pub count: usize,
    /// Largest single coerced amount, `None` when there are no entries.
    pub max: Option<f64>,
}

impl Summary {
    /// Returns `true` when no entry contributed to the summary.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Accumulated amount per category.
///
/// Iteration order is the order in which each category first appeared in the
/// source sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(into = "Vec<(String, f64)>")]
pub struct CategoryTotals {
    totals: Vec<(String, f64)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `category`, appending the category if it is new.
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&position) => self.totals[position].1 += amount,
            None => {
                self.index.insert(category.to_string(), self.totals.len());
                self.totals.push((category.to_string(), amount));
            }
        }
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).map(|&position| self.totals[position].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.totals
            .iter()
            .map(|(category, total)| (category.as_str(), *total))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(category, _)| category)
    }

    /// Largest category total, `None` when empty.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.totals.iter().map(|(_, total)| *total).reduce(f64::max)
    }

    /// Sum over all categories.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.totals.iter().map(|(_, total)| total).sum()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (category, amount) in iter {
            totals.add(category.as_ref(), amount);
        }
        totals
    }
}

impl From<CategoryTotals> for Vec<(String, f64)> {
    fn from(value: CategoryTotals) -> Self {
        value.totals
    }
}

/// Reduces `entries` to total, count and maximum.
#[must_use]
pub fn compute_summary(entries: &[ExpenseEntry]) -> Summary {
    let summary = entries.iter().fold(Summary::default(), |acc, entry| {
        let amount = entry.amount.coerced();
        Summary {
            total: acc.total + amount,
            count: acc.count + 1,
            max: Some(acc.max.map_or(amount, |max| max.max(amount))),
        }
    });
    tracing::debug!(
        count = summary.count,
        total = summary.total,
        "computed summary"
    );
    summary
}

/// Groups `entries` by category and sums their coerced amounts.
#[must_use]
pub fn compute_category_totals(entries: &[ExpenseEntry]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for entry in entries {
        totals.add(entry.category_key(), entry.amount.coerced());
    }
    tracing::debug!(categories = totals.len(), "computed category totals");
    totals
}

/// Text rendering of the statistics, ready to be printed or put on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryView {
    /// `"<n> Ft"`.
    pub total: String,
    pub count: String,
    /// `"<n> Ft"`, or the placeholder when there are no entries.
    pub max: String,
    /// One `"<Category>: <n> Ft"` line per category, in mapping order.
    pub categories: Vec<String>,
}

impl SummaryView {
    #[must_use]
    pub fn new(summary: &Summary, totals: &CategoryTotals) -> Self {
        Self {
            total: format_forint(summary.total),
            count: summary.count.to_string(),
            max: summary
                .max
                .map_or_else(|| EMPTY_PLACEHOLDER.to_string(), format_forint),
            categories: totals
                .iter()
                .map(|(category, total)| {
                    format!("{}: {}", capitalize(category), format_forint(total))
                })
                .collect(),
        }
    }
}
