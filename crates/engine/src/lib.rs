//! Expense history aggregation and chart rendering.
//!
//! The flow is store → aggregator → chart:
//!
//! - an [`EntryStore`] hands back the ordered history of [`ExpenseEntry`];
//! - [`compute_summary`] and [`compute_category_totals`] reduce it to
//!   [`Summary`] and [`CategoryTotals`];
//! - [`BarChart`] draws the totals onto any [`chart::Surface`].
//!
//! ```rust
//! use engine::{BarChart, EntryStore, ExpenseEntry, MemoryStore};
//! use engine::chart::RecordingSurface;
//!
//! let mut store = MemoryStore::new();
//! store.append(ExpenseEntry::new("e_1", "food", 1000.0)).unwrap();
//! store.append(ExpenseEntry::new("e_2", "transport", 300.0)).unwrap();
//!
//! let entries = store.load_all();
//! let summary = engine::compute_summary(&entries);
//! assert_eq!(summary.total, 1300.0);
//! assert_eq!(summary.max, Some(1000.0));
//!
//! let totals = engine::compute_category_totals(&entries);
//! let mut surface = RecordingSurface::new(600.0, 300.0);
//! BarChart::default().render(&mut surface, &totals);
//! assert_eq!(surface.rects().len(), 2);
//! ```
pub use chart::{BarChart, ChartLayout, ChartStyle};
pub use entry::{Amount, ExpenseEntry, FALLBACK_CATEGORY, Payment};
pub use error::EngineError;
pub use store::{
    DEFAULT_STORE_KEY, EntryStore, FileKeyValue, KeyValueStore, KeyedEntryStore, MemoryKeyValue,
    MemoryStore,
};
pub use summary::{
    CategoryTotals, Summary, SummaryView, compute_category_totals, compute_summary,
};
pub use validation::{ExpenseDraft, Field, FieldError, ValidationErrors};

pub mod chart;
pub mod format;
pub mod store;
pub mod validation;

mod entry;
mod error;
mod summary;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Loads the history from `store` and computes both reductions in one go.
pub fn aggregate<S: EntryStore + ?Sized>(store: &S) -> (Summary, CategoryTotals) {
    let entries = store.load_all();
    (compute_summary(&entries), compute_category_totals(&entries))
}
