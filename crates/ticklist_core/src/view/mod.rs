//! View projection.
//!
//! # Responsibility
//! - Compute the ordered, filtered task view for presentation.
//!
//! # Invariants
//! - Projection is a pure function of the collection and the query.
//! - Sorting is stable: equal keys keep insertion order, so results are
//!   deterministic for identical inputs.

use crate::model::task::{Category, Task};
use chrono::NaiveDate;

/// Category constraint on the displayed list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Sentinel: every category passes.
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == wanted,
        }
    }
}

/// Inputs deriving the visible task list.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub filter: CategoryFilter,
    /// Raw search text; trimmed and matched case-insensitively.
    pub search: String,
}

/// Derives the visible, ordered subset of `tasks`.
///
/// Filter: category must pass `query.filter`, and the title must contain the
/// trimmed search text as a case-insensitive substring (empty text matches
/// everything).
///
/// Order: incomplete tasks first, then ascending due date with an absent
/// date sorting as earliest. Ties keep relative input order.
pub fn project<'a>(tasks: &'a [Task], query: &ViewQuery) -> Vec<&'a Task> {
    let needle = query.search.trim().to_lowercase();

    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| {
            query.filter.matches(task.category)
                && (needle.is_empty() || task.title.to_lowercase().contains(&needle))
        })
        .collect();

    visible.sort_by_key(|task| (task.completed, task.due_date.unwrap_or(NaiveDate::MIN)));
    visible
}
