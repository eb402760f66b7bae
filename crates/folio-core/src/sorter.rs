//! # Table Sorter
//!
//! Column-based ordering of table rows.
//!
//! - Numeric pairs compare numerically; any other pair compares the rendered
//!   text with [`collate`]. The choice is made per pair of cells, not per
//!   column, so a mixed column such as a cash-flow table with a `"-"` in its
//!   terminal row still sorts.
//! - Sorting is stable in both directions: equal rows keep their input order.
//! - With no sort column the input order is returned unchanged.
//!
//! Per-pair dispatch is not guaranteed to be transitive on mixed columns, so
//! rows are ordered with a bottom-up merge sort that stays deterministic (and
//! cannot panic) whatever the comparator reports.

use crate::{Cell, Row, collate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// =============================================================================
// SORT STATE
// =============================================================================

/// Sort direction of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Non-decreasing order.
    #[default]
    Asc,
    /// Non-increasing order.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Parse `"asc"` or `"desc"` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// Lowercase name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Sort state of one table instance.
///
/// A fresh state has no column and preserves row order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    #[serde(default)]
    column: Option<String>,
    #[serde(default)]
    direction: SortDirection,
}

impl SortState {
    /// Create an unsorted state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state sorted by a column in a direction.
    #[must_use]
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// The selected column, if any.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// The current direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Apply a header click.
    ///
    /// Clicking the sorted column flips the direction; clicking any other
    /// column selects it in ascending order.
    #[must_use]
    pub fn click(&self, column: &str) -> Self {
        match self.column.as_deref() {
            Some(current) if current == column => Self {
                column: self.column.clone(),
                direction: self.direction.flipped(),
            },
            _ => Self::by(column, SortDirection::Asc),
        }
    }
}

// =============================================================================
// COMPARATOR
// =============================================================================

/// Compare two cells of the same column.
///
/// A missing cell compares as the empty string.
#[must_use]
pub fn compare_cells(a: Option<&Cell>, b: Option<&Cell>) -> Ordering {
    if let (Some(Cell::Number(x)), Some(Cell::Number(y))) = (a, b) {
        return x.partial_cmp(y).unwrap_or(Ordering::Equal);
    }

    let x = a.map(Cell::render).unwrap_or_default();
    let y = b.map(Cell::render).unwrap_or_default();
    collate(&x, &y)
}

// =============================================================================
// SORTING
// =============================================================================

/// Order rows by a column in a direction.
#[must_use]
pub fn sort_by_column<'a>(rows: &'a [Row], column: &str, direction: SortDirection) -> Vec<&'a Row> {
    let mut ordered: Vec<&Row> = rows.iter().collect();

    merge_sort_by(&mut ordered, |a, b| {
        let ord = compare_cells(a.get(column), b.get(column));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    ordered
}

/// Order rows by a sort state. No column means input order.
#[must_use]
pub fn sort_rows<'a>(rows: &'a [Row], state: &SortState) -> Vec<&'a Row> {
    match state.column() {
        Some(column) => sort_by_column(rows, column, state.direction()),
        None => rows.iter().collect(),
    }
}

/// Stable bottom-up merge sort.
///
/// An element from the right run is taken only when it is strictly less than
/// the left one, so ties keep their input order.
fn merge_sort_by<T: Copy>(items: &mut Vec<T>, mut cmp: impl FnMut(&T, &T) -> Ordering) {
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buf: Vec<T> = Vec::with_capacity(len);
    let mut width = 1;

    while width < len {
        buf.clear();
        let mut start = 0;

        while start < len {
            let mid = start.saturating_add(width).min(len);
            let end = start.saturating_add(width.saturating_mul(2)).min(len);
            let (mut i, mut j) = (start, mid);

            while i < mid && j < end {
                if cmp(&items[j], &items[i]) == Ordering::Less {
                    buf.push(items[j]);
                    j += 1;
                } else {
                    buf.push(items[i]);
                    i += 1;
                }
            }
            buf.extend_from_slice(&items[i..mid]);
            buf.extend_from_slice(&items[j..end]);

            start = end;
        }

        std::mem::swap(items, &mut buf);
        width = width.saturating_mul(2);
    }
}

// =============================================================================
// TESTS
// =============================================================================
