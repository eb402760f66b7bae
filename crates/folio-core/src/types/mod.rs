//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the Folio engine:
//! - Record identifiers (`RecordId`)
//! - Table cells and rows (`Cell`, `Row`)
//! - The `Record` and `Faceted` traits implemented by every catalogue record
//! - Error types (`FolioError`)
//!
//! ## Determinism Guarantees
//!
//! All collections use `BTreeMap`/`BTreeSet` so that iteration order, and
//! therefore every derived output, is identical across runs.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Stable identifier of a record, assigned when the content is authored.
///
/// Identifiers are unique within their collection and never change for the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// RECORD TRAITS
// =============================================================================

/// A record held by the catalogue.
pub trait Record {
    /// Identifier of this record within its collection.
    fn id(&self) -> RecordId;
}

/// A record that exposes facet tags to the filter.
///
/// Display fields are never inspected by the filter; only these three
/// dimensions are.
pub trait Faceted: Record {
    /// Skill tags carried by the record.
    fn skills(&self) -> &BTreeSet<String>;

    /// Tool tags carried by the record.
    fn tools(&self) -> &BTreeSet<String>;

    /// Industry of the record, if it has one.
    fn industry(&self) -> Option<&str>;
}

// =============================================================================
// TABLE CELLS
// =============================================================================

/// One cell of a data table.
///
/// Authored data uses bare numbers for numeric cells and strings for
/// everything else (`"-"`, `"12.5%"`, `"2024E"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A numeric value.
    Number(f64),
    /// A textual value.
    Text(String),
}

impl Cell {
    /// Create a text cell.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Get the numeric value, if this cell is numeric.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Render the cell the way it is displayed and compared as text.
    ///
    /// Numbers use the shortest round-trip decimal (`190` for `190.0`).
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One row of a data table, keyed by column header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub BTreeMap<String, Cell>);

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell insertion.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.0.insert(column.into(), cell.into());
        self
    }

    /// Get the cell under a column header.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.0.get(column)
    }

    /// Iterate over the column headers this row has cells for.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

// =============================================================================
// TEXT COLLATION
// =============================================================================

/// Compare two strings the way a root-locale collator orders them.
///
/// Three levels, each consulted only when the previous one ties:
/// 1. base letters, ignoring accents and case, with whitespace before
///    punctuation and symbols, then digits, then letters;
/// 2. accents, unaccented first;
/// 3. case, lowercase first.
///
/// So `"apple" < "Banana"`, `"banana" < "Banana"`, `"Bonds" < "Équité" <
/// "Fixed"` and `"_x" < "1"`. Distinct strings never compare equal.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| b.cmp(a))
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn secondary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Folio system.
///
/// Filtering, sorting and selection never fail; errors come from building
/// the catalogue, validating user input at the boundary, and the app's I/O.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Two records in the same collection share an identifier.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: RecordId },

    /// A data table is malformed.
    #[error("Invalid table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// A chart's series do not line up with its labels.
    #[error("Invalid chart '{chart}': {reason}")]
    InvalidChart { chart: String, reason: String },

    /// A skills matrix entry has a level outside 1..=5.
    #[error("Invalid level {level} for skill '{skill}'")]
    InvalidSkillLevel { skill: String, level: u8 },

    /// A sort was requested on a column the table does not have.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// The requested record was not found.
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    /// A contact form field failed validation.
    #[error("Invalid contact {field}: {reason}")]
    InvalidContact { field: &'static str, reason: String },

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A data or configuration document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_render_uses_shortest_decimal() {
        assert_eq!(Cell::Number(190.0).render(), "190");
        assert_eq!(Cell::Number(159.2).render(), "159.2");
        assert_eq!(Cell::text("-").render(), "-");
    }

    #[test]
    fn cell_deserializes_untagged() {
        let row: Row =
            serde_json::from_str(r#"{"Year":"2024E","Revenue ($B)":159.2}"#).expect("parse");
        assert_eq!(row.get("Year"), Some(&Cell::text("2024E")));
        assert_eq!(
            row.get("Revenue ($B)").and_then(Cell::as_number),
            Some(159.2)
        );
    }

    #[test]
    fn collate_ignores_case_first() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Banana", "apple"), Ordering::Greater);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn collate_breaks_case_ties_lowercase_first() {
        assert_eq!(collate("banana", "Banana"), Ordering::Less);
    }

    #[test]
    fn collate_orders_punctuation_before_digits() {
        assert_eq!(collate("-", "159.2"), Ordering::Less);
        assert_eq!(collate("_x", "1"), Ordering::Less);
        assert_eq!(collate("1", "_x"), Ordering::Greater);
    }

    #[test]
    fn collate_ignores_accents_at_first_level() {
        assert_eq!(collate("Équité", "Fixed"), Ordering::Less);
        assert_eq!(collate("Société Générale", "Sodexo"), Ordering::Less);
        assert_eq!(collate("zeta", "Équité"), Ordering::Greater);
    }

    #[test]
    fn collate_orders_unaccented_before_accented() {
        assert_eq!(collate("equite", "équité"), Ordering::Less);
        assert_eq!(collate("équité", "Equite"), Ordering::Greater);
    }

    #[test]
    fn collate_treats_composed_and_decomposed_alike_until_last_level() {
        let composed = "\u{e9}";
        let decomposed = "e\u{301}";
        assert_ne!(collate(composed, decomposed), Ordering::Equal);
        assert_eq!(collate(composed, "f"), collate(decomposed, "f"));
    }

    #[test]
    fn row_columns_are_ordered() {
        let row = Row::new().with("b", 1.0).with("a", "x");
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols, vec!["a", "b"]);
    }
}
