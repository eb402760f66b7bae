//! # folio-core
//!
//! The deterministic Catalogue Interaction Engine for Folio - THE ENGINE.
//!
//! This crate holds a portfolio's immutable record store and the three pure
//! pieces of logic a presentation layer drives:
//! - faceted filtering of the project list ([`compute_visible`])
//! - stable column sorting of project tables ([`sort_rows`])
//! - single-selection detail navigation ([`SelectionState::reduce`])
//!
//! [`ViewState`] bundles the three into one reducer for a whole view.
//!
//! ## Architectural Constraints
//!
//! - The record store is built once and never mutated
//! - Every state transition is a pure recomputation from state plus event
//! - Filtering, sorting and selection cannot fail
//! - NO async, NO network, NO logging (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod catalogue;
pub mod contact;
pub mod filter;
pub mod primitives;
pub mod records;
pub mod selection;
pub mod sorter;
pub mod types;
pub mod view;

mod seed;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Cell, Faceted, FolioError, Record, RecordId, Row, collate};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalogue::{Catalogue, CatalogueData};
pub use contact::ContactMessage;
pub use filter::{FacetIndex, FilterState, compute_visible};
pub use records::{
    Certification, CertificationStatus, Chart, ChartKind, DataTable, Experience, Link, Metric,
    Profile, Project, Series, SkillCategory, SkillEntry,
};
pub use selection::{SelectionAction, SelectionState};
pub use sorter::{SortDirection, SortState, compare_cells, sort_by_column, sort_rows};
pub use view::{OpenProject, SortedTable, ViewAction, ViewSnapshot, ViewState};

#[cfg(feature = "crypto-hash")]
pub use catalogue::compute_blake3_hash;
