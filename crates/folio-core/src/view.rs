//! # Catalogue View
//!
//! The state of one catalogue view instance and its reducer.
//!
//! A view combines:
//! - the active facet filters of the project list
//! - the project open in the detail view
//! - the sort state of each table in that detail view
//!
//! Table sort states belong to the mounted detail view. Opening a project
//! (even the one already open) or closing the detail discards them, the same
//! way unmounting a table discards its local state.
//!
//! Every transition goes through [`ViewState::apply`], a pure function of
//! the current state and one action.

use crate::catalogue::Catalogue;
use crate::filter::{FilterState, compute_visible};
use crate::records::Project;
use crate::selection::{SelectionAction, SelectionState};
use crate::sorter::{SortState, sort_rows};
use crate::{RecordId, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// ACTIONS
// =============================================================================

/// A user interaction relayed from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewAction {
    /// Toggle a skill chip.
    ToggleSkill { value: String },
    /// Toggle a tool chip.
    ToggleTool { value: String },
    /// Click an industry chip (tri-state).
    SelectIndustry { value: String },
    /// Reset every filter.
    ClearFilters,
    /// Open a project card in the detail view.
    Open { id: RecordId },
    /// Close the detail view.
    Close,
    /// Click a column header of a table in the open project.
    SortTable { table: String, column: String },
}

// =============================================================================
// VIEW STATE
// =============================================================================

/// Complete state of one catalogue view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub selection: SelectionState,
    /// Sort state per table slug of the open project.
    #[serde(default)]
    pub table_sorts: BTreeMap<String, SortState>,
}

impl ViewState {
    /// A freshly mounted view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action, producing the next state.
    ///
    /// Header clicks are ignored when no project is open or when the table or
    /// column does not exist in the open project.
    #[must_use]
    pub fn apply(mut self, catalogue: &Catalogue, action: &ViewAction) -> Self {
        match action {
            ViewAction::ToggleSkill { value } => self.filters.toggle_skill(value),
            ViewAction::ToggleTool { value } => self.filters.toggle_tool(value),
            ViewAction::SelectIndustry { value } => self.filters.select_industry(value),
            ViewAction::ClearFilters => self.filters.clear_all(),
            ViewAction::Open { id } => {
                self.selection = self.selection.reduce(SelectionAction::Open { id: *id });
                self.table_sorts.clear();
            }
            ViewAction::Close => {
                self.selection = self.selection.reduce(SelectionAction::Close);
                self.table_sorts.clear();
            }
            ViewAction::SortTable { table, column } => {
                let has_column = self
                    .open_project(catalogue)
                    .and_then(|p| p.table(table))
                    .is_some_and(|t| t.has_column(column));

                if has_column {
                    let next = self
                        .table_sorts
                        .get(table)
                        .cloned()
                        .unwrap_or_default()
                        .click(column);
                    self.table_sorts.insert(table.clone(), next);
                }
            }
        }
        self
    }

    /// Apply a sequence of actions in order.
    #[must_use]
    pub fn apply_all<'a, I>(self, catalogue: &Catalogue, actions: I) -> Self
    where
        I: IntoIterator<Item = &'a ViewAction>,
    {
        actions
            .into_iter()
            .fold(self, |state, action| state.apply(catalogue, action))
    }

    /// Sort state of a table of the open project.
    #[must_use]
    pub fn table_sort(&self, table: &str) -> SortState {
        self.table_sorts.get(table).cloned().unwrap_or_default()
    }

    /// The open project, if the selection resolves.
    #[must_use]
    pub fn open_project<'a>(&self, catalogue: &'a Catalogue) -> Option<&'a Project> {
        self.selection.current(catalogue.projects())
    }

    /// Render the view: visible projects and the open detail.
    #[must_use]
    pub fn snapshot<'a>(&self, catalogue: &'a Catalogue) -> ViewSnapshot<'a> {
        let visible = compute_visible(catalogue.projects(), &self.filters);

        let open = self.open_project(catalogue).map(|project| OpenProject {
            project,
            tables: project
                .tables
                .iter()
                .map(|table| {
                    let sort = self.table_sort(&table.slug);
                    SortedTable {
                        slug: &table.slug,
                        title: &table.title,
                        columns: &table.columns,
                        rows: sort_rows(&table.rows, &sort),
                        sort,
                    }
                })
                .collect(),
        });

        ViewSnapshot { visible, open }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// What the presentation layer renders for a view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot<'a> {
    /// Projects passing the filters, in catalogue order.
    pub visible: Vec<&'a Project>,
    /// The open project with its tables ordered, if any.
    pub open: Option<OpenProject<'a>>,
}

/// The project in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenProject<'a> {
    pub project: &'a Project,
    pub tables: Vec<SortedTable<'a>>,
}

/// A table ordered by its current sort state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortedTable<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub columns: &'a [String],
    pub sort: SortState,
    pub rows: Vec<&'a Row>,
}

// =============================================================================
// TESTS
// =============================================================================
