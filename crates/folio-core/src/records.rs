//! # Catalogue Records
//!
//! The concrete record shapes held by the catalogue: projects (with their
//! tables and charts), certifications, experiences, the skills matrix and the
//! profile.
//!
//! Records are plain data. Apart from the facet tags exposed through
//! [`Faceted`], their fields are opaque to the engine.

use crate::primitives::{MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
use crate::sorter::{SortState, sort_rows};
use crate::{Faceted, FolioError, Record, RecordId, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// PROFILE
// =============================================================================

/// Biographical header of the portfolio.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub email: String,
    pub summary: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// An outbound link shown on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

// =============================================================================
// PROJECT
// =============================================================================

/// An analytical project: a model, valuation or strategy case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub industry: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub tools: BTreeSet<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub tables: Vec<DataTable>,
    #[serde(default)]
    pub charts: Vec<Chart>,
}

impl Project {
    /// Find one of this project's tables by slug.
    #[must_use]
    pub fn table(&self, slug: &str) -> Option<&DataTable> {
        self.tables.iter().find(|t| t.slug == slug)
    }
}

impl Record for Project {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Faceted for Project {
    fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    fn tools(&self) -> &BTreeSet<String> {
        &self.tools
    }

    fn industry(&self) -> Option<&str> {
        Some(&self.industry)
    }
}

/// A headline figure shown on a project card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

// =============================================================================
// DATA TABLE
// =============================================================================

/// A sortable table attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    /// Identifier of the table, unique within its project.
    pub slug: String,
    pub title: String,
    /// Column headers in display order.
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl DataTable {
    /// Check whether the table has a column with this header.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Rows ordered by a sort state.
    ///
    /// Fails only when the sort column is not one of this table's headers.
    pub fn sorted(&self, state: &SortState) -> Result<Vec<&Row>, FolioError> {
        if let Some(column) = state.column()
            && !self.has_column(column)
        {
            return Err(FolioError::UnknownColumn {
                table: self.slug.clone(),
                column: column.to_string(),
            });
        }
        Ok(sort_rows(&self.rows, state))
    }

    /// Validate headers and rows.
    pub(crate) fn validate(&self) -> Result<(), FolioError> {
        let invalid = |reason: String| FolioError::InvalidTable {
            table: self.slug.clone(),
            reason,
        };

        if self.slug.is_empty() {
            return Err(invalid("empty slug".to_string()));
        }

        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(invalid(format!("duplicate column '{}'", column)));
            }
        }

        for (index, row) in self.rows.iter().enumerate() {
            if let Some(unknown) = row.columns().find(|c| !seen.contains(c)) {
                return Err(invalid(format!(
                    "row {} has a cell for unknown column '{}'",
                    index, unknown
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// CHART
// =============================================================================

/// Chart types understood by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Area,
    Pie,
}

/// Prepared chart data handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    /// Category axis labels.
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

/// One named data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Chart {
    /// Every series must carry exactly one value per label.
    pub(crate) fn validate(&self) -> Result<(), FolioError> {
        if self.series.is_empty() {
            return Err(FolioError::InvalidChart {
                chart: self.title.clone(),
                reason: "no series".to_string(),
            });
        }

        for series in &self.series {
            if series.values.len() != self.labels.len() {
                return Err(FolioError::InvalidChart {
                    chart: self.title.clone(),
                    reason: format!(
                        "series '{}' has {} values for {} labels",
                        series.name,
                        series.values.len(),
                        self.labels.len()
                    ),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// CERTIFICATION
// =============================================================================

/// Completion status of a certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    Completed,
    InProgress,
}

/// A professional certification or exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: RecordId,
    pub name: String,
    pub issuer: String,
    pub year: u16,
    pub status: CertificationStatus,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

/// Certifications carry no tool tags.
static NO_TOOLS: BTreeSet<String> = BTreeSet::new();

impl Record for Certification {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Faceted for Certification {
    fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    fn tools(&self) -> &BTreeSet<String> {
        &NO_TOOLS
    }

    fn industry(&self) -> Option<&str> {
        None
    }
}

// =============================================================================
// EXPERIENCE
// =============================================================================

/// One role on the work-experience timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: RecordId,
    pub role: String,
    pub organisation: String,
    pub location: String,
    /// Start month, `YYYY-MM`.
    pub start: String,
    /// End month, `YYYY-MM`; `None` for the current role.
    #[serde(default)]
    pub end: Option<String>,
    pub industry: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub tools: BTreeSet<String>,
}

impl Experience {
    /// Whether this is an ongoing role.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.end.is_none()
    }
}

impl Record for Experience {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Faceted for Experience {
    fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    fn tools(&self) -> &BTreeSet<String> {
        &self.tools
    }

    fn industry(&self) -> Option<&str> {
        Some(&self.industry)
    }
}

// =============================================================================
// SKILLS MATRIX
// =============================================================================

/// A group of related skills in the skills matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub id: RecordId,
    pub name: String,
    pub entries: Vec<SkillEntry>,
}

/// A single skill with its proficiency level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    /// Proficiency from 1 (familiar) to 5 (expert).
    pub level: u8,
}

impl SkillCategory {
    pub(crate) fn validate(&self) -> Result<(), FolioError> {
        for entry in &self.entries {
            if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&entry.level) {
                return Err(FolioError::InvalidSkillLevel {
                    skill: entry.name.clone(),
                    level: entry.level,
                });
            }
        }
        Ok(())
    }
}

impl Record for SkillCategory {
    fn id(&self) -> RecordId {
        self.id
    }
}

// =============================================================================
// TESTS
// =============================================================================
