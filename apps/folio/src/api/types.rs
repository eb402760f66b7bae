//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use folio_core::{
    Catalogue, ContactMessage, FilterState, FolioError, Metric, Project, Row, SortDirection,
    SortState, ViewAction, ViewSnapshot, ViewState,
    primitives::{MAX_FACET_SELECTIONS, MAX_FACET_VALUE_LENGTH},
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// =============================================================================
// HASH RESPONSE
// =============================================================================

/// Catalogue fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResponse {
    pub algorithm: String,
    pub hash: String,
}

impl HashResponse {
    pub fn blake3(hash: impl Into<String>) -> Self {
        Self {
            algorithm: "blake3".to_string(),
            hash: hash.into(),
        }
    }
}

// =============================================================================
// PROJECT LIST
// =============================================================================

/// Filter query of the project list.
///
/// `skills` and `tools` are comma-separated lists; blank entries are ignored.
/// A name that itself contains a comma is passed whole with a repeated
/// `skill=` or `tool=` parameter instead. Both forms combine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsQuery {
    pub skills: Option<String>,
    pub tools: Option<String>,
    pub industry: Option<String>,
    #[serde(default)]
    pub skill: Vec<String>,
    #[serde(default)]
    pub tool: Vec<String>,
}

impl ProjectsQuery {
    /// Collect a query from raw `key=value` pairs, keeping repeated keys.
    ///
    /// Repeated `skills`/`tools` lists are concatenated; the last
    /// `industry` wins. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "skills" => append_list(&mut query.skills, value),
                "tools" => append_list(&mut query.tools, value),
                "industry" => query.industry = Some(value),
                "skill" => query.skill.push(value),
                "tool" => query.tool.push(value),
                _ => {}
            }
        }
        query
    }

    /// Convert to a filter state, validating sizes.
    pub fn to_filter(&self) -> Result<FilterState, FolioError> {
        let skills = collect_values("skills", self.skills.as_deref(), &self.skill)?;
        let tools = collect_values("tools", self.tools.as_deref(), &self.tool)?;

        let mut filters = FilterState::new().with_skills(skills).with_tools(tools);

        if let Some(industry) = self.industry.as_deref().map(str::trim)
            && !industry.is_empty()
        {
            check_value_length("industry", industry)?;
            filters = filters.with_industry(industry);
        }

        Ok(filters)
    }
}

fn append_list(list: &mut Option<String>, value: String) {
    match list {
        Some(existing) => {
            existing.push(',');
            existing.push_str(&value);
        }
        None => *list = Some(value),
    }
}

fn collect_values(
    dimension: &str,
    list: Option<&str>,
    single: &[String],
) -> Result<Vec<String>, FolioError> {
    let values: Vec<String> = list
        .unwrap_or_default()
        .split(',')
        .chain(single.iter().map(String::as_str))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    check_selection_count(dimension, values.len())?;
    for value in &values {
        check_value_length(dimension, value)?;
    }
    Ok(values)
}

fn check_selection_count(dimension: &str, count: usize) -> Result<(), FolioError> {
    if count > MAX_FACET_SELECTIONS {
        return Err(FolioError::Parse(format!(
            "{} selections {} exceed maximum {}",
            dimension, count, MAX_FACET_SELECTIONS
        )));
    }
    Ok(())
}

/// Check a client-held filter state against the same bounds as the query.
pub fn check_filters(filters: &FilterState) -> Result<(), FolioError> {
    check_selection_count("skills", filters.skills().len())?;
    check_selection_count("tools", filters.tools().len())?;
    for skill in filters.skills() {
        check_value_length("skills", skill)?;
    }
    for tool in filters.tools() {
        check_value_length("tools", tool)?;
    }
    if let Some(industry) = filters.industry() {
        check_value_length("industry", industry)?;
    }
    Ok(())
}

fn check_value_length(dimension: &str, value: &str) -> Result<(), FolioError> {
    if value.len() > MAX_FACET_VALUE_LENGTH {
        return Err(FolioError::Parse(format!(
            "{} value length {} exceeds maximum {} bytes",
            dimension,
            value.len(),
            MAX_FACET_VALUE_LENGTH
        )));
    }
    Ok(())
}

/// A project card: everything but the detail content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub industry: String,
    pub skills: Vec<String>,
    pub tools: Vec<String>,
    pub metrics: Vec<Metric>,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.value(),
            title: project.title.clone(),
            category: project.category.clone(),
            summary: project.summary.clone(),
            industry: project.industry.clone(),
            skills: project.skills.iter().cloned().collect(),
            tools: project.tools.iter().cloned().collect(),
            metrics: project.metrics.clone(),
        }
    }
}

/// Visible projects for a filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub count: usize,
    pub projects: Vec<ProjectSummary>,
}

// =============================================================================
// TABLE
// =============================================================================

/// Sort query of a project table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl TableQuery {
    /// Convert to a sort state. Without `sort` the direction is ignored.
    pub fn to_sort_state(&self) -> Result<SortState, FolioError> {
        let direction = match self.dir.as_deref() {
            None => SortDirection::Asc,
            Some(dir) => SortDirection::parse(dir).ok_or_else(|| {
                FolioError::Parse(format!("Invalid sort direction '{}' (asc|desc)", dir))
            })?,
        };

        Ok(match self.sort.as_deref().filter(|s| !s.is_empty()) {
            Some(column) => SortState::by(column, direction),
            None => SortState::new(),
        })
    }
}

/// A project table in sorted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    pub project: u64,
    pub slug: String,
    pub title: String,
    pub columns: Vec<String>,
    pub sort: SortState,
    pub rows: Vec<Row>,
}

// =============================================================================
// VIEW REQUEST/RESPONSE
// =============================================================================

/// One step of a client-held view: the current state plus an optional action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewRequest {
    #[serde(default)]
    pub state: ViewState,
    #[serde(default)]
    pub action: Option<ViewAction>,
}

impl ViewRequest {
    /// Apply the action to the state, rejecting oversized filters on the
    /// way in and on the way out.
    pub fn advance(self, catalogue: &Catalogue) -> Result<ViewState, FolioError> {
        check_filters(&self.state.filters)?;

        match self.action {
            Some(action) => {
                match &action {
                    ViewAction::ToggleSkill { value } => check_value_length("skills", value)?,
                    ViewAction::ToggleTool { value } => check_value_length("tools", value)?,
                    ViewAction::SelectIndustry { value } => {
                        check_value_length("industry", value)?;
                    }
                    _ => {}
                }
                let next = self.state.apply(catalogue, &action);
                check_filters(&next.filters)?;
                Ok(next)
            }
            None => Ok(self.state),
        }
    }
}

/// The next view state with what it renders.
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse<'a> {
    pub state: ViewState,
    #[serde(flatten)]
    pub snapshot: ViewSnapshot<'a>,
}

// =============================================================================
// CONTACT REQUEST/RESPONSE
// =============================================================================

/// Contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactRequest {
    /// Validate into a contact message.
    pub fn to_message(&self) -> Result<ContactMessage, FolioError> {
        ContactMessage::new(
            &self.name,
            &self.email,
            self.subject.as_deref(),
            &self.message,
        )
    }
}

/// Acknowledgement of an accepted contact message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    /// Short reference derived from the message content.
    pub receipt: String,
    pub message: String,
}

impl ContactResponse {
    pub fn accepted(receipt: impl Into<String>) -> Self {
        Self {
            success: true,
            receipt: receipt.into(),
            message: "Thanks for reaching out. I'll get back to you soon.".to_string(),
        }
    }
}
