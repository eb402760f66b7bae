//! # Facet Filter
//!
//! Multi-select faceted filtering over an immutable record collection.
//!
//! A record is visible iff it matches every active dimension (AND across
//! skills, tools and industry). Within the skill and tool dimensions a record
//! matches when it carries ANY selected value (OR within a dimension). An
//! empty dimension matches everything.
//!
//! Filtering never reorders: the output is a subsequence of the input.

use crate::Faceted;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// FILTER STATE
// =============================================================================

/// Active facet selections of one view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    selected_skills: BTreeSet<String>,
    #[serde(default)]
    selected_tools: BTreeSet<String>,
    #[serde(default)]
    selected_industry: Option<String>,
}

impl FilterState {
    /// Create a state with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: select skills.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_skills
            .extend(skills.into_iter().map(Into::into));
        self
    }

    /// Builder: select tools.
    #[must_use]
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tools.extend(tools.into_iter().map(Into::into));
        self
    }

    /// Builder: select an industry.
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.selected_industry = Some(industry.into());
        self
    }

    /// Selected skills.
    #[must_use]
    pub fn skills(&self) -> &BTreeSet<String> {
        &self.selected_skills
    }

    /// Selected tools.
    #[must_use]
    pub fn tools(&self) -> &BTreeSet<String> {
        &self.selected_tools
    }

    /// Selected industry, if any.
    #[must_use]
    pub fn industry(&self) -> Option<&str> {
        self.selected_industry.as_deref()
    }

    /// True when no dimension is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_skills.is_empty()
            && self.selected_tools.is_empty()
            && self.selected_industry.is_none()
    }

    /// Add the skill if absent, remove it if present.
    pub fn toggle_skill(&mut self, skill: &str) {
        toggle(&mut self.selected_skills, skill);
    }

    /// Add the tool if absent, remove it if present.
    pub fn toggle_tool(&mut self, tool: &str) {
        toggle(&mut self.selected_tools, tool);
    }

    /// Tri-state industry selection.
    ///
    /// Selecting the active industry clears it; selecting any other value
    /// replaces it.
    pub fn select_industry(&mut self, industry: &str) {
        if self.selected_industry.as_deref() == Some(industry) {
            self.selected_industry = None;
        } else {
            self.selected_industry = Some(industry.to_string());
        }
    }

    /// Reset every dimension in one update.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Whether a record passes all active dimensions.
    #[must_use]
    pub fn matches<R: Faceted + ?Sized>(&self, record: &R) -> bool {
        let skill_match = intersects(&self.selected_skills, record.skills());
        let tool_match = intersects(&self.selected_tools, record.tools());
        let industry_match = match self.selected_industry.as_deref() {
            None => true,
            Some(selected) => record.industry() == Some(selected),
        };

        skill_match && tool_match && industry_match
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// An empty selection matches anything; otherwise any shared value does.
fn intersects(selected: &BTreeSet<String>, tags: &BTreeSet<String>) -> bool {
    selected.is_empty() || !selected.is_disjoint(tags)
}

// =============================================================================
// VISIBLE SUBSET
// =============================================================================

/// Records passing the filter, in their original order.
#[must_use]
pub fn compute_visible<'a, R: Faceted>(records: &'a [R], filters: &FilterState) -> Vec<&'a R> {
    records.iter().filter(|r| filters.matches(*r)).collect()
}

// =============================================================================
// FACET VOCABULARY
// =============================================================================

/// Every selectable facet value with the number of records carrying it.
///
/// Used to render filter chips; values are ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacetIndex {
    pub skills: BTreeMap<String, usize>,
    pub tools: BTreeMap<String, usize>,
    pub industries: BTreeMap<String, usize>,
}

impl FacetIndex {
    /// Build the vocabulary of a record collection.
    #[must_use]
    pub fn build<R: Faceted>(records: &[R]) -> Self {
        let mut index = Self::default();

        for record in records {
            for skill in record.skills() {
                bump(&mut index.skills, skill);
            }
            for tool in record.tools() {
                bump(&mut index.tools, tool);
            }
            if let Some(industry) = record.industry() {
                bump(&mut index.industries, industry);
            }
        }

        index
    }
}

fn bump(counts: &mut BTreeMap<String, usize>, key: &str) {
    let count = counts.entry(key.to_string()).or_insert(0);
    *count = count.saturating_add(1);
}

// =============================================================================
// TESTS
// =============================================================================
