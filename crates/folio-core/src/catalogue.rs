//! # Catalogue (Record Store)
//!
//! The immutable, preloaded collection of every record the portfolio shows.
//!
//! A [`Catalogue`] is built once from [`CatalogueData`] and never mutated
//! afterwards. Construction validates the invariants the rest of the engine
//! relies on:
//! - identifiers are unique within each collection
//! - table slugs are unique within a project and rows only use known columns
//! - chart series line up with their labels
//! - skill levels are within range

use crate::records::{Certification, Experience, Profile, Project, SkillCategory};
use crate::{FolioError, Record, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw catalogue content, as authored.
///
/// This is the serde shape of a data file. It carries no guarantees until it
/// is turned into a [`Catalogue`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogueData {
    pub profile: Profile,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
}

/// The validated, read-only record store.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    data: CatalogueData,
}

impl Catalogue {
    /// Validate authored content and freeze it.
    pub fn from_data(data: CatalogueData) -> Result<Self, FolioError> {
        ensure_unique_ids("project", &data.projects)?;
        ensure_unique_ids("certification", &data.certifications)?;
        ensure_unique_ids("experience", &data.experiences)?;
        ensure_unique_ids("skill category", &data.skills)?;

        for project in &data.projects {
            let mut slugs = BTreeSet::new();
            for table in &project.tables {
                if !slugs.insert(table.slug.as_str()) {
                    return Err(FolioError::InvalidTable {
                        table: table.slug.clone(),
                        reason: format!("duplicate slug in project {}", project.id),
                    });
                }
                table.validate()?;
            }
            for chart in &project.charts {
                chart.validate()?;
            }
        }

        for category in &data.skills {
            category.validate()?;
        }

        Ok(Self { data })
    }

    /// The built-in portfolio content.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            data: crate::seed::portfolio(),
        }
    }

    /// The underlying content.
    #[must_use]
    pub fn data(&self) -> &CatalogueData {
        &self.data
    }

    /// Biographical header.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.data.profile
    }

    /// Projects in authored order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    /// Look up a project by id.
    #[must_use]
    pub fn project(&self, id: RecordId) -> Option<&Project> {
        self.data.projects.iter().find(|p| p.id == id)
    }

    /// Certifications in authored order.
    #[must_use]
    pub fn certifications(&self) -> &[Certification] {
        &self.data.certifications
    }

    /// Experiences in authored order.
    #[must_use]
    pub fn experiences(&self) -> &[Experience] {
        &self.data.experiences
    }

    /// Skills matrix.
    #[must_use]
    pub fn skills(&self) -> &[SkillCategory] {
        &self.data.skills
    }

    /// Experiences most recent first.
    ///
    /// Ongoing roles come first, then roles by start month descending. Ties
    /// keep authored order.
    #[must_use]
    pub fn timeline(&self) -> Vec<&Experience> {
        let mut ordered: Vec<&Experience> = self.data.experiences.iter().collect();
        ordered.sort_by(|a, b| {
            b.is_current()
                .cmp(&a.is_current())
                .then_with(|| b.start.cmp(&a.start))
        });
        ordered
    }

    /// BLAKE3 hex hash of the canonical postcard encoding of the content.
    ///
    /// Identical content always yields the identical fingerprint.
    #[cfg(feature = "crypto-hash")]
    pub fn fingerprint(&self) -> Result<String, FolioError> {
        let bytes = postcard::to_allocvec(&self.data)
            .map_err(|e| FolioError::Parse(format!("canonical encoding failed: {}", e)))?;
        Ok(compute_blake3_hash(&bytes))
    }
}

/// Compute a BLAKE3 hex hash of raw bytes.
#[cfg(feature = "crypto-hash")]
#[must_use]
pub fn compute_blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

fn ensure_unique_ids<R: Record>(kind: &'static str, records: &[R]) -> Result<(), FolioError> {
    let mut seen = BTreeSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            return Err(FolioError::DuplicateId {
                kind,
                id: record.id(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
