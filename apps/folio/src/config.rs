//! # Configuration
//!
//! TOML configuration for the Folio app and loading of catalogue data files.
//!
//! # TOML Structure
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! site_dir = "site"
//! contact_delay_ms = 1500
//! data_file = "portfolio.toml"
//! ```
//!
//! Every key is optional. CLI flags override file values; `FOLIO_CORS_ORIGINS`
//! and `FOLIO_RATE_LIMIT` are read by the API layer.

use folio_core::{Catalogue, CatalogueData, FolioError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Maximum size of a configuration or data file (4 MB).
const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Upper bound for the simulated contact delay.
const MAX_CONTACT_DELAY_MS: u64 = 60_000;

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

/// The `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Directory of static site files served for non-API paths.
    pub site_dir: Option<PathBuf>,
    /// How long the contact endpoint waits before acknowledging.
    pub contact_delay_ms: u64,
    /// Catalogue data file replacing the built-in content.
    pub data_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            site_dir: None,
            contact_delay_ms: 1500,
            data_file: None,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The contact delay as a duration.
    #[must_use]
    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }

    fn validate(&self) -> Result<(), FolioError> {
        if self.host.trim().is_empty() {
            return Err(FolioError::Config("[server] host must not be empty".to_string()));
        }
        if self.contact_delay_ms > MAX_CONTACT_DELAY_MS {
            return Err(FolioError::Config(format!(
                "[server] contact_delay_ms {} exceeds maximum {}",
                self.contact_delay_ms, MAX_CONTACT_DELAY_MS
            )));
        }
        Ok(())
    }
}

impl FolioConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, FolioError> {
        let contents = read_bounded(path)?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            FolioError::Config(format!("Failed to parse TOML in '{}': {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self, FolioError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), FolioError> {
        self.server.validate()
    }
}

// =============================================================================
// CATALOGUE LOADING
// =============================================================================

/// Build the catalogue from a data file, or the built-in content when no
/// file is given.
///
/// Files ending in `.json` are read as JSON; anything else as TOML. Both use
/// the serde shape of [`CatalogueData`].
pub fn load_catalogue(path: Option<&Path>) -> Result<Catalogue, FolioError> {
    let Some(path) = path else {
        tracing::debug!("Using built-in catalogue");
        return Ok(Catalogue::builtin());
    };

    let contents = read_bounded(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let data: CatalogueData = if is_json {
        serde_json::from_str(&contents).map_err(|e| {
            FolioError::Parse(format!("Invalid JSON in '{}': {}", path.display(), e))
        })?
    } else {
        toml::from_str(&contents).map_err(|e| {
            FolioError::Parse(format!("Invalid TOML in '{}': {}", path.display(), e))
        })?
    };

    let catalogue = Catalogue::from_data(data)?;
    tracing::info!(
        "Loaded catalogue from {:?}: {} projects",
        path,
        catalogue.projects().len()
    );
    Ok(catalogue)
}

/// Read a UTF-8 file after checking its size.
fn read_bounded(path: &Path) -> Result<String, FolioError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        FolioError::Io(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(FolioError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(FolioError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_FILE_SIZE
        )));
    }

    std::fs::read_to_string(path)
        .map_err(|e| FolioError::Io(format!("Read '{}': {}", path.display(), e)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(contents.as_bytes()).expect("write");
        path
    }

    #[test]
    fn defaults_without_file() {
        let config = FolioConfig::load(None).expect("defaults");
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(config.server.contact_delay(), Duration::from_millis(1500));
        assert!(config.server.data_file.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "folio.toml", "[server]\nport = 9000\n");

        let config = FolioConfig::from_file(&path).expect("load");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.contact_delay_ms, 1500);
    }

    #[test]
    fn full_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            &dir,
            "folio.toml",
            r#"
[server]
host = "0.0.0.0"
port = 3000
site_dir = "public"
contact_delay_ms = 0
data_file = "portfolio.toml"
"#,
        );

        let config = FolioConfig::from_file(&path).expect("load");
        assert_eq!(config.server.addr(), "0.0.0.0:3000");
        assert_eq!(config.server.site_dir, Some(PathBuf::from("public")));
        assert_eq!(config.server.contact_delay(), Duration::ZERO);
        assert_eq!(
            config.server.data_file,
            Some(PathBuf::from("portfolio.toml"))
        );
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "folio.toml", "[server\nport = ");
        assert!(matches!(
            FolioConfig::from_file(&path),
            Err(FolioError::Config(_))
        ));
    }

    #[test]
    fn excessive_delay_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "folio.toml", "[server]\ncontact_delay_ms = 600000\n");
        assert!(matches!(
            FolioConfig::from_file(&path),
            Err(FolioError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            FolioConfig::from_file(&path),
            Err(FolioError::Io(_))
        ));
    }

    #[test]
    fn builtin_catalogue_without_data_file() {
        let catalogue = load_catalogue(None).expect("builtin");
        assert_eq!(catalogue.projects().len(), 5);
    }

    #[test]
    fn toml_data_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            &dir,
            "portfolio.toml",
            r#"
[profile]
name = "Sam Lee"
headline = "Analyst"
location = "London"
email = "sam@example.com"
summary = "Credit analyst."

[[projects]]
id = 7
title = "Credit Review"
category = "Credit"
summary = "Covenant review."
industry = "Banking"
skills = ["Credit Analysis", "Excel"]
tools = ["Excel"]

[[projects.tables]]
slug = "ratios"
title = "Ratios"
columns = ["Ratio", "Value"]
rows = [
    { Ratio = "Leverage", Value = 3.2 },
    { Ratio = "Coverage", Value = "n/a" },
]
"#,
        );

        let catalogue = load_catalogue(Some(&path)).expect("load");
        assert_eq!(catalogue.profile().name, "Sam Lee");
        let project = catalogue.project(folio_core::RecordId(7)).expect("project");
        assert_eq!(project.industry, "Banking");
        assert_eq!(project.table("ratios").map(|t| t.rows.len()), Some(2));
    }

    #[test]
    fn json_data_file_round_trips_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        let builtin = Catalogue::builtin();
        let json = serde_json::to_string(builtin.data()).expect("serialize");
        let path = write_file(&dir, "portfolio.json", &json);

        let loaded = load_catalogue(Some(&path)).expect("load");
        assert_eq!(loaded.data(), builtin.data());
    }

    #[test]
    fn invalid_data_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            &dir,
            "portfolio.toml",
            r#"
[profile]
name = "Sam Lee"
headline = "Analyst"
location = "London"
email = "sam@example.com"
summary = "Credit analyst."

[[skills]]
id = 1
name = "Modeling"
entries = [{ name = "DCF", level = 9 }]
"#,
        );

        assert!(matches!(
            load_catalogue(Some(&path)),
            Err(FolioError::InvalidSkillLevel { level: 9, .. })
        ));
    }
}
