//! # Folio CLI Module
//!
//! This module implements the CLI interface for Folio.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `projects` - List projects, optionally filtered by facets
//! - `show` - Show one project in detail
//! - `table` - Print a project table, optionally sorted
//! - `facets` - List the facet vocabulary with counts
//! - `timeline` - Print the experience timeline
//! - `check` - Validate the catalogue and print its fingerprint

mod commands;

use crate::config::{FolioConfig, load_catalogue};
use clap::{Parser, Subcommand};
use folio_core::FolioError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Folio - portfolio catalogue server
///
/// Serves a portfolio's projects, certifications and experience, with
/// faceted filtering and sortable project tables.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalogue data file (TOML or JSON), overrides the configured one
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static site files
        #[arg(short, long)]
        site_dir: Option<PathBuf>,
    },

    /// List projects
    Projects {
        /// Skill filter (repeatable, any matches)
        #[arg(short, long = "skill")]
        skill: Vec<String>,

        /// Tool filter (repeatable, any matches)
        #[arg(short, long = "tool")]
        tool: Vec<String>,

        /// Industry filter
        #[arg(short, long)]
        industry: Option<String>,
    },

    /// Show one project
    Show {
        /// Project ID
        id: u64,
    },

    /// Print a project table
    Table {
        /// Project ID
        project: u64,

        /// Table slug
        slug: String,

        /// Column to sort by
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(short, long)]
        desc: bool,
    },

    /// List facet values with project counts
    Facets,

    /// Print the experience timeline
    Timeline,

    /// Validate the catalogue and print its fingerprint
    Check,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), FolioError> {
    let mut config = FolioConfig::load(cli.config.as_deref())?;
    if cli.data.is_some() {
        config.server.data_file = cli.data.clone();
    }

    let catalogue = load_catalogue(config.server.data_file.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            site_dir,
        }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if site_dir.is_some() {
                config.server.site_dir = site_dir;
            }
            cmd_serve(&config.server, catalogue).await
        }
        Some(Commands::Projects {
            skill,
            tool,
            industry,
        }) => cmd_projects(&catalogue, json_mode, cli.verbose, &skill, &tool, industry),
        Some(Commands::Show { id }) => cmd_show(&catalogue, json_mode, id),
        Some(Commands::Table {
            project,
            slug,
            sort,
            desc,
        }) => cmd_table(&catalogue, json_mode, project, &slug, sort, desc),
        Some(Commands::Facets) => cmd_facets(&catalogue, json_mode),
        Some(Commands::Timeline) => cmd_timeline(&catalogue, json_mode),
        Some(Commands::Check) => cmd_check(&catalogue, json_mode),
        None => {
            // No subcommand - list every project
            cmd_projects(&catalogue, json_mode, cli.verbose, &[], &[], None)
        }
    }
}
