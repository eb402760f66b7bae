//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use folio_core::{
    Catalogue, Cell, FacetIndex, FilterState, FolioError, RecordId, SortDirection, SortState,
    compute_visible,
};

/// Print a value as pretty JSON.
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), FolioError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| FolioError::Parse(format!("JSON encoding failed: {}", e)))?;
    println!("{}", text);
    Ok(())
}

fn join(values: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(config: &ServerConfig, catalogue: Catalogue) -> Result<(), FolioError> {
    let state = AppState::new(catalogue)?
        .with_contact_delay(config.contact_delay())
        .with_site_dir(config.site_dir.clone());

    println!("Folio Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:          {}", config.host);
    println!("  Port:          {}", config.port);
    println!("  Contact delay: {} ms", config.contact_delay_ms);
    match &config.site_dir {
        Some(dir) => println!("  Site:          {:?}", dir),
        None => println!("  Site:          (none)"),
    }
    println!("  Fingerprint:   {}", state.fingerprint);
    println!();
    println!("Endpoints:");
    println!("  GET  /api/projects            - Filtered projects");
    println!("  GET  /api/projects/{{id}}       - Project detail");
    println!("  POST /api/view                - Advance a view state");
    println!("  POST /api/contact             - Contact form");
    println!("  GET  /health                  - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config.addr(), state).await
}

// =============================================================================
// PROJECTS COMMAND
// =============================================================================

/// List projects passing the given filters.
pub fn cmd_projects(
    catalogue: &Catalogue,
    json_mode: bool,
    verbose: bool,
    skills: &[String],
    tools: &[String],
    industry: Option<String>,
) -> Result<(), FolioError> {
    let mut filters = FilterState::new()
        .with_skills(skills.iter().cloned())
        .with_tools(tools.iter().cloned());
    if let Some(industry) = industry {
        filters = filters.with_industry(industry);
    }

    let visible = compute_visible(catalogue.projects(), &filters);
    tracing::debug!(
        "{} of {} projects visible",
        visible.len(),
        catalogue.projects().len()
    );

    if json_mode {
        let summaries: Vec<api::ProjectSummary> =
            visible.iter().copied().map(api::ProjectSummary::from).collect();
        return print_json(&api::ProjectsResponse {
            count: summaries.len(),
            projects: summaries,
        });
    }

    println!("Projects ({} of {})", visible.len(), catalogue.projects().len());
    println!("========");
    for project in visible {
        println!(
            "[{}] {} - {} ({})",
            project.id, project.title, project.category, project.industry
        );
        if verbose {
            println!("    Skills: {}", join(&project.skills));
            println!("    Tools:  {}", join(&project.tools));
        }
    }

    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Show one project in detail.
pub fn cmd_show(catalogue: &Catalogue, json_mode: bool, id: u64) -> Result<(), FolioError> {
    let project = catalogue
        .project(RecordId(id))
        .ok_or_else(|| FolioError::RecordNotFound {
            kind: "project",
            id: id.to_string(),
        })?;

    if json_mode {
        return print_json(project);
    }

    println!("{}", project.title);
    println!("{}", "=".repeat(project.title.chars().count()));
    println!("Category: {}", project.category);
    println!("Industry: {}", project.industry);
    println!("Skills:   {}", join(&project.skills));
    println!("Tools:    {}", join(&project.tools));
    println!();
    println!("{}", project.summary);
    if !project.description.is_empty() {
        println!();
        println!("{}", project.description);
    }

    if !project.metrics.is_empty() {
        println!();
        for metric in &project.metrics {
            println!("  {}: {}", metric.label, metric.value);
        }
    }

    if !project.tables.is_empty() {
        println!();
        println!("Tables:");
        for table in &project.tables {
            println!("  {} - {} ({} rows)", table.slug, table.title, table.rows.len());
        }
    }

    if !project.charts.is_empty() {
        println!();
        println!("Charts:");
        for chart in &project.charts {
            println!("  {} ({:?})", chart.title, chart.kind);
        }
    }

    Ok(())
}

// =============================================================================
// TABLE COMMAND
// =============================================================================

/// Print a project table, sorted by a column if given.
pub fn cmd_table(
    catalogue: &Catalogue,
    json_mode: bool,
    project_id: u64,
    slug: &str,
    sort: Option<String>,
    desc: bool,
) -> Result<(), FolioError> {
    let project = catalogue
        .project(RecordId(project_id))
        .ok_or_else(|| FolioError::RecordNotFound {
            kind: "project",
            id: project_id.to_string(),
        })?;
    let table = project
        .table(slug)
        .ok_or_else(|| FolioError::RecordNotFound {
            kind: "table",
            id: format!("{}/{}", project_id, slug),
        })?;

    let direction = if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let state = match sort {
        Some(column) => SortState::by(column, direction),
        None => SortState::new(),
    };
    let rows = table.sorted(&state)?;

    if json_mode {
        return print_json(&api::TableResponse {
            project: project_id,
            slug: table.slug.clone(),
            title: table.title.clone(),
            columns: table.columns.clone(),
            sort: state,
            rows: rows.into_iter().cloned().collect(),
        });
    }

    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .map(|c| row.get(c).map(Cell::render).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rendered
                .iter()
                .filter_map(|cells| cells.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    println!("{}", table.title);
    if let Some(column) = state.column() {
        println!("Sorted by {} ({})", column, state.direction().as_str());
    }
    println!();
    print_line(&table.columns, &widths);
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for cells in &rendered {
        print_line(cells, &widths);
    }

    Ok(())
}

fn print_line(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    println!("{}", line.join(" | "));
}

// =============================================================================
// FACETS COMMAND
// =============================================================================

/// List facet values with the number of projects carrying each.
pub fn cmd_facets(catalogue: &Catalogue, json_mode: bool) -> Result<(), FolioError> {
    let index = FacetIndex::build(catalogue.projects());

    if json_mode {
        return print_json(&index);
    }

    for (title, counts) in [
        ("Skills", &index.skills),
        ("Tools", &index.tools),
        ("Industries", &index.industries),
    ] {
        println!("{}", title);
        for (value, count) in counts {
            println!("  {:<32} {}", value, count);
        }
        println!();
    }

    Ok(())
}

// =============================================================================
// TIMELINE COMMAND
// =============================================================================

/// Print experience, most recent first.
pub fn cmd_timeline(catalogue: &Catalogue, json_mode: bool) -> Result<(), FolioError> {
    let timeline = catalogue.timeline();

    if json_mode {
        return print_json(&timeline);
    }

    for experience in timeline {
        let end = experience.end.as_deref().unwrap_or("present");
        println!(
            "{} - {}  {} at {}",
            experience.start, end, experience.role, experience.organisation
        );
        for highlight in &experience.highlights {
            println!("    - {}", highlight);
        }
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Report catalogue counts and fingerprint.
///
/// Reaching this command means the catalogue already passed validation.
pub fn cmd_check(catalogue: &Catalogue, json_mode: bool) -> Result<(), FolioError> {
    let fingerprint = catalogue.fingerprint()?;

    if json_mode {
        return print_json(&serde_json::json!({
            "valid": true,
            "projects": catalogue.projects().len(),
            "certifications": catalogue.certifications().len(),
            "experiences": catalogue.experiences().len(),
            "skill_categories": catalogue.skills().len(),
            "algorithm": "blake3",
            "hash": fingerprint,
        }));
    }

    println!("Catalogue OK");
    println!("  Projects:         {}", catalogue.projects().len());
    println!("  Certifications:   {}", catalogue.certifications().len());
    println!("  Experiences:      {}", catalogue.experiences().len());
    println!("  Skill categories: {}", catalogue.skills().len());
    println!("  BLAKE3:           {}", fingerprint);

    Ok(())
}
