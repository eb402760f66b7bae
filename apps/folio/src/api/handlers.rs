//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ContactRequest, ContactResponse, ErrorResponse, HashResponse, HealthResponse,
        ProjectSummary, ProjectsQuery, ProjectsResponse, TableQuery, TableResponse, ViewRequest,
        ViewResponse,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use folio_core::{
    FacetIndex, FolioError, RecordId, compute_blake3_hash, compute_visible,
    primitives::RECEIPT_LENGTH,
};

/// Map an engine error to a status code and JSON error body.
fn error_response(status: StatusCode, err: &FolioError) -> Response {
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

fn not_found(kind: &'static str, id: impl ToString) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        &FolioError::RecordNotFound {
            kind,
            id: id.to_string(),
        },
    )
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// CATALOGUE HANDLERS
// =============================================================================

/// The whole catalogue document, tagged with its fingerprint.
///
/// Answers `304 Not Modified` when `If-None-Match` carries the current tag.
pub async fn catalogue_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let etag = format!("\"{}\"", state.fingerprint);

    let unchanged = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|tag| tag.trim() == etag));

    let etag_value = HeaderValue::from_str(&etag).ok();

    if unchanged {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        if let Some(value) = etag_value {
            response.headers_mut().insert(header::ETAG, value);
        }
        return response;
    }

    let mut response = Json(state.catalogue.data()).into_response();
    if let Some(value) = etag_value {
        response.headers_mut().insert(header::ETAG, value);
    }
    response
}

/// BLAKE3 fingerprint of the catalogue.
pub async fn hash_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HashResponse::blake3(state.fingerprint.as_ref()))
}

/// Biographical header.
pub async fn profile_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalogue.profile().clone())
}

/// Certifications in authored order.
pub async fn certifications_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalogue.certifications().to_vec())
}

/// Experience, most recent first.
pub async fn experience_handler(State(state): State<AppState>) -> Response {
    Json(state.catalogue.timeline()).into_response()
}

/// Skills matrix.
pub async fn skills_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalogue.skills().to_vec())
}

/// Facet vocabulary of the project list.
pub async fn facets_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(FacetIndex::build(state.catalogue.projects()))
}

// =============================================================================
// PROJECT HANDLERS
// =============================================================================

/// Projects passing the query filters, in catalogue order.
pub async fn projects_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let filters = match ProjectsQuery::from_pairs(pairs).to_filter() {
        Ok(f) => f,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let projects: Vec<ProjectSummary> = compute_visible(state.catalogue.projects(), &filters)
        .into_iter()
        .map(ProjectSummary::from)
        .collect();

    Json(ProjectsResponse {
        count: projects.len(),
        projects,
    })
    .into_response()
}

/// One project with its full detail content.
pub async fn project_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.catalogue.project(RecordId(id)) {
        Some(project) => Json(project).into_response(),
        None => not_found("project", id),
    }
}

/// One project table, sorted by the query.
pub async fn table_handler(
    State(state): State<AppState>,
    Path((id, slug)): Path<(u64, String)>,
    Query(query): Query<TableQuery>,
) -> Response {
    let Some(project) = state.catalogue.project(RecordId(id)) else {
        return not_found("project", id);
    };
    let Some(table) = project.table(&slug) else {
        return not_found("table", format!("{}/{}", id, slug));
    };

    let sort = match query.to_sort_state() {
        Ok(s) => s,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    match table.sorted(&sort) {
        Ok(rows) => Json(TableResponse {
            project: id,
            slug: table.slug.clone(),
            title: table.title.clone(),
            columns: table.columns.clone(),
            sort,
            rows: rows.into_iter().cloned().collect(),
        })
        .into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e),
    }
}

// =============================================================================
// VIEW HANDLER
// =============================================================================

/// Advance a client-held view by one action and render it.
pub async fn view_handler(
    State(state): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> Response {
    let catalogue = state.catalogue.as_ref();
    let next = match request.advance(catalogue) {
        Ok(next) => next,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let snapshot = next.snapshot(catalogue);
    Json(ViewResponse {
        state: next,
        snapshot,
    })
    .into_response()
}

// =============================================================================
// CONTACT HANDLER
// =============================================================================

/// Validate a contact message and acknowledge it after the configured delay.
///
/// Nothing is delivered or stored.
pub async fn contact_handler(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Response {
    let message = match request.to_message() {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!("Contact rejected: {}", e);
            return error_response(StatusCode::BAD_REQUEST, &e);
        }
    };

    tokio::time::sleep(state.contact_delay).await;

    let receipt: String = compute_blake3_hash(&message.canonical_bytes())
        .chars()
        .take(RECEIPT_LENGTH)
        .collect();

    tracing::info!(receipt = %receipt, "Contact message accepted");
    Json(ContactResponse::accepted(receipt)).into_response()
}
