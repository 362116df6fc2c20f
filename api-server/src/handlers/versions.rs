use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::Json;
use common::{LatestVersionResponse, VersionCheckRequest, VersionCheckResponse};
use serde::Deserialize;

/// Shown as `latestVersion` when the kind is not in the table
pub const UNKNOWN_VERSION: &str = "unknown";

/// Batch version check
///
/// The body is parsed by hand so that both an unreadable body and
/// malformed JSON surface as 400.
pub async fn check_versions_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<VersionCheckResponse>> {
    let body =
        body.map_err(|e| ApiError::InvalidInput(format!("Unable to read request body: {}", e)))?;

    let request = VersionCheckRequest::from_slice(&body)
        .map_err(|e| ApiError::InvalidInput(format!("Unable to decode JSON: {}", e)))?;

    let updates = state.versions.check_all(&request.components);

    Ok(Json(VersionCheckResponse { updates }))
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestVersionQuery {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Latest version lookup for a single component
///
/// `kind` and `name` are required. The optional `?version=` is the caller's
/// current version: when given, `hasUpdate` is true only if it differs from
/// the latest one. Without it, `hasUpdate` only says whether a latest
/// version is known for the kind.
pub async fn latest_version_handler(
    State(state): State<AppState>,
    Query(query): Query<LatestVersionQuery>,
) -> ApiResult<Json<LatestVersionResponse>> {
    let (kind, name) = match (required(query.kind), required(query.name)) {
        (Some(kind), Some(name)) => (kind, name),
        _ => {
            return Err(ApiError::InvalidInput(
                "kind and name are required".to_string(),
            ))
        }
    };

    let (latest_version, has_update) = match query.version {
        Some(current) => state.versions.check(&kind, &current),
        None => match state.versions.table().latest(&kind) {
            Some(latest) => (latest.to_string(), true),
            None => (String::new(), false),
        },
    };

    let latest_version = if latest_version.is_empty() {
        UNKNOWN_VERSION.to_string()
    } else {
        latest_version
    };

    Ok(Json(LatestVersionResponse {
        kind,
        name,
        latest_version,
        has_update,
    }))
}
