use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use common::{CronJob, Deployment, Namespace, StatefulSet};
use serde::Deserialize;

/// Optional `?namespace=` filter; absent or empty means all namespaces
#[derive(Debug, Default, Deserialize)]
pub struct NamespaceFilter {
    #[serde(default)]
    pub namespace: String,
}

pub async fn list_namespaces_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Namespace>>> {
    Ok(Json(state.lister.namespaces().await?))
}

pub async fn list_deployments_handler(
    State(state): State<AppState>,
    Query(filter): Query<NamespaceFilter>,
) -> ApiResult<Json<Vec<Deployment>>> {
    Ok(Json(state.lister.deployments(&filter.namespace).await?))
}

pub async fn list_cron_jobs_handler(
    State(state): State<AppState>,
    Query(filter): Query<NamespaceFilter>,
) -> ApiResult<Json<Vec<CronJob>>> {
    Ok(Json(state.lister.cron_jobs(&filter.namespace).await?))
}

pub async fn list_stateful_sets_handler(
    State(state): State<AppState>,
    Query(filter): Query<NamespaceFilter>,
) -> ApiResult<Json<Vec<StatefulSet>>> {
    Ok(Json(state.lister.stateful_sets(&filter.namespace).await?))
}
