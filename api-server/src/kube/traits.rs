use crate::error::ApiResult;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::CronJob;
use k8s_openapi::api::core::v1::Namespace;

/// Read-only view of the cluster control plane, abstracted so listing can
/// run against a mock.
///
/// An empty `namespace` means all namespaces.
#[async_trait]
pub trait ClusterOperations: Send + Sync {
    async fn list_namespaces(&self) -> ApiResult<Vec<Namespace>>;

    async fn list_deployments(&self, namespace: &str) -> ApiResult<Vec<Deployment>>;

    async fn list_cron_jobs(&self, namespace: &str) -> ApiResult<Vec<CronJob>>;

    async fn list_stateful_sets(&self, namespace: &str) -> ApiResult<Vec<StatefulSet>>;
}
