use crate::error::{ApiError, ApiResult};
use crate::kube::normalize;
use crate::kube::traits::ClusterOperations;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Lists cluster resources and projects them into display records
///
/// Every call is a single list against the control plane, bounded by
/// `timeout`. A failure yields one `ApiError::Retrieval`, never a partial
/// result. Records keep the order the control plane returned them in.
pub struct ResourceLister<T: ClusterOperations + ?Sized> {
    cluster: Arc<T>,
    timeout: Duration,
}

impl<T: ClusterOperations + ?Sized> Clone for ResourceLister<T> {
    fn clone(&self) -> Self {
        Self {
            cluster: Arc::clone(&self.cluster),
            timeout: self.timeout,
        }
    }
}

impl<T: ClusterOperations + ?Sized> ResourceLister<T> {
    pub fn new(cluster: Arc<T>, timeout: Duration) -> Self {
        Self { cluster, timeout }
    }

    pub async fn namespaces(&self) -> ApiResult<Vec<common::Namespace>> {
        let items = self
            .fetch("namespaces", "", self.cluster.list_namespaces())
            .await?;
        Ok(items.iter().map(normalize::namespace).collect())
    }

    pub async fn deployments(&self, namespace: &str) -> ApiResult<Vec<common::Deployment>> {
        let items = self
            .fetch(
                "deployments",
                namespace,
                self.cluster.list_deployments(namespace),
            )
            .await?;
        Ok(items.iter().map(normalize::deployment).collect())
    }

    pub async fn cron_jobs(&self, namespace: &str) -> ApiResult<Vec<common::CronJob>> {
        let items = self
            .fetch("cronjobs", namespace, self.cluster.list_cron_jobs(namespace))
            .await?;
        Ok(items.iter().map(normalize::cron_job).collect())
    }

    pub async fn stateful_sets(&self, namespace: &str) -> ApiResult<Vec<common::StatefulSet>> {
        let items = self
            .fetch(
                "statefulsets",
                namespace,
                self.cluster.list_stateful_sets(namespace),
            )
            .await?;
        Ok(items.iter().map(normalize::stateful_set).collect())
    }

    async fn fetch<R>(
        &self,
        resource: &'static str,
        namespace: &str,
        call: impl Future<Output = ApiResult<Vec<R>>>,
    ) -> ApiResult<Vec<R>> {
        let scope = if namespace.is_empty() {
            "all namespaces"
        } else {
            namespace
        };

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(items)) => {
                tracing::debug!("Listed {} {} in {}", items.len(), resource, scope);
                Ok(items)
            }
            Ok(Err(err)) => {
                tracing::error!("Failed to list {} in {}: {}", resource, scope, err);
                Err(match err {
                    ApiError::Retrieval { .. } => err,
                    other => ApiError::retrieval(resource, other),
                })
            }
            Err(_) => {
                tracing::error!(
                    "Listing {} in {} timed out after {:?}",
                    resource,
                    scope,
                    self.timeout
                );
                Err(ApiError::retrieval(
                    resource,
                    format!("timed out after {:?}", self.timeout),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kube::mock::MockClusterOperations;

    fn lister(mock: &Arc<MockClusterOperations>) -> ResourceLister<MockClusterOperations> {
        ResourceLister::new(mock.clone(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_list_namespaces() {
        let mock = Arc::new(MockClusterOperations::new());
        mock.add_namespace(MockClusterOperations::create_test_namespace("default"));
        mock.add_namespace(MockClusterOperations::create_test_namespace("kube-system"));

        let namespaces = lister(&mock).namespaces().await.unwrap();

        let names: Vec<&str> = namespaces.iter().map(|ns| ns.name.as_str()).collect();
        assert_eq!(names, vec!["default", "kube-system"]);
    }

    #[tokio::test]
    async fn test_list_deployments_in_namespace() {
        let mock = Arc::new(MockClusterOperations::new());
        mock.add_deployment(MockClusterOperations::create_test_deployment(
            "api",
            "prod",
            &["ghcr.io/acme/api:1.27.0"],
            Some(2),
        ));
        mock.add_deployment(MockClusterOperations::create_test_deployment(
            "api",
            "staging",
            &["ghcr.io/acme/api:1.28.0"],
            Some(1),
        ));

        let lister = lister(&mock);

        let prod = lister.deployments("prod").await.unwrap();
        assert_eq!(prod.len(), 1);
        assert_eq!(prod[0].version, "1.27.0");
        assert_eq!(prod[0].replicas, 2);

        let all = lister.deployments("").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].namespace, "staging");
    }

    #[tokio::test]
    async fn test_list_cron_jobs_and_stateful_sets() {
        let mock = Arc::new(MockClusterOperations::new());
        mock.add_cron_job(MockClusterOperations::create_test_cron_job(
            "cleanup",
            "ops",
            "0 * * * *",
            &["cleaner:4"],
        ));
        mock.add_stateful_set(MockClusterOperations::create_test_stateful_set(
            "redis",
            "cache",
            &["redis:7.2"],
            Some(3),
        ));

        let lister = lister(&mock);

        let cron_jobs = lister.cron_jobs("ops").await.unwrap();
        assert_eq!(cron_jobs.len(), 1);
        assert_eq!(cron_jobs[0].schedule, "0 * * * *");
        assert_eq!(cron_jobs[0].version, "4");

        let stateful_sets = lister.stateful_sets("").await.unwrap();
        assert_eq!(stateful_sets.len(), 1);
        assert_eq!(stateful_sets[0].images, vec!["redis:7.2"]);
    }

    #[tokio::test]
    async fn test_list_empty_cluster() {
        let mock = Arc::new(MockClusterOperations::new());
        assert!(lister(&mock).deployments("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_is_retrieval_error() {
        let mock = Arc::new(MockClusterOperations::new());
        mock.add_stateful_set(MockClusterOperations::create_test_stateful_set(
            "redis",
            "cache",
            &["redis:7.2"],
            Some(3),
        ));
        mock.fail_with("Unauthorized");

        let result = lister(&mock).stateful_sets("cache").await;

        match result {
            Err(ApiError::Retrieval { resource, message }) => {
                assert_eq!(resource, "statefulsets");
                assert!(message.contains("Unauthorized"));
            }
            other => panic!("Expected Retrieval error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_timeout_is_retrieval_error() {
        let mock = Arc::new(MockClusterOperations::new());
        mock.set_latency(Duration::from_millis(500));

        let lister = ResourceLister::new(mock, Duration::from_millis(20));
        let result = lister.namespaces().await;

        match result {
            Err(ApiError::Retrieval { resource, message }) => {
                assert_eq!(resource, "namespaces");
                assert!(message.contains("timed out"));
            }
            other => panic!("Expected Retrieval error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_through_trait_object() {
        let mock = Arc::new(MockClusterOperations::new());
        mock.add_namespace(MockClusterOperations::create_test_namespace("default"));

        let cluster: Arc<dyn ClusterOperations> = mock;
        let lister = ResourceLister::new(cluster, Duration::from_secs(5));

        assert_eq!(lister.namespaces().await.unwrap().len(), 1);
    }
}
