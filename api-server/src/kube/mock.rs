use crate::error::{ApiError, ApiResult};
use crate::kube::traits::ClusterOperations;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{
    Deployment, DeploymentSpec, DeploymentStatus, StatefulSet, StatefulSetSpec, StatefulSetStatus,
};
use k8s_openapi::api::batch::v1::{CronJob, CronJobSpec, JobSpec, JobTemplateSpec};
use k8s_openapi::api::core::v1::{Container, Namespace, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory implementation of ClusterOperations for unit testing
///
/// Objects are returned in insertion order, filtered by
/// `metadata.namespace` unless the requested namespace is empty.
#[derive(Clone, Default)]
pub struct MockClusterOperations {
    namespaces: Arc<Mutex<Vec<Namespace>>>,
    deployments: Arc<Mutex<Vec<Deployment>>>,
    cron_jobs: Arc<Mutex<Vec<CronJob>>>,
    stateful_sets: Arc<Mutex<Vec<StatefulSet>>>,
    failure: Arc<Mutex<Option<String>>>,
    latency: Arc<Mutex<Option<Duration>>>,
}

impl MockClusterOperations {
    /// Create a new mock with an empty cluster
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_namespace(&self, namespace: Namespace) {
        self.namespaces.lock().unwrap().push(namespace);
    }

    pub fn add_deployment(&self, deployment: Deployment) {
        self.deployments.lock().unwrap().push(deployment);
    }

    pub fn add_cron_job(&self, cron_job: CronJob) {
        self.cron_jobs.lock().unwrap().push(cron_job);
    }

    pub fn add_stateful_set(&self, stateful_set: StatefulSet) {
        self.stateful_sets.lock().unwrap().push(stateful_set);
    }

    /// Make every subsequent list call fail with the given cause
    pub fn fail_with(&self, cause: &str) {
        *self.failure.lock().unwrap() = Some(cause.to_string());
    }

    /// Delay every subsequent list call
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    pub fn create_test_namespace(name: &str) -> Namespace {
        Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Helper to create a test deployment running the given images
    pub fn create_test_deployment(
        name: &str,
        namespace: &str,
        images: &[&str],
        replicas: Option<i32>,
    ) -> Deployment {
        Deployment {
            metadata: Self::test_metadata(name, namespace),
            spec: Some(DeploymentSpec {
                replicas,
                template: Self::test_template(images),
                ..Default::default()
            }),
            status: Some(DeploymentStatus {
                ready_replicas: replicas,
                available_replicas: replicas,
                ..Default::default()
            }),
        }
    }

    pub fn create_test_stateful_set(
        name: &str,
        namespace: &str,
        images: &[&str],
        replicas: Option<i32>,
    ) -> StatefulSet {
        StatefulSet {
            metadata: Self::test_metadata(name, namespace),
            spec: Some(StatefulSetSpec {
                replicas,
                template: Self::test_template(images),
                ..Default::default()
            }),
            status: Some(StatefulSetStatus {
                ready_replicas: replicas,
                ..Default::default()
            }),
        }
    }

    pub fn create_test_cron_job(
        name: &str,
        namespace: &str,
        schedule: &str,
        images: &[&str],
    ) -> CronJob {
        CronJob {
            metadata: Self::test_metadata(name, namespace),
            spec: Some(CronJobSpec {
                schedule: schedule.to_string(),
                job_template: JobTemplateSpec {
                    spec: Some(JobSpec {
                        template: Self::test_template(images),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                ..Default::default()
            }),
            status: None,
        }
    }

    fn test_metadata(name: &str, namespace: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    fn test_template(images: &[&str]) -> PodTemplateSpec {
        PodTemplateSpec {
            spec: Some(PodSpec {
                containers: images
                    .iter()
                    .enumerate()
                    .map(|(i, image)| Container {
                        name: format!("container-{}", i),
                        image: Some(image.to_string()),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    async fn simulate_call(&self, resource: &'static str) -> ApiResult<()> {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.failure.lock().unwrap().as_ref() {
            Some(cause) => Err(ApiError::retrieval(resource, cause)),
            None => Ok(()),
        }
    }

    fn in_namespace<'a, K>(items: &'a [K], namespace: &'a str) -> impl Iterator<Item = K> + 'a
    where
        K: kube::ResourceExt + Clone,
    {
        items
            .iter()
            .filter(move |item| {
                namespace.is_empty() || item.namespace().as_deref() == Some(namespace)
            })
            .cloned()
    }
}

#[async_trait]
impl ClusterOperations for MockClusterOperations {
    async fn list_namespaces(&self) -> ApiResult<Vec<Namespace>> {
        self.simulate_call("namespaces").await?;
        Ok(self.namespaces.lock().unwrap().clone())
    }

    async fn list_deployments(&self, namespace: &str) -> ApiResult<Vec<Deployment>> {
        self.simulate_call("deployments").await?;
        let deployments = self.deployments.lock().unwrap();
        Ok(Self::in_namespace(deployments.as_slice(), namespace).collect())
    }

    async fn list_cron_jobs(&self, namespace: &str) -> ApiResult<Vec<CronJob>> {
        self.simulate_call("cronjobs").await?;
        let cron_jobs = self.cron_jobs.lock().unwrap();
        Ok(Self::in_namespace(cron_jobs.as_slice(), namespace).collect())
    }

    async fn list_stateful_sets(&self, namespace: &str) -> ApiResult<Vec<StatefulSet>> {
        self.simulate_call("statefulsets").await?;
        let stateful_sets = self.stateful_sets.lock().unwrap();
        Ok(Self::in_namespace(stateful_sets.as_slice(), namespace).collect())
    }
}
