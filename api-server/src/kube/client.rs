use crate::error::{ApiError, ApiResult};
use crate::kube::traits::ClusterOperations;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::CronJob;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::NamespaceResourceScope;
use kube::{api::ListParams, Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Real Kubernetes client implementation using kube-rs
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    /// Create a new Kubernetes client using the default configuration
    /// (in-cluster config or ~/.kube/config)
    pub async fn new() -> ApiResult<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to create K8s client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create a Kubernetes client from an explicit kube::Client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn list_namespaced<K>(&self, resource: &'static str, namespace: &str) -> ApiResult<Vec<K>>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = if namespace.is_empty() {
            Api::all(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        };

        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| ApiError::retrieval(resource, e))?;

        Ok(list.items)
    }
}

#[async_trait]
impl ClusterOperations for KubeClient {
    async fn list_namespaces(&self) -> ApiResult<Vec<Namespace>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());

        let list = namespaces
            .list(&ListParams::default())
            .await
            .map_err(|e| ApiError::retrieval("namespaces", e))?;

        Ok(list.items)
    }

    async fn list_deployments(&self, namespace: &str) -> ApiResult<Vec<Deployment>> {
        self.list_namespaced("deployments", namespace).await
    }

    async fn list_cron_jobs(&self, namespace: &str) -> ApiResult<Vec<CronJob>> {
        self.list_namespaced("cronjobs", namespace).await
    }

    async fn list_stateful_sets(&self, namespace: &str) -> ApiResult<Vec<StatefulSet>> {
        self.list_namespaced("statefulsets", namespace).await
    }
}

#[cfg(test)]
mod tests {
    // Note: KubeClient tests require a real Kubernetes cluster
    // We test this in integration tests with kind
    // Unit tests focus on the mock implementation in mock.rs
}
