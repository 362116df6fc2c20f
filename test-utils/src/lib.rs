use anyhow::{Context, Result};
/// Test utilities for integration tests
/// Manages kind cluster lifecycle and workload fixtures
use std::process::Command;

pub const CLUSTER_NAME: &str = "kube-inventory";
pub const APPS_NAMESPACE: &str = "inventory-apps";
pub const OTHER_NAMESPACE: &str = "inventory-other";

/// Test fixture that manages kind cluster lifecycle
pub struct KindCluster {
    cluster_name: String,
}

impl KindCluster {
    /// Get or create the test cluster
    /// Idempotent - safe to call multiple times
    pub fn setup() -> Result<Self> {
        let cluster = Self {
            cluster_name: CLUSTER_NAME.to_string(),
        };

        if !cluster.exists()? {
            println!("Creating kind cluster: {}", CLUSTER_NAME);
            cluster.create()?;
        } else {
            println!("Using existing kind cluster: {}", CLUSTER_NAME);
        }

        cluster.setup_namespaces()?;

        Ok(cluster)
    }

    fn exists(&self) -> Result<bool> {
        let output = Command::new("kind")
            .args(["get", "clusters"])
            .output()
            .context("Failed to execute 'kind get clusters'")?;

        if !output.status.success() {
            return Ok(false);
        }

        let clusters = String::from_utf8_lossy(&output.stdout);
        Ok(clusters
            .lines()
            .any(|line| line.trim() == self.cluster_name))
    }

    /// Create a single-node kind cluster
    fn create(&self) -> Result<()> {
        let status = Command::new("kind")
            .args(["create", "cluster", "--name", &self.cluster_name])
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit())
            .status()
            .context("Failed to run 'kind create cluster'")?;

        if !status.success() {
            anyhow::bail!("kind create cluster failed");
        }

        self.wait_for_ready()
    }

    fn wait_for_ready(&self) -> Result<()> {
        println!("Waiting for cluster nodes to be ready...");

        let status = Command::new("kubectl")
            .args([
                "wait",
                "--for=condition=Ready",
                "nodes",
                "--all",
                "--timeout=60s",
            ])
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit())
            .status()
            .context("Failed to wait for nodes")?;

        if !status.success() {
            anyhow::bail!("Nodes did not become ready in time");
        }

        Ok(())
    }

    /// Recreate the test namespaces so every run starts empty
    fn setup_namespaces(&self) -> Result<()> {
        for ns in [APPS_NAMESPACE, OTHER_NAMESPACE] {
            let _ = self.delete_namespace(ns);
        }

        for ns in [APPS_NAMESPACE, OTHER_NAMESPACE] {
            self.create_namespace(ns)?;
        }

        Ok(())
    }

    fn create_namespace(&self, name: &str) -> Result<()> {
        println!("Creating namespace: {}", name);

        let status = Command::new("kubectl")
            .args(["create", "namespace", name])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .context("Failed to create namespace")?;

        if !status.success() {
            anyhow::bail!("Failed to create namespace: {}", name);
        }

        Ok(())
    }

    fn delete_namespace(&self, name: &str) -> Result<()> {
        let status = Command::new("kubectl")
            .args(["delete", "namespace", name, "--ignore-not-found=true"])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .context("Failed to delete namespace")?;

        if !status.success() {
            anyhow::bail!("Failed to delete namespace: {}", name);
        }

        let _ = Command::new("kubectl")
            .args([
                "wait",
                "--for=delete",
                &format!("namespace/{}", name),
                "--timeout=30s",
            ])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();

        Ok(())
    }

    /// Apply the read-only ClusterRole the inventory service runs with
    pub fn apply_rbac(&self) -> Result<()> {
        println!("Applying RBAC configuration...");

        let rbac_yaml = format!(
            r#"
---
apiVersion: v1
kind: ServiceAccount
metadata:
  name: inventory-sa
  namespace: {apps_ns}
---
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: inventory-reader
rules:
- apiGroups: [""]
  resources: ["namespaces"]
  verbs: ["list"]
- apiGroups: ["apps"]
  resources: ["deployments", "statefulsets"]
  verbs: ["list"]
- apiGroups: ["batch"]
  resources: ["cronjobs"]
  verbs: ["list"]
---
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRoleBinding
metadata:
  name: inventory-reader-binding
subjects:
- kind: ServiceAccount
  name: inventory-sa
  namespace: {apps_ns}
roleRef:
  kind: ClusterRole
  name: inventory-reader
  apiGroup: rbac.authorization.k8s.io
"#,
            apps_ns = APPS_NAMESPACE
        );

        let mut child = Command::new("kubectl")
            .args(["apply", "-f", "-"])
            .stdin(std::process::Stdio::piped())
            .spawn()
            .context("Failed to spawn kubectl apply")?;

        {
            use std::io::Write;
            let stdin = child
                .stdin
                .as_mut()
                .context("kubectl apply has no stdin")?;
            stdin
                .write_all(rbac_yaml.as_bytes())
                .context("Failed to write RBAC manifest")?;
        }

        let status = child.wait().context("Failed to apply RBAC")?;
        if !status.success() {
            anyhow::bail!("Failed to apply RBAC configuration");
        }

        Ok(())
    }

    /// Get cluster name for kubectl context
    pub fn context_name(&self) -> String {
        format!("kind-{}", self.cluster_name)
    }
}

/// Delete the test cluster
/// Call this explicitly if you want to clean up
#[allow(dead_code)]
pub fn teardown_cluster() -> Result<()> {
    println!("Deleting kind cluster: {}", CLUSTER_NAME);

    let status = Command::new("kind")
        .args(["delete", "cluster", "--name", CLUSTER_NAME])
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit())
        .status()
        .context("Failed to delete cluster")?;

    if !status.success() {
        anyhow::bail!("Failed to delete cluster");
    }

    Ok(())
}

fn pod_template(name: &str, images: &[&str]) -> serde_json::Value {
    let containers: Vec<serde_json::Value> = images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            serde_json::json!({
                "name": format!("c{}", i),
                "image": image,
            })
        })
        .collect();

    serde_json::json!({
        "metadata": { "labels": { "app": name } },
        "spec": { "containers": containers },
    })
}

/// Helper to create a Deployment running the given images
pub async fn create_test_deployment(
    namespace: &str,
    name: &str,
    images: &[&str],
    replicas: i32,
) -> Result<()> {
    use k8s_openapi::api::apps::v1::Deployment;
    use kube::{Api, Client};

    let client = Client::try_default().await?;
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);

    let deployment = serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "labels": { "app": name },
        },
        "spec": {
            "replicas": replicas,
            "selector": { "matchLabels": { "app": name } },
            "template": pod_template(name, images),
        },
    });

    deployments
        .create(
            &kube::api::PostParams::default(),
            &serde_json::from_value(deployment)?,
        )
        .await
        .context("Failed to create test deployment")?;

    Ok(())
}

/// Helper to create a StatefulSet running the given images
pub async fn create_test_stateful_set(
    namespace: &str,
    name: &str,
    images: &[&str],
    replicas: i32,
) -> Result<()> {
    use k8s_openapi::api::apps::v1::StatefulSet;
    use kube::{Api, Client};

    let client = Client::try_default().await?;
    let stateful_sets: Api<StatefulSet> = Api::namespaced(client, namespace);

    let stateful_set = serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSet",
        "metadata": { "name": name },
        "spec": {
            "replicas": replicas,
            "serviceName": name,
            "selector": { "matchLabels": { "app": name } },
            "template": pod_template(name, images),
        },
    });

    stateful_sets
        .create(
            &kube::api::PostParams::default(),
            &serde_json::from_value(stateful_set)?,
        )
        .await
        .context("Failed to create test statefulset")?;

    Ok(())
}

/// Helper to create a suspended CronJob so it never actually runs
pub async fn create_test_cron_job(
    namespace: &str,
    name: &str,
    schedule: &str,
    images: &[&str],
) -> Result<()> {
    use k8s_openapi::api::batch::v1::CronJob;
    use kube::{Api, Client};

    let client = Client::try_default().await?;
    let cron_jobs: Api<CronJob> = Api::namespaced(client, namespace);

    let mut template = pod_template(name, images);
    template["spec"]["restartPolicy"] = serde_json::json!("Never");

    let cron_job = serde_json::json!({
        "apiVersion": "batch/v1",
        "kind": "CronJob",
        "metadata": { "name": name },
        "spec": {
            "schedule": schedule,
            "suspend": true,
            "jobTemplate": { "spec": { "template": template } },
        },
    });

    cron_jobs
        .create(
            &kube::api::PostParams::default(),
            &serde_json::from_value(cron_job)?,
        )
        .await
        .context("Failed to create test cronjob")?;

    Ok(())
}

/// Helper to wait until a Deployment reports all replicas ready
pub async fn wait_for_deployment_ready(namespace: &str, name: &str) -> Result<()> {
    use k8s_openapi::api::apps::v1::Deployment;
    use kube::{Api, Client};
    use std::time::Duration;
    use tokio::time::sleep;

    let client = Client::try_default().await?;
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);

    for _ in 0..60 {
        let deployment = deployments.get(name).await?;

        let wanted = deployment
            .spec
            .as_ref()
            .and_then(|s| s.replicas)
            .unwrap_or(1);
        let ready = deployment
            .status
            .as_ref()
            .and_then(|s| s.ready_replicas)
            .unwrap_or(0);

        if ready >= wanted {
            return Ok(());
        }

        sleep(Duration::from_secs(1)).await;
    }

    anyhow::bail!("Deployment {} did not become ready in time", name)
}
