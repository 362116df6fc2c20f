use api_server::{kube, server, Config, VersionChecker};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    tracing::info!("Inventory API starting");
    tracing::info!("Port: {}", config.port);
    tracing::info!("Control plane timeout: {:?}", config.request_timeout);
    tracing::info!(
        "Latest version table has {} entries",
        config.latest_versions.len()
    );

    // Initialize Kubernetes client
    tracing::info!("Connecting to Kubernetes...");
    let kube_client = kube::KubeClient::new().await?;
    tracing::info!("Connected to Kubernetes");

    // Create lister with dynamic dispatch
    let lister = Arc::new(kube::ResourceLister::new(
        Arc::new(kube_client) as Arc<dyn kube::ClusterOperations>,
        config.request_timeout,
    ));
    let versions = Arc::new(VersionChecker::new(config.latest_versions.clone()));

    // Create application state
    let state = api_server::AppState::new(lister, versions);

    // Build HTTP server
    let app = server::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Inventory API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
