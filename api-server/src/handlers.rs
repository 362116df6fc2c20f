// Module declarations for HTTP handlers
pub mod health;
pub mod resources;
pub mod versions;

// Re-exports
pub use health::health_handler;
pub use resources::{
    list_cron_jobs_handler, list_deployments_handler, list_namespaces_handler,
    list_stateful_sets_handler,
};
pub use versions::{check_versions_handler, latest_version_handler};
