// Re-export commonly used items
pub mod error;
pub mod image;
pub mod types;

// Convenience re-exports
pub use error::CommonError;
pub use types::{
    CronJob, Deployment, KubernetesResource, LatestVersionResponse, Namespace, StatefulSet,
    VersionCheckRequest, VersionCheckResponse, VersionUpdate,
};
