use crate::kube::{ClusterOperations, ResourceLister};
use crate::versions::VersionChecker;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// This wrapper provides a concrete type for Axum's state management,
/// avoiding issues with trait object types in the type system.
#[derive(Clone)]
pub struct AppState {
    pub lister: Arc<ResourceLister<dyn ClusterOperations>>,
    pub versions: Arc<VersionChecker>,
}

impl AppState {
    pub fn new(
        lister: Arc<ResourceLister<dyn ClusterOperations>>,
        versions: Arc<VersionChecker>,
    ) -> Self {
        Self { lister, versions }
    }
}
