// Module declarations for Kubernetes abstractions
pub mod client;
pub mod lister;
pub mod mock;
pub mod normalize;
pub mod traits;

// Re-exports for convenience
pub use client::KubeClient;
pub use lister::ResourceLister;
pub use mock::MockClusterOperations;
pub use traits::ClusterOperations;
