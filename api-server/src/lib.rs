pub mod config;
pub mod error;
pub mod handlers;
pub mod kube;
pub mod server;
pub mod state;
pub mod versions;

// Re-exports for convenience
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use versions::{VersionChecker, VersionTable};
