use crate::versions::VersionTable;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Deadline for a single control-plane list call
    pub request_timeout: Duration,
    pub latest_versions: VersionTable,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let latest_versions = match env::var("LATEST_VERSIONS") {
            Ok(raw) => raw.parse()?,
            Err(_) => VersionTable::default(),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            request_timeout: Duration::from_secs(
                env::var("KUBE_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
            ),
            latest_versions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("PORT");
        env::remove_var("RUST_LOG");
        env::remove_var("KUBE_REQUEST_TIMEOUT_SECS");
        env::remove_var("LATEST_VERSIONS");
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.latest_versions, VersionTable::default());
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom() {
        env::set_var("PORT", "9090");
        env::set_var("RUST_LOG", "debug");
        env::set_var("KUBE_REQUEST_TIMEOUT_SECS", "5");
        env::set_var("LATEST_VERSIONS", "Deployment=1.30.0");

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.latest_versions.latest("Deployment"), Some("1.30.0"));
        assert_eq!(config.latest_versions.latest("CronJob"), None);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_invalid_port() {
        env::set_var("PORT", "invalid");

        let result = Config::from_env();
        assert!(result.is_err());

        env::remove_var("PORT");
    }

    #[test]
    #[serial]
    fn test_config_invalid_timeout() {
        env::set_var("KUBE_REQUEST_TIMEOUT_SECS", "soon");

        let result = Config::from_env();
        assert!(result.is_err());

        env::remove_var("KUBE_REQUEST_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_config_invalid_latest_versions() {
        env::set_var("LATEST_VERSIONS", "Deployment");

        let result = Config::from_env();
        assert!(result.is_err());

        env::remove_var("LATEST_VERSIONS");
    }
}
