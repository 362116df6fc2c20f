use common::{CommonError, KubernetesResource, VersionUpdate};
use std::collections::HashMap;
use std::str::FromStr;

/// Latest version reported for every kind in the default table
pub const DEFAULT_LATEST_VERSION: &str = "1.28.0";

/// Mapping from resource kind to the latest version known for it
///
/// There is no upstream feed behind this table: it is either the built-in
/// default or whatever `LATEST_VERSIONS` provides at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    latest: HashMap<String, String>,
}

impl VersionTable {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            latest: entries
                .into_iter()
                .map(|(kind, version)| (kind.into(), version.into()))
                .collect(),
        }
    }

    /// Latest version for a kind, if the table knows it
    pub fn latest(&self, kind: &str) -> Option<&str> {
        self.latest.get(kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

impl Default for VersionTable {
    fn default() -> Self {
        Self::new([
            ("Deployment", DEFAULT_LATEST_VERSION),
            ("StatefulSet", DEFAULT_LATEST_VERSION),
            ("CronJob", DEFAULT_LATEST_VERSION),
        ])
    }
}

/// Parses `Kind=version,Kind=version`
impl FromStr for VersionTable {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut latest = HashMap::new();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (kind, version) = entry.split_once('=').ok_or_else(|| {
                CommonError::InvalidData(format!("expected Kind=version, got '{}'", entry))
            })?;

            let (kind, version) = (kind.trim(), version.trim());
            if kind.is_empty() || version.is_empty() {
                return Err(CommonError::InvalidData(format!(
                    "empty kind or version in '{}'",
                    entry
                )));
            }

            latest.insert(kind.to_string(), version.to_string());
        }

        Ok(Self { latest })
    }
}

/// Compares caller-supplied component versions against a [`VersionTable`]
#[derive(Debug, Clone, Default)]
pub struct VersionChecker {
    table: VersionTable,
}

impl VersionChecker {
    pub fn new(table: VersionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &VersionTable {
        &self.table
    }

    /// Returns `(latest_version, has_update)` for one component.
    ///
    /// Unknown kinds yield `("", false)`.
    pub fn check(&self, kind: &str, current_version: &str) -> (String, bool) {
        match self.table.latest(kind) {
            Some(latest) => (latest.to_string(), latest != current_version),
            None => (String::new(), false),
        }
    }

    pub fn check_component(&self, component: &KubernetesResource) -> (String, bool) {
        self.check(&component.kind, &component.version)
    }

    /// Batch check over a list of components.
    ///
    /// Components are grouped by kind and the last version seen for a kind
    /// wins. Updates come out in the order each kind first appeared.
    pub fn check_all(&self, components: &[KubernetesResource]) -> Vec<VersionUpdate> {
        let mut current: Vec<(&str, &str)> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();

        for component in components {
            let kind = component.kind.as_str();
            let version = component.version.as_str();
            match position.get(kind) {
                Some(&idx) => current[idx].1 = version,
                None => {
                    position.insert(kind, current.len());
                    current.push((kind, version));
                }
            }
        }

        let updates: Vec<VersionUpdate> = current
            .into_iter()
            .filter_map(|(kind, current_version)| {
                let latest = self.table.latest(kind)?;
                (latest != current_version).then(|| VersionUpdate {
                    kind: kind.to_string(),
                    current_version: current_version.to_string(),
                    latest_version: latest.to_string(),
                })
            })
            .collect();

        tracing::debug!(
            "Checked {} components, {} updates available",
            components.len(),
            updates.len()
        );

        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(kind: &str, version: &str) -> KubernetesResource {
        KubernetesResource {
            kind: kind.to_string(),
            name: format!("{}-app", kind.to_lowercase()),
            namespace: "default".to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn test_default_table() {
        let table = VersionTable::default();
        assert_eq!(table.len(), 3);
        assert_eq!(table.latest("Deployment"), Some("1.28.0"));
        assert_eq!(table.latest("StatefulSet"), Some("1.28.0"));
        assert_eq!(table.latest("CronJob"), Some("1.28.0"));
        assert_eq!(table.latest("DaemonSet"), None);
    }

    #[test]
    fn test_parse_table() {
        let table: VersionTable = "Deployment=2.0.0, CronJob = 1.9.1".parse().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.latest("Deployment"), Some("2.0.0"));
        assert_eq!(table.latest("CronJob"), Some("1.9.1"));
        assert_eq!(table.latest("StatefulSet"), None);
    }

    #[test]
    fn test_parse_table_rejects_malformed_entries() {
        assert!("Deployment".parse::<VersionTable>().is_err());
        assert!("=1.0.0".parse::<VersionTable>().is_err());
        assert!("Deployment=".parse::<VersionTable>().is_err());
    }

    #[test]
    fn test_parse_empty_table() {
        let table: VersionTable = "".parse().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_batch_reports_outdated_component() {
        let checker = VersionChecker::default();

        let updates = checker.check_all(&[component("Deployment", "1.27.0")]);

        assert_eq!(
            updates,
            vec![VersionUpdate {
                kind: "Deployment".to_string(),
                current_version: "1.27.0".to_string(),
                latest_version: "1.28.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_batch_up_to_date_component() {
        let checker = VersionChecker::default();
        let updates = checker.check_all(&[component("Deployment", "1.28.0")]);
        assert!(updates.is_empty());
    }

    #[test]
    fn test_batch_skips_unknown_kinds() {
        let checker = VersionChecker::default();
        let updates = checker.check_all(&[component("DaemonSet", "0.1.0")]);
        assert!(updates.is_empty());
    }

    #[test]
    fn test_batch_last_version_per_kind_wins() {
        let checker = VersionChecker::default();

        let updates = checker.check_all(&[
            component("Deployment", "1.20.0"),
            component("Deployment", "1.28.0"),
        ]);
        assert!(updates.is_empty());

        let updates = checker.check_all(&[
            component("Deployment", "1.28.0"),
            component("Deployment", "1.21.0"),
        ]);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].current_version, "1.21.0");
    }

    #[test]
    fn test_batch_order_follows_first_appearance() {
        let checker = VersionChecker::default();

        let updates = checker.check_all(&[
            component("StatefulSet", "1.0.0"),
            component("CronJob", "1.0.0"),
            component("Deployment", "1.0.0"),
            component("StatefulSet", "1.1.0"),
        ]);

        let kinds: Vec<&str> = updates.iter().map(|u| u.kind.as_str()).collect();
        assert_eq!(kinds, vec!["StatefulSet", "CronJob", "Deployment"]);
        assert_eq!(updates[0].current_version, "1.1.0");
    }

    #[test]
    fn test_single_check_unknown_kind() {
        let checker = VersionChecker::default();
        assert_eq!(checker.check("Unknown", ""), (String::new(), false));
    }

    #[test]
    fn test_single_check_outdated() {
        let checker = VersionChecker::default();
        assert_eq!(
            checker.check("CronJob", "1.0.0"),
            ("1.28.0".to_string(), true)
        );
        assert_eq!(
            checker.check_component(&component("StatefulSet", "1.28.0")),
            ("1.28.0".to_string(), false)
        );
    }

    #[test]
    fn test_injected_table() {
        let checker = VersionChecker::new(VersionTable::new([("Deployment", "3.1.0")]));

        assert_eq!(
            checker.check("Deployment", "1.28.0"),
            ("3.1.0".to_string(), true)
        );
        assert_eq!(checker.check("CronJob", "1.0.0"), (String::new(), false));
    }
}
