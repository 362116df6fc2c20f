use crate::error::CommonError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// JSON `null` decodes to the type's default, like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn components_or_empty<'de, D>(deserializer: D) -> Result<Vec<KubernetesResource>, D::Error>
where
    D: Deserializer<'de>,
{
    let components: Option<Vec<Option<KubernetesResource>>> = Option::deserialize(deserializer)?;
    Ok(components
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Generic descriptor of a deployed component, as sent by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesResource {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub namespace: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
}

/// A component whose current version differs from the latest known one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionUpdate {
    pub kind: String,
    pub current_version: String,
    pub latest_version: String,
}

/// Body of a batch version check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionCheckRequest {
    #[serde(default, deserialize_with = "components_or_empty")]
    pub components: Vec<KubernetesResource>,
}

impl VersionCheckRequest {
    /// Decodes a request body; `null` anywhere reads as an empty value
    pub fn from_slice(body: &[u8]) -> Result<Self, CommonError> {
        let request: Option<Self> = serde_json::from_slice(body)?;
        Ok(request.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionCheckResponse {
    pub updates: Vec<VersionUpdate>,
}

/// Latest version lookup for a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVersionResponse {
    pub kind: String,
    pub name: String,
    pub latest_version: String,
    pub has_update: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    pub ready: i32,
    pub available: i32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub age: String,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJob {
    pub name: String,
    pub namespace: String,
    pub schedule: String,
    pub suspend: bool,
    pub active: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_run: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub age: String,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatefulSet {
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    pub ready: i32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub age: String,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}
