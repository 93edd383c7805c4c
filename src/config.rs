use crate::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CLUSTER: &str = "default";
pub const DEFAULT_SERVICE_PORT: u16 = 5701;

pub const CLUSTERS_KEY: &str = "clusters";
pub const SERVICE_PORT_KEY: &str = "servicePort";
pub const LEGACY_PORT_KEY: &str = "hazelcastPort";
pub const UNRESOLVED_HOST_POLICY_KEY: &str = "unresolvedHostPolicy";

const KNOWN_KEYS: [&str; 4] = [
    CLUSTERS_KEY,
    SERVICE_PORT_KEY,
    LEGACY_PORT_KEY,
    UNRESOLVED_HOST_POLICY_KEY,
];

/// What to do with a running task whose container instance has no known host IP.
///
/// This happens when an instance deregisters between listing instances and
/// listing tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedHostPolicy {
    /// Log a warning and leave the task out of the result.
    #[default]
    Skip,
    /// Abort the whole discovery call.
    Fail,
}

impl FromStr for UnresolvedHostPolicy {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "skip" => Ok(UnresolvedHostPolicy::Skip),
            "fail" => Ok(UnresolvedHostPolicy::Fail),
            other => Err(DiscoveryError::ConfigError(format!(
                "unknown unresolved host policy '{}', expected 'skip' or 'fail'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DiscoveryConfig {
    #[serde(deserialize_with = "deserialize_clusters")]
    pub clusters: Vec<String>,
    #[serde(alias = "hazelcastPort")]
    pub service_port: u16,
    pub unresolved_host_policy: UnresolvedHostPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            clusters: vec![DEFAULT_CLUSTER.to_string()],
            service_port: DEFAULT_SERVICE_PORT,
            unresolved_host_policy: UnresolvedHostPolicy::default(),
        }
    }
}

impl DiscoveryConfig {
    pub fn new(clusters: Vec<String>, service_port: u16) -> Self {
        Self {
            clusters,
            service_port,
            ..Self::default()
        }
    }

    pub fn with_unresolved_host_policy(mut self, policy: UnresolvedHostPolicy) -> Self {
        self.unresolved_host_policy = policy;
        self
    }

    /// Builds a config from flat string properties, falling back to defaults for
    /// anything not set. Unknown keys are rejected.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        let mut unknown: Vec<&str> = properties
            .keys()
            .map(String::as_str)
            .filter(|key| !KNOWN_KEYS.contains(key))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(DiscoveryError::ConfigError(format!(
                "unknown configuration key(s): {}",
                unknown.join(", ")
            )));
        }

        let mut config = Self::default();

        if let Some(raw) = properties.get(CLUSTERS_KEY) {
            config.clusters = parse_clusters(raw)?;
        }

        let port = properties
            .get(SERVICE_PORT_KEY)
            .or_else(|| properties.get(LEGACY_PORT_KEY));
        if let Some(raw) = port {
            config.service_port = parse_port(raw)?;
        }

        if let Some(raw) = properties.get(UNRESOLVED_HOST_POLICY_KEY) {
            config.unresolved_host_policy = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clusters.is_empty() {
            return Err(DiscoveryError::ConfigError(
                "at least one cluster must be configured".to_string(),
            ));
        }
        if self.service_port == 0 {
            return Err(DiscoveryError::ConfigError(
                "service port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Splits a comma-delimited cluster list, trimming whitespace and dropping
/// empty entries. Duplicates are kept.
pub fn parse_clusters(raw: &str) -> Result<Vec<String>> {
    let clusters: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if clusters.is_empty() {
        return Err(DiscoveryError::ConfigError(format!(
            "no cluster names in '{}'",
            raw
        )));
    }

    Ok(clusters)
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| DiscoveryError::ConfigError(format!("invalid service port '{}': {}", raw, e)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClusterList {
    Delimited(String),
    List(Vec<String>),
}

fn deserialize_clusters<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match ClusterList::deserialize(deserializer)? {
        ClusterList::Delimited(raw) => parse_clusters(&raw).map_err(serde::de::Error::custom),
        ClusterList::List(list) => Ok(list),
    }
}
