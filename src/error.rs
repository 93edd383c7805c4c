use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Failure of an `Orchestrator` call other than a missing cluster.
    #[error("ECS error: {0}")]
    EcsError(String),

    /// Failure of a `VmInventory` call.
    #[error("EC2 error: {0}")]
    Ec2Error(String),

    #[error(
        "EC2 instance {instance_id} is ambiguous or missing: expected 1 reservation with 1 instance, got {reservations} reservation(s) with {instances} instance(s)"
    )]
    AmbiguousInstance {
        instance_id: String,
        reservations: usize,
        instances: usize,
    },

    #[error("EC2 instance {0} has no private IP address")]
    MissingPrivateIp(String),

    #[error("Container instance {container_instance} for task {task} has no known host IP")]
    UnresolvedContainerInstance {
        task: String,
        container_instance: String,
    },

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to resolve local hostname: {0}")]
    LocalHostname(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
