//! File-backed ECS and EC2 state.
//!
//! A snapshot is a YAML or JSON document listing clusters (container
//! instances and tasks) and EC2 instances. `SnapshotBackend` serves it through
//! the same traits as the live APIs, which makes offline dry runs possible:
//!
//! ```yaml
//! clusters:
//!   default:
//!     container_instances:
//!       - container_instance_arn: ci-1
//!         ec2_instance_id: i-1
//!     tasks:
//!       - task_arn: task-1
//!         container_instance_arn: ci-1
//!         last_status: RUNNING
//!         containers:
//!           - name: app
//!             network_bindings:
//!               - container_port: 5701
//!                 host_port: 32768
//! instances:
//!   - instance_id: i-1
//!     private_ip_address: 10.0.0.5
//! ```

use crate::ec2::{Instance, Reservation, VmInventory};
use crate::ecs::{ClusterLookup, ContainerInstance, ContainerInstanceStatus, Orchestrator, Task};
use crate::{DiscoveryError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub clusters: BTreeMap<String, ClusterSnapshot>,
    #[serde(default)]
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub container_instances: Vec<SnapshotContainerInstance>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotContainerInstance {
    pub container_instance_arn: String,
    pub ec2_instance_id: String,
    #[serde(default)]
    pub status: ContainerInstanceStatus,
}

impl From<&SnapshotContainerInstance> for ContainerInstance {
    fn from(instance: &SnapshotContainerInstance) -> Self {
        ContainerInstance {
            container_instance_arn: instance.container_instance_arn.clone(),
            ec2_instance_id: instance.ec2_instance_id.clone(),
        }
    }
}

pub struct SnapshotBackend {
    snapshot: Snapshot,
}

impl SnapshotBackend {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Loads a snapshot file. `.json` files are read as JSON, everything else
    /// as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading snapshot from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| {
            DiscoveryError::SnapshotError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let snapshot = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };

        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn cluster(&self, name: &str) -> Option<&ClusterSnapshot> {
        self.snapshot.clusters.get(name)
    }
}

#[async_trait]
impl Orchestrator for SnapshotBackend {
    async fn list_container_instances(
        &self,
        cluster: &str,
        status: ContainerInstanceStatus,
    ) -> Result<ClusterLookup<Vec<String>>> {
        Ok(match self.cluster(cluster) {
            Some(c) => ClusterLookup::Found(
                c.container_instances
                    .iter()
                    .filter(|ci| ci.status == status)
                    .map(|ci| ci.container_instance_arn.clone())
                    .collect(),
            ),
            None => ClusterLookup::ClusterNotFound,
        })
    }

    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instance_arns: &[String],
    ) -> Result<ClusterLookup<Vec<ContainerInstance>>> {
        Ok(match self.cluster(cluster) {
            Some(c) => ClusterLookup::Found(
                container_instance_arns
                    .iter()
                    .filter_map(|arn| {
                        c.container_instances
                            .iter()
                            .find(|ci| &ci.container_instance_arn == arn)
                    })
                    .map(ContainerInstance::from)
                    .collect(),
            ),
            None => ClusterLookup::ClusterNotFound,
        })
    }

    async fn list_tasks(&self, cluster: &str) -> Result<ClusterLookup<Vec<String>>> {
        Ok(match self.cluster(cluster) {
            Some(c) => ClusterLookup::Found(c.tasks.iter().map(|t| t.task_arn.clone()).collect()),
            None => ClusterLookup::ClusterNotFound,
        })
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<ClusterLookup<Vec<Task>>> {
        Ok(match self.cluster(cluster) {
            Some(c) => ClusterLookup::Found(
                task_arns
                    .iter()
                    .filter_map(|arn| c.tasks.iter().find(|t| &t.task_arn == arn))
                    .cloned()
                    .collect(),
            ),
            None => ClusterLookup::ClusterNotFound,
        })
    }
}

#[async_trait]
impl VmInventory for SnapshotBackend {
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<Reservation>> {
        let instances: Vec<Instance> = self
            .snapshot
            .instances
            .iter()
            .filter(|i| i.instance_id == instance_id)
            .cloned()
            .collect();

        if instances.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![Reservation { instances }])
    }
}
