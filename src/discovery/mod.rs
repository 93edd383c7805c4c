//! Peer discovery from ECS task state.
//!
//! For each configured cluster the resolver:
//! - maps active container instances to their EC2 private IPs
//! - lists the cluster's RUNNING tasks
//! - keeps the bindings whose container port is the service port
//! - pairs each binding's host port with the task's host IP
//!
//! Clusters are resolved one after another, and every call goes back to the
//! live APIs.

pub mod instances;
pub mod node;
pub mod tasks;

pub use instances::{collect_instance_ips, InstanceIpIndex};
pub use node::{assemble_node, DiscoveredNode};
pub use tasks::{collect_running_tasks, matching_bindings};

use crate::config::{DiscoveryConfig, UnresolvedHostPolicy};
use crate::ec2::VmInventory;
use crate::ecs::Orchestrator;
use crate::host::{LocalHost, SystemHost};
use crate::{DiscoveryError, Result};
use tracing::{debug, info, warn};

pub struct DiscoveryResolver<O, V, H = SystemHost> {
    config: DiscoveryConfig,
    orchestrator: O,
    inventory: V,
    local_host: H,
}

impl<O, V> DiscoveryResolver<O, V, SystemHost>
where
    O: Orchestrator,
    V: VmInventory,
{
    pub fn new(config: DiscoveryConfig, orchestrator: O, inventory: V) -> Self {
        Self::with_local_host(config, orchestrator, inventory, SystemHost)
    }
}

impl<O, V, H> DiscoveryResolver<O, V, H>
where
    O: Orchestrator,
    V: VmInventory,
    H: LocalHost,
{
    pub fn with_local_host(
        config: DiscoveryConfig,
        orchestrator: O,
        inventory: V,
        local_host: H,
    ) -> Self {
        Self {
            config,
            orchestrator,
            inventory,
            local_host,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Resolves every configured cluster and concatenates the results.
    ///
    /// Any error aborts the whole call; nodes already found are discarded.
    pub async fn discover_nodes(&self) -> Result<Vec<DiscoveredNode>> {
        let mut discovered = Vec::new();

        for cluster in &self.config.clusters {
            let nodes = self
                .collect_nodes_for_cluster(cluster, self.config.service_port)
                .await?;
            discovered.extend(nodes);
        }

        info!(
            "Discovered {} node(s) across {} cluster(s)",
            discovered.len(),
            self.config.clusters.len()
        );

        Ok(discovered)
    }

    pub async fn collect_nodes_for_cluster(
        &self,
        cluster: &str,
        port: u16,
    ) -> Result<Vec<DiscoveredNode>> {
        debug!("Resolving nodes for cluster {} on port {}", cluster, port);

        // The index must be complete before any task is looked up in it.
        let instance_ips =
            instances::lookup_instance_ips(&self.orchestrator, &self.inventory, cluster).await?;
        let running_tasks = tasks::lookup_running_tasks(&self.orchestrator, cluster).await?;

        if !instance_ips.is_found() || !running_tasks.is_found() {
            warn!("ECS cluster {} was not found", cluster);
        }

        let instance_ips = instance_ips.into_found_or_default();
        let running_tasks = running_tasks.into_found_or_default();

        let mut nodes = Vec::new();

        for task in &running_tasks {
            let bindings = matching_bindings(task, port);
            if bindings.is_empty() {
                continue;
            }

            let host_ip = match instance_ips.get(&task.container_instance_arn) {
                Some(ip) => ip,
                None => match self.config.unresolved_host_policy {
                    UnresolvedHostPolicy::Skip => {
                        warn!(
                            "Skipping task {}: container instance {} has no known host IP",
                            task.task_arn, task.container_instance_arn
                        );
                        continue;
                    }
                    UnresolvedHostPolicy::Fail => {
                        return Err(DiscoveryError::UnresolvedContainerInstance {
                            task: task.task_arn.clone(),
                            container_instance: task.container_instance_arn.clone(),
                        });
                    }
                },
            };

            for binding in bindings {
                nodes.push(assemble_node(&self.local_host, host_ip, binding.host_port)?);
            }
        }

        Ok(nodes)
    }
}
