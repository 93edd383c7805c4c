use crate::ec2::{private_ip_of, VmInventory};
use crate::ecs::{ClusterLookup, ContainerInstanceStatus, Orchestrator};
use crate::Result;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Container instance ARN -> private IP of the backing EC2 instance.
///
/// Built fresh for each cluster on every discovery call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceIpIndex {
    inner: HashMap<String, String>,
}

impl InstanceIpIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, container_instance_arn: String, private_ip: String) {
        self.inner.insert(container_instance_arn, private_ip);
    }

    pub fn get(&self, container_instance_arn: &str) -> Option<&str> {
        self.inner.get(container_instance_arn).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Maps every ACTIVE container instance in `cluster` to its private IP.
///
/// One EC2 lookup is issued per container instance. A missing cluster is
/// logged and yields an empty index.
pub async fn collect_instance_ips<O, V>(
    orchestrator: &O,
    inventory: &V,
    cluster: &str,
) -> Result<InstanceIpIndex>
where
    O: Orchestrator + ?Sized,
    V: VmInventory + ?Sized,
{
    match lookup_instance_ips(orchestrator, inventory, cluster).await? {
        ClusterLookup::Found(index) => Ok(index),
        ClusterLookup::ClusterNotFound => {
            warn!("ECS cluster {} was not found", cluster);
            Ok(InstanceIpIndex::new())
        }
    }
}

pub(crate) async fn lookup_instance_ips<O, V>(
    orchestrator: &O,
    inventory: &V,
    cluster: &str,
) -> Result<ClusterLookup<InstanceIpIndex>>
where
    O: Orchestrator + ?Sized,
    V: VmInventory + ?Sized,
{
    let mut index = InstanceIpIndex::new();

    let arns = match orchestrator
        .list_container_instances(cluster, ContainerInstanceStatus::Active)
        .await?
    {
        ClusterLookup::Found(arns) => arns,
        ClusterLookup::ClusterNotFound => return Ok(ClusterLookup::ClusterNotFound),
    };

    if arns.is_empty() {
        debug!("No active container instances in cluster {}", cluster);
        return Ok(ClusterLookup::Found(index));
    }

    let instances = match orchestrator
        .describe_container_instances(cluster, &arns)
        .await?
    {
        ClusterLookup::Found(instances) => instances,
        ClusterLookup::ClusterNotFound => return Ok(ClusterLookup::ClusterNotFound),
    };

    for instance in instances {
        let reservations = inventory.describe_instance(&instance.ec2_instance_id).await?;
        let ip = private_ip_of(&reservations, &instance.ec2_instance_id)?;

        debug!(
            "Mapped container instance {} -> {} ({})",
            instance.container_instance_arn, ip, instance.ec2_instance_id
        );

        index.insert(instance.container_instance_arn, ip);
    }

    Ok(ClusterLookup::Found(index))
}
