#![allow(dead_code)]

use async_trait::async_trait;
use ecs_discovery::ec2::{Instance, Reservation, VmInventory};
use ecs_discovery::ecs::{
    ClusterLookup, Container, ContainerInstance, ContainerInstanceStatus, NetworkBinding,
    Orchestrator, Task,
};
use ecs_discovery::host::LocalHost;
use ecs_discovery::{DiscoveryError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct CallCounts {
    pub list_container_instances: AtomicUsize,
    pub describe_container_instances: AtomicUsize,
    pub list_tasks: AtomicUsize,
    pub describe_tasks: AtomicUsize,
    pub describe_instance: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[derive(Default, Clone)]
pub struct FakeCluster {
    pub instances: Vec<ContainerInstance>,
    pub tasks: Vec<Task>,
}

/// In-memory ECS and EC2 with per-call counters.
#[derive(Default)]
pub struct FakeAws {
    pub clusters: HashMap<String, FakeCluster>,
    pub ec2: HashMap<String, Vec<Reservation>>,
    pub fail_list_tasks: bool,
    pub fail_describe_instance: bool,
    /// Clusters that list normally but vanish before the describe calls.
    pub not_found_on_describe: HashSet<String>,
    pub calls: CallCounts,
    pub requested_statuses: Mutex<Vec<ContainerInstanceStatus>>,
    pub clusters_seen: Mutex<Vec<String>>,
}

impl FakeAws {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, name: &str, cluster: FakeCluster) -> Self {
        self.clusters.insert(name.to_string(), cluster);
        self
    }

    pub fn with_ec2_instance(mut self, instance_id: &str, ip: &str) -> Self {
        self.ec2.insert(
            instance_id.to_string(),
            vec![Reservation {
                instances: vec![Instance {
                    instance_id: instance_id.to_string(),
                    private_ip_address: Some(ip.to_string()),
                }],
            }],
        );
        self
    }

    pub fn with_ec2_reservations(mut self, instance_id: &str, reservations: Vec<Reservation>) -> Self {
        self.ec2.insert(instance_id.to_string(), reservations);
        self
    }

    pub fn with_cluster_gone_on_describe(mut self, name: &str) -> Self {
        self.not_found_on_describe.insert(name.to_string());
        self
    }

    fn lookup<T>(&self, cluster: &str, f: impl FnOnce(&FakeCluster) -> T) -> ClusterLookup<T> {
        match self.clusters.get(cluster) {
            Some(c) => ClusterLookup::Found(f(c)),
            None => ClusterLookup::ClusterNotFound,
        }
    }
}

#[async_trait]
impl Orchestrator for FakeAws {
    async fn list_container_instances(
        &self,
        cluster: &str,
        status: ContainerInstanceStatus,
    ) -> Result<ClusterLookup<Vec<String>>> {
        self.calls
            .list_container_instances
            .fetch_add(1, Ordering::SeqCst);
        self.requested_statuses.lock().unwrap().push(status);
        self.clusters_seen.lock().unwrap().push(cluster.to_string());

        Ok(self.lookup(cluster, |c| {
            c.instances
                .iter()
                .map(|i| i.container_instance_arn.clone())
                .collect()
        }))
    }

    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instance_arns: &[String],
    ) -> Result<ClusterLookup<Vec<ContainerInstance>>> {
        self.calls
            .describe_container_instances
            .fetch_add(1, Ordering::SeqCst);

        if self.not_found_on_describe.contains(cluster) {
            return Ok(ClusterLookup::ClusterNotFound);
        }

        Ok(self.lookup(cluster, |c| {
            c.instances
                .iter()
                .filter(|i| container_instance_arns.contains(&i.container_instance_arn))
                .cloned()
                .collect()
        }))
    }

    async fn list_tasks(&self, cluster: &str) -> Result<ClusterLookup<Vec<String>>> {
        self.calls.list_tasks.fetch_add(1, Ordering::SeqCst);

        if self.fail_list_tasks {
            return Err(DiscoveryError::EcsError("throttled".to_string()));
        }

        Ok(self.lookup(cluster, |c| {
            c.tasks.iter().map(|t| t.task_arn.clone()).collect()
        }))
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<ClusterLookup<Vec<Task>>> {
        self.calls.describe_tasks.fetch_add(1, Ordering::SeqCst);

        if self.not_found_on_describe.contains(cluster) {
            return Ok(ClusterLookup::ClusterNotFound);
        }

        Ok(self.lookup(cluster, |c| {
            c.tasks
                .iter()
                .filter(|t| task_arns.contains(&t.task_arn))
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl VmInventory for FakeAws {
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<Reservation>> {
        self.calls.describe_instance.fetch_add(1, Ordering::SeqCst);

        if self.fail_describe_instance {
            return Err(DiscoveryError::Ec2Error("RequestLimitExceeded".to_string()));
        }

        Ok(self.ec2.get(instance_id).cloned().unwrap_or_default())
    }
}

pub struct FixedHost(pub Option<&'static str>);

impl LocalHost for FixedHost {
    fn hostname(&self) -> Result<String> {
        self.0
            .map(str::to_string)
            .ok_or_else(|| DiscoveryError::LocalHostname("lookup failed".to_string()))
    }
}

pub fn container_instance(arn: &str, ec2_instance_id: &str) -> ContainerInstance {
    ContainerInstance {
        container_instance_arn: arn.to_string(),
        ec2_instance_id: ec2_instance_id.to_string(),
    }
}

pub fn task(arn: &str, container_instance_arn: &str, status: &str, bindings: &[(u16, u16)]) -> Task {
    Task {
        task_arn: arn.to_string(),
        container_instance_arn: container_instance_arn.to_string(),
        last_status: status.to_string(),
        containers: vec![Container {
            name: "app".to_string(),
            network_bindings: bindings
                .iter()
                .map(|&(container_port, host_port)| NetworkBinding {
                    container_port,
                    host_port,
                })
                .collect(),
        }],
    }
}

/// One instance `ci-1` on `i-1` at `10.0.0.5` with a single task.
pub fn single_task_cluster(status: &str, bindings: &[(u16, u16)]) -> FakeCluster {
    FakeCluster {
        instances: vec![container_instance("ci-1", "i-1")],
        tasks: vec![task("task-1", "ci-1", status, bindings)],
    }
}
