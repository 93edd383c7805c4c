use crate::ecs::types::{ContainerInstance, ContainerInstanceStatus, Task};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of a cluster-scoped ECS call.
///
/// A missing cluster is reported as a value, not as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterLookup<T> {
    Found(T),
    ClusterNotFound,
}

impl<T> ClusterLookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, ClusterLookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            ClusterLookup::Found(value) => Some(value),
            ClusterLookup::ClusterNotFound => None,
        }
    }
}

impl<T: Default> ClusterLookup<T> {
    pub fn into_found_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

/// The subset of the ECS API used for discovery.
///
/// Implementations return `ClusterLookup::ClusterNotFound` when ECS reports
/// `ClusterNotFoundException`; every other failure is an `Err`, normally
/// `DiscoveryError::EcsError`.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn list_container_instances(
        &self,
        cluster: &str,
        status: ContainerInstanceStatus,
    ) -> Result<ClusterLookup<Vec<String>>>;

    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instance_arns: &[String],
    ) -> Result<ClusterLookup<Vec<ContainerInstance>>>;

    async fn list_tasks(&self, cluster: &str) -> Result<ClusterLookup<Vec<String>>>;

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<ClusterLookup<Vec<Task>>>;
}

#[async_trait]
impl<T: Orchestrator + ?Sized> Orchestrator for Arc<T> {
    async fn list_container_instances(
        &self,
        cluster: &str,
        status: ContainerInstanceStatus,
    ) -> Result<ClusterLookup<Vec<String>>> {
        (**self).list_container_instances(cluster, status).await
    }

    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instance_arns: &[String],
    ) -> Result<ClusterLookup<Vec<ContainerInstance>>> {
        (**self)
            .describe_container_instances(cluster, container_instance_arns)
            .await
    }

    async fn list_tasks(&self, cluster: &str) -> Result<ClusterLookup<Vec<String>>> {
        (**self).list_tasks(cluster).await
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<ClusterLookup<Vec<Task>>> {
        (**self).describe_tasks(cluster, task_arns).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_lookup_found() {
        let lookup = ClusterLookup::Found(vec!["ci-1".to_string()]);
        assert!(lookup.is_found());
        assert_eq!(lookup.into_found_or_default(), vec!["ci-1".to_string()]);
    }

    #[test]
    fn test_cluster_lookup_not_found_defaults() {
        let lookup: ClusterLookup<Vec<String>> = ClusterLookup::ClusterNotFound;
        assert!(!lookup.is_found());
        assert!(lookup.into_found_or_default().is_empty());
    }
}
