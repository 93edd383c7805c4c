use crate::ecs::{ClusterLookup, NetworkBinding, Orchestrator, Task};
use crate::Result;
use tracing::{debug, warn};

/// Lists the tasks of `cluster` whose last status is exactly `RUNNING`.
///
/// A missing cluster is logged and yields no tasks.
pub async fn collect_running_tasks<O>(orchestrator: &O, cluster: &str) -> Result<Vec<Task>>
where
    O: Orchestrator + ?Sized,
{
    match lookup_running_tasks(orchestrator, cluster).await? {
        ClusterLookup::Found(tasks) => Ok(tasks),
        ClusterLookup::ClusterNotFound => {
            warn!("ECS cluster {} was not found", cluster);
            Ok(Vec::new())
        }
    }
}

/// No describe call is made when the cluster has no tasks.
pub(crate) async fn lookup_running_tasks<O>(
    orchestrator: &O,
    cluster: &str,
) -> Result<ClusterLookup<Vec<Task>>>
where
    O: Orchestrator + ?Sized,
{
    let task_arns = match orchestrator.list_tasks(cluster).await? {
        ClusterLookup::Found(arns) => arns,
        ClusterLookup::ClusterNotFound => return Ok(ClusterLookup::ClusterNotFound),
    };

    if task_arns.is_empty() {
        debug!("No tasks in cluster {}", cluster);
        return Ok(ClusterLookup::Found(Vec::new()));
    }

    let tasks = match orchestrator.describe_tasks(cluster, &task_arns).await? {
        ClusterLookup::Found(tasks) => tasks,
        ClusterLookup::ClusterNotFound => return Ok(ClusterLookup::ClusterNotFound),
    };

    let running: Vec<Task> = tasks.into_iter().filter(Task::is_running).collect();

    debug!(
        "{} of {} tasks running in cluster {}",
        running.len(),
        task_arns.len(),
        cluster
    );

    Ok(ClusterLookup::Found(running))
}

/// Every binding across the task's containers whose container port is `port`,
/// in container then binding order.
pub fn matching_bindings(task: &Task, port: u16) -> Vec<&NetworkBinding> {
    task.containers
        .iter()
        .flat_map(|container| container.network_bindings.iter())
        .filter(|binding| binding.container_port == port)
        .collect()
}
