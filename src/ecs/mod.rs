pub mod client;
pub mod types;

pub use client::{ClusterLookup, Orchestrator};
pub use types::{Container, ContainerInstance, ContainerInstanceStatus, NetworkBinding, Task};
