use crate::ec2::types::Reservation;
use crate::{DiscoveryError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// EC2 `DescribeInstances`, narrowed to a single instance id.
///
/// API failures are reported as `DiscoveryError::Ec2Error`.
#[async_trait]
pub trait VmInventory: Send + Sync {
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<Reservation>>;
}

#[async_trait]
impl<T: VmInventory + ?Sized> VmInventory for Arc<T> {
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<Reservation>> {
        (**self).describe_instance(instance_id).await
    }
}

/// Extracts the private IP from a single-instance `DescribeInstances` response.
///
/// The response must hold exactly one reservation containing exactly one instance.
pub fn private_ip_of(reservations: &[Reservation], instance_id: &str) -> Result<String> {
    let instance_count: usize = reservations.iter().map(|r| r.instances.len()).sum();

    let instance = match reservations {
        [reservation] if reservation.instances.len() == 1 => &reservation.instances[0],
        _ => {
            return Err(DiscoveryError::AmbiguousInstance {
                instance_id: instance_id.to_string(),
                reservations: reservations.len(),
                instances: instance_count,
            })
        }
    };

    instance
        .private_ip_address
        .clone()
        .ok_or_else(|| DiscoveryError::MissingPrivateIp(instance_id.to_string()))
}
