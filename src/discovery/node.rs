use crate::host::LocalHost;
use crate::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

/// A peer endpoint: the host IP of a container instance and the host port
/// bound to the service's container port. Duplicates are meaningful and kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscoveredNode {
    pub ip: IpAddr,
    pub port: u16,
}

impl DiscoveredNode {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl From<DiscoveredNode> for SocketAddr {
    fn from(node: DiscoveredNode) -> Self {
        node.socket_addr()
    }
}

impl std::fmt::Display for DiscoveredNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

/// Turns a host IP and host port into a node, logging the find.
///
/// An unparsable IP or an unresolvable local hostname is fatal to the caller.
pub fn assemble_node<H: LocalHost + ?Sized>(
    local_host: &H,
    host_ip: &str,
    host_port: u16,
) -> Result<DiscoveredNode> {
    let hostname = local_host.hostname()?;

    let ip: IpAddr = host_ip
        .trim()
        .parse()
        .map_err(|e: std::net::AddrParseError| DiscoveryError::InvalidAddress {
            address: host_ip.to_string(),
            reason: e.to_string(),
        })?;

    info!(
        "found service container from {} running at {}:{}",
        hostname, ip, host_port
    );

    Ok(DiscoveredNode::new(ip, host_port))
}
