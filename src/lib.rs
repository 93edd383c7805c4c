pub mod cli;
pub mod config;
pub mod discovery;
pub mod ec2;
pub mod ecs;
pub mod error;
pub mod host;
pub mod snapshot;

pub use config::{DiscoveryConfig, UnresolvedHostPolicy};
pub use discovery::{DiscoveredNode, DiscoveryResolver};
pub use error::{DiscoveryError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
