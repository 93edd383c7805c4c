use crate::{DiscoveryError, Result};

/// Resolves the name of the machine running discovery.
pub trait LocalHost: Send + Sync {
    fn hostname(&self) -> Result<String>;
}

/// Reads the hostname from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl LocalHost for SystemHost {
    fn hostname(&self) -> Result<String> {
        let name = hostname::get().map_err(|e| DiscoveryError::LocalHostname(e.to_string()))?;

        name.into_string().map_err(|raw| {
            DiscoveryError::LocalHostname(format!(
                "hostname is not valid UTF-8: {}",
                raw.to_string_lossy()
            ))
        })
    }
}
