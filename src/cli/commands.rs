use crate::cli::{Commands, OutputFormat};
use crate::config::{parse_clusters, DiscoveryConfig};
use crate::discovery::{DiscoveredNode, DiscoveryResolver};
use crate::snapshot::SnapshotBackend;
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub async fn handle_command(command: Commands, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Discover {
            snapshot,
            clusters,
            port,
            format,
        } => {
            let config = effective_config(config_path.as_deref(), clusters.as_deref(), port)?;
            handle_discover(config, &snapshot, format).await
        }
        Commands::Config => {
            let config = effective_config(config_path.as_deref(), None, None)?;
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

/// Loads the config file if given, then applies command-line overrides.
pub fn effective_config(
    config_path: Option<&Path>,
    clusters: Option<&str>,
    port: Option<u16>,
) -> Result<DiscoveryConfig> {
    let mut config = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            DiscoveryConfig::from_yaml_file(path)?
        }
        None => DiscoveryConfig::default(),
    };

    if let Some(raw) = clusters {
        config.clusters = parse_clusters(raw)?;
    }
    if let Some(port) = port {
        config.service_port = port;
    }

    config.validate()?;
    Ok(config)
}

async fn handle_discover(
    config: DiscoveryConfig,
    snapshot: &Path,
    format: OutputFormat,
) -> Result<()> {
    info!(
        "Discovering port {} in clusters: {}",
        config.service_port,
        config.clusters.join(", ")
    );

    let backend = Arc::new(SnapshotBackend::load(snapshot)?);
    let resolver = DiscoveryResolver::new(config, backend.clone(), backend);

    let nodes = resolver.discover_nodes().await?;
    println!("{}", render_nodes(&nodes, format)?);

    Ok(())
}

pub fn render_nodes(nodes: &[DiscoveredNode], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(nodes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(nodes)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_over_defaults() {
        let config = effective_config(None, Some("a,b"), Some(6000)).unwrap();
        assert_eq!(config.clusters, vec!["a", "b"]);
        assert_eq!(config.service_port, 6000);
    }

    #[test]
    fn test_zero_port_override_rejected() {
        assert!(effective_config(None, None, Some(0)).is_err());
    }

    #[test]
    fn test_render_text_and_json() {
        let nodes = vec![
            DiscoveredNode::new("10.0.0.5".parse().unwrap(), 32768),
            DiscoveredNode::new("10.0.0.6".parse().unwrap(), 32769),
        ];

        assert_eq!(
            render_nodes(&nodes, OutputFormat::Text).unwrap(),
            "10.0.0.5:32768\n10.0.0.6:32769"
        );

        let json = render_nodes(&nodes, OutputFormat::Json).unwrap();
        let parsed: Vec<DiscoveredNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, nodes);
    }
}
