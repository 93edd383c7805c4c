pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecs-discovery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover cluster peers from ECS task and EC2 instance state", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Discovery config file (YAML)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Resolve peer endpoints")]
    Discover {
        #[arg(short, long, help = "ECS/EC2 state snapshot (YAML or JSON)")]
        snapshot: PathBuf,

        #[arg(long, help = "Comma-separated cluster names")]
        clusters: Option<String>,

        #[arg(short, long, help = "Container port of the service")]
        port: Option<u16>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
        format: OutputFormat,
    },
    #[command(about = "Print the effective discovery configuration")]
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
