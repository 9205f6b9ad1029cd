//! etcdpod CLI
//!
//! Generates the local etcd static pod manifest for a control-plane node

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use etcdpod::logging::LoggingConfig;
use etcdpod::output::{self, OutputFormat};
use etcdpod::{config, constants, etcd, manifest};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also write JSON logs to this directory, rotated daily
    #[arg(long, global = true, env = "ETCDPOD_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Cluster configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the etcd static pod manifest
    Manifest {
        #[command(flatten)]
        config: ConfigArgs,
        /// Directory watched by the kubelet for static pods
        #[arg(long, default_value = constants::DEFAULT_MANIFESTS_DIR)]
        manifests_dir: PathBuf,
    },
    /// Print the etcd pod without writing it
    Print {
        #[command(flatten)]
        config: ConfigArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,
    },
    /// Print the etcd command line, one argument per line
    #[command(name = "command")]
    Cmdline {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = LoggingConfig {
        level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    }
    .init()
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Manifest {
            config,
            manifests_dir,
        } => {
            let cfg = load_config(&config)?;
            let path = manifest::create_local_etcd_static_pod_manifest_file(&manifests_dir, &cfg)
                .with_context(|| {
                    format!("Failed to create etcd manifest in {}", manifests_dir.display())
                })?;
            println!("{}", path.display());
        }
        Commands::Print { config, output: format } => {
            let cfg = load_config(&config)?;
            let pod = etcd::etcd_pod_spec(&cfg)?;
            print!("{}", output::render(&pod, format)?);
        }
        Commands::Cmdline { config } => {
            let cfg = load_config(&config)?;
            for arg in etcd::etcd_command(&cfg)? {
                println!("{}", arg);
            }
        }
    }

    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<etcdpod::ClusterConfiguration> {
    config::load(args.config.as_deref()).context("Failed to load cluster configuration")
}
