//! Chamber daemon: entry point for running the voting API.

mod config;

use camara_chamber::Chamber;
use camara_rpc::RpcServer;
use camara_types::SystemClock;
use clap::Parser;
use config::DaemonConfig;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "camara-daemon", about = "Roll-call voting daemon for a legislative chamber")]
struct Cli {
    /// Path to a TOML configuration file (roster, window defaults, ports).
    /// CLI flags and env vars override values from the file.
    #[arg(long, env = "CAMARA_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind the HTTP API to.
    #[arg(long, env = "CAMARA_LISTEN_ADDR")]
    listen_addr: Option<IpAddr>,

    /// HTTP API port.
    #[arg(long, env = "CAMARA_PORT")]
    port: Option<u16>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CAMARA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CAMARA_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve the voting API.
    Serve,
    /// Validate the configuration and print the effective settings.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };

    let config = DaemonConfig {
        listen_addr: cli.listen_addr.unwrap_or(file_config.listen_addr),
        port: cli.port.unwrap_or(file_config.port),
        log_level: cli.log_level.unwrap_or(file_config.log_level.clone()),
        log_format: cli.log_format.unwrap_or(file_config.log_format.clone()),
        ..file_config
    };
    // Flags can override validated file values.
    config.validate()?;

    camara_utils::init_tracing(&config.log_level, &config.log_format);
    if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::CheckConfig => {
            println!("{}", config.to_toml_string()?);
        }
        Command::Serve => {
            let roster = config.roster();
            if roster.size() == 0 {
                tracing::warn!("roster is empty; no ballots can be cast");
            }
            if let Some(holder) = roster.casting_vote_holder() {
                tracing::info!("casting vote held by {}", holder.floor_name());
            }

            let chamber = Chamber::new(roster, Arc::new(SystemClock), config.chamber_params());
            let server = RpcServer::new(config.socket_addr(), Arc::new(chamber));
            server.start().await?;

            tracing::info!("camara daemon exited cleanly");
        }
    }

    Ok(())
}
