//! Hwimport Daemon - Main entry point
//!
//! Serves the discoverer catalog and the import screen frontend.

mod api;
mod config;
mod server;
mod state;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "hwimport")]
#[command(about = "Hardware import catalog daemon")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "hwimport.toml")]
    config: PathBuf,

    /// Bind address for web server
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the configured discoverers and exit
    #[arg(long)]
    list: bool,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Hwimport v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_config(&args.config)?;

    if let Some(bind) = args.bind {
        config.daemon.bind = bind;
    }

    info!(
        discoverers = config.discoverers.len(),
        bind = %config.daemon.bind,
        "Configuration loaded"
    );

    if args.list {
        println!("{} discoverers:", config.discoverers.len());
        for discoverer in &config.discoverers {
            println!("  - {} ({}) [{}]", discoverer.name, discoverer.id, discoverer.kind);
            if let Some(info) = &discoverer.pre_scan_info {
                println!("    {}", info);
            }
            for field in &discoverer.ui_fields {
                println!(
                    "    field {}: {}{}",
                    field.id,
                    field.label,
                    if field.required { " (required)" } else { "" }
                );
            }
        }
        return Ok(());
    }

    let bind = config.daemon.bind.clone();
    let tls = config.daemon.tls.clone();
    let state = state::AppState::new(config);
    server::run(state, &bind, tls.as_ref()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_args_bind_override() {
        let args = Args::parse_from(["hwimport", "--bind", "127.0.0.1:9000", "--list"]);
        assert_eq!(args.bind.as_deref(), Some("127.0.0.1:9000"));
        assert!(args.list);
        assert_eq!(args.config, PathBuf::from("hwimport.toml"));
    }
}
