//! Person RPC server binary
//!
//! Run with: cargo run --bin person-server -- --help

use anyhow::Result;
use clap::Parser;
use person_rpc::server::{run_server, ServerConfig};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "person-server")]
#[command(about = "Person record gRPC server")]
struct Args {
    /// gRPC listen address
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen_addr: String,

    /// Per-request timeout in seconds (0 = only the client deadline applies)
    #[arg(long, default_value = "0")]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of worker threads for processing requests
    #[arg(long, default_value = "4")]
    worker_threads: usize,
}

async fn run_with_config(args: Args) -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = ServerConfig {
        listen_addr: args.listen_addr.clone(),
        request_timeout: (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs)),
    };

    tracing::info!("=== Person Server Configuration ===");
    tracing::info!("Worker threads: {}", args.worker_threads);
    tracing::info!("Listen address: {}", args.listen_addr);
    match config.request_timeout {
        Some(timeout) => tracing::info!("Request timeout: {:?}", timeout),
        None => tracing::info!("Request timeout: client deadline"),
    }
    tracing::info!("===================================");

    if let Err(e) = run_server(config).await {
        tracing::error!("failed to start app: {:#}", e);
        return Err(e);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let worker_threads = args.worker_threads;

    // Build tokio runtime with specified number of worker threads
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?
        .block_on(run_with_config(args))
}
