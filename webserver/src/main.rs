//! WebServer entry point
//!
//! Wires the in-memory store and token-bucket limiter into the lead
//! coordinators and serves the REST API.

use clap::Parser;
use leads::{MemoryStore, TokenBucketLimiter};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use webserver::{build_router, AppState, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Buyer-lead intake API server")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();
    shared::logging::init_tracing(Some(&args.log_level));

    let store = Arc::new(MemoryStore::new());
    let limiter = Arc::new(TokenBucketLimiter::new());
    let state = AppState::new(store, limiter);
    let router = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("bad bind address: {e}"))
        })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("lead API listening on http://{addr}");

    axum::serve(listener, router).await?;
    Ok(())
}
