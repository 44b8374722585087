//! Searchlite Server Binary
//!
//! Local, API-compatible stand-in for a hosted document-search service.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use clap::Parser;
use searchlite_server::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;

#[derive(Parser)]
#[command(name = "searchlite-server")]
#[command(about = "Local search API server backed by on-disk indexes")]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "9200")]
    port: u16,

    /// Root storage directory (one subdirectory per index)
    #[arg(short, long, default_value = ".searchlite")]
    data_dir: String,

    /// JSON file mapping replica index names to their targets
    #[arg(long)]
    replicas: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = ServerConfig::new(&args.host, args.port)
        .with_data_dir(&args.data_dir)
        .with_replicas_file(args.replicas.map(PathBuf::from));
    let addr: SocketAddr = config.socket_addr();

    tracing::info!("Storage root: {}", args.data_dir);

    let state = AppState::new(config).expect("Failed to initialize application state");
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Searchlite listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
