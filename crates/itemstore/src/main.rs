use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};

use itemstore::{
    app::create_app,
    config::Config,
    logging::{init_tracing, DEFAULT_LOG_FILTER},
    state::AppState,
    storage::InMemoryRepository,
};
use itemstore_core::storage::ItemRepository;

/// Item store - multi-tenant item API (local dev server)
#[derive(Parser, Debug)]
#[command(name = "itemstore")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    /// Storage backend
    #[arg(long, value_enum, default_value_t = Storage::Memory, env = "STORAGE")]
    storage: Storage,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Storage {
    /// Process-local store, lost on exit
    Memory,
    /// DynamoDB table from `DYNAMODB_TABLE`
    Dynamodb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(DEFAULT_LOG_FILTER);

    let config = Config::from_env();
    let repository = build_repository(cli.storage, &config).await?;
    let state = AppState::new(repository);

    // Build the application router
    let app = create_app(state, config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!(storage = ?cli.storage, "listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(feature = "dynamodb")]
async fn build_repository(storage: Storage, config: &Config) -> Result<Arc<dyn ItemRepository>> {
    Ok(match storage {
        Storage::Memory => Arc::new(InMemoryRepository::new()),
        Storage::Dynamodb => {
            let repository = itemstore::storage::DynamoDbRepository::from_config(config).await;
            tracing::info!(table = repository.table_name(), "Using DynamoDB storage");
            Arc::new(repository)
        }
    })
}

#[cfg(not(feature = "dynamodb"))]
async fn build_repository(storage: Storage, _config: &Config) -> Result<Arc<dyn ItemRepository>> {
    match storage {
        Storage::Memory => Ok(Arc::new(InMemoryRepository::new())),
        Storage::Dynamodb => anyhow::bail!("built without the 'dynamodb' feature"),
    }
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
