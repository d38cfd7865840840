//! Bounded Store - task console entry point
//!
//! Runs the interactive task console over stdin/stdout on top of a
//! bounded store configured from the environment.

use tokio::io::{self, BufReader};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bounded_store::cli::Console;
use bounded_store::todo::{TaskController, TaskService};
use bounded_store::{BoundedStore, Config, SharedStore};

/// Main entry point for the task console.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so it never mixes with console output)
/// 2. Load configuration from environment variables
/// 3. Build the store and the task layers on top of it
/// 4. Run the console until quit, end of input or a shutdown signal
fn main() -> anyhow::Result<()> {
    // Defaults to "bounded_store=info", can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting task console");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load configuration");
            return Err(err.into());
        }
    };
    info!(
        max_size = ?config.max_size,
        policy = %config.eviction_policy,
        default_ttl = config.default_ttl,
        "Configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(config));

    // The stdin reader may still be parked on a blocking read
    runtime.shutdown_background();
    info!("Task console stopped");
    result
}

/// Builds the store and task layers, then runs the console.
async fn run(config: Config) -> anyhow::Result<()> {
    let store = SharedStore::new(BoundedStore::new(config.store_options())?);
    let controller = TaskController::new(TaskService::new(store));
    let mut console = Console::new(controller, BufReader::new(io::stdin()), io::stdout());

    tokio::select! {
        result = console.run() => result?,
        _ = shutdown_signal() => {}
    }

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
