//! Startup sequencing: storage first, listener second.
//!
//! The listening socket is only bound once [`initialize_storage`] has
//! produced a ready pool, so no request can arrive before both tables
//! exist.

use std::io;

use folio_core::retry::retry;
use tokio::net::TcpListener;

use crate::config::ServerConfig;

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database initialization failed after {attempts} attempt(s): {source}")]
    Storage {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error(
        "port {port} already in use; stop the other process or set a different PORT"
    )]
    AddrInUse { port: u16 },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
}

/// Open the database and create the schema, retrying the whole sequence
/// according to [`ServerConfig::init_retry_policy`].
pub async fn initialize_storage(config: &ServerConfig) -> Result<folio_db::DbPool, StartupError> {
    let policy = config.init_retry_policy();
    tracing::info!(
        path = %config.database_path.display(),
        max_attempts = policy.max_attempts,
        "Initializing database",
    );

    let pool = retry(&policy, |_| true, || {
        folio_db::open_and_initialize(&config.database_path)
    })
    .await
    .map_err(|source| StartupError::Storage {
        attempts: policy.max_attempts,
        source,
    })?;

    tracing::info!("Database ready");
    Ok(pool)
}

/// Bind the TCP listener for the configured host and port.
pub async fn bind_listener(config: &ServerConfig) -> Result<TcpListener, StartupError> {
    let addr = config.bind_addr();
    TcpListener::bind(&addr).await.map_err(|source| {
        if source.kind() == io::ErrorKind::AddrInUse {
            StartupError::AddrInUse { port: config.port }
        } else {
            StartupError::Bind { addr, source }
        }
    })
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
