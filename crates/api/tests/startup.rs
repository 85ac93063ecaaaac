//! Startup sequencing: storage initialization retries and listener binding.

use assert_matches::assert_matches;
use folio_api::config::ServerConfig;
use folio_api::startup::{bind_listener, initialize_storage, StartupError};
use tempfile::TempDir;

fn config_for(dir: &TempDir, file: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_path: dir.path().join(file),
        db_init_attempts: 3,
        db_init_retry_delay_ms: 0,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn initialize_storage_creates_schema() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, "portfolio.db");

    let pool = initialize_storage(&config).await.unwrap();
    folio_db::health_check(&pool).await.unwrap();
    assert_eq!(folio_db::repositories::UserRepo::count(&pool).await.unwrap(), 0);
    assert_eq!(folio_db::repositories::ProjectRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn initialize_storage_gives_up_after_configured_attempts() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, "missing-dir/portfolio.db");

    let err = initialize_storage(&config).await.unwrap_err();
    assert_matches!(err, StartupError::Storage { attempts: 3, .. });
}

#[tokio::test]
async fn bind_reports_address_in_use() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir, "portfolio.db");

    let first = bind_listener(&config).await.unwrap();
    config.port = first.local_addr().unwrap().port();

    let err = bind_listener(&config).await.unwrap_err();
    assert_matches!(err, StartupError::AddrInUse { port } if port == config.port);
}
