//! SQLite storage for contact submissions and portfolio projects.
//!
//! [`open_and_initialize`] is the ready signal: once it resolves, both
//! tables exist and the returned pool can serve requests.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use folio_core::retry::{retry, RetryPolicy};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// SQLite primary result codes worth retrying.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Open (creating if missing) the database file at `path`.
pub async fn create_pool(path: impl AsRef<Path>) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path.as_ref())
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `users` and `projects` tables if they do not exist yet.
///
/// The statements run one after the other so a failure is always
/// attributable to a single table.
pub async fn initialize(pool: &DbPool) -> Result<(), sqlx::Error> {
    create_table(
        pool,
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            message TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .await?;

    create_table(
        pool,
        "projects",
        "CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            technologies TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .await?;

    Ok(())
}

async fn create_table(pool: &DbPool, table: &str, ddl: &str) -> Result<(), sqlx::Error> {
    match sqlx::query(ddl).execute(pool).await {
        Ok(_) => {
            tracing::info!(table, "Table ready");
            Ok(())
        }
        Err(err) => {
            tracing::error!(table, error = %err, "Failed to create table");
            Err(err)
        }
    }
}

/// Open the database at `path` and ensure the schema exists.
///
/// The pool is closed again if schema creation fails, so a retried call
/// never leaks connections from an earlier attempt.
pub async fn open_and_initialize(path: impl AsRef<Path>) -> Result<DbPool, sqlx::Error> {
    let pool = create_pool(path).await?;
    if let Err(err) = initialize(&pool).await {
        pool.close().await;
        return Err(err);
    }
    Ok(pool)
}

/// Whether a storage error is expected to clear up on its own.
///
/// Lock contention (`SQLITE_BUSY`, `SQLITE_LOCKED` and their extended
/// codes), pool acquisition timeouts and I/O errors qualify; constraint
/// violations and missing rows do not.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
            .unwrap_or(false),
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => true,
        _ => false,
    }
}

/// Run a storage operation under the default [`RetryPolicy`], retrying only
/// [transient](is_transient) failures.
pub async fn with_retry<T, F, Fut>(op: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    retry(&RetryPolicy::default(), is_transient, op).await
}
