//! Persistence gateway for the antemortem inspection backend.
//!
//! SQLite via sqlx: pool construction, embedded migrations, and the
//! repository layer. The database file is created on first connect.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Create a connection pool from a database URL
/// (e.g. `sqlite://data/antemortem.db?mode=rwc`).
///
/// WAL journaling and foreign key enforcement are enabled on every
/// connection; the database file is created if missing.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000))
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(20)
        .connect_with(options)
        .await
}

/// Run embedded database migrations. Idempotent.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Verify database connectivity with a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Clamp a client-supplied page size into `[1, MAX_PAGE_SIZE]`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a client-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_clamped_to_page_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(10_000)), MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_clamped_to_non_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(25)), 25);
    }
}
