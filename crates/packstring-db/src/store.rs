//! Database connection and schema setup

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use packstring_core::{Error, Result};

/// Wraps the SQLite connection pool.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

pub(crate) fn db_err(e: sqlx::Error) -> Error {
    Error::Database(e.to_string())
}

impl Store {
    /// Opens (creating if needed) the database at `path`, enables WAL mode,
    /// and runs schema setup.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(std::time::Duration::from_secs(5))
                    .foreign_keys(true),
            )
            .await
            .map_err(db_err)?;

        let store = Self { pool };
        store.initialize_schema().await?;
        info!(path = %path.display(), "database opened");
        Ok(store)
    }

    /// In-memory database for tests. Pooled on a single connection so every
    /// query sees the same database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(
                SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(db_err)?
                    .foreign_keys(true),
            )
            .await
            .map_err(db_err)?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (1)")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        let version: i32 = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        if version != 1 {
            return Err(Error::Database(format!(
                "unsupported schema version: {}",
                version
            )));
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inquiries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                trip_slug TEXT NOT NULL DEFAULT '',
                trip_name TEXT NOT NULL DEFAULT '',
                dates TEXT NOT NULL DEFAULT '',
                party_size TEXT NOT NULL DEFAULT '',
                experience TEXT NOT NULL DEFAULT '',
                message TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'new',
                notes TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMP NOT NULL DEFAULT (datetime('now')),
                updated_at TIMESTAMP NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_inquiries_status ON inquiries(status, created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS deposit_config (
                trip_slug TEXT PRIMARY KEY,
                trip_name TEXT NOT NULL,
                amount_cents INTEGER NOT NULL DEFAULT 0,
                enabled INTEGER NOT NULL DEFAULT 0,
                updated_at TIMESTAMP NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS payments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                inquiry_id INTEGER NOT NULL REFERENCES inquiries(id),
                stripe_session_id TEXT NOT NULL UNIQUE,
                stripe_payment_intent TEXT NOT NULL DEFAULT '',
                amount_cents INTEGER NOT NULL,
                currency TEXT NOT NULL DEFAULT 'usd',
                status TEXT NOT NULL DEFAULT 'pending',
                customer_email TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMP NOT NULL DEFAULT (datetime('now')),
                paid_at TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_payments_inquiry ON payments(inquiry_id, created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("packstring.db");
        let store = Store::open(&path).await.unwrap();
        assert!(path.exists());
        // Reopening against the existing file is fine.
        drop(store);
        Store::open(&path).await.unwrap();
    }

    #[tokio::test]
    async fn schema_setup_is_idempotent() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize_schema().await.unwrap();
        let version: i32 = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(version, 1);
    }
}
