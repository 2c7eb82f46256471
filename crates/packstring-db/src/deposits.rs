//! Per-trip deposit settings

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use packstring_core::Result;

use crate::store::{db_err, Store};

/// Deposit settings for one trip type.
#[derive(Debug, Clone, Default)]
pub struct DepositConfig {
    pub trip_slug: String,
    pub trip_name: String,
    pub amount_cents: i64,
    pub enabled: bool,
}

fn config_from_row(row: &SqliteRow) -> std::result::Result<DepositConfig, sqlx::Error> {
    Ok(DepositConfig {
        trip_slug: row.try_get("trip_slug")?,
        trip_name: row.try_get("trip_name")?,
        amount_cents: row.try_get("amount_cents")?,
        enabled: row.try_get("enabled")?,
    })
}

impl Store {
    /// Returns the deposit config for a trip, or `None` if not configured.
    pub async fn get_deposit_config(&self, trip_slug: &str) -> Result<Option<DepositConfig>> {
        let row = sqlx::query(
            "SELECT trip_slug, trip_name, amount_cents, enabled FROM deposit_config WHERE trip_slug = ?",
        )
        .bind(trip_slug)
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;
        row.as_ref().map(config_from_row).transpose().map_err(db_err)
    }

    pub async fn list_deposit_configs(&self) -> Result<Vec<DepositConfig>> {
        let rows = sqlx::query(
            "SELECT trip_slug, trip_name, amount_cents, enabled FROM deposit_config ORDER BY trip_slug",
        )
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        rows.iter().map(config_from_row).collect::<std::result::Result<_, _>>().map_err(db_err)
    }

    /// Upserts the deposit config for a trip.
    pub async fn save_deposit_config(&self, config: &DepositConfig) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO deposit_config (trip_slug, trip_name, amount_cents, enabled, updated_at)
            VALUES (?, ?, ?, ?, datetime('now'))
            ON CONFLICT(trip_slug) DO UPDATE SET
                trip_name = excluded.trip_name,
                amount_cents = excluded.amount_cents,
                enabled = excluded.enabled,
                updated_at = datetime('now')
            "#,
        )
        .bind(&config.trip_slug)
        .bind(&config.trip_name)
        .bind(config.amount_cents)
        .bind(config.enabled)
        .execute(self.pool())
        .await
        .map_err(db_err)?;
        Ok(())
    }
}
