//! Deposit payment records tied to Stripe Checkout sessions

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use packstring_core::{Error, Result};

use crate::store::{db_err, Store};

/// Lifecycle states for a deposit payment.
pub const PAYMENT_STATUSES: [&str; 4] = ["pending", "paid", "failed", "refunded"];

/// A deposit payment, one row per Checkout session.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i64,
    pub inquiry_id: i64,
    pub stripe_session_id: String,
    pub stripe_payment_intent: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub customer_email: String,
    pub created_at: NaiveDateTime,
    pub paid_at: Option<NaiveDateTime>,
}

/// Fields known when the admin generates a deposit link.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub inquiry_id: i64,
    pub stripe_session_id: String,
    pub amount_cents: i64,
    pub currency: String,
    pub customer_email: String,
}

const PAYMENT_COLUMNS: &str = "id, inquiry_id, stripe_session_id, stripe_payment_intent, \
     amount_cents, currency, status, customer_email, created_at, paid_at";

fn payment_from_row(row: &SqliteRow) -> std::result::Result<Payment, sqlx::Error> {
    Ok(Payment {
        id: row.try_get("id")?,
        inquiry_id: row.try_get("inquiry_id")?,
        stripe_session_id: row.try_get("stripe_session_id")?,
        stripe_payment_intent: row.try_get("stripe_payment_intent")?,
        amount_cents: row.try_get("amount_cents")?,
        currency: row.try_get("currency")?,
        status: row.try_get("status")?,
        customer_email: row.try_get("customer_email")?,
        created_at: row.try_get("created_at")?,
        paid_at: row.try_get("paid_at")?,
    })
}

impl Store {
    /// Inserts a pending payment record and returns its id.
    pub async fn create_payment(&self, payment: &NewPayment) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments
                (inquiry_id, stripe_session_id, amount_cents, currency, status, customer_email)
            VALUES (?, ?, ?, ?, 'pending', ?)
            "#,
        )
        .bind(payment.inquiry_id)
        .bind(&payment.stripe_session_id)
        .bind(payment.amount_cents)
        .bind(&payment.currency)
        .bind(&payment.customer_email)
        .execute(self.pool())
        .await
        .map_err(db_err)?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_payment_by_session(&self, session_id: &str) -> Result<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE stripe_session_id = ?",
            PAYMENT_COLUMNS
        ))
        .bind(session_id)
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;
        row.as_ref().map(payment_from_row).transpose().map_err(db_err)
    }

    pub async fn payments_for_inquiry(&self, inquiry_id: i64) -> Result<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE inquiry_id = ? ORDER BY created_at DESC, id DESC",
            PAYMENT_COLUMNS
        ))
        .bind(inquiry_id)
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        rows.iter().map(payment_from_row).collect::<std::result::Result<_, _>>().map_err(db_err)
    }

    /// Updates a payment's status by Checkout session id. Transitioning to
    /// `paid` also records the payment intent and the paid_at timestamp.
    pub async fn update_payment_status(
        &self,
        session_id: &str,
        status: &str,
        payment_intent: &str,
    ) -> Result<()> {
        if !PAYMENT_STATUSES.contains(&status) {
            return Err(Error::InvalidPaymentStatus(status.to_string()));
        }

        if status == "paid" {
            sqlx::query(
                r#"
                UPDATE payments SET status = ?, stripe_payment_intent = ?, paid_at = datetime('now')
                WHERE stripe_session_id = ?
                "#,
            )
            .bind(status)
            .bind(payment_intent)
            .bind(session_id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        } else {
            sqlx::query(
                "UPDATE payments SET status = ?, stripe_payment_intent = ? WHERE stripe_session_id = ?",
            )
            .bind(status)
            .bind(payment_intent)
            .bind(session_id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        }
        Ok(())
    }

    /// Sum of all paid deposits, for the dashboard stat card.
    pub async fn total_paid_cents(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM payments WHERE status = 'paid'",
        )
        .fetch_one(self.pool())
        .await
        .map_err(db_err)?;
        Ok(total)
    }
}
