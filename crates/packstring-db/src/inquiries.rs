//! Inquiry records (contact form submissions)

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use packstring_core::{Error, Result};

use crate::store::{db_err, Store};

/// Triage states an inquiry moves through in the admin back office.
pub const INQUIRY_STATUSES: [&str; 4] = ["new", "contacted", "booked", "archived"];

/// A contact form submission.
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub trip_slug: String,
    pub trip_name: String,
    pub dates: String,
    pub party_size: String,
    pub experience: String,
    pub message: String,
    pub status: String,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields collected from the contact form; status starts at `new`.
#[derive(Debug, Clone, Default)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub trip_slug: String,
    pub trip_name: String,
    pub dates: String,
    pub party_size: String,
    pub experience: String,
    pub message: String,
}

const INQUIRY_COLUMNS: &str = "id, name, email, phone, trip_slug, trip_name, dates, \
     party_size, experience, message, status, notes, created_at, updated_at";

fn inquiry_from_row(row: &SqliteRow) -> std::result::Result<Inquiry, sqlx::Error> {
    Ok(Inquiry {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        trip_slug: row.try_get("trip_slug")?,
        trip_name: row.try_get("trip_name")?,
        dates: row.try_get("dates")?,
        party_size: row.try_get("party_size")?,
        experience: row.try_get("experience")?,
        message: row.try_get("message")?,
        status: row.try_get("status")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Store {
    /// Inserts a new inquiry and returns its id.
    pub async fn create_inquiry(&self, inq: &NewInquiry) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO inquiries
                (name, email, phone, trip_slug, trip_name, dates, party_size, experience, message, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'new')
            "#,
        )
        .bind(&inq.name)
        .bind(&inq.email)
        .bind(&inq.phone)
        .bind(&inq.trip_slug)
        .bind(&inq.trip_name)
        .bind(&inq.dates)
        .bind(&inq.party_size)
        .bind(&inq.experience)
        .bind(&inq.message)
        .execute(self.pool())
        .await
        .map_err(db_err)?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_inquiry(&self, id: i64) -> Result<Option<Inquiry>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM inquiries WHERE id = ?",
            INQUIRY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;
        row.as_ref().map(inquiry_from_row).transpose().map_err(db_err)
    }

    /// Lists inquiries newest first, optionally filtered by status.
    pub async fn list_inquiries(&self, status: Option<&str>) -> Result<Vec<Inquiry>> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {} FROM inquiries WHERE status = ? ORDER BY created_at DESC, id DESC",
                    INQUIRY_COLUMNS
                ))
                .bind(status)
                .fetch_all(self.pool())
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM inquiries ORDER BY created_at DESC, id DESC",
                    INQUIRY_COLUMNS
                ))
                .fetch_all(self.pool())
                .await
            }
        }
        .map_err(db_err)?;
        rows.iter().map(inquiry_from_row).collect::<std::result::Result<_, _>>().map_err(db_err)
    }

    /// The `limit` most recent inquiries, for the dashboard.
    pub async fn recent_inquiries(&self, limit: i64) -> Result<Vec<Inquiry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM inquiries ORDER BY created_at DESC, id DESC LIMIT ?",
            INQUIRY_COLUMNS
        ))
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        rows.iter().map(inquiry_from_row).collect::<std::result::Result<_, _>>().map_err(db_err)
    }

    pub async fn count_inquiries(&self, status: Option<&str>) -> Result<i64> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM inquiries WHERE status = ?")
                    .bind(status)
                    .fetch_one(self.pool())
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM inquiries")
                    .fetch_one(self.pool())
                    .await
            }
        }
        .map_err(db_err)?;
        Ok(count)
    }

    /// Sets the triage status; rejects values outside [`INQUIRY_STATUSES`].
    pub async fn update_inquiry_status(&self, id: i64, status: &str) -> Result<()> {
        if !INQUIRY_STATUSES.contains(&status) {
            return Err(Error::InvalidInquiryStatus(status.to_string()));
        }
        sqlx::query(
            "UPDATE inquiries SET status = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(status)
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(db_err)?;
        Ok(())
    }

    pub async fn update_inquiry_notes(&self, id: i64, notes: &str) -> Result<()> {
        sqlx::query(
            "UPDATE inquiries SET notes = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(notes)
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(db_err)?;
        Ok(())
    }
}
