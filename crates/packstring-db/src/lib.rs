//! SQLite persistence for inquiries, deposit settings, and payments
//!
//! One [`Store`] per process wraps a `SqlitePool` with WAL mode enabled.
//! Schema setup runs in code at open time, guarded by a `schema_version`
//! table.

pub mod deposits;
pub mod inquiries;
pub mod payments;
pub mod store;

pub use deposits::DepositConfig;
pub use inquiries::{Inquiry, NewInquiry, INQUIRY_STATUSES};
pub use payments::{NewPayment, Payment, PAYMENT_STATUSES};
pub use store::Store;
