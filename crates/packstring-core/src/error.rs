//! Error types for Packstring

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Availability errors
    #[error("invalid status {status:?} for {slug}[{index}]")]
    InvalidSlotStatus {
        slug: String,
        index: usize,
        status: String,
    },

    #[error("availability file error: {0}")]
    AvailabilityFile(String),

    // Inquiry / payment record errors
    #[error("invalid inquiry status: {0}")]
    InvalidInquiryStatus(String),

    #[error("invalid payment status: {0}")]
    InvalidPaymentStatus(String),

    #[error("inquiry not found: {0}")]
    InquiryNotFound(i64),

    // Database errors
    #[error("database error: {0}")]
    Database(String),

    // Payment provider errors
    #[error("payment provider error: {0}")]
    Payment(String),

    #[error("webhook verification failed: {0}")]
    WebhookVerification(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
