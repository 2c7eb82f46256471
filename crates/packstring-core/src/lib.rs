//! Packstring Core Types
//!
//! This crate provides the types shared across the site:
//! - The error type and `Result` alias
//! - The canonical trip catalog (slugs, display names, categories)
//! - Page SEO metadata

pub mod error;
pub mod meta;
pub mod trips;

pub use error::{Error, Result};
pub use meta::{PageMeta, SITE_URL};
pub use trips::{display_name, trip_catalog, TripCategory, TripInfo};
