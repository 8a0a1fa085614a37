//! Promo Codes
//!
//! Canonical identity and deduplication of promo codes: normalization,
//! duplicate resolution against a [`store::CodeStore`], and best-effort batch
//! import.

pub mod data;
pub mod errors;
pub mod import;
pub mod normalize;
pub mod records;
mod repository;
pub mod resolver;
pub mod service;
pub mod store;

pub use errors::PromoCodesServiceError;
pub use repository::PgCodeStore;
pub use service::*;
