//! Promo Code Domain Concerns

pub mod codes;
