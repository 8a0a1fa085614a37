//! Promo Code Data

use crate::domain::codes::records::{CodeFamily, PromoCodeUuid};

/// New Promo Code Data
///
/// `code` must already be canonical; the store derives the fingerprint from it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromoCode {
    /// UUID to assign to the new row.
    pub uuid: PromoCodeUuid,

    /// Canonical code.
    pub code: String,

    /// Family decided at normalization time.
    pub family: CodeFamily,
}
