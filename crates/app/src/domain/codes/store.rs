//! Promo code storage collaborator.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::codes::{
    data::NewPromoCode,
    errors::CodeStoreError,
    normalize::Fingerprint,
    records::{CodeFamily, CodeStatus, PromoCodeRecord, PromoCodeUuid},
};

/// Storage operations the identity engine relies on.
///
/// Implementations must enforce the `(fingerprint, family)` and canonical code
/// uniqueness guarantees themselves and report a lost race from [`insert`] as
/// [`CodeStoreError::ConstraintViolation`]. Every call is committed on its own,
/// so an insert is visible to the next lookup.
///
/// [`insert`]: CodeStore::insert
#[automock]
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Find the code holding a fingerprint within a family.
    async fn find_by_fingerprint_and_family(
        &self,
        fingerprint: Fingerprint,
        family: CodeFamily,
    ) -> Result<Option<PromoCodeRecord>, CodeStoreError>;

    /// Find a code by its canonical form.
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCodeRecord>, CodeStoreError>;

    /// Insert a new code.
    async fn insert(&self, code: NewPromoCode) -> Result<PromoCodeRecord, CodeStoreError>;

    /// Retrieve a single code.
    async fn get(&self, uuid: PromoCodeUuid) -> Result<PromoCodeRecord, CodeStoreError>;

    /// Retrieve all codes, oldest first.
    async fn list(&self) -> Result<Vec<PromoCodeRecord>, CodeStoreError>;

    /// Set the registration status and refresh `updated_at`.
    async fn set_status(
        &self,
        uuid: PromoCodeUuid,
        status: CodeStatus,
    ) -> Result<PromoCodeRecord, CodeStoreError>;

    /// Delete a code, returning the number of rows removed.
    async fn delete(&self, uuid: PromoCodeUuid) -> Result<u64, CodeStoreError>;
}
