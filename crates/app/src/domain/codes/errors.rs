//! Promo code errors.

use serde::{Deserialize, Serialize};
use sqlx::{
    Error,
    error::ErrorKind,
};
use thiserror::Error;

use crate::domain::codes::records::PromoCodeRecord;

/// Name of the `(fingerprint, family)` uniqueness constraint.
pub(crate) const FINGERPRINT_CONSTRAINT: &str = "promo_codes_fingerprint_family_key";

/// Name of the canonical code uniqueness constraint.
pub(crate) const CODE_CONSTRAINT: &str = "promo_codes_code_key";

/// Uniqueness guarantee enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueKey {
    /// No two codes share a `(fingerprint, family)` pair.
    FingerprintFamily,

    /// No two codes share a canonical code.
    Code,
}

/// Storage collaborator errors.
#[derive(Debug, Error)]
pub enum CodeStoreError {
    #[error("promo code not found")]
    NotFound,

    #[error("promo code violates unique {0:?} constraint")]
    ConstraintViolation(UniqueKey),

    #[error("storage unavailable")]
    Unavailable(#[source] Error),
}

impl From<Error> for CodeStoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Unavailable(error);
        };

        if database_error.kind() != ErrorKind::UniqueViolation {
            return Self::Unavailable(error);
        }

        match database_error.constraint() {
            Some(FINGERPRINT_CONSTRAINT) => Self::ConstraintViolation(UniqueKey::FingerprintFamily),
            Some(CODE_CONSTRAINT) => Self::ConstraintViolation(UniqueKey::Code),
            Some(_) | None => Self::Unavailable(error),
        }
    }
}

/// Why a raw code was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Normalization produced nothing.
    InvalidCode,

    /// A code with the same fingerprint and family exists.
    DuplicateByFingerprint,

    /// A code with the same canonical form exists.
    DuplicateByExactCode,

    /// Lost an insert race against a concurrent writer.
    ConstraintViolation,
}

/// Promo codes service errors.
#[derive(Debug, Error)]
pub enum PromoCodesServiceError {
    #[error("invalid promo code")]
    InvalidCode,

    #[error("promo code duplicates {} by fingerprint", .0.code)]
    DuplicateByFingerprint(Box<PromoCodeRecord>),

    #[error("promo code duplicates {} exactly", .0.code)]
    DuplicateByExactCode(Box<PromoCodeRecord>),

    #[error("promo code violates unique {0:?} constraint")]
    ConstraintViolation(UniqueKey),

    #[error("promo code not found")]
    NotFound,

    #[error("storage error")]
    Storage(#[source] Error),
}

impl PromoCodesServiceError {
    /// Rejection reason for expected, recoverable outcomes; `None` otherwise.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::InvalidCode => Some(RejectionReason::InvalidCode),
            Self::DuplicateByFingerprint(_) => Some(RejectionReason::DuplicateByFingerprint),
            Self::DuplicateByExactCode(_) => Some(RejectionReason::DuplicateByExactCode),
            Self::ConstraintViolation(_) => Some(RejectionReason::ConstraintViolation),
            Self::NotFound | Self::Storage(_) => None,
        }
    }

    /// Existing record a duplicate was rejected against.
    #[must_use]
    pub fn existing(&self) -> Option<&PromoCodeRecord> {
        match self {
            Self::DuplicateByFingerprint(existing) | Self::DuplicateByExactCode(existing) => {
                Some(existing)
            }
            _ => None,
        }
    }
}

impl From<CodeStoreError> for PromoCodesServiceError {
    fn from(error: CodeStoreError) -> Self {
        match error {
            CodeStoreError::NotFound => Self::NotFound,
            CodeStoreError::ConstraintViolation(key) => Self::ConstraintViolation(key),
            CodeStoreError::Unavailable(source) => Self::Storage(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = CodeStoreError::from(Error::RowNotFound);

        assert!(matches!(error, CodeStoreError::NotFound), "got {error:?}");
    }

    #[test]
    fn pool_failures_are_unavailable() {
        let error = CodeStoreError::from(Error::PoolTimedOut);

        assert!(matches!(error, CodeStoreError::Unavailable(_)), "got {error:?}");
    }

    #[test]
    fn storage_failures_are_not_rejections() {
        let error = PromoCodesServiceError::from(CodeStoreError::Unavailable(Error::PoolClosed));

        assert_eq!(error.rejection(), None);
    }

    #[test]
    fn constraint_violations_are_rejections() {
        let error = PromoCodesServiceError::from(CodeStoreError::ConstraintViolation(
            UniqueKey::FingerprintFamily,
        ));

        assert_eq!(
            error.rejection(),
            Some(RejectionReason::ConstraintViolation)
        );
    }
}
