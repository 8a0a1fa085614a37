//! Promo Code Response Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promocodes_app::domain::codes::{
    errors::RejectionReason,
    records::PromoCodeRecord,
};

/// Promo code as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoCodeResponse {
    /// The unique identifier of the code
    pub uuid: Uuid,

    /// Canonical code
    pub code: String,

    /// `hyphenated` or `compact`
    pub family: String,

    /// `registered` or `unregistered`
    pub status: String,

    /// The date and time the code was created
    pub created_at: String,

    /// The date and time the code was last updated
    pub updated_at: String,
}

impl From<PromoCodeRecord> for PromoCodeResponse {
    fn from(record: PromoCodeRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            code: record.code,
            family: record.family.to_string(),
            status: record.status.to_string(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Why a code was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RejectionReasonResponse {
    /// The input is not a promo code.
    InvalidCode,

    /// A code with the same serial exists in the same family.
    DuplicateByFingerprint,

    /// The same canonical code exists.
    DuplicateByExactCode,

    /// A concurrent request registered a conflicting code.
    ConstraintViolation,
}

impl From<RejectionReason> for RejectionReasonResponse {
    fn from(reason: RejectionReason) -> Self {
        match reason {
            RejectionReason::InvalidCode => Self::InvalidCode,
            RejectionReason::DuplicateByFingerprint => Self::DuplicateByFingerprint,
            RejectionReason::DuplicateByExactCode => Self::DuplicateByExactCode,
            RejectionReason::ConstraintViolation => Self::ConstraintViolation,
        }
    }
}

/// Structured rejection of a single code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RejectionResponse {
    /// Rejection reason
    pub reason: RejectionReasonResponse,

    /// Human-readable explanation
    pub message: String,

    /// The code this one duplicates, when known
    pub existing: Option<PromoCodeResponse>,
}
