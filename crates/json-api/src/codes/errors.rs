//! Promo Code Errors

use salvo::{http::StatusError, prelude::*};
use tracing::error;

use promocodes_app::domain::codes::PromoCodesServiceError;

use crate::codes::models::{PromoCodeResponse, RejectionResponse};

pub(crate) fn into_status_error(error: PromoCodesServiceError) -> StatusError {
    match error {
        PromoCodesServiceError::NotFound => StatusError::not_found(),
        PromoCodesServiceError::InvalidCode => {
            StatusError::bad_request().brief("Invalid promo code")
        }
        PromoCodesServiceError::DuplicateByFingerprint(_)
        | PromoCodesServiceError::DuplicateByExactCode(_)
        | PromoCodesServiceError::ConstraintViolation(_) => {
            StatusError::conflict().brief("Promo code already exists")
        }
        PromoCodesServiceError::Storage(source) => {
            error!("promo code storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Structured body for rejections; other errors map through [`into_status_error`].
pub(crate) fn into_rejection(
    error: PromoCodesServiceError,
) -> Result<(StatusCode, RejectionResponse), StatusError> {
    let Some(reason) = error.rejection() else {
        return Err(into_status_error(error));
    };

    let status = if matches!(error, PromoCodesServiceError::InvalidCode) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CONFLICT
    };

    let message = error.to_string();
    let existing = error.existing().cloned().map(PromoCodeResponse::from);

    Ok((
        status,
        RejectionResponse {
            reason: reason.into(),
            message,
            existing,
        },
    ))
}
