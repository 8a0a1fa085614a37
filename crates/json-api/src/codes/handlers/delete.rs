//! Delete Promo Code Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{codes::errors::into_status_error, extensions::*};

/// Delete Promo Code Handler
///
/// Frees the code's fingerprint for future registrations.
#[endpoint(
    tags("codes"),
    summary = "Delete Promo Code",
    responses(
        (status_code = StatusCode::OK, description = "Promo code deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Promo code not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;

    state
        .app
        .codes
        .delete_code(code.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
