//! Get Promo Code Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    codes::{errors::into_status_error, models::PromoCodeResponse},
    extensions::*,
};

/// Get Promo Code Handler
///
/// Returns a promo code.
#[endpoint(
    tags("codes"),
    summary = "Get Promo Code",
    responses(
        (status_code = StatusCode::OK, description = "Promo code", body = PromoCodeResponse),
        (status_code = StatusCode::NOT_FOUND, description = "Promo code not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromoCodeResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let code = state
        .app
        .codes
        .get_code(code.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(code.into()))
}
