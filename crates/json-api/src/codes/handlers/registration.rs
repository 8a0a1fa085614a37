//! Promo Code Registration Handlers

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    codes::{errors::into_status_error, models::PromoCodeResponse},
    extensions::*,
};

/// Register Promo Code Handler
///
/// Marks a promo code as registered.
#[endpoint(
    tags("codes"),
    summary = "Register Promo Code",
    responses(
        (status_code = StatusCode::OK, description = "Promo code registered", body = PromoCodeResponse),
        (status_code = StatusCode::NOT_FOUND, description = "Promo code not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn register(
    code: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromoCodeResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let code = state
        .app
        .codes
        .mark_registered(code.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(code.into()))
}

/// Unregister Promo Code Handler
///
/// Returns a promo code to the unregistered state.
#[endpoint(
    tags("codes"),
    summary = "Unregister Promo Code",
    responses(
        (status_code = StatusCode::OK, description = "Promo code unregistered", body = PromoCodeResponse),
        (status_code = StatusCode::NOT_FOUND, description = "Promo code not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn unregister(
    code: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromoCodeResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let code = state
        .app
        .codes
        .mark_unregistered(code.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(code.into()))
}
