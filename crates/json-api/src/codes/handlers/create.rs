//! Create Promo Code Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    codes::{
        errors::into_rejection,
        models::{PromoCodeResponse, RejectionResponse},
    },
    extensions::*,
};

/// Create Promo Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCodeRequest {
    /// Raw promo code, as entered
    pub code: String,
}

/// Create Promo Code Handler
///
/// Normalizes the code and registers it unless an equivalent code exists.
#[endpoint(
    tags("codes"),
    summary = "Create Promo Code",
    responses(
        (status_code = StatusCode::CREATED, description = "Promo code created", body = PromoCodeResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Not a promo code", body = RejectionResponse),
        (status_code = StatusCode::CONFLICT, description = "Duplicate promo code", body = RejectionResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "codes.create",
    skip(json, depot, res),
    fields(promo_code_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCodeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    match state.app.codes.create_code(json.into_inner().code).await {
        Ok(record) => {
            let uuid = record.uuid;

            tracing::Span::current().record("promo_code_uuid", tracing::field::display(uuid));

            res.add_header(LOCATION, format!("/codes/{uuid}"), true)
                .or_500("failed to set location header")?
                .status_code(StatusCode::CREATED);

            res.render(Json(PromoCodeResponse::from(record)));
        }
        Err(error) => {
            let (status, rejection) = into_rejection(error)?;

            tracing::info!(reason = ?rejection.reason, "rejected promo code");

            res.status_code(status);
            res.render(Json(rejection));
        }
    }

    Ok(())
}
