//! Bulk Upload Promo Codes Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use promocodes_app::domain::codes::import::{BatchReport, RejectedCode};

use crate::{
    codes::{errors::into_status_error, models::RejectionReasonResponse},
    extensions::*,
};

/// Bulk Upload Request
///
/// Rows parsed from an uploaded spreadsheet, in sheet order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportCodesRequest {
    /// Raw promo codes
    pub codes: Vec<String>,
}

/// A skipped row.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RejectedRowResponse {
    /// Raw input
    pub input: String,

    /// Why the row was skipped
    pub reason: RejectionReasonResponse,
}

impl From<RejectedCode> for RejectedRowResponse {
    fn from(rejected: RejectedCode) -> Self {
        Self {
            input: rejected.input,
            reason: rejected.reason.into(),
        }
    }
}

/// Bulk Upload Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportCodesResponse {
    /// Number of rows received
    pub records_processed: usize,

    /// Number of new codes created
    pub records_inserted: usize,

    /// Rows that were skipped, blank rows excluded
    pub rejections: Vec<RejectedRowResponse>,
}

impl From<BatchReport> for ImportCodesResponse {
    fn from(report: BatchReport) -> Self {
        Self {
            records_processed: report.processed,
            records_inserted: report.inserted,
            rejections: report.rejections.into_iter().map(Into::into).collect(),
        }
    }
}

/// Bulk Upload Promo Codes Handler
///
/// Imports every row it can; duplicates and malformed rows are skipped.
#[endpoint(
    tags("codes"),
    summary = "Bulk Upload Promo Codes",
    responses(
        (status_code = StatusCode::OK, description = "Upload processed", body = ImportCodesResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Too many codes"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "codes.import",
    skip(json, depot),
    fields(rows = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ImportCodesRequest>,
    depot: &mut Depot,
) -> Result<Json<ImportCodesResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let codes = json.into_inner().codes;

    tracing::Span::current().record("rows", codes.len());

    let max_codes = state.import.import_max_codes;

    if codes.len() > max_codes {
        return Err(StatusError::bad_request()
            .brief(format!("A single upload may contain at most {max_codes} codes")));
    }

    let report = state
        .app
        .codes
        .import_codes(codes)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        processed = report.processed,
        inserted = report.inserted,
        "processed bulk upload"
    );

    Ok(Json(report.into()))
}
