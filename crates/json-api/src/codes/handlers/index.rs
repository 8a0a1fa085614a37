//! Promo Code Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{codes::models::PromoCodeResponse, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoCodesResponse {
    /// The list of promo codes, oldest first
    pub codes: Vec<PromoCodeResponse>,
}

/// Promo Code Index Handler
///
/// Returns every registered identity.
#[endpoint(tags("codes"), summary = "List Promo Codes")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PromoCodesResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let codes = state
        .app
        .codes
        .list_codes()
        .await
        .or_500("failed to fetch promo codes")?;

    Ok(Json(PromoCodesResponse {
        codes: codes.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use promocodes_app::domain::codes::{
        MockPromoCodesService, PromoCodesServiceError, records::CodeFamily,
    };

    use crate::test_helpers::{codes_service, make_code};

    use super::*;

    fn make_service(codes: MockPromoCodesService) -> Service {
        codes_service(codes, Router::with_path("codes").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_200() -> TestResult {
        let mut codes = MockPromoCodesService::new();

        codes.expect_list_codes().once().return_once(|| {
            Ok(vec![
                make_code("REPRO-001", CodeFamily::Hyphenated),
                make_code("REPRO001", CodeFamily::Compact),
            ])
        });

        codes.expect_create_code().never();
        codes.expect_get_code().never();

        let mut res = TestClient::get("http://example.com/codes")
            .send(&make_service(codes))
            .await;

        let body: PromoCodesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.codes.iter().map(|c| c.code.as_str()).collect::<Vec<_>>(),
            ["REPRO-001", "REPRO001"]
        );
        assert_eq!(body.codes.get(1).map(|c| c.family.as_str()), Some("compact"));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_failure_returns_500() -> TestResult {
        let mut codes = MockPromoCodesService::new();

        codes
            .expect_list_codes()
            .once()
            .return_once(|| Err(PromoCodesServiceError::Storage(sqlx::Error::PoolClosed)));

        let res = TestClient::get("http://example.com/codes")
            .send(&make_service(codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
