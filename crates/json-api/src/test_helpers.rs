//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use promocodes_app::{
    context::AppContext,
    domain::codes::{
        MockPromoCodesService,
        records::{CodeFamily, CodeStatus, PromoCodeRecord, PromoCodeUuid},
    },
};

use crate::{config::import::ImportConfig, state::State};

pub(crate) const TEST_IMPORT_MAX_CODES: usize = 5;

pub(crate) fn make_code(code: &str, family: CodeFamily) -> PromoCodeRecord {
    PromoCodeRecord {
        uuid: PromoCodeUuid::new(),
        code: code.to_string(),
        family,
        status: CodeStatus::Unregistered,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn state_with_codes(codes: MockPromoCodesService) -> Arc<State> {
    State::shared(
        AppContext::from_codes_service(Arc::new(codes)),
        ImportConfig {
            import_max_codes: TEST_IMPORT_MAX_CODES,
        },
    )
}

pub(crate) fn codes_service(codes: MockPromoCodesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_codes(codes)))
            .push(route),
    )
}
