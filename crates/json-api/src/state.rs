//! State

use std::sync::Arc;

use promocodes_app::context::AppContext;

use crate::config::import::ImportConfig;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) import: ImportConfig,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, import: ImportConfig) -> Self {
        Self { app, import }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, import: ImportConfig) -> Arc<Self> {
        Arc::new(Self::new(app, import))
    }
}
