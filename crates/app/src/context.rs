//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::codes::{DefaultPromoCodesService, PromoCodesService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Services shared by every entry point.
#[derive(Clone)]
pub struct AppContext {
    pub codes: Arc<dyn PromoCodesService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(url: &str, migrate: bool) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        if migrate {
            db.migrate().await.map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_codes_service(Arc::new(
            DefaultPromoCodesService::postgres(db),
        )))
    }

    /// Build application context around an existing service.
    #[must_use]
    pub fn from_codes_service(codes: Arc<dyn PromoCodesService>) -> Self {
        Self { codes }
    }
}
