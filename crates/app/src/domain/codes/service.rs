//! Promo Codes Service

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::codes::{
        errors::PromoCodesServiceError,
        import::{BatchImporter, BatchReport},
        records::{CodeStatus, PromoCodeRecord, PromoCodeUuid},
        repository::PgCodeStore,
        resolver::IdentityResolver,
        store::CodeStore,
    },
};

/// Promo codes service over an injected [`CodeStore`].
#[derive(Clone)]
pub struct DefaultPromoCodesService {
    store: Arc<dyn CodeStore>,
    resolver: IdentityResolver,
    importer: BatchImporter,
}

impl DefaultPromoCodesService {
    #[must_use]
    pub fn new(store: Arc<dyn CodeStore>) -> Self {
        let resolver = IdentityResolver::new(store.clone());

        Self {
            store,
            importer: BatchImporter::new(resolver.clone()),
            resolver,
        }
    }

    /// Service backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(db: Db) -> Self {
        Self::new(Arc::new(PgCodeStore::new(db)))
    }
}

impl Debug for DefaultPromoCodesService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DefaultPromoCodesService")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PromoCodesService for DefaultPromoCodesService {
    async fn create_code(&self, raw: String) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        self.resolver.resolve_or_reject(&raw).await
    }

    async fn import_codes(
        &self,
        raw_codes: Vec<String>,
    ) -> Result<BatchReport, PromoCodesServiceError> {
        self.importer.batch_create(&raw_codes).await
    }

    async fn get_code(
        &self,
        code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        Ok(self.store.get(code).await?)
    }

    async fn list_codes(&self) -> Result<Vec<PromoCodeRecord>, PromoCodesServiceError> {
        Ok(self.store.list().await?)
    }

    #[tracing::instrument(
        name = "codes.service.mark_registered",
        skip(self),
        fields(promo_code_uuid = %code),
        err
    )]
    async fn mark_registered(
        &self,
        code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        let record = self.store.set_status(code, CodeStatus::Registered).await?;

        info!(code = %record.code, "marked promo code as registered");

        Ok(record)
    }

    #[tracing::instrument(
        name = "codes.service.mark_unregistered",
        skip(self),
        fields(promo_code_uuid = %code),
        err
    )]
    async fn mark_unregistered(
        &self,
        code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        let record = self.store.set_status(code, CodeStatus::Unregistered).await?;

        info!(code = %record.code, "marked promo code as unregistered");

        Ok(record)
    }

    #[tracing::instrument(
        name = "codes.service.delete_code",
        skip(self),
        fields(promo_code_uuid = %code),
        err
    )]
    async fn delete_code(&self, code: PromoCodeUuid) -> Result<(), PromoCodesServiceError> {
        let rows_affected = self.store.delete(code).await?;

        if rows_affected == 0 {
            return Err(PromoCodesServiceError::NotFound);
        }

        info!("deleted promo code");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PromoCodesService: Send + Sync {
    /// Registers a single raw code, or reports why it was rejected.
    async fn create_code(&self, raw: String) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Imports many raw codes, skipping rejected rows.
    async fn import_codes(
        &self,
        raw_codes: Vec<String>,
    ) -> Result<BatchReport, PromoCodesServiceError>;

    /// Retrieve a single code.
    async fn get_code(
        &self,
        code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Retrieves all codes.
    async fn list_codes(&self) -> Result<Vec<PromoCodeRecord>, PromoCodesServiceError>;

    /// Flags a code as registered.
    async fn mark_registered(
        &self,
        code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Clears the registered flag of a code.
    async fn mark_unregistered(
        &self,
        code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Deletes a code.
    async fn delete_code(&self, code: PromoCodeUuid) -> Result<(), PromoCodesServiceError>;
}
