//! Promo Codes Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::Db,
    domain::codes::{
        data::NewPromoCode,
        errors::CodeStoreError,
        normalize::Fingerprint,
        records::{CodeFamily, CodeStatus, PromoCodeRecord, PromoCodeUuid},
        store::CodeStore,
    },
};

const FIND_CODE_BY_FINGERPRINT_SQL: &str = include_str!("sql/find_code_by_fingerprint.sql");
const FIND_CODE_BY_CODE_SQL: &str = include_str!("sql/find_code_by_code.sql");
const INSERT_CODE_SQL: &str = include_str!("sql/insert_code.sql");
const GET_CODE_SQL: &str = include_str!("sql/get_code.sql");
const LIST_CODES_SQL: &str = include_str!("sql/list_codes.sql");
const UPDATE_CODE_STATUS_SQL: &str = include_str!("sql/update_code_status.sql");
const DELETE_CODE_SQL: &str = include_str!("sql/delete_code.sql");

/// PostgreSQL-backed code store.
///
/// Statements run directly on the pool, each in its own implicit transaction.
#[derive(Debug, Clone)]
pub struct PgCodeStore {
    db: Db,
}

impl PgCodeStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CodeStore for PgCodeStore {
    async fn find_by_fingerprint_and_family(
        &self,
        fingerprint: Fingerprint,
        family: CodeFamily,
    ) -> Result<Option<PromoCodeRecord>, CodeStoreError> {
        let record = query_as::<Postgres, PromoCodeRecord>(FIND_CODE_BY_FINGERPRINT_SQL)
            .bind(fingerprint.to_string())
            .bind(family.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCodeRecord>, CodeStoreError> {
        let record = query_as::<Postgres, PromoCodeRecord>(FIND_CODE_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn insert(&self, code: NewPromoCode) -> Result<PromoCodeRecord, CodeStoreError> {
        let record = query_as::<Postgres, PromoCodeRecord>(INSERT_CODE_SQL)
            .bind(code.uuid.into_uuid())
            .bind(code.code)
            .bind(code.family.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn get(&self, uuid: PromoCodeUuid) -> Result<PromoCodeRecord, CodeStoreError> {
        let record = query_as::<Postgres, PromoCodeRecord>(GET_CODE_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<PromoCodeRecord>, CodeStoreError> {
        let records = query_as::<Postgres, PromoCodeRecord>(LIST_CODES_SQL)
            .fetch_all(self.db.pool())
            .await?;

        Ok(records)
    }

    async fn set_status(
        &self,
        uuid: PromoCodeUuid,
        status: CodeStatus,
    ) -> Result<PromoCodeRecord, CodeStoreError> {
        let record = query_as::<Postgres, PromoCodeRecord>(UPDATE_CODE_STATUS_SQL)
            .bind(uuid.into_uuid())
            .bind(status.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn delete(&self, uuid: PromoCodeUuid) -> Result<u64, CodeStoreError> {
        let rows_affected = query(DELETE_CODE_SQL)
            .bind(uuid.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PromoCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let family: String = row.try_get("family")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: PromoCodeUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            family: CodeFamily::parse(&family).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "family".to_string(),
                source: format!("unknown code family {family:?}").into(),
            })?,
            status: CodeStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown code status {status:?}").into(),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
