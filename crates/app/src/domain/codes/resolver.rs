//! Promo code identity resolution.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tracing::{Span, debug, info};

use crate::domain::codes::{
    data::NewPromoCode,
    errors::{CodeStoreError, PromoCodesServiceError, UniqueKey},
    normalize::NormalizedCode,
    records::{PromoCodeRecord, PromoCodeUuid},
    store::CodeStore,
};

/// Decides whether a raw code is a new identity and registers it if so.
///
/// A code is a duplicate when a stored code shares its fingerprint and family,
/// or failing that, its exact canonical form. The lookups only reject early;
/// the store's uniqueness constraints have the final word, and losing an
/// insert race is reported as the same duplicate rejection.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn CodeStore>,
}

impl IdentityResolver {
    #[must_use]
    pub fn new(store: Arc<dyn CodeStore>) -> Self {
        Self { store }
    }

    /// Register `raw` as a new code or explain why it was rejected.
    ///
    /// # Errors
    ///
    /// Returns a rejection (`InvalidCode`, `DuplicateByFingerprint`,
    /// `DuplicateByExactCode`, `ConstraintViolation`) for expected outcomes, and
    /// `Storage` when the store itself fails.
    #[tracing::instrument(
        name = "codes.resolver.resolve_or_reject",
        skip(self, raw),
        fields(
            code = tracing::field::Empty,
            family = tracing::field::Empty,
            fingerprint = tracing::field::Empty
        )
    )]
    pub async fn resolve_or_reject(
        &self,
        raw: &str,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        let normalized = NormalizedCode::parse(raw).ok_or(PromoCodesServiceError::InvalidCode)?;

        let span = Span::current();

        span.record("code", tracing::field::display(&normalized.code));
        span.record("family", tracing::field::display(normalized.family));

        if let Some(fingerprint) = normalized.fingerprint {
            span.record("fingerprint", tracing::field::display(fingerprint));

            if let Some(existing) = self
                .store
                .find_by_fingerprint_and_family(fingerprint, normalized.family)
                .await?
            {
                debug!(existing = %existing.code, "duplicate by fingerprint");

                return Err(PromoCodesServiceError::DuplicateByFingerprint(Box::new(
                    existing,
                )));
            }
        }

        if let Some(existing) = self.store.find_by_code(&normalized.code).await? {
            debug!(existing = %existing.code, "duplicate by exact code");

            return Err(PromoCodesServiceError::DuplicateByExactCode(Box::new(
                existing,
            )));
        }

        let new = NewPromoCode {
            uuid: PromoCodeUuid::new(),
            code: normalized.code.clone(),
            family: normalized.family,
        };

        match self.store.insert(new).await {
            Ok(record) => {
                info!(promo_code_uuid = %record.uuid, code = %record.code, "registered promo code");

                Ok(record)
            }
            Err(CodeStoreError::ConstraintViolation(key)) => {
                debug!(?key, "lost insert race");

                Err(self.race_loss(&normalized, key).await)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Translate a constraint violation into the duplicate it stands for.
    async fn race_loss(
        &self,
        normalized: &NormalizedCode,
        key: UniqueKey,
    ) -> PromoCodesServiceError {
        let lookup = match (key, normalized.fingerprint) {
            (UniqueKey::FingerprintFamily, Some(fingerprint)) => self
                .store
                .find_by_fingerprint_and_family(fingerprint, normalized.family)
                .await
                .map(|found| {
                    found.map(|r| PromoCodesServiceError::DuplicateByFingerprint(Box::new(r)))
                }),
            (UniqueKey::Code | UniqueKey::FingerprintFamily, _) => self
                .store
                .find_by_code(&normalized.code)
                .await
                .map(|found| {
                    found.map(|r| PromoCodesServiceError::DuplicateByExactCode(Box::new(r)))
                }),
        };

        match lookup {
            Ok(Some(rejection)) => rejection,
            Ok(None) => PromoCodesServiceError::ConstraintViolation(key),
            Err(error) => error.into(),
        }
    }
}

impl Debug for IdentityResolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        domain::codes::{
            normalize::extract_fingerprint,
            records::{CodeFamily, CodeStatus},
            store::MockCodeStore,
        },
        test::InMemoryCodeStore,
    };

    use super::*;

    fn record(code: &str, family: CodeFamily) -> PromoCodeRecord {
        PromoCodeRecord {
            uuid: PromoCodeUuid::new(),
            code: code.to_string(),
            family,
            status: CodeStatus::Unregistered,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn registers_new_codes_in_canonical_form() -> TestResult {
        let resolver = IdentityResolver::new(Arc::new(InMemoryCodeStore::default()));

        let created = resolver.resolve_or_reject("  repro-1 ").await?;

        assert_eq!(created.code, "REPRO-001");
        assert_eq!(created.family, CodeFamily::Hyphenated);
        assert_eq!(created.status, CodeStatus::Unregistered);

        Ok(())
    }

    #[tokio::test]
    async fn blank_input_is_invalid() {
        let mut store = MockCodeStore::new();

        store.expect_find_by_fingerprint_and_family().never();
        store.expect_find_by_code().never();
        store.expect_insert().never();

        let resolver = IdentityResolver::new(Arc::new(store));

        let result = resolver.resolve_or_reject("  -  ").await;

        assert!(
            matches!(result, Err(PromoCodesServiceError::InvalidCode)),
            "expected InvalidCode, got {result:?}"
        );
    }

    #[tokio::test]
    async fn same_fingerprint_and_family_is_a_duplicate() -> TestResult {
        let resolver = IdentityResolver::new(Arc::new(InMemoryCodeStore::default()));

        let first = resolver.resolve_or_reject("ABC-007").await?;
        let result = resolver.resolve_or_reject("xyz-7").await;

        match result {
            Err(PromoCodesServiceError::DuplicateByFingerprint(existing)) => {
                assert_eq!(existing.uuid, first.uuid);
            }
            other => return Err(format!("expected DuplicateByFingerprint, got {other:?}").into()),
        }

        Ok(())
    }

    #[tokio::test]
    async fn other_family_is_not_a_duplicate() -> TestResult {
        let resolver = IdentityResolver::new(Arc::new(InMemoryCodeStore::default()));

        let hyphenated = resolver.resolve_or_reject("REPRO-001").await?;
        let compact = resolver.resolve_or_reject("REPRO001").await?;

        assert_ne!(hyphenated.uuid, compact.uuid);
        assert_eq!(compact.family, CodeFamily::Compact);

        Ok(())
    }

    #[tokio::test]
    async fn codes_without_digits_fall_back_to_exact_match() -> TestResult {
        let resolver = IdentityResolver::new(Arc::new(InMemoryCodeStore::default()));

        resolver.resolve_or_reject("repro").await?;
        resolver.resolve_or_reject("other").await?;

        let result = resolver.resolve_or_reject(" REPRO ").await;

        assert!(
            matches!(result, Err(PromoCodesServiceError::DuplicateByExactCode(_))),
            "expected DuplicateByExactCode, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn fingerprint_lookup_runs_before_exact_lookup() {
        let existing = record("ABC-007", CodeFamily::Hyphenated);
        let expected = extract_fingerprint("007");

        let mut store = MockCodeStore::new();

        store
            .expect_find_by_fingerprint_and_family()
            .once()
            .withf(move |fingerprint, family| {
                Some(*fingerprint) == expected && *family == CodeFamily::Hyphenated
            })
            .return_once(move |_, _| Ok(Some(existing)));

        store.expect_find_by_code().never();
        store.expect_insert().never();

        let resolver = IdentityResolver::new(Arc::new(store));

        let result = resolver.resolve_or_reject("abc-7").await;

        assert!(
            matches!(result, Err(PromoCodesServiceError::DuplicateByFingerprint(_))),
            "expected DuplicateByFingerprint, got {result:?}"
        );
    }

    #[tokio::test]
    async fn lost_insert_race_is_reported_as_duplicate() {
        let winner = record("ABC-007", CodeFamily::Hyphenated);
        let winner_uuid = winner.uuid;

        let mut store = MockCodeStore::new();
        let mut lookups = 0;

        store
            .expect_find_by_fingerprint_and_family()
            .times(2)
            .returning(move |_, _| {
                lookups += 1;

                // The pre-check misses; the re-read after the failed insert sees the winner.
                Ok((lookups > 1).then(|| winner.clone()))
            });

        store.expect_find_by_code().once().returning(|_| Ok(None));

        store.expect_insert().once().return_once(|_| {
            Err(CodeStoreError::ConstraintViolation(
                UniqueKey::FingerprintFamily,
            ))
        });

        let resolver = IdentityResolver::new(Arc::new(store));

        let result = resolver.resolve_or_reject("ABC-007").await;

        assert!(
            matches!(
                &result,
                Err(PromoCodesServiceError::DuplicateByFingerprint(existing))
                    if existing.uuid == winner_uuid
            ),
            "expected DuplicateByFingerprint, got {result:?}"
        );
    }

    #[tokio::test]
    async fn vanished_race_winner_is_a_constraint_violation() {
        let mut store = MockCodeStore::new();

        store.expect_find_by_fingerprint_and_family().never();
        store.expect_find_by_code().times(2).returning(|_| Ok(None));
        store
            .expect_insert()
            .once()
            .return_once(|_| Err(CodeStoreError::ConstraintViolation(UniqueKey::Code)));

        let resolver = IdentityResolver::new(Arc::new(store));

        let result = resolver.resolve_or_reject("nodigits").await;

        assert!(
            matches!(
                result,
                Err(PromoCodesServiceError::ConstraintViolation(UniqueKey::Code))
            ),
            "expected ConstraintViolation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let mut store = MockCodeStore::new();

        store
            .expect_find_by_fingerprint_and_family()
            .once()
            .return_once(|_, _| Err(CodeStoreError::Unavailable(sqlx::Error::PoolClosed)));

        store.expect_find_by_code().never();
        store.expect_insert().never();

        let resolver = IdentityResolver::new(Arc::new(store));

        let result = resolver.resolve_or_reject("REPRO-001").await;

        assert!(
            matches!(result, Err(PromoCodesServiceError::Storage(_))),
            "expected Storage, got {result:?}"
        );
    }

    #[tokio::test]
    async fn concurrent_resolvers_register_a_fingerprint_once() -> TestResult {
        // Both pre-checks pass; only the store constraint decides the winner.
        let store = Arc::new(InMemoryCodeStore::with_blind_lookups());

        let left = IdentityResolver::new(store.clone());
        let right = IdentityResolver::new(store.clone());

        let (a, b) = tokio::join!(
            left.resolve_or_reject("REPRO-001"),
            right.resolve_or_reject("repro - 1")
        );

        let outcomes = [a, b];
        let created = outcomes.iter().filter(|r| r.is_ok()).count();
        let duplicates = outcomes
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(PromoCodesServiceError::DuplicateByFingerprint(_)
                        | PromoCodesServiceError::ConstraintViolation(_))
                )
            })
            .count();

        assert_eq!(created, 1, "exactly one insert should win");
        assert_eq!(duplicates, 1, "the loser should be rejected as a duplicate");
        assert_eq!(store.len(), 1);

        Ok(())
    }
}
