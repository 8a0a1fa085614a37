//! Batch ingestion of raw promo codes.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::codes::{
    errors::{PromoCodesServiceError, RejectionReason},
    resolver::IdentityResolver,
};

/// A row that was skipped during a batch import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedCode {
    /// Raw input, as supplied.
    pub input: String,

    /// Why it was skipped.
    pub reason: RejectionReason,
}

/// Outcome of a batch import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of input rows.
    pub processed: usize,

    /// Number of new codes created.
    pub inserted: usize,

    /// Number of blank rows skipped.
    pub blank: usize,

    /// Non-blank rows that were rejected, in input order.
    pub rejections: Vec<RejectedCode>,
}

/// Best-effort bulk import.
///
/// Rows are resolved one at a time, in order, and each insert is committed
/// before the next row is looked at, so a repeat later in the same batch is
/// rejected against the earlier row. Rejections never abort the batch; a
/// storage failure does, leaving earlier inserts in place.
#[derive(Debug, Clone)]
pub struct BatchImporter {
    resolver: IdentityResolver,
}

impl BatchImporter {
    #[must_use]
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Import `raw_codes`, returning how many new codes were created.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the store fails; rows before the failure stay
    /// imported.
    #[tracing::instrument(
        name = "codes.import.batch_create",
        skip(self, raw_codes),
        fields(rows = raw_codes.len())
    )]
    pub async fn batch_create<S>(&self, raw_codes: &[S]) -> Result<BatchReport, PromoCodesServiceError>
    where
        S: AsRef<str>,
    {
        let mut report = BatchReport {
            processed: raw_codes.len(),
            ..BatchReport::default()
        };

        for raw in raw_codes {
            let raw = raw.as_ref();

            if raw.trim().is_empty() {
                report.blank += 1;

                continue;
            }

            match self.resolver.resolve_or_reject(raw).await {
                Ok(_) => report.inserted += 1,
                Err(error) => {
                    let Some(reason) = error.rejection() else {
                        warn!(
                            inserted = report.inserted,
                            "aborting import after storage failure: {error}"
                        );

                        return Err(error);
                    };

                    debug!(input = raw, ?reason, "skipped promo code");

                    report.rejections.push(RejectedCode {
                        input: raw.to_string(),
                        reason,
                    });
                }
            }
        }

        info!(
            processed = report.processed,
            inserted = report.inserted,
            rejected = report.rejections.len(),
            "imported promo codes"
        );

        Ok(report)
    }
}
