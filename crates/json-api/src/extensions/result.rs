//! Turning unexpected failures into opaque `500`s.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Log an unexpected error with `context` and hide it behind a `500`.
///
/// Expected outcomes such as duplicate codes never go through here; they have
/// their own status mapping in `codes::errors`.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!(error = %source, "{context}");

            StatusError::internal_server_error()
        })
    }
}
