//! Import Config

use clap::Args;

/// Bulk upload settings.
#[derive(Debug, Clone, Copy, Args)]
pub struct ImportConfig {
    /// Maximum number of codes accepted by a single bulk upload
    #[arg(long, env = "IMPORT_MAX_CODES", default_value_t = 10_000)]
    pub import_max_codes: usize,
}
