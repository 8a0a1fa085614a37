//! Promo Code Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Promo Code UUID
pub type PromoCodeUuid = TypedUuid<PromoCodeRecord>;

/// Promo Code Record
#[derive(Debug, Clone, PartialEq)]
pub struct PromoCodeRecord {
    /// Identifier assigned on creation.
    pub uuid: PromoCodeUuid,

    /// Canonical (normalized) code.
    pub code: String,

    /// Family fixed from the raw input at creation.
    pub family: CodeFamily,

    /// Registration flag.
    pub status: CodeStatus,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// Code family.
///
/// Whether the raw input contained a hyphen. `REPRO-001` and `REPRO001` belong
/// to independently issued series and never collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFamily {
    /// Raw input contained a hyphen.
    Hyphenated,

    /// Raw input contained no hyphen.
    Compact,
}

impl CodeFamily {
    /// Classify a raw, un-normalized input.
    #[must_use]
    pub fn of(raw: &str) -> Self {
        if raw.contains('-') {
            Self::Hyphenated
        } else {
            Self::Compact
        }
    }

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hyphenated => "hyphenated",
            Self::Compact => "compact",
        }
    }

    /// Parse the storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hyphenated" => Some(Self::Hyphenated),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl Display for CodeFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Registration status of a code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeStatus {
    /// Not yet registered (default).
    #[default]
    Unregistered,

    /// Registered.
    Registered,
}

impl CodeStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Registered => "registered",
        }
    }

    /// Parse the storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unregistered" => Some(Self::Unregistered),
            "registered" => Some(Self::Registered),
            _ => None,
        }
    }
}

impl Display for CodeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
