//! Promo code normalization.
//!
//! Turns free-form, human-entered code strings into their canonical form. A
//! canonical code is the upper-cased letter part, a hyphen when the raw input
//! contained one, and the last three digits of the code zero-padded to three
//! characters, e.g. `" repro-1 "` becomes `REPRO-001`.
//!
//! Inputs that cannot be reformatted (no trailing digits, or no letters in
//! front of them) fall back to the upper-cased input. Such codes carry no
//! fingerprint when they have no digits and are only protected against exact
//! duplicates.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::codes::records::CodeFamily;

/// Number of trailing digits that make up a fingerprint.
const FINGERPRINT_DIGITS: usize = 3;

/// Trailing serial of a code, the primary deduplication key within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u16);

impl Fingerprint {
    /// Parse a run of one to three ASCII digits.
    fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty()
            || digits.len() > FINGERPRINT_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        digits.parse().ok().map(Self)
    }

    /// Numeric serial in `0..=999`.
    #[must_use]
    pub const fn serial(self) -> u16 {
        self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:03}", self.0)
    }
}

/// A raw input resolved to its canonical identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCode {
    /// Canonical code.
    pub code: String,

    /// Family of the raw input.
    pub family: CodeFamily,

    /// Fingerprint of the canonical code, if it ends in digits.
    pub fingerprint: Option<Fingerprint>,
}

impl NormalizedCode {
    /// Normalize a raw input; `None` when it is not a code at all.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return None;
        }

        let family = CodeFamily::of(trimmed);
        let clean = strip_separators(trimmed);

        if clean.is_empty() {
            return None;
        }

        let code = reformat(&clean, family).unwrap_or_else(|| trimmed.to_uppercase());
        let fingerprint = extract_fingerprint(&code);

        Some(Self {
            code,
            family,
            fingerprint,
        })
    }
}

/// Canonical form of `raw`, or an empty string when `raw` is not a code.
#[must_use]
pub fn normalize(raw: &str) -> String {
    NormalizedCode::parse(raw)
        .map(|normalized| normalized.code)
        .unwrap_or_default()
}

/// Fingerprint of a code: its last one to three digits, ignoring separators.
#[must_use]
pub fn extract_fingerprint(code: &str) -> Option<Fingerprint> {
    let clean = strip_separators(code);
    let (_, digits) = split_trailing_digits(&clean)?;

    Fingerprint::from_digits(digits)
}

fn reformat(clean: &str, family: CodeFamily) -> Option<String> {
    let (stem, digits) = split_trailing_digits(clean)?;
    let fingerprint = Fingerprint::from_digits(digits)?;

    let letters = stem
        .chars()
        .filter(|c| is_code_letter(*c))
        .collect::<String>()
        .to_uppercase();

    if letters.is_empty() {
        return None;
    }

    Some(match family {
        CodeFamily::Hyphenated => format!("{letters}-{fingerprint}"),
        CodeFamily::Compact => format!("{letters}{fingerprint}"),
    })
}

/// Hyphens and ASCII whitespace, the same set the `promo_codes.fingerprint`
/// column strips before reading the trailing digits.
fn is_separator(c: char) -> bool {
    matches!(c, '-' | ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

fn strip_separators(value: &str) -> String {
    value.chars().filter(|c| !is_separator(*c)).collect()
}

/// Split off the trailing run of at most three ASCII digits.
fn split_trailing_digits(value: &str) -> Option<(&str, &str)> {
    let start = value
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .take(FINGERPRINT_DIGITS)
        .last()
        .map(|(index, _)| index)?;

    Some(value.split_at(start))
}

fn is_code_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (c.is_alphabetic() && matches!(c, '\u{0400}'..='\u{04FF}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint(code: &str) -> Option<String> {
        extract_fingerprint(code).map(|fp| fp.to_string())
    }

    #[test]
    fn spacing_and_case_collapse_to_the_same_code() {
        assert_eq!(normalize("repro 001"), "REPRO001");
        assert_eq!(normalize("REPRO001"), "REPRO001");
        assert_eq!(normalize("  Repro\t001 "), "REPRO001");
    }

    #[test]
    fn hyphen_in_input_keeps_a_separate_family() {
        assert_eq!(normalize("Repro-001"), "REPRO-001");
        assert_ne!(normalize("Repro-001"), normalize("REPRO001"));
        assert_eq!(normalize("repro - 001"), "REPRO-001");
    }

    #[test]
    fn blank_input_is_not_a_code() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(" - "), "");
        assert!(NormalizedCode::parse("\n").is_none());
    }

    #[test]
    fn short_serials_are_zero_padded() {
        assert_eq!(normalize("abc-7"), "ABC-007");
        assert_eq!(normalize("abc42"), "ABC042");
    }

    #[test]
    fn only_the_last_three_digits_are_kept() {
        assert_eq!(normalize("REPRO0001"), "REPRO001");
        assert_eq!(normalize("AB12CD-345"), "ABCD-345");
    }

    #[test]
    fn cyrillic_letters_are_kept_and_upper_cased() {
        assert_eq!(normalize("промо-12"), "ПРОМО-012");
        assert_eq!(normalize("Акция 5"), "АКЦИЯ005");
    }

    #[test]
    fn punctuation_is_dropped_from_the_letter_part() {
        assert_eq!(normalize("re.pro_001"), "REPRO001");
    }

    #[test]
    fn codes_without_digits_fall_back_to_upper_case() {
        assert_eq!(normalize("repro"), "REPRO");
        assert_eq!(normalize(" abc-def "), "ABC-DEF");
        assert_eq!(normalize("abc-"), "ABC-");
    }

    #[test]
    fn codes_without_letters_fall_back_to_upper_case() {
        assert_eq!(normalize("123"), "123");
        assert_eq!(normalize("1-23"), "1-23");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in [
            "repro 001",
            "Repro-001",
            "abc-7",
            "REPRO0001",
            "промо-12",
            "repro",
            "abc-def",
            "123",
            "x y z 9",
        ] {
            let once = normalize(raw);

            assert_eq!(normalize(&once), once, "normalizing {raw:?} twice changed it");
        }
    }

    #[test]
    fn fingerprint_pads_short_serials() {
        assert_eq!(fingerprint("REPRO7"), Some("007".to_string()));
        assert_eq!(fingerprint("REPRO-042"), Some("042".to_string()));
        assert_eq!(fingerprint("REPRO12345"), Some("345".to_string()));
    }

    #[test]
    fn fingerprint_requires_trailing_digits() {
        assert_eq!(fingerprint("REPRONODIGITS"), None);
        assert_eq!(fingerprint("12AB"), None);
        assert_eq!(fingerprint(""), None);
    }

    #[test]
    fn parse_reports_family_and_fingerprint() {
        let parsed = NormalizedCode::parse("abc-7");

        assert_eq!(
            parsed,
            Some(NormalizedCode {
                code: "ABC-007".to_string(),
                family: CodeFamily::Hyphenated,
                fingerprint: extract_fingerprint("007"),
            })
        );

        let compact = NormalizedCode::parse("abc007");

        assert_eq!(compact.as_ref().map(|n| n.family), Some(CodeFamily::Compact));
        assert_eq!(
            compact.and_then(|n| n.fingerprint).map(Fingerprint::serial),
            Some(7)
        );
    }

    #[test]
    fn fallback_codes_without_digits_have_no_fingerprint() {
        let parsed = NormalizedCode::parse("repro");

        assert_eq!(parsed.and_then(|n| n.fingerprint), None);
    }

    #[test]
    fn only_ascii_whitespace_separates_digits() {
        // An ideographic space is not a separator, so only "23" trails it.
        assert_eq!(normalize("1\u{3000}23"), "1\u{3000}23");
        assert_eq!(fingerprint("1\u{3000}23").as_deref(), Some("023"));

        assert_eq!(fingerprint("1\u{0B}23").as_deref(), Some("123"));
    }
}
