//! Postal code (CEP) parsing.

use std::{fmt, str::FromStr};

use crate::errors::ValidationError;

const CEP_LEN: usize = 8;
/// Lowest CEP assigned by Correios (São Paulo, 01000-000).
const MIN_CEP: u32 = 1_000_000;

/// A validated, normalized postal code: exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Parses `raw`, accepting the `NNNNN-NNN` form and surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        let digits = match trimmed.split_once('-') {
            Some((head, tail)) if head.len() == 5 => format!("{head}{tail}"),
            Some(_) => return Err(ValidationError::Format(trimmed.to_string())),
            None => trimmed.to_string(),
        };

        if digits.len() != CEP_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::Format(trimmed.to_string()));
        }

        let value: u32 = digits
            .parse()
            .map_err(|_| ValidationError::Format(trimmed.to_string()))?;
        if value < MIN_CEP {
            return Err(ValidationError::OutOfRange(digits));
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `NNNNN-NNN` presentation form.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl FromStr for LookupKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips everything but digits from a provider-reported postal code.
pub(crate) fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_hyphenated() {
        assert_eq!(LookupKey::parse("29330000").unwrap().as_str(), "29330000");
        assert_eq!(LookupKey::parse(" 29330-000 ").unwrap().as_str(), "29330000");
    }

    #[test]
    fn formats_with_hyphen() {
        assert_eq!(LookupKey::parse("01001000").unwrap().formatted(), "01001-000");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(LookupKey::parse("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_wrong_shape() {
        for raw in ["2933000", "293300000", "2933a000", "293-30000", "29330-00a"] {
            assert!(
                matches!(LookupKey::parse(raw), Err(ValidationError::Format(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unassigned_range() {
        assert_eq!(
            LookupKey::parse("00000000"),
            Err(ValidationError::OutOfRange("00000000".into()))
        );
        assert!(LookupKey::parse("00999999").is_err());
        assert!(LookupKey::parse("01000000").is_ok());
    }

    #[test]
    fn digits_only_strips_separators() {
        assert_eq!(digits_only("29330-000"), "29330000");
    }
}
