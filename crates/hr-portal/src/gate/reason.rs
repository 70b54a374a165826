use std::fmt;

use serde::Serialize;

use super::GateError;

/// Minimum trimmed length of a claim or document rejection reason.
pub const MIN_REASON_CHARS: usize = 10;

/// Rejection reason that passed client-side validation. Requests that reject
/// a claim or a document only accept this type, so a shorter reason can never
/// reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RejectionReason(String);

impl RejectionReason {
    pub fn parse(raw: &str) -> Result<Self, GateError> {
        let trimmed = raw.trim();
        let found = trimmed.chars().count();
        if found < MIN_REASON_CHARS {
            return Err(GateError::ReasonTooShort {
                min: MIN_REASON_CHARS,
                found,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_reasons_are_refused() {
        assert_eq!(
            RejectionReason::parse("blurry"),
            Err(GateError::ReasonTooShort { min: 10, found: 6 })
        );
        assert_eq!(
            RejectionReason::parse("bad scan"),
            Err(GateError::ReasonTooShort { min: 10, found: 8 })
        );
    }

    #[test]
    fn length_is_measured_after_trimming() {
        assert!(RejectionReason::parse("   blurry     ").is_err());
        let reason = RejectionReason::parse("  blurry scan ").expect("11 chars");
        assert_eq!(reason.as_str(), "blurry scan");
    }

    #[test]
    fn exactly_ten_characters_pass() {
        assert!(RejectionReason::parse("0123456789").is_ok());
    }
}
