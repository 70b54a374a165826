//! Status vocabularies reported by the HR backend and their display projection.
//!
//! Every lifecycle tracked by the portal is a closed enum implementing
//! [`StatusVocabulary`], paired with an explicit alias table so legacy strings
//! such as `"pending"` for a submitted claim resolve to the same variant.
//! Strings outside the vocabulary are kept verbatim in
//! [`ReportedStatus::Unrecognized`] and classified with a neutral fallback.

mod application;
mod claim;
mod document;
mod follow_up;
mod payroll;

pub use application::ApplicationStatus;
pub use claim::ClaimStatus;
pub use document::DocumentStatus;
pub use follow_up::FollowUpStatus;
pub use payroll::PayrollStatus;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle a raw status string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDomain {
    Application,
    Claim,
    Payroll,
    Document,
    FollowUp,
}

impl StatusDomain {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Application,
            Self::Claim,
            Self::Payroll,
            Self::Document,
            Self::FollowUp,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Claim => "claim",
            Self::Payroll => "payroll",
            Self::Document => "document",
            Self::FollowUp => "follow_up",
        }
    }
}

impl fmt::Display for StatusDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status domain '{0}'")]
pub struct UnknownDomain(pub String);

impl FromStr for StatusDomain {
    type Err = UnknownDomain;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_key(value).as_str() {
            "application" | "applications" => Ok(Self::Application),
            "claim" | "claims" | "benefit_claim" | "benefit_claims" => Ok(Self::Claim),
            "payroll" => Ok(Self::Payroll),
            "document" | "documents" => Ok(Self::Document),
            "follow_up" | "followup" | "follow_ups" => Ok(Self::FollowUp),
            _ => Err(UnknownDomain(value.to_string())),
        }
    }
}

/// Semantic color slot a badge is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Neutral,
    Info,
    Primary,
    Warning,
    Success,
    Danger,
}

/// Display projection of a status: what the badge says and whether the
/// lifecycle has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDescriptor {
    pub label: String,
    pub color_token: ColorToken,
    pub icon: String,
    pub is_terminal: bool,
}

pub(crate) const FALLBACK_ICON: &str = "help-circle";

impl StatusDescriptor {
    /// Neutral descriptor for a status string outside every known vocabulary.
    pub fn fallback(raw: &str) -> Self {
        Self {
            label: raw.to_uppercase(),
            color_token: ColorToken::Neutral,
            icon: FALLBACK_ICON.to_string(),
            is_terminal: false,
        }
    }
}

/// A closed status enum with its wire names, alias table and transition rules.
pub trait StatusVocabulary: Copy + Eq + fmt::Debug + 'static {
    const DOMAIN: StatusDomain;

    fn all() -> &'static [Self];

    /// Canonical wire name sent back to the backend.
    fn as_str(self) -> &'static str;

    /// Legacy or alternate spellings the backend may still report.
    fn aliases(self) -> &'static [&'static str];

    fn label(self) -> &'static str;

    fn color(self) -> ColorToken;

    fn icon(self) -> &'static str;

    fn is_terminal(self) -> bool;

    fn can_transition_to(self, next: Self) -> bool;

    fn resolve(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }

        Self::all().iter().copied().find(|status| {
            normalize_key(status.as_str()) == key
                || status
                    .aliases()
                    .iter()
                    .any(|alias| normalize_key(alias) == key)
        })
    }

    fn descriptor(self) -> StatusDescriptor {
        StatusDescriptor {
            label: self.label().to_string(),
            color_token: self.color(),
            icon: self.icon().to_string(),
            is_terminal: self.is_terminal(),
        }
    }

    fn next_statuses(self) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }
}

/// Status as reported by the backend: either a known variant or the raw
/// string, so evolving vocabularies never fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportedStatus<S> {
    Known(S),
    Unrecognized(String),
}

impl<S: StatusVocabulary> ReportedStatus<S> {
    pub fn parse(raw: &str) -> Self {
        match S::resolve(raw) {
            Some(status) => Self::Known(status),
            None => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<S> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is(&self, status: S) -> bool {
        self.known() == Some(status)
    }

    pub fn is_any(&self, statuses: &[S]) -> bool {
        self.known().is_some_and(|status| statuses.contains(&status))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn descriptor(&self) -> StatusDescriptor {
        match self {
            Self::Known(status) => status.descriptor(),
            Self::Unrecognized(raw) => StatusDescriptor::fallback(raw),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.known().is_some_and(StatusVocabulary::is_terminal)
    }
}

impl<S: StatusVocabulary> From<S> for ReportedStatus<S> {
    fn from(status: S) -> Self {
        Self::Known(status)
    }
}

impl<S: StatusVocabulary> Serialize for ReportedStatus<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, S: StatusVocabulary> Deserialize<'de> for ReportedStatus<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Map a raw status string of the given domain to its display descriptor.
///
/// Unknown strings never fail: they come back upper-cased with a neutral
/// color so a newly introduced backend status still renders.
pub fn classify(raw: &str, domain: StatusDomain) -> StatusDescriptor {
    match domain {
        StatusDomain::Application => ReportedStatus::<ApplicationStatus>::parse(raw).descriptor(),
        StatusDomain::Claim => ReportedStatus::<ClaimStatus>::parse(raw).descriptor(),
        StatusDomain::Payroll => ReportedStatus::<PayrollStatus>::parse(raw).descriptor(),
        StatusDomain::Document => ReportedStatus::<DocumentStatus>::parse(raw).descriptor(),
        StatusDomain::FollowUp => ReportedStatus::<FollowUpStatus>::parse(raw).descriptor(),
    }
}

/// Canonical wire names of the statuses reachable from `raw`.
pub fn permitted_transitions(raw: &str, domain: StatusDomain) -> Vec<&'static str> {
    fn names<S: StatusVocabulary>(raw: &str) -> Vec<&'static str> {
        S::resolve(raw)
            .map(|status| {
                status
                    .next_statuses()
                    .into_iter()
                    .map(StatusVocabulary::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    match domain {
        StatusDomain::Application => names::<ApplicationStatus>(raw),
        StatusDomain::Claim => names::<ClaimStatus>(raw),
        StatusDomain::Payroll => names::<PayrollStatus>(raw),
        StatusDomain::Document => names::<DocumentStatus>(raw),
        StatusDomain::FollowUp => names::<FollowUpStatus>(raw),
    }
}

/// Lowercase, trim and fold space, `-` and `_` runs into a single `_`.
pub(crate) fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        if matches!(ch, ' ' | '-' | '_') {
            if !key.is_empty() && !key.ends_with('_') {
                key.push('_');
            }
        } else {
            key.extend(ch.to_lowercase());
        }
    }
    while key.ends_with('_') {
        key.pop();
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_key_folds_separators_and_case() {
        assert_eq!(normalize_key("  On going Interview "), "on_going_interview");
        assert_eq!(normalize_key("approved-by_HR"), "approved_by_hr");
        assert_eq!(normalize_key("Offer  Accepted"), "offer_accepted");
        assert_eq!(normalize_key("__"), "");
    }

    #[test]
    fn classify_known_statuses_use_fixed_tables() {
        let claim = classify("approved_by_hr", StatusDomain::Claim);
        assert_eq!(claim.label, "Approved by HR");
        assert_eq!(claim.color_token, ColorToken::Success);
        assert!(!claim.is_terminal);

        let legacy = classify("pending", StatusDomain::Claim);
        assert_eq!(legacy.label, "Submitted");

        let paid = classify("paid", StatusDomain::Payroll);
        assert!(paid.is_terminal);

        let onboarding = classify("Document Submission", StatusDomain::Application);
        assert_eq!(onboarding.label, "Document Submission");
    }

    #[test]
    fn classify_unknown_status_falls_back_to_neutral() {
        for domain in StatusDomain::ordered() {
            let descriptor = classify("escalated_to_legal", domain);
            assert_eq!(descriptor.label, "ESCALATED_TO_LEGAL");
            assert_eq!(descriptor.color_token, ColorToken::Neutral);
            assert!(!descriptor.is_terminal);
        }
    }

    #[test]
    fn every_known_status_resolves_from_its_wire_name_and_aliases() {
        fn check<S: StatusVocabulary>() {
            for status in S::all() {
                assert_eq!(S::resolve(status.as_str()), Some(*status));
                for alias in status.aliases() {
                    assert_eq!(S::resolve(alias), Some(*status), "alias {alias}");
                }
            }
        }

        check::<ApplicationStatus>();
        check::<ClaimStatus>();
        check::<DocumentStatus>();
        check::<PayrollStatus>();
        check::<FollowUpStatus>();
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        fn check<S: StatusVocabulary>() {
            for status in S::all().iter().filter(|status| status.is_terminal()) {
                assert!(status.next_statuses().is_empty(), "{status:?}");
            }
        }

        check::<ApplicationStatus>();
        check::<ClaimStatus>();
        check::<DocumentStatus>();
        check::<PayrollStatus>();
        check::<FollowUpStatus>();
    }

    #[test]
    fn reported_status_round_trips_unknown_strings() {
        let status: ReportedStatus<ClaimStatus> =
            serde_json::from_str("\"escalated\"").expect("any string deserializes");
        assert_eq!(status, ReportedStatus::Unrecognized("escalated".to_string()));
        assert_eq!(
            serde_json::to_string(&status).expect("serializes"),
            "\"escalated\""
        );

        let known: ReportedStatus<ClaimStatus> =
            serde_json::from_str("\"approved\"").expect("alias deserializes");
        assert_eq!(known, ReportedStatus::Known(ClaimStatus::ApprovedByHr));
        assert_eq!(
            serde_json::to_string(&known).expect("serializes"),
            "\"approved_by_hr\""
        );
    }

    #[test]
    fn permitted_transitions_follow_pipeline() {
        assert_eq!(
            permitted_transitions("approved", StatusDomain::Claim),
            vec!["for_submission_to_agency"]
        );
        assert!(permitted_transitions("mystery", StatusDomain::Claim).is_empty());
        assert_eq!(
            permitted_transitions("processed", StatusDomain::Payroll),
            vec!["paid"]
        );
    }

    #[test]
    fn domain_parses_common_spellings() {
        assert_eq!("claims".parse::<StatusDomain>(), Ok(StatusDomain::Claim));
        assert_eq!("follow-up".parse::<StatusDomain>(), Ok(StatusDomain::FollowUp));
        assert!("timesheet".parse::<StatusDomain>().is_err());
    }
}
