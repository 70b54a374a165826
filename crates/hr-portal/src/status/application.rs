use super::{ColorToken, StatusDomain, StatusVocabulary};

/// Stage of a job application in the hiring pipeline.
///
/// Stages advance monotonically in declaration order; `Rejected` is the single
/// terminal branch and is reachable from every stage before `Hired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApplicationStatus {
    Pending,
    ShortListed,
    Interview,
    Offered,
    Accepted,
    Onboarding,
    DocumentSubmission,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    const ALL: [Self; 9] = [
        Self::Pending,
        Self::ShortListed,
        Self::Interview,
        Self::Offered,
        Self::Accepted,
        Self::Onboarding,
        Self::DocumentSubmission,
        Self::Hired,
        Self::Rejected,
    ];

    /// Position along the hiring path; `None` for the rejection branch.
    pub const fn stage_rank(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::ShortListed => Some(1),
            Self::Interview => Some(2),
            Self::Offered => Some(3),
            Self::Accepted => Some(4),
            Self::Onboarding => Some(5),
            Self::DocumentSubmission => Some(6),
            Self::Hired => Some(7),
            Self::Rejected => None,
        }
    }
}

impl StatusVocabulary for ApplicationStatus {
    const DOMAIN: StatusDomain = StatusDomain::Application;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::ShortListed => "ShortListed",
            Self::Interview => "On going Interview",
            Self::Offered => "Offered",
            Self::Accepted => "Offer Accepted",
            Self::Onboarding => "Onboarding",
            Self::DocumentSubmission => "Document Submission",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Pending => &["Applied"],
            Self::ShortListed => &["Short Listed"],
            Self::Interview => &["Interview", "Ongoing Interview"],
            Self::Offered => &["Offer Sent"],
            Self::Accepted => &["Accepted"],
            Self::Onboarding => &[],
            Self::DocumentSubmission => &["Documents Submission"],
            Self::Hired => &[],
            Self::Rejected => &[],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::ShortListed => "Shortlisted",
            Self::Interview => "Interview",
            Self::Offered => "Offered",
            Self::Accepted => "Offer Accepted",
            Self::Onboarding => "Onboarding",
            Self::DocumentSubmission => "Document Submission",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    fn color(self) -> ColorToken {
        match self {
            Self::Pending => ColorToken::Warning,
            Self::ShortListed | Self::Offered => ColorToken::Info,
            Self::Interview | Self::Onboarding | Self::DocumentSubmission => ColorToken::Primary,
            Self::Accepted | Self::Hired => ColorToken::Success,
            Self::Rejected => ColorToken::Danger,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Pending => "clock",
            Self::ShortListed => "list-check",
            Self::Interview => "calendar",
            Self::Offered => "mail",
            Self::Accepted => "handshake",
            Self::Onboarding => "user-plus",
            Self::DocumentSubmission => "file-up",
            Self::Hired => "badge-check",
            Self::Rejected => "x-circle",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }

    fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }

        match (self.stage_rank(), next.stage_rank()) {
            (_, None) => true,
            (Some(current), Some(target)) => target > current,
            (None, Some(_)) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_monotonic_with_rejection_branch() {
        use ApplicationStatus::*;

        assert!(Pending.can_transition_to(ShortListed));
        assert!(Interview.can_transition_to(Offered));
        assert!(!Offered.can_transition_to(Interview));
        assert!(Onboarding.can_transition_to(Rejected));
        assert!(!Hired.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn legacy_spellings_resolve() {
        assert_eq!(
            ApplicationStatus::resolve("interview"),
            Some(ApplicationStatus::Interview)
        );
        assert_eq!(
            ApplicationStatus::resolve("on going interview"),
            Some(ApplicationStatus::Interview)
        );
        assert_eq!(
            ApplicationStatus::resolve("accepted"),
            Some(ApplicationStatus::Accepted)
        );
        assert_eq!(
            ApplicationStatus::resolve("shortlisted"),
            Some(ApplicationStatus::ShortListed)
        );
        assert_eq!(ApplicationStatus::resolve("withdrawn"), None);
    }
}
