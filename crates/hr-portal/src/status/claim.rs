use super::{ColorToken, StatusDomain, StatusVocabulary};

/// Benefit claim pipeline from employee submission to agency completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClaimStatus {
    Submitted,
    UnderReview,
    ApprovedByHr,
    ForSubmissionToAgency,
    Completed,
    Rejected,
}

impl ClaimStatus {
    const ALL: [Self; 6] = [
        Self::Submitted,
        Self::UnderReview,
        Self::ApprovedByHr,
        Self::ForSubmissionToAgency,
        Self::Completed,
        Self::Rejected,
    ];

    /// Statuses in which HR may still approve or reject the claim.
    pub const REVIEWABLE: [Self; 2] = [Self::Submitted, Self::UnderReview];
}

impl StatusVocabulary for ClaimStatus {
    const DOMAIN: StatusDomain = StatusDomain::Claim;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::ApprovedByHr => "approved_by_hr",
            Self::ForSubmissionToAgency => "for_submission_to_agency",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Submitted => &["pending"],
            Self::ApprovedByHr => &["approved"],
            Self::UnderReview
            | Self::ForSubmissionToAgency
            | Self::Completed
            | Self::Rejected => &[],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::ApprovedByHr => "Approved by HR",
            Self::ForSubmissionToAgency => "For Submission to Agency",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }

    fn color(self) -> ColorToken {
        match self {
            Self::Submitted => ColorToken::Warning,
            Self::UnderReview => ColorToken::Info,
            Self::ApprovedByHr | Self::Completed => ColorToken::Success,
            Self::ForSubmissionToAgency => ColorToken::Primary,
            Self::Rejected => ColorToken::Danger,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Submitted => "inbox",
            Self::UnderReview => "search",
            Self::ApprovedByHr => "check",
            Self::ForSubmissionToAgency => "send",
            Self::Completed => "check-circle",
            Self::Rejected => "x-circle",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Submitted, Self::UnderReview)
                | (Self::Submitted | Self::UnderReview, Self::ApprovedByHr)
                | (Self::Submitted | Self::UnderReview, Self::Rejected)
                | (Self::ApprovedByHr, Self::ForSubmissionToAgency)
                | (Self::ForSubmissionToAgency, Self::Completed)
        )
    }
}
