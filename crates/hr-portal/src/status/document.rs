use super::{ColorToken, StatusDomain, StatusVocabulary};

/// Review state of an uploaded onboarding document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentStatus {
    NotSubmitted,
    UnderReview,
    Approved,
    Rejected,
}

impl DocumentStatus {
    const ALL: [Self; 4] = [
        Self::NotSubmitted,
        Self::UnderReview,
        Self::Approved,
        Self::Rejected,
    ];
}

impl StatusVocabulary for DocumentStatus {
    const DOMAIN: StatusDomain = StatusDomain::Document;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::NotSubmitted => "not_submitted",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::NotSubmitted => &[],
            Self::UnderReview => &["pending", "uploaded", "submitted"],
            Self::Approved => &["received"],
            Self::Rejected => &["resubmission_required"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NotSubmitted => "Not Submitted",
            Self::UnderReview => "Pending Review",
            Self::Approved => "Approved",
            Self::Rejected => "Resubmission Required",
        }
    }

    fn color(self) -> ColorToken {
        match self {
            Self::NotSubmitted => ColorToken::Neutral,
            Self::UnderReview => ColorToken::Warning,
            Self::Approved => ColorToken::Success,
            Self::Rejected => ColorToken::Danger,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::NotSubmitted => "file",
            Self::UnderReview => "hourglass",
            Self::Approved => "file-check",
            Self::Rejected => "file-x",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotSubmitted | Self::Rejected, Self::UnderReview)
                | (Self::UnderReview, Self::Approved | Self::Rejected)
        )
    }
}
