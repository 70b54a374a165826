use super::{ColorToken, StatusDomain, StatusVocabulary};

/// Applicant follow-up request state. Only `Pending` can still be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FollowUpStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl FollowUpStatus {
    const ALL: [Self; 4] = [Self::Pending, Self::Accepted, Self::Rejected, Self::Expired];
}

impl StatusVocabulary for FollowUpStatus {
    const DOMAIN: StatusDomain = StatusDomain::FollowUp;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Pending => &["open"],
            Self::Accepted => &["resolved"],
            Self::Rejected => &["declined"],
            Self::Expired => &[],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Awaiting HR",
            Self::Accepted => "Extension Granted",
            Self::Rejected => "Declined",
            Self::Expired => "Expired",
        }
    }

    fn color(self) -> ColorToken {
        match self {
            Self::Pending => ColorToken::Warning,
            Self::Accepted => ColorToken::Success,
            Self::Rejected => ColorToken::Danger,
            Self::Expired => ColorToken::Neutral,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Pending => "message-circle",
            Self::Accepted => "calendar-plus",
            Self::Rejected => "ban",
            Self::Expired => "timer-off",
        }
    }

    fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(self, Self::Pending) && !matches!(next, Self::Pending)
    }
}
