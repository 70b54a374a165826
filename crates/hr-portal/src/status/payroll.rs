use super::{ColorToken, StatusDomain, StatusVocabulary};

/// Payroll record state; once paid a record never moves again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PayrollStatus {
    Draft,
    Processed,
    Paid,
}

impl PayrollStatus {
    const ALL: [Self; 3] = [Self::Draft, Self::Processed, Self::Paid];
}

impl StatusVocabulary for PayrollStatus {
    const DOMAIN: StatusDomain = StatusDomain::Payroll;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Processed => "processed",
            Self::Paid => "paid",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Draft => &["pending"],
            Self::Processed => &[],
            Self::Paid => &[],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Processed => "Processed",
            Self::Paid => "Paid",
        }
    }

    fn color(self) -> ColorToken {
        match self {
            Self::Draft => ColorToken::Neutral,
            Self::Processed => ColorToken::Info,
            Self::Paid => ColorToken::Success,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Draft => "pencil",
            Self::Processed => "cog",
            Self::Paid => "banknote",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Paid)
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Processed) | (Self::Processed, Self::Paid)
        )
    }
}
