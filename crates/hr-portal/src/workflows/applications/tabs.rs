use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::Application;
use crate::status::{normalize_key, ApplicationStatus, ReportedStatus};

/// Tabs of the onboarding dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowTab {
    #[default]
    Overview,
    Pending,
    ShortListed,
    Interview,
    Offered,
    Accepted,
    Onboarding,
    Hired,
    Rejected,
}

impl WorkflowTab {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Overview,
            Self::Pending,
            Self::ShortListed,
            Self::Interview,
            Self::Offered,
            Self::Accepted,
            Self::Onboarding,
            Self::Hired,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Pending => "Pending",
            Self::ShortListed => "Shortlisted",
            Self::Interview => "Interview",
            Self::Offered => "Offered",
            Self::Accepted => "Accepted",
            Self::Onboarding => "Onboarding",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    /// Statuses shown under this tab. Empty for `Overview`, which shows all.
    pub const fn statuses(self) -> &'static [ApplicationStatus] {
        match self {
            Self::Overview => &[],
            Self::Pending => &[ApplicationStatus::Pending],
            Self::ShortListed => &[ApplicationStatus::ShortListed],
            Self::Interview => &[ApplicationStatus::Interview],
            Self::Offered => &[ApplicationStatus::Offered],
            Self::Accepted => &[ApplicationStatus::Accepted],
            Self::Onboarding => &[
                ApplicationStatus::Onboarding,
                ApplicationStatus::DocumentSubmission,
            ],
            Self::Hired => &[ApplicationStatus::Hired],
            Self::Rejected => &[ApplicationStatus::Rejected],
        }
    }

    pub fn matches(self, status: &ReportedStatus<ApplicationStatus>) -> bool {
        match self {
            Self::Overview => true,
            tab => status.is_any(tab.statuses()),
        }
    }
}

impl fmt::Display for WorkflowTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown workflow tab '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for WorkflowTab {
    type Err = UnknownTab;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(value);
        Self::ordered()
            .into_iter()
            .find(|tab| {
                normalize_key(tab.label()) == key
                    || tab.statuses().len() == 1 && {
                        let status = tab.statuses()[0];
                        ReportedStatus::<ApplicationStatus>::parse(&key).is(status)
                    }
            })
            .ok_or_else(|| UnknownTab(value.to_string()))
    }
}

/// Applications visible under `tab`, in their original order.
pub fn filter_by_tab(applications: &[Application], tab: WorkflowTab) -> Vec<&Application> {
    applications
        .iter()
        .filter(|application| tab.matches(&application.status))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabCount {
    pub tab: WorkflowTab,
    pub count: usize,
}

/// Badge counts for every tab.
pub fn tab_counts(applications: &[Application]) -> Vec<TabCount> {
    WorkflowTab::ordered()
        .into_iter()
        .map(|tab| TabCount {
            tab,
            count: applications
                .iter()
                .filter(|application| tab.matches(&application.status))
                .count(),
        })
        .collect()
}
