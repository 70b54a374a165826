//! Client-side action gating.
//!
//! The gate decides which mutating buttons a role sees for a given status and
//! validates input before any request is sent. It is advisory: the backend
//! re-validates every call and its answer wins.

mod reason;

pub use reason::{RejectionReason, MIN_REASON_CHARS};

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::{
    ApplicationStatus, ClaimStatus, DocumentStatus, FollowUpStatus, PayrollStatus,
    ReportedStatus, StatusDomain, StatusVocabulary,
};

/// Portal user role as issued by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[serde(alias = "hr_staff", alias = "hr_manager")]
    Hr,
    #[default]
    Employee,
    Applicant,
}

impl Role {
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Hr)
    }
}

/// Mutating operation a dashboard button triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ApproveClaim,
    RejectClaim,
    ForwardClaimToAgency,
    CompleteClaim,
    EditApplicationStatus,
    ScheduleInterview,
    SendOffer,
    StartOnboarding,
    RejectApplication,
    MarkSubmissionComplete,
    ApproveDocument,
    RejectDocument,
    AcceptFollowUp,
    RejectFollowUp,
    ProcessPayroll,
    MarkPayrollPaid,
    GeneratePayroll,
    AssignTitle,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ApproveClaim => "Approve",
            Self::RejectClaim => "Reject",
            Self::ForwardClaimToAgency => "Forward to Agency",
            Self::CompleteClaim => "Mark Completed",
            Self::EditApplicationStatus => "Update Status",
            Self::ScheduleInterview => "Schedule Interview",
            Self::SendOffer => "Send Offer",
            Self::StartOnboarding => "Start Onboarding",
            Self::RejectApplication => "Reject Applicant",
            Self::MarkSubmissionComplete => "Mark as Done",
            Self::ApproveDocument => "Approve Document",
            Self::RejectDocument => "Reject Document",
            Self::AcceptFollowUp => "Grant Extension",
            Self::RejectFollowUp => "Decline",
            Self::ProcessPayroll => "Process",
            Self::MarkPayrollPaid => "Mark Paid",
            Self::GeneratePayroll => "Generate Payroll",
            Self::AssignTitle => "Assign",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type ActionSet = BTreeSet<Action>;

/// Status vocabularies with a fixed action table.
pub trait GatedStatus: StatusVocabulary {
    fn actions(self) -> &'static [Action];
}

impl GatedStatus for ApplicationStatus {
    fn actions(self) -> &'static [Action] {
        use Action::*;

        match self {
            Self::Pending => &[EditApplicationStatus, ScheduleInterview, RejectApplication],
            Self::ShortListed => &[ScheduleInterview, RejectApplication],
            Self::Interview => &[
                EditApplicationStatus,
                ScheduleInterview,
                SendOffer,
                RejectApplication,
            ],
            Self::Offered => &[RejectApplication],
            Self::Accepted => &[StartOnboarding, RejectApplication],
            Self::Onboarding | Self::DocumentSubmission => {
                &[MarkSubmissionComplete, RejectApplication]
            }
            Self::Hired | Self::Rejected => &[],
        }
    }
}

impl GatedStatus for ClaimStatus {
    fn actions(self) -> &'static [Action] {
        match self {
            Self::Submitted | Self::UnderReview => &[Action::ApproveClaim, Action::RejectClaim],
            Self::ApprovedByHr => &[Action::ForwardClaimToAgency],
            Self::ForSubmissionToAgency => &[Action::CompleteClaim],
            Self::Completed | Self::Rejected => &[],
        }
    }
}

impl GatedStatus for DocumentStatus {
    fn actions(self) -> &'static [Action] {
        match self {
            Self::UnderReview => &[Action::ApproveDocument, Action::RejectDocument],
            Self::NotSubmitted | Self::Approved | Self::Rejected => &[],
        }
    }
}

impl GatedStatus for FollowUpStatus {
    fn actions(self) -> &'static [Action] {
        match self {
            Self::Pending => &[Action::AcceptFollowUp, Action::RejectFollowUp],
            Self::Accepted | Self::Rejected | Self::Expired => &[],
        }
    }
}

impl GatedStatus for PayrollStatus {
    fn actions(self) -> &'static [Action] {
        match self {
            Self::Draft => &[Action::ProcessPayroll],
            Self::Processed => &[Action::MarkPayrollPaid],
            Self::Paid => &[],
        }
    }
}

/// Actions `role` may trigger on a record in `status`.
///
/// Non-staff roles and statuses outside the known vocabulary get nothing.
pub fn allowed_actions<S: GatedStatus>(status: &ReportedStatus<S>, role: Role) -> ActionSet {
    if !role.is_staff() {
        return ActionSet::new();
    }

    status
        .known()
        .map(|status| status.actions().iter().copied().collect())
        .unwrap_or_default()
}

/// [`allowed_actions`] for a raw status string of `domain`.
pub fn allowed_actions_for(domain: StatusDomain, raw: &str, role: Role) -> ActionSet {
    match domain {
        StatusDomain::Application => {
            allowed_actions(&ReportedStatus::<ApplicationStatus>::parse(raw), role)
        }
        StatusDomain::Claim => allowed_actions(&ReportedStatus::<ClaimStatus>::parse(raw), role),
        StatusDomain::Payroll => {
            allowed_actions(&ReportedStatus::<PayrollStatus>::parse(raw), role)
        }
        StatusDomain::Document => {
            allowed_actions(&ReportedStatus::<DocumentStatus>::parse(raw), role)
        }
        StatusDomain::FollowUp => {
            allowed_actions(&ReportedStatus::<FollowUpStatus>::parse(raw), role)
        }
    }
}

pub fn ensure_allowed<S: GatedStatus>(
    status: &ReportedStatus<S>,
    role: Role,
    action: Action,
) -> Result<(), GateError> {
    if !role.is_staff() {
        return Err(GateError::RoleNotPermitted { action, role });
    }
    if allowed_actions(status, role).contains(&action) {
        Ok(())
    } else {
        Err(GateError::ActionNotAllowed {
            action,
            status: status.descriptor().label,
        })
    }
}

/// Gate for actions that depend only on the role (payroll generation,
/// title assignment).
pub fn ensure_role(role: Role, action: Action) -> Result<(), GateError> {
    if role.is_staff() {
        Ok(())
    } else {
        Err(GateError::RoleNotPermitted { action, role })
    }
}

/// Refusals raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("\"{action}\" is not available while the status is {status}")]
    ActionNotAllowed { action: Action, status: String },
    #[error("\"{action}\" is not permitted for the {role:?} role")]
    RoleNotPermitted { action: Action, role: Role },
    #[error("please provide a reason of at least {min} characters (currently {found})")]
    ReasonTooShort { min: usize, found: usize },
    #[error(
        "all required documents must be approved before marking the submission as done; outstanding: {}",
        .missing.join(", ")
    )]
    DocumentsOutstanding { missing: Vec<String> },
    #[error("this follow-up request is already {status} and cannot be changed")]
    AlreadyResolved { status: String },
    #[error("an extension must be at least one day")]
    InvalidExtension,
    #[error("select at least one employee")]
    NoEmployeesSelected,
    #[error("select at least one application")]
    NoApplicationsSelected,
    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// Check a status-editor move against the vocabulary's transition table.
pub fn ensure_transition<S: StatusVocabulary>(
    current: &ReportedStatus<S>,
    next: S,
) -> Result<(), GateError> {
    match current.known() {
        Some(status) if status.can_transition_to(next) => Ok(()),
        _ => Err(GateError::InvalidTransition {
            from: current.descriptor().label,
            to: next.label().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(raw: &str) -> ReportedStatus<ClaimStatus> {
        ReportedStatus::parse(raw)
    }

    fn application(raw: &str) -> ReportedStatus<ApplicationStatus> {
        ReportedStatus::parse(raw)
    }

    #[test]
    fn claims_are_reviewable_only_before_approval() {
        for raw in ["submitted", "under_review", "pending"] {
            let actions = allowed_actions(&claim(raw), Role::Hr);
            assert!(actions.contains(&Action::ApproveClaim), "{raw}");
            assert!(actions.contains(&Action::RejectClaim), "{raw}");
        }

        for raw in [
            "approved_by_hr",
            "approved",
            "for_submission_to_agency",
            "completed",
            "rejected",
        ] {
            let actions = allowed_actions(&claim(raw), Role::Admin);
            assert!(!actions.contains(&Action::ApproveClaim), "{raw}");
            assert!(!actions.contains(&Action::RejectClaim), "{raw}");
        }
    }

    #[test]
    fn start_onboarding_only_after_offer_acceptance() {
        for raw in ["Offer Accepted", "Accepted"] {
            assert!(allowed_actions(&application(raw), Role::Hr).contains(&Action::StartOnboarding));
        }
        for raw in ["Pending", "Offered", "Onboarding", "Hired"] {
            assert!(
                !allowed_actions(&application(raw), Role::Hr).contains(&Action::StartOnboarding),
                "{raw}"
            );
        }
    }

    #[test]
    fn status_editor_limited_to_pending_and_interview() {
        let editable: Vec<_> = ApplicationStatus::all()
            .iter()
            .filter(|status| {
                allowed_actions(&ReportedStatus::Known(**status), Role::Hr)
                    .contains(&Action::EditApplicationStatus)
            })
            .copied()
            .collect();
        assert_eq!(
            editable,
            vec![ApplicationStatus::Pending, ApplicationStatus::Interview]
        );
        assert!(allowed_actions(&application("On going Interview"), Role::Hr)
            .contains(&Action::EditApplicationStatus));
    }

    #[test]
    fn non_staff_and_unknown_statuses_get_nothing() {
        assert!(allowed_actions(&claim("submitted"), Role::Employee).is_empty());
        assert!(allowed_actions(&claim("submitted"), Role::Applicant).is_empty());
        assert!(allowed_actions(&claim("escalated"), Role::Admin).is_empty());
        assert!(matches!(
            ensure_allowed(&claim("submitted"), Role::Employee, Action::ApproveClaim),
            Err(GateError::RoleNotPermitted { .. })
        ));
    }

    #[test]
    fn ensure_allowed_names_the_blocking_status() {
        let error = ensure_allowed(&claim("completed"), Role::Hr, Action::ApproveClaim)
            .expect_err("completed claims cannot be approved");
        assert_eq!(
            error.to_string(),
            "\"Approve\" is not available while the status is Completed"
        );
    }

    #[test]
    fn transition_check_uses_vocabulary_table() {
        assert!(ensure_transition(&application("Pending"), ApplicationStatus::ShortListed).is_ok());
        assert!(ensure_transition(&application("Offered"), ApplicationStatus::Pending).is_err());
        assert!(ensure_transition(&application("Withdrawn"), ApplicationStatus::Hired).is_err());
    }

    #[test]
    fn outstanding_documents_message_lists_names() {
        let error = GateError::DocumentsOutstanding {
            missing: vec!["NBI Clearance".to_string(), "TIN".to_string()],
        };
        assert!(error.to_string().ends_with("outstanding: NBI Clearance, TIN"));
    }
}
