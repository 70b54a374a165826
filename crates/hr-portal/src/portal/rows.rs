//! Read-only projections of [`ViewState`] into what the dashboard renders.

use serde::Serialize;

use super::state::{Operation, ViewState};
use crate::gate::{allowed_actions, Action, ActionSet};
use crate::status::{ColorToken, StatusDescriptor};
use crate::workflows::applications::filter_by_tab;
use crate::workflows::documents::{
    outstanding_requirements, resolve, ApplicationDocuments, DocumentSlot, MatchRule,
};
use crate::workflows::money::format_amount;
use crate::workflows::payroll::{AmountType, PayrollBreakdown, TitleKind};
use crate::workflows::{
    ApplicationId, ClaimId, EmployeeId, FollowUpId, PayrollId, RequirementId, SubmissionId,
};

/// Button for an action the gate allows. Buttons for disallowed actions are
/// not projected at all; `enabled` is false only while the record's
/// operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    pub action: Action,
    pub label: &'static str,
    pub enabled: bool,
}

fn buttons(actions: ActionSet, busy: bool) -> Vec<ActionButton> {
    actions
        .into_iter()
        .map(|action| ActionButton {
            action,
            label: action.label(),
            enabled: !busy,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRow {
    pub id: ClaimId,
    pub employee: String,
    pub benefit: &'static str,
    pub claim_type: String,
    pub amount: Option<String>,
    pub badge: StatusDescriptor,
    pub buttons: Vec<ActionButton>,
}

impl ClaimRow {
    pub fn button(&self, action: Action) -> Option<&ActionButton> {
        self.buttons.iter().find(|button| button.action == action)
    }
}

pub fn claim_rows(state: &ViewState) -> Vec<ClaimRow> {
    state
        .claims
        .iter()
        .map(|claim| ClaimRow {
            id: claim.id,
            employee: claim.employee_label(),
            benefit: claim.benefit_type.label(),
            claim_type: claim.claim_type.clone(),
            amount: claim.amount.map(format_amount),
            badge: claim.status.descriptor(),
            buttons: buttons(
                allowed_actions(&claim.status, state.role),
                state.is_in_flight(Operation::Claim(claim.id)),
            ),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRow {
    pub id: ApplicationId,
    pub applicant: String,
    pub position: String,
    pub badge: StatusDescriptor,
    pub buttons: Vec<ActionButton>,
}

/// Applications under the active tab.
pub fn application_rows(state: &ViewState) -> Vec<ApplicationRow> {
    filter_by_tab(&state.applications, state.active_tab)
        .into_iter()
        .map(|application| ApplicationRow {
            id: application.id,
            applicant: application.applicant.full_name(),
            position: application.position_title().to_string(),
            badge: application.status.descriptor(),
            buttons: buttons(
                allowed_actions(&application.status, state.role),
                state.is_in_flight(Operation::Application(application.id)),
            ),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRow {
    pub label: String,
    pub requirement: Option<RequirementId>,
    pub required: bool,
    pub submission: Option<SubmissionId>,
    pub file_name: Option<String>,
    pub matched_by: Option<MatchRule>,
    pub status_variant: ColorToken,
    pub status_label: String,
    pub buttons: Vec<ActionButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowUpRow {
    pub id: FollowUpId,
    pub message: String,
    pub badge: StatusDescriptor,
    pub buttons: Vec<ActionButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentPanel {
    pub application: ApplicationId,
    pub rows: Vec<DocumentRow>,
    pub follow_ups: Vec<FollowUpRow>,
    pub outstanding: Vec<String>,
    pub mark_done: ActionButton,
}

/// Requirements panel for one application: one row per checklist slot, then
/// a row for every requirement no slot claimed. `None` until the documents
/// have been fetched.
pub fn document_panel(
    state: &ViewState,
    application: ApplicationId,
    slots: &[DocumentSlot],
) -> Option<DocumentPanel> {
    let documents = state.documents.get(&application)?;
    let role = state.role;

    let mut rows: Vec<DocumentRow> = slots
        .iter()
        .map(|slot| document_row(state, slot, documents))
        .collect();

    for requirement in &documents.requirements {
        if rows.iter().any(|row| row.requirement == Some(requirement.id)) {
            continue;
        }
        let slot = DocumentSlot::new(requirement.name.clone()).with_requirement(requirement.id);
        rows.push(document_row(state, &slot, documents));
    }

    let follow_ups = state
        .follow_ups
        .get(&application)
        .map(|requests| {
            requests
                .iter()
                .map(|request| FollowUpRow {
                    id: request.id,
                    message: request.message.clone(),
                    badge: request.status.descriptor(),
                    buttons: buttons(
                        allowed_actions(&request.status, role),
                        state.is_in_flight(Operation::FollowUp(request.id)),
                    ),
                })
                .collect()
        })
        .unwrap_or_default();

    let outstanding: Vec<String> = outstanding_requirements(&documents.requirements, &documents.submissions)
        .into_iter()
        .map(|requirement| requirement.name.clone())
        .collect();
    let enabled = outstanding.is_empty() && completion_allowed(state, application);

    Some(DocumentPanel {
        application,
        rows,
        follow_ups,
        outstanding,
        mark_done: ActionButton {
            action: Action::MarkSubmissionComplete,
            label: Action::MarkSubmissionComplete.label(),
            enabled,
        },
    })
}

fn document_row(state: &ViewState, slot: &DocumentSlot, documents: &ApplicationDocuments) -> DocumentRow {
    let resolution = resolve(slot, &documents.requirements, &documents.submissions);
    DocumentRow {
        label: slot.label.clone(),
        requirement: resolution.requirement.map(|requirement| requirement.id),
        required: resolution
            .requirement
            .is_some_and(|requirement| requirement.is_required),
        submission: resolution.submission.map(|submission| submission.id),
        file_name: resolution
            .submission
            .and_then(|submission| submission.file_name.clone()),
        matched_by: resolution.matched_by,
        status_variant: resolution.status_variant,
        status_label: resolution.status_label,
        buttons: resolution
            .submission
            .map(|submission| {
                buttons(
                    allowed_actions(&submission.status, state.role),
                    state.is_in_flight(Operation::Document(submission.id)),
                )
            })
            .unwrap_or_default(),
    }
}

/// Role and application-status half of the "Mark as Done" gate. An
/// application that has not been listed yet is judged on its documents alone.
fn completion_allowed(state: &ViewState, application: ApplicationId) -> bool {
    if !state.role.is_staff() || state.is_in_flight(Operation::CompleteDocuments(application)) {
        return false;
    }
    match state.application(application) {
        Some(listed) => {
            allowed_actions(&listed.status, state.role).contains(&Action::MarkSubmissionComplete)
        }
        None => true,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRow {
    pub employee_id: EmployeeId,
    pub employee: String,
    /// The employee has an override instead of the title default.
    pub custom: bool,
    /// Tax titles only.
    pub rate: Option<f64>,
    pub amount: Option<String>,
}

/// Employees holding the title in the open assign-title panel.
///
/// Percentages apply to the employee's basic pay from the loaded payroll
/// records, latest period first. Without a record only fixed amounts are
/// shown.
pub fn assignment_rows(state: &ViewState) -> Vec<AssignmentRow> {
    let Some(panel) = &state.assignment else {
        return Vec::new();
    };
    panel
        .assigned
        .iter()
        .map(|assignment| {
            let base = state
                .payroll_records
                .iter()
                .filter(|record| record.employee_id == assignment.employee_id)
                .max_by_key(|record| record.period_id)
                .map(|record| record.basic_pay);
            let (rate, amount) = match panel.kind {
                TitleKind::Deduction => {
                    let amount = state
                        .deduction_titles
                        .iter()
                        .find(|title| title.id == panel.title)
                        .filter(|title| {
                            base.is_some()
                                || title.amount_type == AmountType::Fixed
                                || assignment.custom_amount.is_some()
                        })
                        .map(|title| title.effective_amount(Some(assignment), base.unwrap_or(0.0)));
                    (None, amount)
                }
                TitleKind::Tax => {
                    let title = state.tax_titles.iter().find(|title| title.id == panel.title);
                    let rate = title.map(|title| title.effective_rate(Some(assignment)));
                    let amount = title
                        .zip(base)
                        .map(|(title, base)| title.effective_amount(Some(assignment), base));
                    (rate, amount)
                }
            };
            let employee = assignment
                .employee_name
                .clone()
                .or_else(|| {
                    state
                        .employees
                        .iter()
                        .find(|employee| employee.id == assignment.employee_id)
                        .map(|employee| employee.full_name())
                })
                .unwrap_or_else(|| format!("Employee #{}", assignment.employee_id));
            AssignmentRow {
                employee_id: assignment.employee_id,
                employee,
                custom: assignment.custom_amount.is_some() || assignment.custom_rate.is_some(),
                rate,
                amount: amount.map(format_amount),
            }
        })
        .collect()
}

pub fn payroll_breakdown(state: &ViewState, id: PayrollId) -> Option<PayrollBreakdown> {
    state
        .payroll_records
        .iter()
        .find(|record| record.id == id)
        .map(PayrollBreakdown::from)
}
