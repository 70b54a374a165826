//! Serializable view state and the reducer that is its only writer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::notification::{Notification, Severity};
use super::preview::PreviewSlot;
use crate::api::ErrorCategory;
use crate::gate::Role;
use crate::workflows::applications::{Application, WorkflowTab};
use crate::workflows::claims::{BenefitClaim, ClaimDocument};
use crate::workflows::documents::ApplicationDocuments;
use crate::workflows::payroll::{
    DeductionTitle, PayrollPeriod, PayrollRecord, TaxTitle, TitleAssignment, TitleKind,
};
use crate::workflows::{
    ApplicationId, ClaimId, Employee, FollowUpId, FollowUpRequest, PeriodId, SubmissionId,
    TitleId,
};

/// A list the portal fetches from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "collection", content = "target", rename_all = "snake_case")]
pub enum Collection {
    Employees,
    Claims,
    ClaimDocuments(ClaimId),
    Applications,
    Documents(ApplicationId),
    FollowUps(ApplicationId),
    PayrollPeriods,
    PayrollRecords,
    DeductionTitles,
    TaxTitles,
    TitleAssignments(TitleKind, TitleId),
    AvailableEmployees(TitleKind, TitleId),
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Claims => "benefit claims",
            Self::ClaimDocuments(_) => "claim documents",
            Self::Applications => "applications",
            Self::Documents(_) => "documents",
            Self::FollowUps(_) => "follow-up requests",
            Self::PayrollPeriods => "payroll periods",
            Self::PayrollRecords => "payroll records",
            Self::DeductionTitles => "deduction titles",
            Self::TaxTitles => "tax titles",
            Self::TitleAssignments(..) => "title assignments",
            Self::AvailableEmployees(..) => "available employees",
        }
    }
}

/// Mutation currently awaiting the backend. A second intent for the same
/// operation is refused until the first settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Operation {
    Claim(ClaimId),
    Application(ApplicationId),
    BatchSchedule,
    Document(SubmissionId),
    CompleteDocuments(ApplicationId),
    FollowUp(FollowUpId),
    GeneratePayroll(PeriodId),
    AssignTitle(TitleKind, TitleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modal", content = "target", rename_all = "snake_case")]
pub enum Modal {
    RejectClaim(ClaimId),
    ApplicationDetails(ApplicationId),
    ScheduleInterview(ApplicationId),
    RejectDocument(SubmissionId),
    DocumentPreview(SubmissionId),
    FollowUp(FollowUpId),
    AssignTitle(TitleKind, TitleId),
}

/// Oldest notifications are dropped past this many.
pub const MAX_NOTIFICATIONS: usize = 20;

/// Employees already holding a title and those who can still get it, shown
/// while the assign-title modal is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPanel {
    pub kind: TitleKind,
    pub title: TitleId,
    pub assigned: Vec<TitleAssignment>,
    pub available: Vec<Employee>,
}

impl AssignmentPanel {
    fn new(kind: TitleKind, title: TitleId) -> Self {
        Self {
            kind,
            title,
            assigned: Vec::new(),
            available: Vec::new(),
        }
    }

    fn is_for(&self, kind: TitleKind, title: TitleId) -> bool {
        self.kind == kind && self.title == title
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub role: Role,
    pub employees: Vec<Employee>,
    pub claims: Vec<BenefitClaim>,
    #[serde(default)]
    pub claim_documents: BTreeMap<ClaimId, Vec<ClaimDocument>>,
    pub applications: Vec<Application>,
    pub documents: BTreeMap<ApplicationId, ApplicationDocuments>,
    pub follow_ups: BTreeMap<ApplicationId, Vec<FollowUpRequest>>,
    pub payroll_periods: Vec<PayrollPeriod>,
    pub payroll_records: Vec<PayrollRecord>,
    pub deduction_titles: Vec<DeductionTitle>,
    pub tax_titles: Vec<TaxTitle>,
    pub active_tab: WorkflowTab,
    pub in_flight: BTreeSet<Operation>,
    pub notifications: Vec<Notification>,
    #[serde(default)]
    next_notification: u64,
    pub modal: Option<Modal>,
    pub preview: Option<PreviewSlot>,
    #[serde(default)]
    pub assignment: Option<AssignmentPanel>,
}

impl ViewState {
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn is_in_flight(&self, operation: Operation) -> bool {
        self.in_flight.contains(&operation)
    }

    pub fn claim(&self, id: ClaimId) -> Option<&BenefitClaim> {
        self.claims.iter().find(|claim| claim.id == id)
    }

    pub fn application(&self, id: ApplicationId) -> Option<&Application> {
        self.applications
            .iter()
            .find(|application| application.id == id)
    }

    pub fn follow_up(&self, id: FollowUpId) -> Option<(ApplicationId, &FollowUpRequest)> {
        self.follow_ups.iter().find_map(|(application, requests)| {
            requests
                .iter()
                .find(|request| request.id == id)
                .map(|request| (*application, request))
        })
    }

    /// Latest notification, if any.
    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    fn notify(&mut self, severity: Severity, message: String, category: Option<ErrorCategory>) {
        self.next_notification += 1;
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            let excess = self.notifications.len() + 1 - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
        self.notifications.push(Notification {
            id: self.next_notification,
            severity,
            message,
            category,
        });
    }
}

/// Everything that can change the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RoleChanged(Role),
    EmployeesLoaded(Vec<Employee>),
    ClaimsLoaded(Vec<BenefitClaim>),
    ClaimDocumentsLoaded {
        claim: ClaimId,
        documents: Vec<ClaimDocument>,
    },
    ApplicationsLoaded(Vec<Application>),
    DocumentsLoaded {
        application: ApplicationId,
        documents: ApplicationDocuments,
    },
    FollowUpsLoaded {
        application: ApplicationId,
        follow_ups: Vec<FollowUpRequest>,
    },
    PayrollPeriodsLoaded(Vec<PayrollPeriod>),
    PayrollRecordsLoaded(Vec<PayrollRecord>),
    DeductionTitlesLoaded(Vec<DeductionTitle>),
    TaxTitlesLoaded(Vec<TaxTitle>),
    TitleAssignmentsLoaded {
        kind: TitleKind,
        title: TitleId,
        assigned: Vec<TitleAssignment>,
    },
    AvailableEmployeesLoaded {
        kind: TitleKind,
        title: TitleId,
        employees: Vec<Employee>,
    },
    LoadFailed {
        collection: Collection,
        message: String,
        category: ErrorCategory,
    },
    TabSelected(WorkflowTab),
    OperationStarted(Operation),
    OperationSucceeded {
        operation: Operation,
        message: String,
    },
    OperationFailed {
        operation: Operation,
        message: String,
        category: ErrorCategory,
    },
    ValidationFailed(String),
    ModalOpened(Modal),
    PreviewOpened {
        submission: SubmissionId,
        preview: PreviewSlot,
    },
    /// The file could not be fetched or staged. A fetch failure carries the
    /// backend error's category; a local staging failure carries none.
    PreviewFailed {
        message: String,
        category: Option<ErrorCategory>,
    },
    ModalClosed,
    NotificationDismissed(u64),
}

pub fn reduce(mut state: ViewState, event: Event) -> ViewState {
    match event {
        Event::RoleChanged(role) => state.role = role,
        Event::EmployeesLoaded(employees) => state.employees = employees,
        Event::ClaimsLoaded(claims) => state.claims = claims,
        Event::ClaimDocumentsLoaded { claim, documents } => {
            state.claim_documents.insert(claim, documents);
        }
        Event::ApplicationsLoaded(applications) => state.applications = applications,
        Event::DocumentsLoaded {
            application,
            documents,
        } => {
            state.documents.insert(application, documents);
        }
        Event::FollowUpsLoaded {
            application,
            follow_ups,
        } => {
            state.follow_ups.insert(application, follow_ups);
        }
        Event::PayrollPeriodsLoaded(periods) => state.payroll_periods = periods,
        Event::PayrollRecordsLoaded(records) => state.payroll_records = records,
        Event::DeductionTitlesLoaded(titles) => state.deduction_titles = titles,
        Event::TaxTitlesLoaded(titles) => state.tax_titles = titles,
        Event::TitleAssignmentsLoaded {
            kind,
            title,
            assigned,
        } => {
            if let Some(panel) = state.assignment.as_mut().filter(|p| p.is_for(kind, title)) {
                panel.assigned = assigned;
            }
        }
        Event::AvailableEmployeesLoaded {
            kind,
            title,
            employees,
        } => {
            if let Some(panel) = state.assignment.as_mut().filter(|p| p.is_for(kind, title)) {
                panel.available = employees;
            }
        }
        Event::LoadFailed {
            collection,
            message,
            category,
        } => {
            clear_collection(&mut state, collection);
            state.notify(
                Severity::Error,
                format!("Failed to load {}: {message}", collection.label()),
                Some(category),
            );
        }
        Event::TabSelected(tab) => state.active_tab = tab,
        Event::OperationStarted(operation) => {
            state.in_flight.insert(operation);
        }
        Event::OperationSucceeded { operation, message } => {
            state.in_flight.remove(&operation);
            state.notify(Severity::Success, message, None);
        }
        Event::OperationFailed {
            operation,
            message,
            category,
        } => {
            state.in_flight.remove(&operation);
            state.notify(Severity::Error, message, Some(category));
        }
        Event::ValidationFailed(message) => {
            state.notify(Severity::Warning, message, Some(ErrorCategory::Validation));
        }
        Event::ModalOpened(modal) => {
            state.preview = None;
            state.assignment = match modal {
                Modal::AssignTitle(kind, title) => Some(AssignmentPanel::new(kind, title)),
                _ => None,
            };
            state.modal = Some(modal);
        }
        Event::PreviewOpened {
            submission,
            preview,
        } => {
            state.modal = Some(Modal::DocumentPreview(submission));
            state.assignment = None;
            state.preview = Some(preview);
        }
        Event::PreviewFailed { message, category } => {
            state.notify(Severity::Error, message, category);
        }
        Event::ModalClosed => {
            state.modal = None;
            state.preview = None;
            state.assignment = None;
        }
        Event::NotificationDismissed(id) => {
            state.notifications.retain(|notification| notification.id != id);
        }
    }
    state
}

fn clear_collection(state: &mut ViewState, collection: Collection) {
    match collection {
        Collection::Employees => state.employees.clear(),
        Collection::Claims => state.claims.clear(),
        Collection::ClaimDocuments(claim) => {
            state.claim_documents.insert(claim, Vec::new());
        }
        Collection::Applications => state.applications.clear(),
        Collection::Documents(application) => {
            state
                .documents
                .insert(application, ApplicationDocuments::default());
        }
        Collection::FollowUps(application) => {
            state.follow_ups.insert(application, Vec::new());
        }
        Collection::PayrollPeriods => state.payroll_periods.clear(),
        Collection::PayrollRecords => state.payroll_records.clear(),
        Collection::DeductionTitles => state.deduction_titles.clear(),
        Collection::TaxTitles => state.tax_titles.clear(),
        Collection::TitleAssignments(kind, title) => {
            if let Some(panel) = state.assignment.as_mut().filter(|p| p.is_for(kind, title)) {
                panel.assigned.clear();
            }
        }
        Collection::AvailableEmployees(kind, title) => {
            if let Some(panel) = state.assignment.as_mut().filter(|p| p.is_for(kind, title)) {
                panel.available.clear();
            }
        }
    }
}
