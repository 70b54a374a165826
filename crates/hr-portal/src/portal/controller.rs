use chrono::NaiveDate;
use tracing::{info, warn};

use super::preview::{ObjectUrls, PreviewSlot};
use super::state::{reduce, Collection, Event, Modal, Operation, ViewState};
use super::PortalError;
use crate::api::{ApiError, HrBackend};
use crate::gate::{
    ensure_allowed, ensure_role, ensure_transition, Action, GateError, RejectionReason, Role,
};
use crate::status::{ApplicationStatus, ClaimStatus, ReportedStatus, StatusVocabulary};
use crate::workflows::applications::{
    BatchInterviewRequest, BatchOutcome, InterviewRequest, WorkflowTab,
};
use crate::workflows::claims::ClaimStatusUpdate;
use crate::workflows::documents::{check_submission_complete, DocumentReview, DocumentSubmission};
use crate::workflows::payroll::{AssignmentRequest, TitleKind};
use crate::workflows::{
    ApplicationId, ClaimId, FollowUpDecision, FollowUpId, PeriodId, SubmissionId, TitleId,
};

/// Drives one portal session against a backend.
///
/// Every mutating intent follows the same path: gate check (a refusal becomes
/// a validation notification and no request is sent), in-flight mark, backend
/// call, refetch of the affected list on success, then the outcome
/// notification.
pub struct Portal<B, U> {
    backend: B,
    urls: U,
    state: ViewState,
}

impl<B: HrBackend, U: ObjectUrls> Portal<B, U> {
    pub fn new(backend: B, urls: U, role: Role) -> Self {
        Self {
            backend,
            urls,
            state: ViewState::for_role(role),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn urls(&self) -> &U {
        &self.urls
    }

    /// Apply an event. A preview the event drops or replaces has its URL
    /// revoked here, whichever path the event came through.
    pub fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        let previous = state.preview.clone();
        self.state = reduce(state, event);
        if let Some(previous) = previous {
            let kept = self.state.preview.as_ref().map(|preview| &preview.url);
            if kept != Some(&previous.url) {
                self.urls.revoke(&previous.url);
            }
        }
    }

    fn settle_load<T>(
        &mut self,
        collection: Collection,
        result: Result<T, ApiError>,
        loaded: impl FnOnce(T) -> Event,
    ) -> Result<(), PortalError> {
        match result {
            Ok(items) => {
                self.dispatch(loaded(items));
                Ok(())
            }
            Err(err) => {
                warn!(collection = collection.label(), error = %err, "load failed");
                self.dispatch(Event::LoadFailed {
                    collection,
                    message: err.to_string(),
                    category: err.category(),
                });
                Err(err.into())
            }
        }
    }

    pub async fn load_employees(&mut self) -> Result<(), PortalError> {
        let result = self.backend.employees().await;
        self.settle_load(Collection::Employees, result, Event::EmployeesLoaded)
    }

    pub async fn load_claims(&mut self) -> Result<(), PortalError> {
        let result = self.backend.claims().await;
        self.settle_load(Collection::Claims, result, Event::ClaimsLoaded)
    }

    pub async fn load_claim_documents(&mut self, claim: ClaimId) -> Result<(), PortalError> {
        let result = self.backend.claim_documents(claim).await;
        self.settle_load(Collection::ClaimDocuments(claim), result, |documents| {
            Event::ClaimDocumentsLoaded { claim, documents }
        })
    }

    pub async fn load_applications(&mut self) -> Result<(), PortalError> {
        let result = self.backend.applications().await;
        self.settle_load(Collection::Applications, result, Event::ApplicationsLoaded)
    }

    /// Requirements, submissions and follow-up requests of one application.
    pub async fn load_documents(&mut self, application: ApplicationId) -> Result<(), PortalError> {
        let documents = self.backend.application_documents(application).await;
        let documents = self.settle_load(Collection::Documents(application), documents, |documents| {
            Event::DocumentsLoaded {
                application,
                documents,
            }
        });
        let follow_ups = self.backend.follow_ups(application).await;
        let follow_ups =
            self.settle_load(Collection::FollowUps(application), follow_ups, |follow_ups| {
                Event::FollowUpsLoaded {
                    application,
                    follow_ups,
                }
            });
        documents.and(follow_ups)
    }

    pub async fn load_payroll(&mut self, period: Option<PeriodId>) -> Result<(), PortalError> {
        let periods = self.backend.payroll_periods().await;
        let periods = self.settle_load(Collection::PayrollPeriods, periods, Event::PayrollPeriodsLoaded);
        let records = self.backend.payroll_records(period).await;
        let records = self.settle_load(Collection::PayrollRecords, records, Event::PayrollRecordsLoaded);
        periods.and(records)
    }

    pub async fn load_titles(&mut self, kind: TitleKind) -> Result<(), PortalError> {
        match kind {
            TitleKind::Deduction => {
                let result = self.backend.deduction_titles().await;
                self.settle_load(Collection::DeductionTitles, result, Event::DeductionTitlesLoaded)
            }
            TitleKind::Tax => {
                let result = self.backend.tax_titles().await;
                self.settle_load(Collection::TaxTitles, result, Event::TaxTitlesLoaded)
            }
        }
    }

    /// Employees holding a title and those still eligible for it. Results
    /// land in the assignment panel, so the assign-title modal must be open.
    pub async fn load_assignments(
        &mut self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<(), PortalError> {
        let assigned = self.backend.title_assignments(kind, title).await;
        let assigned =
            self.settle_load(Collection::TitleAssignments(kind, title), assigned, |assigned| {
                Event::TitleAssignmentsLoaded {
                    kind,
                    title,
                    assigned,
                }
            });
        let available = self.backend.available_employees(kind, title).await;
        let available =
            self.settle_load(Collection::AvailableEmployees(kind, title), available, |employees| {
                Event::AvailableEmployeesLoaded {
                    kind,
                    title,
                    employees,
                }
            });
        assigned.and(available)
    }

    /// Load every dashboard list. Each failure is notified on its own; the
    /// first one is returned.
    pub async fn refresh_all(&mut self) -> Result<(), PortalError> {
        let results = [
            self.load_employees().await,
            self.load_claims().await,
            self.load_applications().await,
            self.load_payroll(None).await,
            self.load_titles(TitleKind::Deduction).await,
            self.load_titles(TitleKind::Tax).await,
        ];
        results.into_iter().collect()
    }

    fn refuse(&mut self, error: GateError) -> PortalError {
        info!(%error, "intent refused before any request");
        self.dispatch(Event::ValidationFailed(error.to_string()));
        PortalError::Gate(error)
    }

    fn gate(&mut self, check: Result<(), GateError>) -> Result<(), PortalError> {
        check.map_err(|error| self.refuse(error))
    }

    fn begin(&mut self, operation: Operation) -> Result<(), PortalError> {
        if self.state.is_in_flight(operation) {
            return Err(PortalError::InFlight { operation });
        }
        self.dispatch(Event::OperationStarted(operation));
        Ok(())
    }

    fn finish<T>(
        &mut self,
        operation: Operation,
        result: Result<T, ApiError>,
        message: impl FnOnce(&T) -> String,
    ) -> Result<T, PortalError> {
        match result {
            Ok(value) => {
                let message = message(&value);
                info!(?operation, %message, "operation succeeded");
                self.dispatch(Event::OperationSucceeded { operation, message });
                Ok(value)
            }
            Err(err) => {
                warn!(?operation, error = %err, "operation failed");
                self.dispatch(Event::OperationFailed {
                    operation,
                    message: err.to_string(),
                    category: err.category(),
                });
                Err(err.into())
            }
        }
    }

    /// Refetch after a successful mutation. A failed refetch is already
    /// notified by the load and does not undo the mutation.
    async fn refetch(&mut self, collection: Collection) {
        let result = match collection {
            Collection::Employees => self.load_employees().await,
            Collection::Claims => self.load_claims().await,
            Collection::ClaimDocuments(claim) => self.load_claim_documents(claim).await,
            Collection::Applications => self.load_applications().await,
            Collection::Documents(application) | Collection::FollowUps(application) => {
                self.load_documents(application).await
            }
            Collection::PayrollPeriods | Collection::PayrollRecords => {
                self.load_payroll(None).await
            }
            Collection::DeductionTitles => self.load_titles(TitleKind::Deduction).await,
            Collection::TaxTitles => self.load_titles(TitleKind::Tax).await,
            Collection::TitleAssignments(kind, title)
            | Collection::AvailableEmployees(kind, title) => self.load_assignments(kind, title).await,
        };
        if let Err(err) = result {
            warn!(collection = collection.label(), error = %err, "refetch after mutation failed");
        }
    }

    fn role(&self) -> Role {
        self.state.role
    }

    fn claim_status(&self, id: ClaimId) -> Result<ReportedStatus<ClaimStatus>, PortalError> {
        self.state
            .claim(id)
            .map(|claim| claim.status.clone())
            .ok_or_else(|| PortalError::NotLoaded(format!("claim #{id}")))
    }

    pub async fn approve_claim(&mut self, id: ClaimId) -> Result<(), PortalError> {
        let status = self.claim_status(id)?;
        self.gate(ensure_allowed(&status, self.role(), Action::ApproveClaim))?;
        let operation = Operation::Claim(id);
        self.begin(operation)?;
        let result = self.backend.approve_claim(id).await;
        if result.is_ok() {
            self.refetch(Collection::Claims).await;
        }
        self.finish(operation, result, |_| "Claim approved".to_string())
    }

    pub async fn reject_claim(&mut self, id: ClaimId, reason: &str) -> Result<(), PortalError> {
        let status = self.claim_status(id)?;
        self.gate(ensure_allowed(&status, self.role(), Action::RejectClaim))?;
        let reason = RejectionReason::parse(reason).map_err(|error| self.refuse(error))?;
        let operation = Operation::Claim(id);
        self.begin(operation)?;
        let result = self.backend.reject_claim(id, &reason).await;
        if result.is_ok() {
            self.refetch(Collection::Claims).await;
            self.close_modal();
        }
        self.finish(operation, result, |_| "Claim rejected".to_string())
    }

    /// Move an approved claim one step down the agency pipeline:
    /// approved by HR to for-submission-to-agency, then to completed.
    pub async fn advance_claim(
        &mut self,
        id: ClaimId,
        completion_attachment: Option<String>,
    ) -> Result<(), PortalError> {
        let status = self.claim_status(id)?;
        let (action, next) = match status.known() {
            Some(ClaimStatus::ApprovedByHr) => {
                (Action::ForwardClaimToAgency, ClaimStatus::ForSubmissionToAgency)
            }
            Some(ClaimStatus::ForSubmissionToAgency) => {
                (Action::CompleteClaim, ClaimStatus::Completed)
            }
            _ => (Action::ForwardClaimToAgency, ClaimStatus::ForSubmissionToAgency),
        };
        self.gate(ensure_allowed(&status, self.role(), action))?;
        self.gate(ensure_transition(&status, next))?;

        let operation = Operation::Claim(id);
        self.begin(operation)?;
        let update = ClaimStatusUpdate::new(next).with_attachment(completion_attachment);
        let result = self.backend.update_claim_status(id, &update).await;
        if result.is_ok() {
            self.refetch(Collection::Claims).await;
        }
        self.finish(operation, result, |_| format!("Claim moved to {}", next.label()))
    }

    fn application_status(
        &self,
        id: ApplicationId,
    ) -> Result<ReportedStatus<ApplicationStatus>, PortalError> {
        self.state
            .application(id)
            .map(|application| application.status.clone())
            .ok_or_else(|| PortalError::NotLoaded(format!("application #{id}")))
    }

    async fn set_application_status(
        &mut self,
        id: ApplicationId,
        next: ApplicationStatus,
    ) -> Result<(), PortalError> {
        let operation = Operation::Application(id);
        self.begin(operation)?;
        let result = self.backend.update_application_status(id, next).await;
        if result.is_ok() {
            self.refetch(Collection::Applications).await;
        }
        self.finish(operation, result, |_| {
            format!("Application moved to {}", next.label())
        })
    }

    /// Generic status editor.
    pub async fn change_application_status(
        &mut self,
        id: ApplicationId,
        next: ApplicationStatus,
    ) -> Result<(), PortalError> {
        let status = self.application_status(id)?;
        self.gate(ensure_allowed(&status, self.role(), Action::EditApplicationStatus))?;
        self.gate(ensure_transition(&status, next))?;
        self.set_application_status(id, next).await
    }

    pub async fn start_onboarding(&mut self, id: ApplicationId) -> Result<(), PortalError> {
        let status = self.application_status(id)?;
        self.gate(ensure_allowed(&status, self.role(), Action::StartOnboarding))?;
        self.set_application_status(id, ApplicationStatus::Onboarding)
            .await
    }

    pub async fn reject_application(&mut self, id: ApplicationId) -> Result<(), PortalError> {
        let status = self.application_status(id)?;
        self.gate(ensure_allowed(&status, self.role(), Action::RejectApplication))?;
        self.set_application_status(id, ApplicationStatus::Rejected)
            .await
    }

    pub async fn schedule_interview(
        &mut self,
        id: ApplicationId,
        request: InterviewRequest,
    ) -> Result<(), PortalError> {
        let status = self.application_status(id)?;
        self.gate(ensure_allowed(&status, self.role(), Action::ScheduleInterview))?;
        let operation = Operation::Application(id);
        self.begin(operation)?;
        let result = self.backend.schedule_interview(id, &request).await;
        if result.is_ok() {
            self.refetch(Collection::Applications).await;
            self.close_modal();
        }
        self.finish(operation, result, |_| {
            format!("Interview scheduled for {}", request.interview_date)
        })
    }

    /// Schedule one slot for several applications. The backend's success and
    /// failure counts are reported as-is.
    pub async fn batch_schedule_interviews(
        &mut self,
        request: BatchInterviewRequest,
    ) -> Result<BatchOutcome, PortalError> {
        if request.application_ids.is_empty() {
            return Err(self.refuse(GateError::NoApplicationsSelected));
        }
        for id in &request.application_ids {
            let status = self.application_status(*id)?;
            self.gate(ensure_allowed(&status, self.role(), Action::ScheduleInterview))?;
        }
        let operation = Operation::BatchSchedule;
        self.begin(operation)?;
        let result = self.backend.batch_schedule_interviews(&request).await;
        if result.is_ok() {
            self.refetch(Collection::Applications).await;
        }
        self.finish(operation, result, BatchOutcome::summary)
    }

    pub async fn send_offer(&mut self, id: ApplicationId) -> Result<(), PortalError> {
        let status = self.application_status(id)?;
        self.gate(ensure_allowed(&status, self.role(), Action::SendOffer))?;
        let operation = Operation::Application(id);
        self.begin(operation)?;
        let result = self.backend.send_offer(id).await;
        if result.is_ok() {
            self.refetch(Collection::Applications).await;
        }
        self.finish(operation, result, |_| "Offer sent".to_string())
    }

    pub fn select_tab(&mut self, tab: WorkflowTab) {
        self.dispatch(Event::TabSelected(tab));
    }

    fn submission(
        &self,
        application: ApplicationId,
        submission: SubmissionId,
    ) -> Result<&DocumentSubmission, PortalError> {
        self.state
            .documents
            .get(&application)
            .and_then(|documents| documents.submission(submission))
            .ok_or_else(|| PortalError::NotLoaded(format!("submission #{submission}")))
    }

    async fn review_document(
        &mut self,
        application: ApplicationId,
        submission: SubmissionId,
        review: DocumentReview,
    ) -> Result<(), PortalError> {
        let operation = Operation::Document(submission);
        self.begin(operation)?;
        let result = self
            .backend
            .review_document(application, submission, &review)
            .await;
        if result.is_ok() {
            self.refetch(Collection::Documents(application)).await;
        }
        let message = match review {
            DocumentReview::Approve => "Document approved",
            DocumentReview::Reject { .. } => "Document rejected",
        };
        self.finish(operation, result, |_| message.to_string())
    }

    pub async fn approve_document(
        &mut self,
        application: ApplicationId,
        submission: SubmissionId,
    ) -> Result<(), PortalError> {
        let status = self.submission(application, submission)?.status.clone();
        self.gate(ensure_allowed(&status, self.role(), Action::ApproveDocument))?;
        self.review_document(application, submission, DocumentReview::Approve)
            .await
    }

    /// Reject a submission. The reason is validated first, so a too-short
    /// reason never reaches the backend.
    pub async fn reject_document(
        &mut self,
        application: ApplicationId,
        submission: SubmissionId,
        reason: &str,
    ) -> Result<(), PortalError> {
        let status = self.submission(application, submission)?.status.clone();
        let rejection_reason = RejectionReason::parse(reason).map_err(|error| self.refuse(error))?;
        self.gate(ensure_allowed(&status, self.role(), Action::RejectDocument))?;
        let result = self
            .review_document(
                application,
                submission,
                DocumentReview::Reject { rejection_reason },
            )
            .await;
        if result.is_ok() {
            self.close_modal();
        }
        result
    }

    /// "Mark as Done": refused while any required document lacks an approved
    /// submission.
    pub async fn mark_documents_complete(
        &mut self,
        application: ApplicationId,
    ) -> Result<(), PortalError> {
        self.gate(ensure_role(self.role(), Action::MarkSubmissionComplete))?;
        let check = {
            let documents = self
                .state
                .documents
                .get(&application)
                .ok_or_else(|| PortalError::NotLoaded(format!("documents of application #{application}")))?;
            check_submission_complete(&documents.requirements, &documents.submissions)
        };
        self.gate(check)?;
        if let Some(listed) = self.state.application(application) {
            let status = listed.status.clone();
            self.gate(ensure_allowed(&status, self.role(), Action::MarkSubmissionComplete))?;
        }

        let operation = Operation::CompleteDocuments(application);
        self.begin(operation)?;
        let result = self.backend.complete_documents(application).await;
        if result.is_ok() {
            self.refetch(Collection::Documents(application)).await;
            self.refetch(Collection::Applications).await;
        }
        self.finish(operation, result, |_| {
            "Document submission marked as complete".to_string()
        })
    }

    /// Accept (with an extension) or reject a pending follow-up request.
    /// Requests that are already resolved are refused without a request.
    pub async fn resolve_follow_up(
        &mut self,
        id: FollowUpId,
        decision: FollowUpDecision,
        today: NaiveDate,
    ) -> Result<(), PortalError> {
        let action = match decision {
            FollowUpDecision::Accept { .. } => Action::AcceptFollowUp,
            FollowUpDecision::Reject { .. } => Action::RejectFollowUp,
        };
        self.gate(ensure_role(self.role(), action))?;
        let (application, resolution) = {
            let (application, request) = self
                .state
                .follow_up(id)
                .ok_or_else(|| PortalError::NotLoaded(format!("follow-up request #{id}")))?;
            (application, request.resolve(decision, today))
        };
        let resolution = resolution.map_err(|error| self.refuse(error))?;

        let operation = Operation::FollowUp(id);
        self.begin(operation)?;
        let result = self
            .backend
            .resolve_follow_up(application, &resolution)
            .await;
        if result.is_ok() {
            self.refetch(Collection::FollowUps(application)).await;
            self.close_modal();
        }
        self.finish(operation, result, |_| match resolution.extension_deadline {
            Some(deadline) => format!("Extension granted until {deadline}"),
            None => "Follow-up request declined".to_string(),
        })
    }

    fn revoke_preview(&mut self) {
        if let Some(preview) = self.state.preview.take() {
            self.urls.revoke(&preview.url);
        }
    }

    /// Download a submission and open it in the preview modal. The previous
    /// preview URL, if any, is revoked before the new one is created.
    pub async fn open_preview(
        &mut self,
        application: ApplicationId,
        submission: SubmissionId,
    ) -> Result<(), PortalError> {
        let (file_path, file_name) = {
            let found = self.submission(application, submission)?;
            let file_path = found
                .file_path
                .clone()
                .ok_or_else(|| PortalError::NotLoaded(format!("file of submission #{submission}")))?;
            let file_name = found
                .file_name
                .clone()
                .unwrap_or_else(|| format!("submission-{submission}"));
            (file_path, file_name)
        };

        let contents = match self.backend.download(&file_path).await {
            Ok(contents) => contents,
            Err(err) => {
                warn!(%submission, error = %err, "preview download failed");
                self.dispatch(Event::PreviewFailed {
                    message: format!("Unable to preview {file_name}: {err}"),
                    category: Some(err.category()),
                });
                return Err(err.into());
            }
        };

        self.revoke_preview();
        let url = match self.urls.create(&file_name, &contents) {
            Ok(url) => url,
            Err(err) => {
                warn!(%submission, error = %err, "preview could not be staged");
                self.dispatch(Event::PreviewFailed {
                    message: format!("Unable to preview {file_name}: {err}"),
                    category: None,
                });
                return Err(PortalError::Preview(err));
            }
        };
        self.dispatch(Event::PreviewOpened {
            submission,
            preview: PreviewSlot { url, file_name },
        });
        Ok(())
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.dispatch(Event::ModalOpened(modal));
    }

    pub fn close_modal(&mut self) {
        self.dispatch(Event::ModalClosed);
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.dispatch(Event::NotificationDismissed(id));
    }

    /// Open the assign-title modal and fill its panel.
    pub async fn open_assign_title(
        &mut self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<(), PortalError> {
        self.gate(ensure_role(self.role(), Action::AssignTitle))?;
        self.open_modal(Modal::AssignTitle(kind, title));
        self.load_assignments(kind, title).await
    }

    pub async fn generate_payroll(&mut self, period: PeriodId) -> Result<(), PortalError> {
        self.gate(ensure_role(self.role(), Action::GeneratePayroll))?;
        let operation = Operation::GeneratePayroll(period);
        self.begin(operation)?;
        let result = self.backend.generate_payroll(period).await;
        if result.is_ok() {
            let records = self.backend.payroll_records(Some(period)).await;
            let _ = self.settle_load(Collection::PayrollRecords, records, Event::PayrollRecordsLoaded);
        }
        self.finish(operation, result, |_| "Payroll generated".to_string())
    }

    pub async fn assign_title(
        &mut self,
        kind: TitleKind,
        title: TitleId,
        request: AssignmentRequest,
    ) -> Result<(), PortalError> {
        self.gate(ensure_role(self.role(), Action::AssignTitle))?;
        if request.employee_ids.is_empty() {
            return Err(self.refuse(GateError::NoEmployeesSelected));
        }
        let operation = Operation::AssignTitle(kind, title);
        self.begin(operation)?;
        let result = self.backend.assign_title(kind, title, &request).await;
        if result.is_ok() {
            let collection = match kind {
                TitleKind::Deduction => Collection::DeductionTitles,
                TitleKind::Tax => Collection::TaxTitles,
            };
            self.refetch(collection).await;
            self.close_modal();
        }
        let count = request.employee_ids.len();
        self.finish(operation, result, |_| {
            format!("Assigned {} title to {count} employee(s)", kind.label())
        })
    }
}
