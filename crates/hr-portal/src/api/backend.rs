use crate::gate::RejectionReason;
use crate::status::ApplicationStatus;
use crate::workflows::applications::{
    Application, BatchInterviewRequest, BatchOutcome, InterviewRequest,
};
use crate::workflows::claims::{BenefitClaim, ClaimDocument, ClaimStatusUpdate};
use crate::workflows::documents::{ApplicationDocuments, DocumentReview};
use crate::workflows::payroll::{
    AssignmentRequest, DeductionTitle, PayrollPeriod, PayrollRecord, TaxTitle, TitleAssignment,
    TitleKind,
};
use crate::workflows::{
    ApplicationId, ClaimId, Employee, FollowUpRequest, FollowUpResolution, PeriodId,
    SubmissionId, TitleId,
};

use super::error::ApiError;

/// Operations the portal needs from the HR service.
///
/// Reads return canonical collections; mutations return `()` because the
/// portal re-fetches the affected list instead of trusting response bodies.
#[allow(async_fn_in_trait)]
pub trait HrBackend {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError>;

    async fn claims(&self) -> Result<Vec<BenefitClaim>, ApiError>;
    async fn claim_documents(&self, claim: ClaimId) -> Result<Vec<ClaimDocument>, ApiError>;
    async fn approve_claim(&self, claim: ClaimId) -> Result<(), ApiError>;
    async fn reject_claim(&self, claim: ClaimId, reason: &RejectionReason)
        -> Result<(), ApiError>;
    async fn update_claim_status(
        &self,
        claim: ClaimId,
        update: &ClaimStatusUpdate,
    ) -> Result<(), ApiError>;

    async fn applications(&self) -> Result<Vec<Application>, ApiError>;
    async fn update_application_status(
        &self,
        application: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), ApiError>;
    async fn schedule_interview(
        &self,
        application: ApplicationId,
        request: &InterviewRequest,
    ) -> Result<(), ApiError>;
    async fn batch_schedule_interviews(
        &self,
        request: &BatchInterviewRequest,
    ) -> Result<BatchOutcome, ApiError>;
    async fn send_offer(&self, application: ApplicationId) -> Result<(), ApiError>;

    async fn application_documents(
        &self,
        application: ApplicationId,
    ) -> Result<ApplicationDocuments, ApiError>;
    async fn review_document(
        &self,
        application: ApplicationId,
        submission: SubmissionId,
        review: &DocumentReview,
    ) -> Result<(), ApiError>;
    async fn complete_documents(&self, application: ApplicationId) -> Result<(), ApiError>;
    async fn follow_ups(
        &self,
        application: ApplicationId,
    ) -> Result<Vec<FollowUpRequest>, ApiError>;
    async fn resolve_follow_up(
        &self,
        application: ApplicationId,
        resolution: &FollowUpResolution,
    ) -> Result<(), ApiError>;

    /// Raw bytes of an uploaded file, for previews.
    async fn download(&self, file_path: &str) -> Result<Vec<u8>, ApiError>;

    async fn payroll_periods(&self) -> Result<Vec<PayrollPeriod>, ApiError>;
    async fn payroll_records(
        &self,
        period: Option<PeriodId>,
    ) -> Result<Vec<PayrollRecord>, ApiError>;
    async fn generate_payroll(&self, period: PeriodId) -> Result<(), ApiError>;

    async fn deduction_titles(&self) -> Result<Vec<DeductionTitle>, ApiError>;
    async fn tax_titles(&self) -> Result<Vec<TaxTitle>, ApiError>;
    async fn title_assignments(
        &self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<Vec<TitleAssignment>, ApiError>;
    async fn available_employees(
        &self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<Vec<Employee>, ApiError>;
    async fn assign_title(
        &self,
        kind: TitleKind,
        title: TitleId,
        request: &AssignmentRequest,
    ) -> Result<(), ApiError>;
}
