use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::api::{ApiError, HrBackend};
use crate::gate::{RejectionReason, Role};
use crate::portal::{ObjectUrls, Portal};
use crate::status::{ApplicationStatus, ClaimStatus, ReportedStatus, StatusVocabulary};
use crate::workflows::applications::{
    Applicant, Application, BatchInterviewRequest, BatchOutcome, InterviewRequest, JobPostingRef,
};
use crate::workflows::claims::{BenefitClaim, BenefitType, ClaimDocument, ClaimStatusUpdate};
use crate::workflows::documents::{
    ApplicationDocuments, DocumentRequirement, DocumentReview, DocumentSubmission,
};
use crate::workflows::payroll::{
    AssignmentRequest, DeductionTitle, PayrollPeriod, PayrollRecord, TaxTitle, TitleAssignment,
    TitleKind,
};
use crate::workflows::{
    ApplicationId, ClaimId, Employee, EmployeeId, FollowUpId, FollowUpRequest,
    FollowUpResolution, PayrollId, PeriodId, RequirementId, SubmissionId, TitleId,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 28).expect("valid date")
}

pub(super) fn claim(id: u64, status: &str) -> BenefitClaim {
    BenefitClaim {
        id: ClaimId(id),
        employee_id: EmployeeId(40 + id),
        employee_name: Some("Maria Santos".to_string()),
        benefit_type: BenefitType::Sss,
        claim_type: "sickness".to_string(),
        amount: Some(4500.0),
        status: ReportedStatus::parse(status),
        rejection_reason: None,
        completion_attachment: None,
        submitted_at: None,
        updated_at: None,
    }
}

pub(super) fn application(id: u64, status: &str) -> Application {
    Application {
        id: ApplicationId(id),
        applicant: Applicant {
            first_name: "Jose".to_string(),
            last_name: "Rizal".to_string(),
            email: Some("jose@example.test".to_string()),
        },
        job_posting: Some(JobPostingRef {
            id: 3,
            title: "Payroll Associate".to_string(),
        }),
        status: ReportedStatus::parse(status),
        interview: None,
        created_at: None,
        updated_at: None,
    }
}

pub(super) fn requirement(id: u64, key: &str, name: &str) -> DocumentRequirement {
    DocumentRequirement {
        id: RequirementId(id),
        application_id: Some(ApplicationId(1)),
        document_key: key.to_string(),
        name: name.to_string(),
        is_required: true,
        allowed_extensions: vec!["pdf".to_string()],
        max_size_kb: Some(5120),
    }
}

pub(super) fn submission(id: u64, requirement: u64, status: &str) -> DocumentSubmission {
    DocumentSubmission {
        id: SubmissionId(id),
        requirement_id: RequirementId(requirement),
        file_name: Some(format!("upload-{id}.pdf")),
        file_path: Some(format!("storage/documents/upload-{id}.pdf")),
        status: ReportedStatus::parse(status),
        rejection_reason: None,
        submitted_at: Some(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        ),
    }
}

/// Government ID approved, NBI clearance still pending review.
pub(super) fn half_approved_documents() -> ApplicationDocuments {
    ApplicationDocuments {
        requirements: vec![
            requirement(1, "government_id", "Government-issued ID"),
            requirement(2, "nbi_clearance", "NBI Clearance"),
        ],
        submissions: vec![submission(11, 1, "approved"), submission(12, 2, "pending")],
    }
}

pub(super) fn follow_up(id: u64, status: &str) -> FollowUpRequest {
    FollowUpRequest {
        id: FollowUpId(id),
        submission_id: Some(SubmissionId(12)),
        message: "NBI appointment is next week".to_string(),
        status: ReportedStatus::parse(status),
        requested_at: None,
        extension_days: None,
        extension_deadline: None,
        hr_response: None,
    }
}

/// In-memory HR service. Mutations update the stored records so refetches
/// observe them, and every call is recorded.
#[derive(Default)]
pub(super) struct FakeBackend {
    pub(super) claims: Mutex<Vec<BenefitClaim>>,
    pub(super) applications: Mutex<Vec<Application>>,
    pub(super) documents: Mutex<BTreeMap<ApplicationId, ApplicationDocuments>>,
    pub(super) follow_ups: Mutex<BTreeMap<ApplicationId, Vec<FollowUpRequest>>>,
    pub(super) batch_outcome: Mutex<BatchOutcome>,
    pub(super) claim_documents: Mutex<BTreeMap<ClaimId, Vec<ClaimDocument>>>,
    pub(super) payroll_records: Mutex<Vec<PayrollRecord>>,
    pub(super) tax_titles: Mutex<Vec<TaxTitle>>,
    pub(super) assignments: Mutex<Vec<TitleAssignment>>,
    pub(super) available: Mutex<Vec<Employee>>,
    calls: Mutex<Vec<String>>,
    reject_next: Mutex<Option<String>>,
    unauthorized: Mutex<bool>,
}

impl FakeBackend {
    pub(super) fn with_claims(claims: Vec<BenefitClaim>) -> Self {
        let backend = Self::default();
        *backend.claims.lock().expect("fake mutex poisoned") = claims;
        backend
    }

    pub(super) fn with_applications(applications: Vec<Application>) -> Self {
        let backend = Self::default();
        *backend.applications.lock().expect("fake mutex poisoned") = applications;
        backend
    }

    pub(super) fn with_documents(
        self,
        application: ApplicationId,
        documents: ApplicationDocuments,
        follow_ups: Vec<FollowUpRequest>,
    ) -> Self {
        self.documents
            .lock()
            .expect("fake mutex poisoned")
            .insert(application, documents);
        self.follow_ups
            .lock()
            .expect("fake mutex poisoned")
            .insert(application, follow_ups);
        self
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("fake mutex poisoned").clone()
    }

    pub(super) fn mutation_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("GET"))
            .collect()
    }

    pub(super) fn reject_next(&self, message: &str) {
        *self.reject_next.lock().expect("fake mutex poisoned") = Some(message.to_string());
    }

    pub(super) fn expire_session(&self) {
        *self.unauthorized.lock().expect("fake mutex poisoned") = true;
    }

    fn read(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().expect("fake mutex poisoned").push(call);
        if *self.unauthorized.lock().expect("fake mutex poisoned") {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }

    fn mutation(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().expect("fake mutex poisoned").push(call);
        match self.reject_next.lock().expect("fake mutex poisoned").take() {
            Some(message) => Err(ApiError::Rejected {
                status: Some(422),
                message,
            }),
            None => Ok(()),
        }
    }

    fn set_claim_status(&self, id: ClaimId, status: ClaimStatus) {
        let mut claims = self.claims.lock().expect("fake mutex poisoned");
        if let Some(claim) = claims.iter_mut().find(|claim| claim.id == id) {
            claim.status = ReportedStatus::Known(status);
        }
    }

    fn set_application_status(&self, id: ApplicationId, status: ApplicationStatus) {
        let mut applications = self.applications.lock().expect("fake mutex poisoned");
        if let Some(application) = applications.iter_mut().find(|application| application.id == id) {
            application.status = ReportedStatus::Known(status);
        }
    }
}

impl HrBackend for FakeBackend {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.read("GET /employees".to_string())?;
        Ok(Vec::new())
    }

    async fn claims(&self) -> Result<Vec<BenefitClaim>, ApiError> {
        self.read("GET /benefit-claims".to_string())?;
        Ok(self.claims.lock().expect("fake mutex poisoned").clone())
    }

    async fn claim_documents(&self, claim: ClaimId) -> Result<Vec<ClaimDocument>, ApiError> {
        self.read(format!("GET /benefit-claims/{claim}/documents"))?;
        Ok(self
            .claim_documents
            .lock()
            .expect("fake mutex poisoned")
            .get(&claim)
            .cloned()
            .unwrap_or_default())
    }

    async fn approve_claim(&self, claim: ClaimId) -> Result<(), ApiError> {
        self.mutation(format!("POST /benefit-claims/{claim}/approve"))?;
        self.set_claim_status(claim, ClaimStatus::ApprovedByHr);
        Ok(())
    }

    async fn reject_claim(
        &self,
        claim: ClaimId,
        reason: &RejectionReason,
    ) -> Result<(), ApiError> {
        self.mutation(format!("POST /benefit-claims/{claim}/reject {reason}"))?;
        self.set_claim_status(claim, ClaimStatus::Rejected);
        Ok(())
    }

    async fn update_claim_status(
        &self,
        claim: ClaimId,
        update: &ClaimStatusUpdate,
    ) -> Result<(), ApiError> {
        self.mutation(format!("PUT /benefit-claims/{claim}/status {}", update.status))?;
        if let Some(status) = ClaimStatus::resolve(update.status) {
            self.set_claim_status(claim, status);
        }
        Ok(())
    }

    async fn applications(&self) -> Result<Vec<Application>, ApiError> {
        self.read("GET /applications".to_string())?;
        Ok(self.applications.lock().expect("fake mutex poisoned").clone())
    }

    async fn update_application_status(
        &self,
        application: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), ApiError> {
        self.mutation(format!(
            "PUT /applications/{application}/status {}",
            status.as_str()
        ))?;
        self.set_application_status(application, status);
        Ok(())
    }

    async fn schedule_interview(
        &self,
        application: ApplicationId,
        request: &InterviewRequest,
    ) -> Result<(), ApiError> {
        self.mutation(format!(
            "POST /applications/{application}/schedule-interview {}",
            request.interview_date
        ))?;
        self.set_application_status(application, ApplicationStatus::Interview);
        Ok(())
    }

    async fn batch_schedule_interviews(
        &self,
        request: &BatchInterviewRequest,
    ) -> Result<BatchOutcome, ApiError> {
        self.mutation(format!(
            "POST /applications/batch-schedule-interview {}",
            request.application_ids.len()
        ))?;
        Ok(*self.batch_outcome.lock().expect("fake mutex poisoned"))
    }

    async fn send_offer(&self, application: ApplicationId) -> Result<(), ApiError> {
        self.mutation(format!("POST /applications/{application}/send-offer"))?;
        self.set_application_status(application, ApplicationStatus::Offered);
        Ok(())
    }

    async fn application_documents(
        &self,
        application: ApplicationId,
    ) -> Result<ApplicationDocuments, ApiError> {
        self.read(format!("GET /applications/{application}/documents"))?;
        Ok(self
            .documents
            .lock()
            .expect("fake mutex poisoned")
            .get(&application)
            .cloned()
            .unwrap_or_default())
    }

    async fn review_document(
        &self,
        application: ApplicationId,
        submission: SubmissionId,
        review: &DocumentReview,
    ) -> Result<(), ApiError> {
        let verdict = match review {
            DocumentReview::Approve => "approved",
            DocumentReview::Reject { .. } => "rejected",
        };
        self.mutation(format!(
            "POST /applications/{application}/documents/{submission}/review {verdict}"
        ))?;
        let mut documents = self.documents.lock().expect("fake mutex poisoned");
        if let Some(found) = documents
            .get_mut(&application)
            .and_then(|documents| documents.submissions.iter_mut().find(|s| s.id == submission))
        {
            found.status = ReportedStatus::parse(verdict);
        }
        Ok(())
    }

    async fn complete_documents(&self, application: ApplicationId) -> Result<(), ApiError> {
        self.mutation(format!("POST /applications/{application}/documents/complete"))?;
        self.set_application_status(application, ApplicationStatus::Hired);
        Ok(())
    }

    async fn follow_ups(
        &self,
        application: ApplicationId,
    ) -> Result<Vec<FollowUpRequest>, ApiError> {
        self.read(format!("GET /applications/{application}/documents/follow-ups"))?;
        Ok(self
            .follow_ups
            .lock()
            .expect("fake mutex poisoned")
            .get(&application)
            .cloned()
            .unwrap_or_default())
    }

    async fn resolve_follow_up(
        &self,
        application: ApplicationId,
        resolution: &FollowUpResolution,
    ) -> Result<(), ApiError> {
        self.mutation(format!(
            "POST /applications/{application}/documents/follow-ups/{}/resolve {}",
            resolution.id, resolution.status
        ))?;
        let mut follow_ups = self.follow_ups.lock().expect("fake mutex poisoned");
        if let Some(found) = follow_ups
            .get_mut(&application)
            .and_then(|requests| requests.iter_mut().find(|r| r.id == resolution.id))
        {
            found.status = ReportedStatus::parse(resolution.status);
            found.extension_deadline = resolution.extension_deadline;
        }
        Ok(())
    }

    async fn download(&self, file_path: &str) -> Result<Vec<u8>, ApiError> {
        self.read(format!("GET /{file_path}"))?;
        Ok(b"%PDF-1.4 fake".to_vec())
    }

    async fn payroll_periods(&self) -> Result<Vec<PayrollPeriod>, ApiError> {
        self.read("GET /payroll/periods".to_string())?;
        Ok(Vec::new())
    }

    async fn payroll_records(
        &self,
        period: Option<PeriodId>,
    ) -> Result<Vec<PayrollRecord>, ApiError> {
        let query = period.map(|period| format!("?period_id={period}")).unwrap_or_default();
        self.read(format!("GET /payroll{query}"))?;
        Ok(self.payroll_records.lock().expect("fake mutex poisoned").clone())
    }

    async fn generate_payroll(&self, period: PeriodId) -> Result<(), ApiError> {
        self.mutation(format!("POST /payroll/generate {period}"))
    }

    async fn deduction_titles(&self) -> Result<Vec<DeductionTitle>, ApiError> {
        self.read("GET /deduction-titles".to_string())?;
        Ok(Vec::new())
    }

    async fn tax_titles(&self) -> Result<Vec<TaxTitle>, ApiError> {
        self.read("GET /tax-titles".to_string())?;
        Ok(self.tax_titles.lock().expect("fake mutex poisoned").clone())
    }

    async fn title_assignments(
        &self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<Vec<TitleAssignment>, ApiError> {
        self.read(format!("GET {}/{title}/employees", kind.path()))?;
        Ok(self.assignments.lock().expect("fake mutex poisoned").clone())
    }

    async fn available_employees(
        &self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<Vec<Employee>, ApiError> {
        self.read(format!("GET {}/{title}/available-employees", kind.path()))?;
        Ok(self.available.lock().expect("fake mutex poisoned").clone())
    }

    async fn assign_title(
        &self,
        kind: TitleKind,
        title: TitleId,
        request: &AssignmentRequest,
    ) -> Result<(), ApiError> {
        self.mutation(format!(
            "POST {}/{title}/assign {}",
            kind.path(),
            request.employee_ids.len()
        ))
    }
}

/// Records every URL created and revoked.
#[derive(Debug, Default)]
pub(super) struct FakeUrls {
    pub(super) created: Vec<String>,
    pub(super) revoked: Vec<String>,
    /// Interleaved log of `create`/`revoke` for ordering assertions.
    pub(super) log: Vec<String>,
    /// Makes `create` fail as if the temp directory were unwritable.
    pub(super) unwritable: bool,
}

impl FakeUrls {
    pub(super) fn live(&self) -> usize {
        self.created
            .iter()
            .filter(|url| !self.revoked.contains(url))
            .count()
    }
}

impl ObjectUrls for FakeUrls {
    fn create(&mut self, file_name: &str, _contents: &[u8]) -> std::io::Result<String> {
        if self.unwritable {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "preview directory is read-only",
            ));
        }
        let url = format!("blob:portal/{}-{file_name}", self.created.len() + 1);
        self.log.push(format!("create {url}"));
        self.created.push(url.clone());
        Ok(url)
    }

    fn revoke(&mut self, url: &str) {
        self.log.push(format!("revoke {url}"));
        self.revoked.push(url.to_string());
    }
}

pub(super) fn portal(backend: FakeBackend, role: Role) -> Portal<FakeBackend, FakeUrls> {
    Portal::new(backend, FakeUrls::default(), role)
}

pub(super) fn employee(id: u64, first_name: &str, last_name: &str) -> Employee {
    Employee {
        id: EmployeeId(id),
        employee_number: Some(format!("EMP-{id:03}")),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        department: Some("Operations".to_string()),
        position: None,
    }
}

pub(super) fn payroll_record(id: u64, employee: u64, basic_pay: f64) -> PayrollRecord {
    PayrollRecord {
        id: PayrollId(id),
        period_id: PeriodId(1),
        employee_id: EmployeeId(employee),
        employee_name: None,
        basic_pay,
        gross_pay: basic_pay,
        deductions: Vec::new(),
        taxes: Vec::new(),
        total_deductions: None,
        total_taxes: None,
        net_pay: basic_pay,
        status: ReportedStatus::parse("processed"),
    }
}
