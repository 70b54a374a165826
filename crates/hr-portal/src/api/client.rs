//! Async HTTP client for the HR service's JSON REST API.

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::gate::RejectionReason;
use crate::status::{ApplicationStatus, StatusVocabulary};
use crate::workflows::applications::{
    Application, BatchInterviewRequest, BatchOutcome, InterviewRequest,
};
use crate::workflows::claims::{BenefitClaim, ClaimDocument, ClaimStatusUpdate};
use crate::workflows::documents::{ApplicationDocuments, DocumentReview};
use crate::workflows::payroll::{
    AssignmentRequest, DeductionTitle, GeneratePayrollRequest, PayrollPeriod, PayrollRecord,
    TaxTitle, TitleAssignment, TitleKind,
};
use crate::workflows::{
    ApplicationId, ClaimId, Employee, FollowUpRequest, FollowUpResolution, PeriodId,
    SubmissionId, TitleId,
};

use super::backend::HrBackend;
use super::envelope::{error_message, normalize_list, ApiEnvelope};
use super::error::ApiError;

/// [`HrBackend`] over HTTP. The bearer token is attached to every request;
/// there is no retry and no token refresh.
///
/// Cheap to clone, the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute links only get the bearer token when they point back at the
    /// HR service itself.
    fn same_origin(&self, target: &str) -> bool {
        match (Url::parse(&self.base_url), Url::parse(target)) {
            (Ok(base), Ok(target)) => base.origin() == target.origin(),
            _ => false,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        keys: &[&str],
    ) -> Result<Vec<T>, ApiError> {
        debug!(endpoint = path, "GET");
        let response = self.request(Method::GET, path).query(query).send().await?;
        let body = read_body(path, response).await?;
        normalize_list(path, body, keys)
    }

    /// Send a mutation and return the envelope's `data`, `Null` when absent.
    async fn mutate<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        debug!(%method, endpoint = path, "mutation");
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = read_body(path, response).await?;
        if !body.is_object() {
            return Ok(Value::Null);
        }
        let envelope: ApiEnvelope<Value> =
            serde_json::from_value(body).map_err(|err| ApiError::decode(path, err))?;
        match envelope.into_result(status) {
            Ok(data) => Ok(data.unwrap_or(Value::Null)),
            Err(err) => {
                warn!(endpoint = path, error = %err, "HR service rejected mutation");
                Err(err)
            }
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.mutate(Method::POST, path, Some(body)).await
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.mutate(Method::PUT, path, Some(body)).await
    }
}

/// Parse a successful JSON body; failures are mapped by [`error_for`].
async fn read_body(endpoint: &str, response: Response) -> Result<Value, ApiError> {
    if !response.status().is_success() {
        return Err(error_for(endpoint, response).await);
    }
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|err| ApiError::decode(endpoint, err))
}

/// Map a non-2xx response onto the error taxonomy.
async fn error_for(endpoint: &str, response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .unwrap_or(Value::Null);
    warn!(endpoint, status, "HR service returned an error");
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden {
            message: error_message(&body),
        },
        code => ApiError::Rejected {
            status: Some(code),
            message: error_message(&body)
                .unwrap_or_else(|| format!("request to {endpoint} failed with status {code}")),
        },
    }
}

/// Unwrap `{data: {...}}` (with or without the success flag) or take the
/// object as-is.
fn unwrap_data(endpoint: &str, body: Value) -> Result<Value, ApiError> {
    match body {
        Value::Object(mut fields) if fields.contains_key("data") => {
            if fields.get("success").and_then(Value::as_bool) == Some(false) {
                return Err(ApiError::Rejected {
                    status: None,
                    message: error_message(&Value::Object(fields))
                        .unwrap_or_else(|| "the request was rejected".to_string()),
                });
            }
            Ok(fields.remove("data").unwrap_or(Value::Null))
        }
        Value::Object(_) | Value::Null => Ok(body),
        other => Err(ApiError::decode(endpoint, format!("expected an object, got {other}"))),
    }
}

impl HrBackend for HttpBackend {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_list("/employees", &[], &["employees"]).await
    }

    async fn claims(&self) -> Result<Vec<BenefitClaim>, ApiError> {
        self.get_list("/benefit-claims", &[], &["claims", "benefit_claims"])
            .await
    }

    async fn claim_documents(&self, claim: ClaimId) -> Result<Vec<ClaimDocument>, ApiError> {
        self.get_list(
            &format!("/benefit-claims/{claim}/documents"),
            &[],
            &["documents"],
        )
        .await
    }

    async fn approve_claim(&self, claim: ClaimId) -> Result<(), ApiError> {
        self.post(&format!("/benefit-claims/{claim}/approve"), &json!({}))
            .await
            .map(drop)
    }

    async fn reject_claim(
        &self,
        claim: ClaimId,
        reason: &RejectionReason,
    ) -> Result<(), ApiError> {
        self.post(
            &format!("/benefit-claims/{claim}/reject"),
            &json!({ "rejection_reason": reason }),
        )
        .await
        .map(drop)
    }

    async fn update_claim_status(
        &self,
        claim: ClaimId,
        update: &ClaimStatusUpdate,
    ) -> Result<(), ApiError> {
        self.put(&format!("/benefit-claims/{claim}/status"), update)
            .await
            .map(drop)
    }

    async fn applications(&self) -> Result<Vec<Application>, ApiError> {
        self.get_list("/applications", &[], &["applications"]).await
    }

    async fn update_application_status(
        &self,
        application: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), ApiError> {
        self.put(
            &format!("/applications/{application}/status"),
            &json!({ "status": status.as_str() }),
        )
        .await
        .map(drop)
    }

    async fn schedule_interview(
        &self,
        application: ApplicationId,
        request: &InterviewRequest,
    ) -> Result<(), ApiError> {
        self.post(
            &format!("/applications/{application}/schedule-interview"),
            request,
        )
        .await
        .map(drop)
    }

    async fn batch_schedule_interviews(
        &self,
        request: &BatchInterviewRequest,
    ) -> Result<BatchOutcome, ApiError> {
        let endpoint = "/applications/batch-schedule-interview";
        let data = self.post(endpoint, request).await?;
        if data.is_null() {
            return Ok(BatchOutcome::default());
        }
        serde_json::from_value(data).map_err(|err| ApiError::decode(endpoint, err))
    }

    async fn send_offer(&self, application: ApplicationId) -> Result<(), ApiError> {
        self.post(&format!("/applications/{application}/send-offer"), &json!({}))
            .await
            .map(drop)
    }

    async fn application_documents(
        &self,
        application: ApplicationId,
    ) -> Result<ApplicationDocuments, ApiError> {
        let endpoint = format!("/applications/{application}/documents");
        debug!(endpoint = %endpoint, "GET");
        let response = self.request(Method::GET, &endpoint).send().await?;
        let body = unwrap_data(&endpoint, read_body(&endpoint, response).await?)?;
        if body.is_null() {
            return Ok(ApplicationDocuments::default());
        }
        serde_json::from_value(body).map_err(|err| ApiError::decode(&endpoint, err))
    }

    async fn review_document(
        &self,
        application: ApplicationId,
        submission: SubmissionId,
        review: &DocumentReview,
    ) -> Result<(), ApiError> {
        self.post(
            &format!("/applications/{application}/documents/{submission}/review"),
            review,
        )
        .await
        .map(drop)
    }

    async fn complete_documents(&self, application: ApplicationId) -> Result<(), ApiError> {
        self.post(
            &format!("/applications/{application}/documents/complete"),
            &json!({}),
        )
        .await
        .map(drop)
    }

    async fn follow_ups(
        &self,
        application: ApplicationId,
    ) -> Result<Vec<FollowUpRequest>, ApiError> {
        self.get_list(
            &format!("/applications/{application}/documents/follow-ups"),
            &[],
            &["follow_ups", "follow_up_requests"],
        )
        .await
    }

    async fn resolve_follow_up(
        &self,
        application: ApplicationId,
        resolution: &FollowUpResolution,
    ) -> Result<(), ApiError> {
        self.post(
            &format!(
                "/applications/{application}/documents/follow-ups/{}/resolve",
                resolution.id
            ),
            resolution,
        )
        .await
        .map(drop)
    }

    async fn download(&self, file_path: &str) -> Result<Vec<u8>, ApiError> {
        let path = if file_path.starts_with("http://") || file_path.starts_with("https://") {
            file_path.to_string()
        } else {
            format!("/{}", file_path.trim_start_matches('/'))
        };
        debug!(file = file_path, "download");
        let request = if path.starts_with('/') {
            self.request(Method::GET, &path)
        } else {
            let request = self.client.get(&path);
            match &self.token {
                Some(token) if self.same_origin(&path) => request.bearer_auth(token),
                _ => request,
            }
        };
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_for(file_path, response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn payroll_periods(&self) -> Result<Vec<PayrollPeriod>, ApiError> {
        self.get_list("/payroll/periods", &[], &["periods"]).await
    }

    async fn payroll_records(
        &self,
        period: Option<PeriodId>,
    ) -> Result<Vec<PayrollRecord>, ApiError> {
        let query: Vec<(&str, String)> = period
            .map(|period| vec![("period_id", period.to_string())])
            .unwrap_or_default();
        self.get_list("/payroll", &query, &["payrolls", "payroll"])
            .await
    }

    async fn generate_payroll(&self, period: PeriodId) -> Result<(), ApiError> {
        self.post(
            "/payroll/generate",
            &GeneratePayrollRequest {
                payroll_period_id: period,
            },
        )
        .await
        .map(drop)
    }

    async fn deduction_titles(&self) -> Result<Vec<DeductionTitle>, ApiError> {
        self.get_list(TitleKind::Deduction.path(), &[], &["deduction_titles", "titles"])
            .await
    }

    async fn tax_titles(&self) -> Result<Vec<TaxTitle>, ApiError> {
        self.get_list(TitleKind::Tax.path(), &[], &["tax_titles", "titles"])
            .await
    }

    async fn title_assignments(
        &self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<Vec<TitleAssignment>, ApiError> {
        self.get_list(
            &format!("{}/{title}/employees", kind.path()),
            &[],
            &["employees", "assignments"],
        )
        .await
    }

    async fn available_employees(
        &self,
        kind: TitleKind,
        title: TitleId,
    ) -> Result<Vec<Employee>, ApiError> {
        self.get_list(
            &format!("{}/{title}/available-employees", kind.path()),
            &[],
            &["employees"],
        )
        .await
    }

    async fn assign_title(
        &self,
        kind: TitleKind,
        title: TitleId,
        request: &AssignmentRequest,
    ) -> Result<(), ApiError> {
        self.post(&format!("{}/{title}/assign", kind.path()), request)
            .await
            .map(drop)
    }
}
