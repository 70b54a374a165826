use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::RejectionReason;
use crate::status::{DocumentStatus, ReportedStatus};
use crate::workflows::ids::{ApplicationId, RequirementId, SubmissionId};

/// Document an application must (or may) provide during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequirement {
    pub id: RequirementId,
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
    #[serde(default)]
    pub document_key: String,
    pub name: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
    #[serde(default)]
    pub max_size_kb: Option<u32>,
}

/// One uploaded file for a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSubmission {
    pub id: SubmissionId,
    pub requirement_id: RequirementId,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    pub status: ReportedStatus<DocumentStatus>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl DocumentSubmission {
    pub fn is_approved(&self) -> bool {
        self.status.is(DocumentStatus::Approved)
    }
}

/// Requirements and submissions of one application, as returned by
/// `/applications/:id/documents`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationDocuments {
    #[serde(default)]
    pub requirements: Vec<DocumentRequirement>,
    #[serde(default)]
    pub submissions: Vec<DocumentSubmission>,
}

impl ApplicationDocuments {
    pub fn submission(&self, id: SubmissionId) -> Option<&DocumentSubmission> {
        self.submissions.iter().find(|submission| submission.id == id)
    }
}

/// The submission currently associated with a requirement: the most recently
/// submitted one, ties broken by the higher id.
pub fn latest_submission(
    requirement: RequirementId,
    submissions: &[DocumentSubmission],
) -> Option<&DocumentSubmission> {
    submissions
        .iter()
        .filter(|submission| submission.requirement_id == requirement)
        .max_by_key(|submission| (submission.submitted_at, submission.id))
}

/// Review decision sent to `/applications/:id/documents/:submission/review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DocumentReview {
    Approve,
    Reject { rejection_reason: RejectionReason },
}
