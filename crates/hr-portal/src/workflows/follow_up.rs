//! Applicant follow-up requests raised against a document submission, usually
//! asking HR for more time to upload.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::GateError;
use crate::status::{FollowUpStatus, ReportedStatus, StatusVocabulary};
use crate::workflows::ids::{FollowUpId, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpRequest {
    pub id: FollowUpId,
    #[serde(default)]
    pub submission_id: Option<SubmissionId>,
    #[serde(default)]
    pub message: String,
    pub status: ReportedStatus<FollowUpStatus>,
    #[serde(default)]
    pub requested_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub extension_days: Option<u32>,
    #[serde(default)]
    pub extension_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub hr_response: Option<String>,
}

/// What HR decided for a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpDecision {
    Accept { extension_days: u32 },
    Reject { hr_response: Option<String> },
}

/// Validated resolution, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUpResolution {
    #[serde(skip)]
    pub id: FollowUpId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_response: Option<String>,
}

impl FollowUpRequest {
    pub fn is_open(&self) -> bool {
        self.status.is(FollowUpStatus::Pending)
    }

    /// Validate `decision` against the current state. Only pending requests can
    /// be resolved; accepted extensions run from `today`.
    pub fn resolve(
        &self,
        decision: FollowUpDecision,
        today: NaiveDate,
    ) -> Result<FollowUpResolution, GateError> {
        if !self.is_open() {
            return Err(GateError::AlreadyResolved {
                status: self.status.descriptor().label,
            });
        }

        match decision {
            FollowUpDecision::Accept { extension_days } => {
                if extension_days == 0 {
                    return Err(GateError::InvalidExtension);
                }
                let deadline = today
                    .checked_add_days(Days::new(u64::from(extension_days)))
                    .ok_or(GateError::InvalidExtension)?;

                Ok(FollowUpResolution {
                    id: self.id,
                    status: FollowUpStatus::Accepted.as_str(),
                    extension_days: Some(extension_days),
                    extension_deadline: Some(deadline),
                    hr_response: None,
                })
            }
            FollowUpDecision::Reject { hr_response } => Ok(FollowUpResolution {
                id: self.id,
                status: FollowUpStatus::Rejected.as_str(),
                extension_days: None,
                extension_deadline: None,
                hr_response: hr_response
                    .map(|text| text.trim().to_string())
                    .filter(|text| !text.is_empty()),
            }),
        }
    }
}
