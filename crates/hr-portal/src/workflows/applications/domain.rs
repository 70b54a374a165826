use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{ApplicationStatus, ReportedStatus};
use crate::workflows::ids::ApplicationId;

/// Applicant contact details embedded in an application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostingRef {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

/// Interview already booked for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSchedule {
    pub interview_date: NaiveDate,
    #[serde(default)]
    pub interview_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interviewer: Option<String>,
}

/// Job application as re-fetched from `/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    #[serde(default)]
    pub applicant: Applicant,
    #[serde(default)]
    pub job_posting: Option<JobPostingRef>,
    pub status: ReportedStatus<ApplicationStatus>,
    #[serde(default)]
    pub interview: Option<InterviewSchedule>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn position_title(&self) -> &str {
        self.job_posting
            .as_ref()
            .map(|posting| posting.title.as_str())
            .unwrap_or("Unassigned posting")
    }
}

/// Body of `POST /applications/:id/schedule-interview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRequest {
    pub interview_date: NaiveDate,
    pub interview_time: NaiveTime,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interviewer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of the batch scheduling endpoint: one slot for many applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInterviewRequest {
    pub application_ids: Vec<ApplicationId>,
    #[serde(flatten)]
    pub schedule: InterviewRequest,
}

/// Counts reported by the backend after a batch operation, shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    #[serde(default)]
    pub success_count: u32,
    #[serde(default)]
    pub failed_count: u32,
}

impl BatchOutcome {
    pub fn summary(&self) -> String {
        format!(
            "{} interview(s) scheduled, {} failed",
            self.success_count, self.failed_count
        )
    }
}
