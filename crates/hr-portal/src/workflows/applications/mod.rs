//! Job applications: pipeline records, interview scheduling payloads and the
//! tab partition used by the onboarding dashboard.

pub mod domain;
pub mod tabs;

pub use domain::{
    Applicant, Application, BatchInterviewRequest, BatchOutcome, InterviewRequest,
    InterviewSchedule, JobPostingRef,
};
pub use tabs::{filter_by_tab, tab_counts, TabCount, UnknownTab, WorkflowTab};
