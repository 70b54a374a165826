pub mod applications;
pub mod claims;
pub mod documents;
pub mod employees;
pub mod follow_up;
pub mod ids;
pub mod money;
pub mod payroll;

pub use employees::Employee;
pub use follow_up::{FollowUpDecision, FollowUpRequest, FollowUpResolution};
pub use ids::{
    ApplicationId, ClaimId, EmployeeId, FollowUpId, PayrollId, PeriodId, RequirementId,
    SubmissionId, TitleId,
};
