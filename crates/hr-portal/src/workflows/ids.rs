use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Backend primary key of an employee.
    EmployeeId
);
entity_id!(
    /// Backend primary key of a job application.
    ApplicationId
);
entity_id!(
    /// Backend primary key of a benefit claim.
    ClaimId
);
entity_id!(RequirementId);
entity_id!(SubmissionId);
entity_id!(FollowUpId);
entity_id!(PeriodId);
entity_id!(PayrollId);
entity_id!(
    /// Shared key space for deduction and tax titles; see `TitleKind`.
    TitleId
);
