//! Onboarding document requirements, submissions and their review.

pub mod completion;
pub mod domain;
pub mod matcher;

pub use completion::{check_submission_complete, outstanding_requirements};
pub use domain::{
    latest_submission, ApplicationDocuments, DocumentRequirement, DocumentReview,
    DocumentSubmission,
};
pub use matcher::{resolve, DocumentSlot, MatchRule, SlotResolution};
