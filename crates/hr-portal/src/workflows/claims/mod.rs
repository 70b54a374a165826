//! Government benefit claims (SSS, PhilHealth, Pag-IBIG) filed by employees.

pub mod domain;

pub use domain::{BenefitClaim, BenefitType, ClaimDocument, ClaimStatusUpdate};
