//! REST boundary to the HR backend.
//!
//! Everything the backend returns passes through [`envelope`] once, so the
//! rest of the crate only sees canonical `Vec<T>` lists and typed records.

mod backend;
mod client;
pub mod envelope;
mod error;

pub use backend::HrBackend;
pub use client::HttpBackend;
pub use envelope::{normalize_list, ApiEnvelope};
pub use error::{ApiError, ErrorCategory};
