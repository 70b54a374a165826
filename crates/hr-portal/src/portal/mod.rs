//! Portal view state and the controller that drives it.
//!
//! All state lives in [`ViewState`] and changes only through [`reduce`]. The
//! [`Portal`] controller turns user intents into gate checks, backend calls
//! and events; row projections in [`rows`] are pure reads of the state.

mod controller;
mod notification;
mod preview;
pub mod rows;
mod state;

#[cfg(test)]
mod tests;

pub use controller::Portal;
pub use notification::{Notification, Severity};
pub use preview::{ObjectUrls, PreviewSlot, TempFileUrls};
pub use rows::{
    application_rows, assignment_rows, claim_rows, document_panel, payroll_breakdown,
    ActionButton, ApplicationRow, AssignmentRow, ClaimRow, DocumentPanel, DocumentRow,
    FollowUpRow,
};
pub use state::{
    reduce, AssignmentPanel, Collection, Event, Modal, Operation, ViewState, MAX_NOTIFICATIONS,
};

use crate::api::ApiError;
use crate::gate::GateError;

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("another request for {operation:?} is still in progress")]
    InFlight { operation: Operation },
    #[error("{0} has not been loaded")]
    NotLoaded(String),
    #[error("unable to prepare document preview: {0}")]
    Preview(#[source] std::io::Error),
}
