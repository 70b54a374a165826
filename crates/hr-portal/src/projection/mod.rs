//! Stateless JSON surface over the workflow projector, so other services
//! can classify statuses, filter application lists and evaluate gates
//! without embedding this crate.

mod router;

pub use router::projection_router;
