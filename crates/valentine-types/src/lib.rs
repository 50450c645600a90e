//! Types shared between the invitation client core, the REST API and the
//! database layer.

pub mod api;
pub mod email;
pub mod models;
