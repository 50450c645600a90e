//! Valentine invitation client core
//!
//! Everything the invitation page decides without touching the DOM: which
//! view a URL opens, how invite links carry the host email, the proposal
//! state machine, and the client side of the selection log.
//!
//! Browser facilities (local storage, clipboard, location) come in through
//! the traits in `capability`; rendering and confetti through `session::Renderer`.

pub mod access;
pub mod capability;
pub mod config;
pub mod error;
pub mod evasion;
pub mod fingerprint;
pub mod flow;
pub mod link;
pub mod session;
pub mod setup;
pub mod store;
pub mod viewer;
