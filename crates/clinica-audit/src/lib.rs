//! clinica-audit
//!
//! Structured audit events for every mutation made from the front end.

pub mod error;
pub mod events;
pub mod sink;
