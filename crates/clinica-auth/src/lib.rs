//! clinica-auth
//!
//! Session-based identity against the hosted auth service.

pub mod client;
pub mod error;
pub mod flows;
pub mod jwt;
pub mod memory;
pub mod provider;
pub mod session;
