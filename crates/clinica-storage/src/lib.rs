//! clinica-storage
//!
//! Row access against the hosted relational backend. A [`backend::Backend`]
//! executes [`query::Query`] values; [`rest::RestBackend`] speaks the
//! service's PostgREST dialect and [`memory::MemoryBackend`] keeps rows in
//! process for tests and offline demos.

pub mod backend;
pub mod client;
pub mod error;
pub mod memory;
pub mod query;
pub mod rest;
pub mod rows;
