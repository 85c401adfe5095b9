//! clinica-core
//!
//! Pure domain types, table/column names, form validation, the intake
//! workflow, the route table and the weekly calendar layout. No I/O and no
//! HTTP dependency: this is the shared vocabulary of the Clinica front end.

pub mod calendar;
pub mod error;
pub mod forms;
pub mod intake;
pub mod models;
pub mod routes;
pub mod tables;
pub mod validation;
