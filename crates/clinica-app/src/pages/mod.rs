//! One module per screen of the front end.

pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod intake;
pub mod patients;
