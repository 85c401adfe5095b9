//! clinica-app
//!
//! Headless view state of the clinic front end. Each page owns its mode
//! (list, form, detail) and talks to the backend and auth collaborators
//! through an [`context::AppContext`]. Failures never escape as panics:
//! they are reported through the notifier and returned as [`error::AppError`].

pub mod config;
pub mod context;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod pages;
