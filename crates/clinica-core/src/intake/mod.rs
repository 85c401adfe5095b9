//! The three-step clinical intake workflow.
//!
//! [`step`] is the navigation state machine, [`form`] holds field values and
//! errors independent of the visible step, and [`schema`] validates a full
//! draft at submission time. Step changes never validate.

pub mod form;
pub mod schema;
pub mod step;

pub use form::{IntakeDraft, IntakeField, IntakeForm};
pub use schema::validate_intake;
pub use step::{IntakeStep, StepAction};
