//! Assertion staging and commit
//!
//! Each assertion stages its fields on the [`TestContext`], then commits them
//! into at most one display message. A failed commit tells the test body to
//! stop via [`Flow::AbortCurrentTest`] / [`TestAborted`].

mod checks;
mod context;
mod staging;

pub use checks::FLOAT_TOLERANCE;
pub use context::{Flow, TestAborted, TestContext};
pub use staging::CaseState;
