//! Test execution engine
//!
//! Sequential execution of registered tests.

mod runner;

pub use runner::TestRunner;
