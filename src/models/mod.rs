//! Data models for the harness
//!
//! Registered test cases, per-test results and the run report.

mod test_case;
mod test_result;

pub use test_case::{TestCase, TestFn, TestRegistry};
pub use test_result::{RunReport, TestResult, TestStatus};
