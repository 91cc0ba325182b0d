//! Test result models
//!
//! Per-test outcome and the end-of-run report.

use std::fmt;

/// Final state of a single test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    /// An assertion failed
    Failed,
    /// The body returned an unexpected error or panicked
    Errored,
}

impl TestStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "PASSED"),
            TestStatus::Failed => write!(f, "FAILED"),
            TestStatus::Errored => write!(f, "ERRORED"),
        }
    }
}

/// Result of a single test execution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub messages: Vec<String>,
    pub duration_ms: u64,
}

impl TestResult {
    pub fn new(name: impl Into<String>, status: TestStatus, messages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            status,
            messages,
            duration_ms: 0,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}ms]", self.name, self.status, self.duration_ms)
    }
}

/// Summary of a whole run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Tests that were selected and executed
    pub selected: usize,
    /// Tests in the registry
    pub registered: usize,
    pub failed: usize,
    pub results: Vec<TestResult>,
}

impl RunReport {
    pub fn new(registered: usize, results: Vec<TestResult>) -> Self {
        let failed = results.iter().filter(|r| !r.status.is_success()).count();
        Self {
            selected: results.len(),
            registered,
            failed,
            results,
        }
    }

    pub fn passed(&self) -> usize {
        self.selected - self.failed
    }

    pub fn is_all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn result(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run: {}/{}, Fail: {}, Pass: {}",
            self.selected,
            self.registered,
            self.failed,
            self.passed()
        )
    }
}
