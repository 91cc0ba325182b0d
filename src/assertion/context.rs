//! Per-test assertion state
//!
//! [`TestContext`] is handed to every test body. It holds the staged case,
//! the messages accumulated so far and whether the test still passes.

use thiserror::Error;
use tracing::trace;

use super::staging::CaseState;

/// Control signal returned by [`TestContext::commit`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    Continue,
    AbortCurrentTest,
}

impl Flow {
    /// `Err(TestAborted)` for an abort, so test bodies can use `?`
    pub fn into_result(self) -> Result<(), TestAborted> {
        match self {
            Flow::Continue => Ok(()),
            Flow::AbortCurrentTest => Err(TestAborted),
        }
    }
}

/// Stops the current test body after a failed assertion
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("test stopped after failed assertion")]
pub struct TestAborted;

/// Assertion staging and accumulated state for the running test
#[derive(Debug)]
pub struct TestContext {
    staged: Option<CaseState>,
    messages: Vec<String>,
    passed: bool,
    continue_after_assert: bool,
}

impl TestContext {
    pub fn new(continue_after_assert: bool) -> Self {
        Self {
            staged: None,
            messages: Vec::new(),
            passed: true,
            continue_after_assert,
        }
    }

    fn case(&mut self) -> &mut CaseState {
        self.staged.get_or_insert_with(CaseState::default)
    }

    pub fn stage_line(&mut self, line: u32) -> &mut Self {
        self.case().line = Some(line);
        self
    }

    pub fn stage_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.case().message = Some(message.into());
        self
    }

    pub fn stage_additional(&mut self, additional: impl Into<String>) -> &mut Self {
        self.case().additional = Some(additional.into());
        self
    }

    pub fn stage_expected(&mut self, expected: impl Into<String>) -> &mut Self {
        self.case().expected = Some(expected.into());
        self
    }

    /// Record the outcome; a later call overwrites an earlier one
    pub fn stage_outcome(&mut self, outcome: bool) -> &mut Self {
        self.case().outcome = Some(outcome);
        self
    }

    /// Finalize the staged case.
    ///
    /// Appends its display line (if any), marks the test failed on a false
    /// outcome, and always leaves nothing staged. Returns
    /// [`Flow::AbortCurrentTest`] for a failure unless continuing after failed
    /// assertions is enabled.
    pub fn commit(&mut self) -> Flow {
        let Some(case) = self.staged.take() else {
            return Flow::Continue;
        };

        if let Some(line) = case.render() {
            trace!("committed: {}", line);
            self.messages.push(line);
        }

        if !case.is_failure() {
            return Flow::Continue;
        }

        self.passed = false;
        if self.continue_after_assert {
            Flow::Continue
        } else {
            Flow::AbortCurrentTest
        }
    }

    /// Record a failure that did not come from an assertion
    pub(crate) fn record_error(&mut self, description: impl std::fmt::Display) {
        self.staged = None;
        self.passed = false;
        self.messages.push(format!("Exception: {description}"));
    }

    pub fn has_staged(&self) -> bool {
        self.staged.is_some()
    }

    pub fn staged(&self) -> Option<&CaseState> {
        self.staged.as_ref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether no assertion has failed so far
    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn continue_after_assert(&self) -> bool {
        self.continue_after_assert
    }

    /// Take accumulated messages and pass state, resetting for the next test
    pub(crate) fn finish(&mut self) -> (bool, Vec<String>) {
        self.staged = None;
        let passed = std::mem::replace(&mut self.passed, true);
        (passed, std::mem::take(&mut self.messages))
    }
}
