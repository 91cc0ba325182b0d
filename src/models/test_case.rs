//! Registered tests
//!
//! A test case is a name plus a body; the registry keeps them in
//! registration order.

use std::fmt;

use anyhow::Result;
use tracing::warn;

use crate::assertion::TestContext;
use crate::error::HarnessError;

/// Body of a test. Failed assertions and other errors are returned with `?`.
pub type TestFn = Box<dyn Fn(&mut TestContext) -> Result<()>>;

/// A named test body
pub struct TestCase {
    name: String,
    body: TestFn,
}

impl TestCase {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut TestContext) -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, ctx: &mut TestContext) -> Result<()> {
        (self.body)(ctx)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TEST '{}'", self.name)
    }
}

/// Tests in registration order.
///
/// A name registered twice keeps its first body; [`TestRegistry::try_register`]
/// reports the duplicate instead.
#[derive(Debug, Default)]
pub struct TestRegistry {
    cases: Vec<TestCase>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test, ignoring it if the name is taken
    pub fn register<F>(&mut self, name: impl Into<String>, body: F)
    where
        F: Fn(&mut TestContext) -> Result<()> + 'static,
    {
        if let Err(e) = self.try_register(name, body) {
            warn!("{}; keeping the first registration", e);
        }
    }

    /// Register a test, failing if the name is taken
    pub fn try_register<F>(&mut self, name: impl Into<String>, body: F) -> Result<(), HarnessError>
    where
        F: Fn(&mut TestContext) -> Result<()> + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(HarnessError::DuplicateTest(name));
        }
        self.cases.push(TestCase::new(name, body));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cases.iter().any(|case| case.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|case| case.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(TestCase::name).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
