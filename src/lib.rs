//! TinyUnit - a minimal self-contained unit test harness
//!
//! Register zero-argument test bodies by name, then hand the command line to
//! [`Harness::run`]. The harness runs the selected tests in registration
//! order, prints verbosity-filtered output and returns a process exit code.
//!
//! ## Usage
//!
//! ```
//! use tinyunit::{check_eq, check_true, Harness};
//!
//! let mut harness = Harness::new();
//! harness.register_test("addition", |ctx| {
//!     check_eq!(ctx, 2 + 2, 4);
//!     check_true!(ctx, 3 > 2);
//!     Ok(())
//! });
//!
//! let mut out = Vec::new();
//! let code = harness.run_with_output(["--silent", "1000"], &mut out);
//! assert_eq!(code, 0);
//! assert!(out.is_empty());
//! ```
//!
//! ## Command line
//!
//! ```text
//! -h --help                   Show help
//! -v --version                Show version
//! -t --test NAME...           Run only the named tests
//! -s --silent LEVEL           Hide output (see `Verbosity::from_silent_level`)
//! -a --continue_after_assert  Keep running a test after a failed assertion
//! ```
//!
//! Exit codes: 0 success, 1 failed tests, 100 stray value, 101 unknown key or
//! bad value, 102 help/version combined with other keys, 200 internal error.

pub mod assertion;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod output;
pub mod utils;

pub use assertion::{Flow, TestAborted, TestContext};
pub use config::{HarnessDefaults, RunConfiguration, Verbosity};
pub use error::HarnessError;
pub use models::{RunReport, TestResult, TestStatus};

use std::io::{self, Write};

use tracing::error;

use cli::{usage, Action, ParsedFlags};
use config::EnvConfig;
use executor::TestRunner;
use models::TestRegistry;
use output::{Formatter, MessageKind, Printer};

/// What a run ended with
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Help,
    Version,
    Tests(RunReport),
    Error(HarnessError),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Help | RunOutcome::Version => error::EXIT_SUCCESS,
            RunOutcome::Tests(report) if report.is_all_passed() => error::EXIT_SUCCESS,
            RunOutcome::Tests(_) => error::EXIT_TESTS_FAILED,
            RunOutcome::Error(e) => e.exit_code(),
        }
    }

    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunOutcome::Tests(report) => Some(report),
            _ => None,
        }
    }
}

/// Harness state: the registered tests and output options
#[derive(Debug, Default)]
pub struct Harness {
    registry: TestRegistry,
    colorize: bool,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color SUCCESS/FAIL results
    pub fn with_color(mut self) -> Self {
        self.colorize = true;
        self
    }

    /// Register a test. A name that is already registered keeps its first body.
    pub fn register_test<F>(&mut self, name: impl Into<String>, body: F)
    where
        F: Fn(&mut TestContext) -> anyhow::Result<()> + 'static,
    {
        self.registry.register(name, body);
    }

    /// Register a test, rejecting a name that is already registered
    pub fn try_register_test<F>(
        &mut self,
        name: impl Into<String>,
        body: F,
    ) -> Result<(), HarnessError>
    where
        F: Fn(&mut TestContext) -> anyhow::Result<()> + 'static,
    {
        self.registry.try_register(name, body)
    }

    pub fn registry(&self) -> &TestRegistry {
        &self.registry
    }

    /// Run with command-line arguments (program name excluded), printing to stdout
    pub fn run<I, S>(&self, args: I) -> i32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with_output(args, &mut io::stdout().lock())
    }

    /// Like [`Harness::run`], with `TINYUNIT_*` environment and config file defaults
    pub fn run_with_env<I, S>(&self, args: I) -> i32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stdout = io::stdout().lock();
        let base = match HarnessDefaults::from_env(&EnvConfig::load()) {
            Ok(defaults) => RunConfiguration::from_defaults(&defaults),
            Err(e) => {
                let e = HarnessError::Config(format!("{e:#}"));
                self.print_plain(&mut stdout, &usage::error_lines(&e));
                return e.exit_code();
            }
        };
        self.execute(args, base, &mut stdout).exit_code()
    }

    /// Run printing to `sink`
    pub fn run_with_output<I, S, W>(&self, args: I, sink: &mut W) -> i32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
    {
        self.execute(args, RunConfiguration::default(), sink)
            .exit_code()
    }

    /// Interpret `args` on top of `base` and carry out the resulting action
    pub fn execute<I, S, W>(&self, args: I, base: RunConfiguration, sink: &mut W) -> RunOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
    {
        let configured =
            ParsedFlags::parse(args).and_then(|flags| cli::configure_with(&flags, base));

        let (config, action) = match configured {
            Ok(configured) => configured,
            Err(e) => {
                self.print_plain(sink, &usage::error_lines(&e));
                return RunOutcome::Error(e);
            }
        };

        match action {
            Action::ShowHelp => {
                self.print_plain(sink, &usage::help_lines());
                RunOutcome::Help
            }
            Action::ShowVersion => {
                self.print_plain(sink, &usage::version_lines());
                RunOutcome::Version
            }
            Action::RunTests => {
                let mut printer = Printer::new(self.formatter(&config), &mut *sink);
                match TestRunner::new(&self.registry, &config).run_all(&mut printer) {
                    Ok(report) => RunOutcome::Tests(report),
                    Err(e) => {
                        error!("Failed to write test output: {}", e);
                        RunOutcome::Error(HarnessError::UnclassifiedInternal)
                    }
                }
            }
        }
    }

    fn formatter(&self, config: &RunConfiguration) -> Formatter {
        let formatter = Formatter::new(config.verbosity);
        if self.colorize {
            formatter.with_color()
        } else {
            formatter
        }
    }

    /// Default-channel output that no verbosity setting hides
    fn print_plain<W: Write>(&self, sink: &mut W, lines: &[String]) {
        let mut printer = Printer::new(Formatter::default(), sink);
        let written = printer
            .print_lines(MessageKind::Default, lines)
            .and_then(|_| printer.flush());
        if let Err(e) = written {
            error!("Failed to write output: {}", e);
        }
    }
}
