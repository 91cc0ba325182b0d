//! Test execution runner
//!
//! Runs the selected tests one after another, each behind a boundary that
//! absorbs failed-assertion aborts, returned errors and panics.

use std::any::Any;
use std::cell::Cell;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use tracing::{debug, info, warn};

use crate::assertion::{TestAborted, TestContext};
use crate::config::RunConfiguration;
use crate::models::{RunReport, TestCase, TestRegistry, TestResult, TestStatus};
use crate::output::{MessageKind, Printer, Verdict};
use crate::utils::Timer;

/// Sequential runner over a registry
pub struct TestRunner<'a> {
    registry: &'a TestRegistry,
    config: &'a RunConfiguration,
}

impl<'a> TestRunner<'a> {
    pub fn new(registry: &'a TestRegistry, config: &'a RunConfiguration) -> Self {
        Self { registry, config }
    }

    /// Tests to run, in registration order
    pub fn selected(&self) -> Vec<&'a TestCase> {
        self.registry
            .iter()
            .filter(|case| self.config.selects(case.name()))
            .collect()
    }

    /// Run one test body inside the per-test boundary.
    ///
    /// Never unwinds: an abort after a failed assertion yields `Failed`, any
    /// other error or a panic yields `Errored` with an `Exception:` message.
    pub fn run_test(&self, case: &TestCase, ctx: &mut TestContext) -> TestResult {
        let timer = Timer::start(case.name());
        debug!("Running {}", case);

        let outcome = {
            let _quiet = QuietPanics::enter();
            panic::catch_unwind(AssertUnwindSafe(|| case.run(ctx)))
        };

        let errored = match outcome {
            Ok(Ok(())) => false,
            Ok(Err(e)) if e.is::<TestAborted>() => {
                debug!("{} stopped after failed assertion", case);
                false
            }
            Ok(Err(e)) => {
                debug!("{} returned an error: {:#}", case, e);
                ctx.record_error(format!("{e:#}"));
                true
            }
            Err(payload) => {
                let description = panic_message(payload.as_ref());
                debug!("{} panicked: {}", case, description);
                ctx.record_error(description);
                true
            }
        };

        let (passed, messages) = ctx.finish();
        let status = if errored {
            TestStatus::Errored
        } else if passed {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        };

        TestResult::new(case.name(), status, messages).with_duration(timer.stop())
    }

    /// Run all selected tests, printing progress and the final report
    pub fn run_all<W: Write>(&self, printer: &mut Printer<W>) -> io::Result<RunReport> {
        for name in &self.config.tests {
            if !self.registry.contains(name) {
                warn!("Requested test '{}' is not registered", name);
            }
        }

        let selected = self.selected();
        info!(
            "Running {} of {} registered tests",
            selected.len(),
            self.registry.len()
        );

        printer.print(MessageKind::Header, "START")?;

        let mut ctx = TestContext::new(self.config.continue_after_assert);
        let mut results = Vec::with_capacity(selected.len());

        for case in selected {
            printer.print(MessageKind::TestName, &format!("{case}: "))?;
            // Names must reach the sink before a body that may hang or abort.
            printer.flush()?;

            let result = self.run_test(case, &mut ctx);

            let verdict = if result.status.is_success() {
                Verdict::Pass
            } else {
                Verdict::Fail
            };
            printer.print(MessageKind::Result(verdict), verdict.label())?;
            printer.print_lines(MessageKind::TestMessage, &result.messages)?;

            results.push(result);
        }

        printer.print(MessageKind::Header, "FINISH")?;

        let report = RunReport::new(self.registry.len(), results);
        printer.print(MessageKind::Report, &report.to_string())?;
        printer.flush()?;

        info!("{}", report);
        Ok(report)
    }
}

thread_local! {
    static PANICS_SILENCED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Keeps the panic hook from printing while a test body runs on this thread.
///
/// The hook is wrapped once per process; outside a guard it forwards to the
/// hook that was installed before.
struct QuietPanics {
    previous: bool,
}

impl QuietPanics {
    fn enter() -> Self {
        QUIET_HOOK.call_once(|| {
            let hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !PANICS_SILENCED.with(Cell::get) {
                    hook(info);
                }
            }));
        });
        Self {
            previous: PANICS_SILENCED.with(|silenced| silenced.replace(true)),
        }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        PANICS_SILENCED.with(|silenced| silenced.set(self.previous));
    }
}

fn panics_silenced() -> bool {
    PANICS_SILENCED.with(Cell::get)
}

/// Text carried by a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::output::Formatter;

    fn registry() -> TestRegistry {
        let mut registry = TestRegistry::new();
        registry.register("passes", |ctx| {
            ctx.check(true, "true", 1)?;
            Ok(())
        });
        registry.register("fails", |ctx| {
            ctx.check(5 == 8, "5 == 8", 2)?;
            ctx.message("unreachable", 3)?;
            Ok(())
        });
        registry.register("errors", |_| anyhow::bail!("disk on fire"));
        registry.register("panics", |_| panic!("kaboom"));
        registry
    }

    fn run(registry: &TestRegistry, name: &str, continue_after_assert: bool) -> TestResult {
        let config = RunConfiguration::new();
        let runner = TestRunner::new(registry, &config);
        let mut ctx = TestContext::new(continue_after_assert);
        runner.run_test(registry.get(name).unwrap(), &mut ctx)
    }

    #[test]
    fn test_passing_test() {
        let result = run(&registry(), "passes", false);
        assert_eq!(result.status, TestStatus::Passed);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_failed_assertion_stops_body() {
        let result = run(&registry(), "fails", false);
        assert_eq!(result.status, TestStatus::Failed);
        assert_eq!(result.messages, ["Fail 5 == 8 Line: 2"]);
    }

    #[test]
    fn test_failed_assertion_continue() {
        let result = run(&registry(), "fails", true);
        assert_eq!(result.status, TestStatus::Failed);
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1], "Message: unreachable Line: 3");
    }

    #[test]
    fn test_error_is_errored() {
        let result = run(&registry(), "errors", false);
        assert_eq!(result.status, TestStatus::Errored);
        assert_eq!(result.messages, ["Exception: disk on fire"]);
    }

    #[test]
    fn test_panic_is_errored() {
        let result = run(&registry(), "panics", false);
        assert_eq!(result.status, TestStatus::Errored);
        assert_eq!(result.messages, ["Exception: kaboom"]);
    }

    #[test]
    fn test_selection_order() {
        let registry = registry();
        let config = RunConfiguration::new()
            .with_test("panics")
            .with_test("passes")
            .with_test("ghost");
        let runner = TestRunner::new(&registry, &config);
        let names: Vec<_> = runner.selected().into_iter().map(|c| c.name()).collect();
        assert_eq!(names, ["passes", "panics"]);
    }

    #[test]
    fn test_run_all_report() {
        let registry = registry();
        let config = RunConfiguration::new();
        let runner = TestRunner::new(&registry, &config);
        let mut printer = Printer::new(Formatter::new(config.verbosity), Vec::new());

        let report = runner.run_all(&mut printer).unwrap();
        assert_eq!(report.selected, 4);
        assert_eq!(report.registered, 4);
        assert_eq!(report.failed, 3);
        assert_eq!(report.passed(), 1);

        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert!(out.starts_with("#### START ####\n  TEST 'passes': SUCCESS\n"));
        assert!(out.contains("  TEST 'fails': FAIL\n    Fail 5 == 8 Line: 2\n"));
        assert!(out.ends_with("#### FINISH ####\n  Run: 4/4, Fail: 3, Pass: 1\n"));
    }

    #[test]
    fn test_panic_hook_silenced_only_inside_body() {
        let mut registry = TestRegistry::new();
        registry.register("observes", |ctx| {
            ctx.check(panics_silenced(), "panics_silenced()", 1)?;
            Ok(())
        });
        registry.register("panics", |_| panic!("kaboom"));

        assert!(!panics_silenced());
        assert_eq!(run(&registry, "observes", false).status, TestStatus::Passed);
        assert!(!panics_silenced());
        assert_eq!(run(&registry, "panics", false).status, TestStatus::Errored);
        assert!(!panics_silenced());
    }

    #[test]
    fn test_nested_guard_restores_outer_state() {
        let outer = QuietPanics::enter();
        {
            let _inner = QuietPanics::enter();
            assert!(panics_silenced());
        }
        assert!(panics_silenced());
        drop(outer);
        assert!(!panics_silenced());
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42u8), "unknown panic");
    }
}
