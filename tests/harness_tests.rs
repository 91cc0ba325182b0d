//! End-to-end runs through the command line

use std::cell::Cell;
use std::rc::Rc;

use tinyunit::{check_eq, check_true, Harness, HarnessError, RunConfiguration, RunOutcome, TestStatus};

fn scenario_harness() -> Harness {
    let mut harness = Harness::new();
    harness.register_test("A", |_| Ok(()));
    harness.register_test("B", |ctx| {
        check_eq!(ctx, 5, 8);
        Ok(())
    });
    harness.register_test("C", |_| Ok(()));
    harness
}

fn execute(harness: &Harness, args: &[&str]) -> (RunOutcome, String) {
    let mut out = Vec::new();
    let outcome = harness.execute(args, RunConfiguration::default(), &mut out);
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn run_all_reports_one_failure() {
    let harness = scenario_harness();
    let (outcome, out) = execute(&harness, &[]);

    let report = outcome.report().unwrap();
    assert_eq!(report.selected, 3);
    assert_eq!(report.registered, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(report.passed(), 2);
    assert_eq!(outcome.exit_code(), 1);

    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "#### START ####");
    assert_eq!(lines[1], "  TEST 'A': SUCCESS");
    assert_eq!(lines[2], "  TEST 'B': FAIL");
    assert!(lines[3].starts_with("    Fail 5 == 8 Line: "));
    assert_eq!(lines[4], "  TEST 'C': SUCCESS");
    assert_eq!(lines[5], "#### FINISH ####");
    assert_eq!(lines[6], "  Run: 3/3, Fail: 1, Pass: 2");
}

#[test]
fn silent_all_hides_everything_but_keeps_exit_code() {
    let harness = scenario_harness();
    let (outcome, out) = execute(&harness, &["-s", "1000"]);
    assert!(out.is_empty());
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn silent_eleven_keeps_names_and_report() {
    let harness = scenario_harness();
    let (_, out) = execute(&harness, &["--silent", "11"]);
    assert!(!out.contains("####"));
    assert!(!out.contains("Fail 5 == 8"));
    assert!(out.contains("  TEST 'B': FAIL\n"));
    assert!(out.contains("Run: 3/3"));
}

#[test]
fn help_with_other_keys_is_forbidden() {
    let ran = Rc::new(Cell::new(false));
    let mut harness = Harness::new();
    let flag = ran.clone();
    harness.register_test("A", move |_| {
        flag.set(true);
        Ok(())
    });

    let (outcome, out) = execute(&harness, &["-h", "-t", "A"]);
    assert!(matches!(
        outcome,
        RunOutcome::Error(HarnessError::ForbiddenCombination(_))
    ));
    assert_eq!(outcome.exit_code(), 102);
    assert!(out.starts_with("TinyUnit\nCan not use"));
    assert!(!ran.get());
}

#[test]
fn help_and_version_exit_zero() {
    let harness = scenario_harness();

    let (outcome, out) = execute(&harness, &["--help"]);
    assert_eq!(outcome, RunOutcome::Help);
    assert_eq!(outcome.exit_code(), 0);
    assert!(out.contains("--continue_after_assert"));

    let (outcome, out) = execute(&harness, &["-v"]);
    assert_eq!(outcome, RunOutcome::Version);
    assert!(out.starts_with("TinyUnit v"));
}

#[test]
fn malformed_command_lines() {
    let harness = scenario_harness();
    assert_eq!(harness.run_with_output(["stray"], &mut Vec::new()), 100);
    assert_eq!(harness.run_with_output(["--bogus"], &mut Vec::new()), 101);
    assert_eq!(harness.run_with_output(["-s"], &mut Vec::new()), 101);
    assert_eq!(harness.run_with_output(["-s", "1", "2"], &mut Vec::new()), 101);
    assert_eq!(harness.run_with_output(["-a", "x"], &mut Vec::new()), 101);
    assert_eq!(harness.run_with_output(["-t", "A", "-v"], &mut Vec::new()), 102);
}

#[test]
fn requested_tests_only() {
    let harness = scenario_harness();
    let (outcome, out) = execute(&harness, &["-t", "A", "C", "missing"]);
    let report = outcome.report().unwrap();
    assert_eq!(report.selected, 2);
    assert_eq!(report.registered, 3);
    assert_eq!(outcome.exit_code(), 0);
    assert!(!out.contains("'B'"));
    assert!(!out.contains("missing"));
}

#[test]
fn failed_assertion_stops_the_body() {
    let reached = Rc::new(Cell::new(false));
    let mut harness = Harness::new();
    let flag = reached.clone();
    harness.register_test("stops", move |ctx| {
        check_true!(ctx, false);
        flag.set(true);
        Ok(())
    });

    let (outcome, _) = execute(&harness, &[]);
    assert!(!reached.get());
    let result = outcome.report().unwrap().result("stops").unwrap();
    assert_eq!(result.status, TestStatus::Failed);
}

#[test]
fn continue_after_assert_counts_one_failure() {
    let mut harness = Harness::new();
    harness.register_test("two_failures", |ctx| {
        check_eq!(ctx, 1, 2);
        check_eq!(ctx, 3, 4);
        Ok(())
    });

    let (outcome, out) = execute(&harness, &["-a"]);
    let report = outcome.report().unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.results[0].messages.len(), 2);
    assert_eq!(out.matches("    Fail ").count(), 2);
}

#[test]
fn unexpected_error_does_not_stop_the_run() {
    let mut harness = Harness::new();
    harness.register_test("broken", |_| {
        let _: i32 = "nope".parse()?;
        Ok(())
    });
    harness.register_test("after", |_| Ok(()));

    let (outcome, out) = execute(&harness, &[]);
    let report = outcome.report().unwrap();
    assert_eq!(report.result("broken").unwrap().status, TestStatus::Errored);
    assert_eq!(report.result("after").unwrap().status, TestStatus::Passed);
    assert!(out.contains("    Exception: invalid digit found in string\n"));
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn passing_test_has_no_messages() {
    let mut harness = Harness::new();
    harness.register_test("clean", |ctx| {
        check_eq!(ctx, "x", "x");
        Ok(())
    });

    let (outcome, _) = execute(&harness, &[]);
    let result = &outcome.report().unwrap().results[0];
    assert_eq!(result.status, TestStatus::Passed);
    assert!(result.messages.is_empty());
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn duplicate_registration_keeps_first() {
    let mut harness = Harness::new();
    harness.register_test("same", |_| Ok(()));
    harness.register_test("same", |_| anyhow::bail!("replaced"));
    assert!(harness.try_register_test("same", |_| Ok(())).is_err());

    assert_eq!(harness.registry().names(), ["same"]);

    let (outcome, _) = execute(&harness, &[]);
    assert_eq!(outcome.report().unwrap().registered, 1);
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn registry_lists_tests_in_registration_order() {
    let harness = scenario_harness();
    assert_eq!(harness.registry().len(), 3);
    assert_eq!(harness.registry().names(), ["A", "B", "C"]);
    assert!(harness.registry().contains("B"));
    assert!(!harness.registry().contains("D"));
}

#[test]
fn colored_results() {
    let harness = scenario_harness().with_color();
    let (outcome, out) = execute(&harness, &[]);

    assert_eq!(outcome.exit_code(), 1);
    assert!(out.contains("  TEST 'A': \x1b[32mSUCCESS\x1b[0m\n"));
    assert!(out.contains("  TEST 'B': \x1b[31mFAIL\x1b[0m\n"));
    assert!(out.contains("#### FINISH ####\n"));
}

#[test]
fn test_bodies_see_continue_after_assert() {
    let mut harness = Harness::new();
    harness.register_test("mode", |ctx| {
        let continuing = ctx.continue_after_assert();
        check_true!(ctx, continuing);
        Ok(())
    });

    let (outcome, _) = execute(&harness, &["-a"]);
    assert_eq!(outcome.exit_code(), 0);

    let (outcome, out) = execute(&harness, &[]);
    assert_eq!(outcome.exit_code(), 1);
    assert!(out.contains("Fail continuing (expected: true) Line: "));
}

#[test]
fn empty_registry_succeeds() {
    let harness = Harness::new();
    let (outcome, out) = execute(&harness, &[]);
    assert_eq!(outcome.exit_code(), 0);
    assert!(out.ends_with("  Run: 0/0, Fail: 0, Pass: 0\n"));
}
