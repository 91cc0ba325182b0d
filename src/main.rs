//! TinyUnit demo runner
//!
//! Registers a small sample suite and runs it with the process arguments.
//!
//! ## Usage
//!
//! ```bash
//! # Run everything
//! tinyunit-demo
//!
//! # Run one test, keep going after failed assertions
//! tinyunit-demo --test failing_checks -a
//!
//! # Hide test messages and headers
//! tinyunit-demo -s 11
//! ```

use tinyunit::config::EnvConfig;
use tinyunit::utils::{init_logger, LogLevel};
use tinyunit::{check_eq, check_false, check_float, check_ne, check_true, message, Harness};

fn main() {
    let env = EnvConfig::load();
    let level = env.log_level_or("warn").parse().unwrap_or(LogLevel::Warn);
    init_logger(level);

    let mut harness = Harness::new();

    harness.register_test("failing_checks", |ctx| {
        let (a, b) = (5, 8);
        check_eq!(ctx, a, b);

        let (c, d) = (8, 8);
        check_ne!(ctx, c, d);

        let (e, f) = (7.0f32, 9.0f32);
        check_float!(ctx, e, f);

        let (g, h) = (true, false);
        check_false!(ctx, g);
        check_true!(ctx, h);
        Ok(())
    });

    harness.register_test("passing_checks", |ctx| {
        message!(ctx, "abcde");

        let (a, b) = (5, 5);
        check_eq!(ctx, a, b);

        let (c, d) = (8, 9);
        check_ne!(ctx, c, d);

        let (e, f) = (9.0f32, 9.0f32);
        check_float!(ctx, e, f);

        let (g, h) = (false, true);
        check_false!(ctx, g);
        check_true!(ctx, h);
        Ok(())
    });

    harness.register_test("parse_number", |ctx| {
        let parsed: i32 = "42".parse()?;
        check_eq!(ctx, parsed, 42, "parsed from a literal");

        let broken: i32 = "forty-two".parse()?;
        check_eq!(ctx, broken, 42);
        Ok(())
    });

    harness.register_test("index_out_of_range", |ctx| {
        let values = vec![1, 2, 3];
        check_eq!(ctx, values.len(), 3);
        check_eq!(ctx, values[values.len()], 3);
        Ok(())
    });

    std::process::exit(harness.run_with_env(std::env::args().skip(1)));
}
