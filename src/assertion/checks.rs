//! Assertion helpers
//!
//! Thin wrappers that stage a complete case and commit it. The `check_*!`
//! macros fill in the expression text and line number.

use super::context::{TestAborted, TestContext};

/// Largest difference accepted by [`TestContext::check_float`]
pub const FLOAT_TOLERANCE: f64 = 1e-6;

impl TestContext {
    /// Extra text for the next assertion
    pub fn note(&mut self, additional: impl Into<String>) -> &mut Self {
        let additional = additional.into();
        if !additional.is_empty() {
            self.stage_additional(additional);
        }
        self
    }

    pub fn check(&mut self, outcome: bool, expr: &str, line: u32) -> Result<(), TestAborted> {
        self.stage_message(expr)
            .stage_line(line)
            .stage_outcome(outcome)
            .commit()
            .into_result()
    }

    pub fn check_eq<A, B>(&mut self, a: A, b: B, expr: &str, line: u32) -> Result<(), TestAborted>
    where
        A: PartialEq<B>,
    {
        self.check(a == b, expr, line)
    }

    pub fn check_ne<A, B>(&mut self, a: A, b: B, expr: &str, line: u32) -> Result<(), TestAborted>
    where
        A: PartialEq<B>,
    {
        self.check(a != b, expr, line)
    }

    pub fn check_float(&mut self, a: f64, b: f64, expr: &str, line: u32) -> Result<(), TestAborted> {
        self.check((a - b).abs() <= FLOAT_TOLERANCE, expr, line)
    }

    pub fn check_true(&mut self, value: bool, expr: &str, line: u32) -> Result<(), TestAborted> {
        self.check_bool(value, true, expr, line)
    }

    pub fn check_false(&mut self, value: bool, expr: &str, line: u32) -> Result<(), TestAborted> {
        self.check_bool(value, false, expr, line)
    }

    fn check_bool(
        &mut self,
        value: bool,
        expected: bool,
        expr: &str,
        line: u32,
    ) -> Result<(), TestAborted> {
        self.stage_expected(expected.to_string());
        self.check(value == expected, expr, line)
    }

    /// Record a plain message.
    ///
    /// Only aborts if an outcome was staged earlier and left uncommitted.
    pub fn message(&mut self, text: impl Into<String>, line: u32) -> Result<(), TestAborted> {
        self.stage_message(text).stage_line(line).commit().into_result()
    }
}

/// Check a boolean expression
#[macro_export]
macro_rules! check {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.check($cond, stringify!($cond), line!())?
    };
    ($ctx:expr, $cond:expr, $($note:tt)+) => {
        $ctx.note(format!($($note)+)).check($cond, stringify!($cond), line!())?
    };
}

/// Check that two values are equal
#[macro_export]
macro_rules! check_eq {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $ctx.check_eq(&$a, &$b, concat!(stringify!($a), " == ", stringify!($b)), line!())?
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        $ctx.note(format!($($note)+))
            .check_eq(&$a, &$b, concat!(stringify!($a), " == ", stringify!($b)), line!())?
    };
}

/// Check that two values differ
#[macro_export]
macro_rules! check_ne {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $ctx.check_ne(&$a, &$b, concat!(stringify!($a), " != ", stringify!($b)), line!())?
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        $ctx.note(format!($($note)+))
            .check_ne(&$a, &$b, concat!(stringify!($a), " != ", stringify!($b)), line!())?
    };
}

/// Check that two floats are equal within [`FLOAT_TOLERANCE`](crate::assertion::FLOAT_TOLERANCE)
#[macro_export]
macro_rules! check_float {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $ctx.check_float(
            ($a) as f64,
            ($b) as f64,
            concat!(stringify!($a), " == ", stringify!($b)),
            line!(),
        )?
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        $ctx.note(format!($($note)+)).check_float(
            ($a) as f64,
            ($b) as f64,
            concat!(stringify!($a), " == ", stringify!($b)),
            line!(),
        )?
    };
}

/// Check that a value is true
#[macro_export]
macro_rules! check_true {
    ($ctx:expr, $value:expr $(,)?) => {
        $ctx.check_true($value, stringify!($value), line!())?
    };
    ($ctx:expr, $value:expr, $($note:tt)+) => {
        $ctx.note(format!($($note)+)).check_true($value, stringify!($value), line!())?
    };
}

/// Check that a value is false
#[macro_export]
macro_rules! check_false {
    ($ctx:expr, $value:expr $(,)?) => {
        $ctx.check_false($value, stringify!($value), line!())?
    };
    ($ctx:expr, $value:expr, $($note:tt)+) => {
        $ctx.note(format!($($note)+)).check_false($value, stringify!($value), line!())?
    };
}

/// Record a plain message
#[macro_export]
macro_rules! message {
    ($ctx:expr, $($text:tt)+) => {
        $ctx.message(format!($($text)+), line!())?
    };
}
