//! Known-key interpretation
//!
//! Turns parsed flags into a run configuration and the action to take.

use crate::config::{RunConfiguration, Verbosity};
use crate::error::HarnessError;

use super::parser::ParsedFlags;

/// What the harness should do after configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ShowHelp,
    ShowVersion,
    RunTests,
}

/// Interpret flags on top of an empty configuration
pub fn configure(flags: &ParsedFlags) -> Result<(RunConfiguration, Action), HarnessError> {
    configure_with(flags, RunConfiguration::default())
}

/// Interpret flags on top of `base` (file/env defaults).
///
/// Keys are processed in order of first appearance, so the first malformed key
/// is the one reported. `--silent` replaces the base verbosity and the first
/// `--test` replaces the base test list.
pub fn configure_with(
    flags: &ParsedFlags,
    base: RunConfiguration,
) -> Result<(RunConfiguration, Action), HarnessError> {
    let mut config = base;
    let mut tests_from_cli = false;

    for (key, values) in flags.iter() {
        match key {
            "h" | "help" | "v" | "version" => {
                if flags.len() > 1 {
                    return Err(HarnessError::ForbiddenCombination(key.to_string()));
                }
                expect_no_values(key, values)?;
                let action = if key.starts_with('h') {
                    Action::ShowHelp
                } else {
                    Action::ShowVersion
                };
                return Ok((config, action));
            }
            "t" | "test" => {
                if !tests_from_cli {
                    config.tests.clear();
                    tests_from_cli = true;
                }
                config.tests.extend(values.iter().cloned());
            }
            "s" | "silent" => {
                let value = match values {
                    [value] => value,
                    _ => {
                        return Err(HarnessError::WrongArity {
                            key: key.to_string(),
                            expected: "needs exactly one value",
                        })
                    }
                };
                let level: i64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| HarnessError::InvalidValue {
                            key: key.to_string(),
                            value: value.clone(),
                        })?;
                config.verbosity = Verbosity::from_silent_level(level);
            }
            "a" | "continue_after_assert" => {
                expect_no_values(key, values)?;
                config.continue_after_assert = true;
            }
            _ => return Err(HarnessError::UnknownKey(key.to_string())),
        }
    }

    Ok((config, Action::RunTests))
}

fn expect_no_values(key: &str, values: &[String]) -> Result<(), HarnessError> {
    if values.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::WrongArity {
            key: key.to_string(),
            expected: "doesn't have any value",
        })
    }
}
