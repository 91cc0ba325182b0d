//! Configuration module
//!
//! Run configuration, silent level decoding and optional file/env defaults.

mod env;

pub use env::{EnvBuilder, EnvConfig, EnvGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Output suppressors decoded from a silent level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verbosity {
    pub hide_all: bool,
    pub hide_header: bool,
    pub hide_report: bool,
    pub hide_test_messages: bool,
    pub hide_test_names: bool,
}

impl Verbosity {
    /// Decode a silent level digit by digit.
    ///
    /// `1000` hides everything. Otherwise a hundreds digit of `1` hides the report,
    /// a tens digit of `1` hides headers, a units digit of `1` hides test messages
    /// and `2` hides test messages and test names. Other digits are ignored.
    pub fn from_silent_level(level: i64) -> Self {
        let mut verbosity = Self::default();
        verbosity.apply_silent_level(level);
        verbosity
    }

    /// Set the suppressors named by `level`, keeping those already set
    pub fn apply_silent_level(&mut self, level: i64) {
        if level == 1000 {
            self.hide_all = true;
            return;
        }

        let mut rest = level;
        if rest / 100 == 1 {
            self.hide_report = true;
        }
        rest %= 100;

        if rest / 10 == 1 {
            self.hide_header = true;
        }
        rest %= 10;

        match rest {
            1 => self.hide_test_messages = true,
            2 => {
                self.hide_test_messages = true;
                self.hide_test_names = true;
            }
            _ => {}
        }
    }

    /// Encode back into a silent level.
    ///
    /// Returns `None` for combinations no level can express (names hidden
    /// while test messages are shown).
    pub fn silent_level(&self) -> Option<i64> {
        if self.hide_all {
            return Some(1000);
        }

        let units = match (self.hide_test_messages, self.hide_test_names) {
            (false, false) => 0,
            (true, false) => 1,
            (true, true) => 2,
            (false, true) => return None,
        };
        let tens = if self.hide_header { 10 } else { 0 };
        let hundreds = if self.hide_report { 100 } else { 0 };

        Some(hundreds + tens + units)
    }
}

/// Immutable run configuration built from the command line
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfiguration {
    pub verbosity: Verbosity,
    pub continue_after_assert: bool,
    /// Requested test names; empty means run all
    pub tests: BTreeSet<String>,
}

impl RunConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_silent_level(mut self, level: i64) -> Self {
        self.verbosity.apply_silent_level(level);
        self
    }

    pub fn with_continue_after_assert(mut self, enabled: bool) -> Self {
        self.continue_after_assert = enabled;
        self
    }

    pub fn with_test(mut self, name: impl Into<String>) -> Self {
        self.tests.insert(name.into());
        self
    }

    /// Whether the named test is selected by this configuration
    pub fn selects(&self, name: &str) -> bool {
        self.tests.is_empty() || self.tests.contains(name)
    }

    /// Base configuration from file and environment defaults.
    ///
    /// Command-line flags are applied on top of this.
    pub fn from_defaults(defaults: &HarnessDefaults) -> Self {
        Self {
            verbosity: defaults
                .silent_level
                .map(Verbosity::from_silent_level)
                .unwrap_or_default(),
            continue_after_assert: defaults.continue_after_assert.unwrap_or(false),
            tests: defaults.tests.iter().cloned().collect(),
        }
    }
}

/// Defaults read from a config file or the environment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessDefaults {
    /// Silent level applied before command-line flags
    pub silent_level: Option<i64>,

    /// Keep running a test after a failed assertion
    pub continue_after_assert: Option<bool>,

    /// Tests to run when none are requested on the command line
    pub tests: Vec<String>,
}

impl HarnessDefaults {
    /// Load defaults from a JSON or YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let defaults: Self = if is_yaml(path) {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(defaults)
    }

    /// Save defaults to a JSON or YAML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Overlay environment values on top of these defaults
    pub fn merge_env(mut self, env: &EnvConfig) -> Self {
        if env.silent_level.is_some() {
            self.silent_level = env.silent_level;
        }
        if env.continue_after_assert.is_some() {
            self.continue_after_assert = env.continue_after_assert;
        }
        self
    }

    /// Resolve defaults from the environment, reading the config file it points to
    pub fn from_env(env: &EnvConfig) -> Result<Self> {
        let base = match &env.config_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.merge_env(env))
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
