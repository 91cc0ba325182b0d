//! Environment variable configuration
//!
//! Provides environment variable overrides for harness defaults.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "TINYUNIT";

/// Configuration read from `TINYUNIT_*` environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Silent level from TINYUNIT_SILENT
    pub silent_level: Option<i64>,
    /// Continue after failed assertion from TINYUNIT_CONTINUE_AFTER_ASSERT
    pub continue_after_assert: Option<bool>,
    /// Config file from TINYUNIT_CONFIG
    pub config_file: Option<String>,
    /// Log level from TINYUNIT_LOG
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            silent_level: get_env_parse("SILENT"),
            continue_after_assert: get_env_bool("CONTINUE_AFTER_ASSERT"),
            config_file: get_env("CONFIG"),
            log_level: get_env("LOG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.silent_level.is_some()
            || self.continue_after_assert.is_some()
            || self.config_file.is_some()
            || self.log_level.is_some()
    }

    /// Get log level with fallback
    pub fn log_level_or(&self, default: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.trim().parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn silent_level(mut self, level: i64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_SILENT"), level.to_string()));
        self
    }

    pub fn continue_after_assert(mut self, enabled: bool) -> Self {
        self.vars.push((
            format!("{ENV_PREFIX}_CONTINUE_AFTER_ASSERT"),
            enabled.to_string(),
        ));
        self
    }

    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_CONFIG"), path.into()));
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_LOG"), level.into()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}
