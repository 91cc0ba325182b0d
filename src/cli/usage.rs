//! Help, version and error text

/// Program name printed in version and error output
pub const PROG_NAME: &str = "TinyUnit";

/// Usage lines for `--help`
pub fn help_lines() -> Vec<String> {
    [
        "-a --continue_after_assert  Continue to run test after fail assert.",
        "-h --help                   Show this help.",
        "-s --silent [level]         Hide some messages during tests execute.",
        "                              level:",
        "                              0: Show all messages.",
        "                              1: Hide test messages.",
        "                              2: Hide test messages and test results.",
        "                              +10: Hide headers.",
        "                              +100: Hide report.",
        "                              1000: Hide all messages.",
        "                              Example: 11 - hide test messages and headers.",
        "-t --test [test_name...]    Execute tests with specified names.",
        "-v --version                Show version.",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

/// Name/version, copyright and project URL for `--version`
pub fn version_lines() -> Vec<String> {
    vec![
        format!("{} v{}", PROG_NAME, env!("CARGO_PKG_VERSION")),
        format!(
            "Copyright (c) 2024: {}, {} license.",
            env!("CARGO_PKG_AUTHORS"),
            env!("CARGO_PKG_LICENSE")
        ),
        env!("CARGO_PKG_REPOSITORY").to_string(),
    ]
}

/// Program name followed by the error message
pub fn error_lines(error: &impl std::fmt::Display) -> Vec<String> {
    vec![PROG_NAME.to_string(), error.to_string()]
}
