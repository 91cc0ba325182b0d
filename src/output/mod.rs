//! Output formatting module
//!
//! Verbosity-aware rendering of headers, test names, results and reports.

mod formatter;

pub use formatter::{Formatter, MessageKind, Printer, Verdict};
