//! Verbosity-filtered output
//!
//! Renders harness events as text lines, dropping the kinds the run
//! configuration suppresses.

use std::io::{self, Write};

use crate::config::Verbosity;

const TAB_SIZE: usize = 2;

/// Outcome shown after a test name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "SUCCESS",
            Verdict::Fail => "FAIL",
        }
    }
}

/// Kinds of output the harness produces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Header,
    TestName,
    TestMessage,
    Result(Verdict),
    Report,
    Default,
}

/// Formats messages according to the active verbosity
#[derive(Clone, Copy, Debug, Default)]
pub struct Formatter {
    verbosity: Verbosity,
    colorize: bool,
}

impl Formatter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            colorize: false,
        }
    }

    /// Color PASS/FAIL results with ANSI escapes
    pub fn with_color(mut self) -> Self {
        self.colorize = true;
        self
    }

    /// Render a message, or `None` if its kind is suppressed.
    ///
    /// Test names are rendered without a line break so the result completes
    /// the same line.
    pub fn render(&self, kind: MessageKind, text: &str) -> Option<String> {
        let v = &self.verbosity;
        if v.hide_all {
            return None;
        }

        let rendered = match kind {
            MessageKind::Header if v.hide_header => return None,
            MessageKind::Header => format!("#### {text} ####\n"),
            MessageKind::TestName | MessageKind::Result(_) if v.hide_test_names => return None,
            MessageKind::TestName => format!("{}{text}", indent(1)),
            MessageKind::Result(verdict) => format!("{}\n", self.paint(verdict, text)),
            MessageKind::TestMessage if v.hide_test_messages => return None,
            MessageKind::TestMessage => format!("{}{text}\n", indent(2)),
            MessageKind::Report if v.hide_report => return None,
            MessageKind::Report => format!("{}{text}\n", indent(1)),
            MessageKind::Default => format!("{text}\n"),
        };

        Some(rendered)
    }

    fn paint(&self, verdict: Verdict, text: &str) -> String {
        if !self.colorize {
            return text.to_string();
        }
        match verdict {
            Verdict::Pass => format!("\x1b[32m{text}\x1b[0m"),
            Verdict::Fail => format!("\x1b[31m{text}\x1b[0m"),
        }
    }
}

fn indent(level: usize) -> String {
    " ".repeat(level * TAB_SIZE)
}

/// Writes formatted messages to a sink in call order
pub struct Printer<W: Write> {
    formatter: Formatter,
    sink: W,
}

impl<W: Write> Printer<W> {
    pub fn new(formatter: Formatter, sink: W) -> Self {
        Self { formatter, sink }
    }

    pub fn print(&mut self, kind: MessageKind, text: &str) -> io::Result<()> {
        if let Some(line) = self.formatter.render(kind, text) {
            self.sink.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    pub fn print_lines(&mut self, kind: MessageKind, lines: &[String]) -> io::Result<()> {
        for line in lines {
            self.print(kind, line)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
