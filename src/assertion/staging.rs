//! Staged assertion data
//!
//! A [`CaseState`] collects the pieces of one assertion (or one plain message)
//! before it is committed.

/// Fields staged for the assertion in flight
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseState {
    pub line: Option<u32>,
    pub message: Option<String>,
    pub additional: Option<String>,
    pub expected: Option<String>,
    pub outcome: Option<bool>,
}

impl CaseState {
    /// Whether the staged outcome is a failure
    pub fn is_failure(&self) -> bool {
        self.outcome == Some(false)
    }

    /// Display line for this case, if it produces one.
    ///
    /// Successful assertions and empty plain messages produce nothing.
    pub fn render(&self) -> Option<String> {
        let message = non_empty(&self.message);
        let additional = non_empty(&self.additional);

        let mut text = match self.outcome {
            None => {
                let body = match (message, additional) {
                    (Some(m), Some(a)) => format!("{m} {a}"),
                    (Some(m), None) => m.to_string(),
                    (None, Some(a)) => a.to_string(),
                    (None, None) => return None,
                };
                format!("Message: {body}")
            }
            Some(true) => return None,
            Some(false) => {
                let mut text = String::from("Fail");
                if let Some(m) = message {
                    text.push(' ');
                    text.push_str(m);
                }
                if let Some(expected) = non_empty(&self.expected) {
                    text.push_str(&format!(" (expected: {expected})"));
                }
                if let Some(a) = additional {
                    text.push_str(&format!(": {a}"));
                }
                text
            }
        };

        if let Some(line) = self.line {
            text.push_str(&format!(" Line: {line}"));
        }

        Some(text)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
