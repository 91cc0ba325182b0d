//! Argument tokenizer
//!
//! Groups raw argument tokens into keys and the values that follow them.

use crate::error::HarnessError;

/// Keys and their values, in order of first appearance
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    entries: Vec<(String, Vec<String>)>,
}

impl ParsedFlags {
    /// Tokenize arguments (without the program name).
    ///
    /// `-x` is a short key, `--xyz` a long key, anything else is a value for the
    /// most recent key. A repeated key collects its values into the first entry.
    pub fn parse<I, S>(tokens: I) -> Result<Self, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        let mut current: Option<usize> = None;

        for token in tokens {
            let token = token.as_ref();
            if let Some(key) = parse_key(token) {
                current = Some(flags.entry(key));
            } else {
                let index = current.ok_or_else(|| HarnessError::StrayValue(token.to_string()))?;
                flags.entries[index].1.push(token.to_string());
            }
        }

        Ok(flags)
    }

    /// Index of the entry for `key`, creating it if absent
    fn entry(&mut self, key: &str) -> usize {
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Key name if the token is a key
fn parse_key(token: &str) -> Option<&str> {
    if let Some(long) = token.strip_prefix("--") {
        return (!long.is_empty()).then_some(long);
    }

    let short = token.strip_prefix('-')?;
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' => Some(short),
        _ => None,
    }
}
