//! Command-line interpreter
//!
//! Two stages: [`ParsedFlags::parse`] groups tokens under keys, then
//! [`configure`] applies the known keys to a [`RunConfiguration`](crate::config::RunConfiguration).

mod configure;
mod parser;
pub mod usage;

pub use configure::{configure, configure_with, Action};
pub use parser::ParsedFlags;
