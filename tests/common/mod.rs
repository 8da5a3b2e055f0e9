#![allow(dead_code)]

use phpinpoint::CompletionContext;

/// Parse a fixture that is expected to produce a context.
pub fn parse_ok(code: &str) -> CompletionContext {
    phpinpoint::parse(code).unwrap_or_else(|| panic!("expected a completion context for:\n{}", code))
}
