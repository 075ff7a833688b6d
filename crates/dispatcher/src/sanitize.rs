//! Instruction sanitization
//!
//! Multiplexer key-sends and simulated typing both treat a newline as Enter,
//! so instructions are flattened to a single line first.

/// Collapse every whitespace run into one space and trim both ends
///
/// Idempotent: `sanitize(&sanitize(s)) == sanitize(s)`.
pub fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the full command line: `{prefix} {sanitized}`
///
/// With nothing left after sanitizing, the prefix is returned alone.
pub fn build_command(prefix: &str, instructions: &str) -> String {
    let prefix = prefix.trim();
    let body = sanitize(instructions);
    if body.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix} {body}")
    }
}
