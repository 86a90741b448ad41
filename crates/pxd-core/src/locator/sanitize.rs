//! Stored-name sanitization.

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
///
/// The mapping is per character, so the output has the same number of
/// characters as the input and sanitizing twice yields the same result.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
