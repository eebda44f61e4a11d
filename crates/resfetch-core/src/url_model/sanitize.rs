//! Filename sanitization for saving resources on Linux.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

fn is_separator(c: char) -> bool {
    matches!(c, '\0' | '/' | '\\' | ' ' | '\t') || c.is_control()
}

/// Makes `name` usable as a single Linux path component.
///
/// Separators, whitespace and control characters become `_` (runs collapse
/// to one). Leading and trailing dots, spaces and underscores are dropped, and
/// the result is cut to `NAME_MAX` bytes on a char boundary.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if is_separator(c) || c == '_' {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut take = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
