//! Literal formatting shared by the C-family targets.

/// Escape `s` for a double-quoted literal using C-style escapes.
///
/// The escapes produced (`\\`, `\"`, `\n`, `\r`, `\t`, `\uXXXX`) mean the
/// same thing in C#, Go and Python.
pub fn escape_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// `"…"` with [`escape_double_quoted`] applied.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", escape_double_quoted(s))
}

/// Whether a string value spans more than one line.
pub fn is_multiline(s: &str) -> bool {
    s.contains('\n')
}

/// Format a number without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
