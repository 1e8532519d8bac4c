/// Expands control characters and quotes the result.
///
/// `quote("a\tb")` is `"a\\tb"` surrounded by double quotes. Used for
/// listings and dumps so an operand's whitespace stays visible.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{0b}' => out.push_str("\\v"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{08}' => out.push_str("\\b"),
            '\u{07}' => out.push_str("\\a"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Reverses `quote` on the body of a string literal (without the quotes).
/// Returns `None` on an unknown escape or a trailing backslash.
pub fn unquote(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        out.push(match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'v' => '\u{0b}',
            'f' => '\u{0c}',
            'b' => '\u{08}',
            'a' => '\u{07}',
            '\\' => '\\',
            '"' => '"',
            _ => return None,
        });
    }
    Some(out)
}
