//! Escaping for the two places untrusted text meets the engine: placeholder
//! names spliced into patterns, and field values spliced into markup.

/// Escapes a literal placeholder name so it can be embedded in a pattern and
/// match only itself.
///
/// Covers `. * + ? ^ $ { } ( ) | [ ] \` plus the remaining characters the
/// regex syntax treats as meta (`# & - ~`). Total over all strings.
pub fn escape_token(name: &str) -> String {
    regex::escape(name)
}

/// Escapes a field value for insertion into HTML text or attribute context.
///
/// Braces are encoded as character references too: a value can never produce
/// a placeholder-shaped token, so later passes cannot substitute into it or
/// delete it.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            c => out.push(c),
        }
    }
    out
}
