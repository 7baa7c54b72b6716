//! Text safety helpers for rendering user input into email bodies.
//!
//! Every user-supplied string passes through [`escape_html`] before it is
//! interpolated into an HTML template, so a submission can never open a
//! tag, close an attribute or break out of an entity.

/// Escape the HTML-significant characters `&`, `<`, `>` and `"`.
///
/// `&` is replaced first by construction (single pass), so already-escaped
/// input is escaped again rather than passed through.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
///
/// Counts Unicode scalar values, never splitting a multi-byte character.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &input[..byte_idx]),
        None => input.to_string(),
    }
}

/// Collapse a value onto a single line for use in a mail header.
pub fn single_line(input: &str) -> String {
    input
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_html("Jane Doe"), "Jane Doe");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_all_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_script_injection() {
        let out = escape_html("<script>alert(1)</script>");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert_eq!(out, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn test_escape_existing_entity_is_escaped_again() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_preserves_unicode() {
        assert_eq!(escape_html("caf\u{e9} <3"), "caf\u{e9} &lt;3");
    }

    #[test]
    fn test_truncate_short_input_untouched() {
        assert_eq!(truncate_chars("hello", 200), "hello");
    }

    #[test]
    fn test_truncate_exact_length_untouched() {
        let s = "a".repeat(200);
        assert_eq!(truncate_chars(&s, 200), s);
    }

    #[test]
    fn test_truncate_long_input_gets_ellipsis() {
        let s = "a".repeat(201);
        let out = truncate_chars(&s, 200);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        let s = "\u{e9}".repeat(5);
        assert_eq!(truncate_chars(&s, 3), "\u{e9}\u{e9}\u{e9}...");
    }

    #[test]
    fn test_single_line_strips_newlines() {
        assert_eq!(single_line("Acme\r\nBcc: evil@x.com"), "Acme Bcc: evil@x.com");
        assert_eq!(single_line("  Web design  "), "Web design");
    }
}
