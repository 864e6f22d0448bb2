/// Escapes text for use in element content and double-quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wraps `inner` in a titled content panel.
pub(crate) fn panel(class: &str, heading: &str, inner: &str) -> String {
    format!(
        "<section class=\"panel {class}\">\n<h2>{heading}</h2>\n{inner}</section>\n",
        heading = escape(heading),
    )
}
