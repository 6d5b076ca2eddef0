//! The response service formats replies as HTML fragments (`<br>` line
//! breaks, `<b>` field labels). They are flattened to plain text before
//! reveal so the transcript never renders untrusted markup.

/// Flatten the service's HTML fragments into plain text.
///
/// `<br>` becomes a newline, bold/italic tags are stripped, and anything
/// else (including unrecognized tags and stray `<`) is kept literally.
pub fn flatten_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('>') {
            Some(end) => {
                let name = tail[1..end]
                    .trim_start_matches('/')
                    .trim_end_matches('/')
                    .trim()
                    .to_ascii_lowercase();
                match name.as_str() {
                    "br" => out.push('\n'),
                    "b" | "i" | "strong" | "em" => {}
                    _ => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            }
            None => {
                // Unterminated tag, keep it literal.
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
