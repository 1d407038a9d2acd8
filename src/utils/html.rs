//! HTML page helpers for the view layer.

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap a body fragment in a complete page. `title` is escaped, `body` is not.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 4px 10px; text-align: left; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/currencies\">Price changes</a></nav>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("Bitcoin"), "Bitcoin");
    }

    #[test]
    fn test_page_escapes_title_only() {
        let html = page("<x>", "<p>ok</p>");
        assert!(html.contains("<title>&lt;x&gt;</title>"));
        assert!(html.contains("<p>ok</p>"));
    }
}
