//! Shared pieces of the published HTML pages.
//!
//! Every page is a complete static document with embedded CSS and no
//! JavaScript. All user-controlled strings are HTML-escaped.

/// Heading at the top of every published page.
pub const REPORT_TITLE: &str = "Session Tester Report";

const STYLE: &str = r#"<style>
* { box-sizing: border-box; }
body {
  font-family: system-ui, -apple-system, sans-serif;
  background: #fafafa;
  color: #222;
  margin: 0;
  padding: 24px;
}
h1 { font-size: 1.5rem; margin: 0 0 12px 0; }
h2 { font-size: 1.125rem; margin: 24px 0 8px 0; color: #444; }
.trail { color: #666; font-size: 0.875rem; margin-bottom: 16px; }
.nav { font-size: 0.875rem; margin-bottom: 16px; }
ul.entries { list-style: none; padding: 0; }
ul.entries li { padding: 4px 0; }
pre {
  background: #fff;
  border: 1px solid #ddd;
  border-radius: 4px;
  padding: 8px 12px;
  margin: 0;
  white-space: pre-wrap;
  font-family: ui-monospace, monospace;
  font-size: 0.875rem;
}
a { color: #0b6bcb; text-decoration: none; }
a:hover { text-decoration: underline; }
</style>"#;

/// HTML-escape a string for safe insertion into HTML content or attributes.
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Attribute value for a link to another page in the same report directory.
///
/// Page names come from directory and file names, so they are percent-encoded
/// before escaping; `#`, `?` and `%` would otherwise change what the link means.
pub fn page_href(page: &str) -> String {
    html_escape(&urlencoding::encode(page))
}

/// Wrap already-rendered body markup in a full document.
pub(crate) fn render_page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str(STYLE);
    html.push_str("\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{REPORT_TITLE}</h1>\n"));
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}
