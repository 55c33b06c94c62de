//! Per-session report page.

use crate::core::{Session, SessionField};

use super::html::{html_escape, page_href, render_page};

/// Render one session as a static page.
///
/// Fields appear in [`SessionField::REPORT_ORDER`], each as a heading over a
/// preformatted block so line breaks in free text stay visible. Empty fields
/// are still listed. `back_href`, when given, links to the index that lists
/// this session.
pub fn render_session_report_html(file_name: &str, session: &Session, back_href: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(href) = back_href {
        body.push_str(&format!(
            "<div class=\"nav\"><a href=\"{}\">&larr; Back to index</a></div>\n",
            page_href(href)
        ));
    }

    body.push_str(&format!("<h1>Testing Session - {}</h1>\n", html_escape(file_name)));

    for field in SessionField::REPORT_ORDER {
        body.push_str(&format!(
            "<h2>{}</h2>\n<pre>{}</pre>\n",
            field.heading(),
            html_escape(session.get(field))
        ));
    }

    render_page(file_name, &body)
}
