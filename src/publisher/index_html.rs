//! Index pages for the year/month/day layers of a published report.

use super::breadcrumb::BreadCrumb;
use super::html::{REPORT_TITLE, html_escape, page_href, render_page};
use super::level::DirectoryLevel;

/// One entry on an index page: the raw child name and the page it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLink {
    pub name: String,
    pub href: String,
}

/// Render the index for one directory of the session tree.
///
/// `listing` is the level of the entries being linked (the level below the
/// directory itself) and names the page heading.
pub fn render_index_html(
    trail: &BreadCrumb,
    listing: DirectoryLevel,
    up_href: Option<&str>,
    links: &[IndexLink],
) -> String {
    let mut body = String::new();

    if let Some(href) = up_href {
        body.push_str(&format!(
            "<div class=\"nav\"><a href=\"{}\">&uarr; Up</a></div>\n",
            page_href(href)
        ));
    }

    body.push_str(&format!(
        "<p class=\"trail\">{}</p>\n",
        html_escape(&trail.trail_description())
    ));
    body.push_str(&format!("<h2>{}</h2>\n", listing.heading()));

    if links.is_empty() {
        body.push_str("<p>No entries.</p>\n");
    } else {
        body.push_str("<ul class=\"entries\">\n");
        for link in links {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                page_href(&link.href),
                html_escape(&link.name)
            ));
        }
        body.push_str("</ul>\n");
    }

    let title = if trail.is_empty() {
        REPORT_TITLE.to_string()
    } else {
        format!("Sessions {}", trail.segments().collect::<Vec<_>>().join("-"))
    };

    render_page(&title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(name: &str, href: &str) -> IndexLink {
        IndexLink {
            name: name.to_string(),
            href: href.to_string(),
        }
    }

    #[test]
    fn test_root_index() {
        let html = render_index_html(
            &BreadCrumb::new(),
            DirectoryLevel::Year,
            None,
            &[link("2023", "index_2023.html"), link("2024", "index_2024.html")],
        );
        assert!(html.contains("<title>Session Tester Report</title>"));
        assert!(html.contains("<p class=\"trail\">All sessions</p>"));
        assert!(html.contains("<h2>Year</h2>"));
        assert!(html.contains("<a href=\"index_2023.html\">2023</a>"));
        assert!(html.find("2023</a>").unwrap() < html.find("2024</a>").unwrap());
        assert!(!html.contains("Up</a>"));
    }

    #[test]
    fn test_day_index_links_reports() {
        let trail = BreadCrumb::new().add("2024").add("06").add("15");
        let html = render_index_html(
            &trail,
            DirectoryLevel::Files,
            Some("index_2024_06.html"),
            &[link("testing_session_a.xml", "testing_session_a.html")],
        );
        assert!(html.contains("<title>Sessions 2024-06-15</title>"));
        assert!(html.contains("All sessions / 2024 / 06 / 15"));
        assert!(html.contains("<h2>Testing Sessions</h2>"));
        assert!(html.contains("<a href=\"testing_session_a.html\">testing_session_a.xml</a>"));
        assert!(html.contains("<a href=\"index_2024_06.html\">"));
    }

    #[test]
    fn test_empty_directory() {
        let html = render_index_html(&BreadCrumb::new(), DirectoryLevel::Year, None, &[]);
        assert!(html.contains("No entries."));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_index_html(
            &BreadCrumb::new().add("<b>"),
            DirectoryLevel::Month,
            None,
            &[link("a&b", "index_x.html")],
        );
        assert!(html.contains("All sessions / &lt;b&gt;"));
        assert!(html.contains(">a&amp;b</a>"));
    }
}
