//! Static HTML publishing of the session tree.
//!
//! The session root is walked `year → month → day → session file`; each
//! directory gets an index page and each session file gets a report page, all
//! written into a single `report_<stamp>` directory.

pub mod breadcrumb;
pub mod build;
pub mod html;
pub mod index_html;
pub mod level;
pub mod report_html;

pub use breadcrumb::BreadCrumb;
pub use build::{PublishSummary, ReportPublisher, index_file_name, report_file_name};
pub use html::html_escape;
pub use index_html::{IndexLink, render_index_html};
pub use level::DirectoryLevel;
pub use report_html::render_session_report_html;
