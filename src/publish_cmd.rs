//! CLI command handler for `publish`.

use std::path::PathBuf;

use crate::config::Preferences;
use crate::publisher::{PublishSummary, ReportPublisher};
use crate::storage::SessionStore;
use crate::{SessionError, SessionResult};

/// Publish every stored session into `output`, or into the configured web
/// report path when `output` is not given.
pub fn run(prefs: &Preferences, output: Option<PathBuf>) -> SessionResult<PublishSummary> {
    let output = output
        .or_else(|| prefs.web_report_path.clone())
        .ok_or_else(|| {
            SessionError::Message(
                "no report directory given and none configured (run `config set --web-report-path`)".into(),
            )
        })?;

    let publisher = ReportPublisher::new(SessionStore::new(&prefs.session_root));
    let summary = publisher.publish(&output)?;

    eprintln!(
        "Wrote {} index page(s) and {} session report(s)",
        summary.index_pages, summary.session_reports
    );
    eprintln!("Web report generated in: {}", summary.report_dir.display());
    Ok(summary)
}
