//! Timestamps and the session-file naming scheme.
//!
//! Session files live at `<root>/<YYYY>/<MM>/<DD>/testing_session_<stamp>.xml`
//! and report directories are named `report_<stamp>`, where `<stamp>` is the
//! sortable `YYYY-MM-DD_HH-MM-SS` form produced by [`build_timestamp`].

use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;

use crate::{SessionError, SessionResult};

pub const SESSION_FILE_PREFIX: &str = "testing_session_";
pub const SESSION_FILE_EXTENSION: &str = ".xml";
pub const REPORT_DIR_PREFIX: &str = "report_";

/// Current wall-clock time in the local offset, or UTC when the local offset
/// cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Zero-padded, lexically sortable timestamp used in file and directory names.
pub fn build_timestamp(at: OffsetDateTime) -> SessionResult<String> {
    at.format(format_description!(
        "[year]-[month]-[day]_[hour]-[minute]-[second]"
    ))
    .map_err(|e| SessionError::Message(format!("failed to format timestamp: {e}")))
}

/// Human-readable form written into a session's start and end fields.
pub fn display_time(at: OffsetDateTime) -> SessionResult<String> {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .map_err(|e| SessionError::Message(format!("failed to format time: {e}")))
}

/// `<root>/<YYYY>/<MM>/<DD>` for the day `at` falls on.
pub fn day_directory(root: &Path, at: OffsetDateTime) -> PathBuf {
    root.join(format!("{:04}", at.year()))
        .join(format!("{:02}", u8::from(at.month())))
        .join(format!("{:02}", at.day()))
}

/// Full path of the session file created at `at`.
pub fn session_file_path(root: &Path, at: OffsetDateTime) -> SessionResult<PathBuf> {
    let name = format!(
        "{SESSION_FILE_PREFIX}{}{SESSION_FILE_EXTENSION}",
        build_timestamp(at)?
    );
    Ok(day_directory(root, at).join(name))
}

/// Name of the directory a publish run writes into.
pub fn report_dir_name(at: OffsetDateTime) -> SessionResult<String> {
    Ok(format!("{REPORT_DIR_PREFIX}{}", build_timestamp(at)?))
}
