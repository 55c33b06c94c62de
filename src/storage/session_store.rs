//! File-system persistence for sessions.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::core::timestamp::session_file_path;
use crate::core::Session;
use crate::storage::xml::{from_xml, to_xml};
use crate::{SessionError, SessionResult};

/// Write `session` to a new file at `target`, creating missing parent
/// directories. An existing file is never replaced.
///
/// Returns the path written so callers can chain on it.
///
/// # Errors
/// - `SessionError::Io` if `target` already exists (`ErrorKind::AlreadyExists`),
///   or a directory or the file cannot be created or written
/// - `SessionError::Serialize` if the document cannot be produced
pub fn save(target: &Path, session: &Session) -> SessionResult<PathBuf> {
    let xml = to_xml(session)?;

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SessionError::io(parent, e))?;
        }
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|e| SessionError::io(target, e))?;
    file.write_all(xml.as_bytes())
        .map_err(|e| SessionError::io(target, e))?;
    debug!(path = %target.display(), "wrote session file");
    Ok(target.to_path_buf())
}

/// Read a session back from `source`.
///
/// # Errors
/// - `SessionError::Io` if the file cannot be opened or read
/// - `SessionError::Parse` if it is not UTF-8 or not well-formed XML
pub fn load(source: &Path) -> SessionResult<Session> {
    let bytes = fs::read(source).map_err(|e| SessionError::io(source, e))?;
    let xml = String::from_utf8(bytes)
        .map_err(|e| SessionError::parse(source, format!("not valid UTF-8: {e}")))?;
    from_xml(&xml, source)
}

/// The directory tree sessions are filed under, one file per session at
/// `<root>/<YYYY>/<MM>/<DD>/testing_session_<stamp>.xml`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        SessionStore {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the session created at `created` is filed under.
    pub fn file_for(&self, created: OffsetDateTime) -> SessionResult<PathBuf> {
        session_file_path(&self.root, created)
    }

    /// File `session` under the path derived from `created`.
    ///
    /// Stamps have one-second resolution; a second session filed in the same
    /// second fails with `SessionError::Io` and leaves the first untouched.
    pub fn save_new(&self, session: &Session, created: OffsetDateTime) -> SessionResult<PathBuf> {
        let path = self.file_for(created)?;
        let path = save(&path, session)?;
        info!(path = %path.display(), "session saved");
        Ok(path)
    }

    pub fn load(&self, source: &Path) -> SessionResult<Session> {
        load(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b").join("session.xml");
        let written = save(&target, &Session::default()).unwrap();
        assert_eq!(written, target);
        assert!(target.is_file());
    }

    #[test]
    fn test_save_new_files_by_day() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let session = Session::new().with_charter("ann", "explore login");
        let path = store
            .save_new(&session, datetime!(2024-06-15 14:25:30 UTC))
            .unwrap();

        let relative = path.strip_prefix(dir.path()).unwrap();
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        assert_eq!(parts[..3], ["2024", "06", "15"]);
        assert!(parts[3].starts_with("testing_session_"));
        assert!(parts[3].ends_with(".xml"));

        assert_eq!(store.load(&path).unwrap(), session);
    }

    #[test]
    fn test_save_new_in_same_second_keeps_first_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let created = datetime!(2024-06-15 14:25:30 UTC);
        let first = Session::new().with_charter("ann", "explore login");
        let second = Session::new().with_charter("bob", "explore logout");

        let path = store.save_new(&first, created).unwrap();
        let err = store.save_new(&second, created).unwrap_err();

        match err {
            SessionError::Io { path: clash, source } => {
                assert_eq!(clash, path);
                assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists);
            }
            other => panic!("expected io failure, got {other:?}"),
        }
        assert_eq!(store.load(&path).unwrap().tester, "ann");
    }

    #[test]
    fn test_load_missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }

    #[test]
    fn test_load_non_utf8_is_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.xml");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x3c]).unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SessionError::Parse { .. }));
    }

    #[test]
    fn test_save_into_file_path_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let err = save(&blocker.join("session.xml"), &Session::default()).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }
}
