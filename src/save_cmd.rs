//! CLI command handler for `save`.
//!
//! Builds a session that ends now and files it under the session root.

use std::path::PathBuf;

use time::{Duration, OffsetDateTime};

use crate::config::Preferences;
use crate::core::{EnvironmentInfo, Session, SessionField};
use crate::storage::SessionStore;
use crate::{SessionError, SessionResult};

/// Field values collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub tester: Option<String>,
    pub mission: String,
    /// How long the session ran, in minutes.
    pub minutes: u32,
    pub tasks: Vec<String>,
    pub data: Vec<String>,
    pub notes: Vec<String>,
    pub issues: Vec<String>,
    pub bugs: Vec<String>,
    pub environment: Vec<String>,
    pub area: Vec<String>,
    /// Append a summary of this host to the Environment field.
    pub detect_environment: bool,
}

/// Assemble the session record for a run that ended at `ended`.
///
/// The tester falls back to the configured name; tester and mission must not
/// be blank.
pub fn build_session(opts: &SaveOptions, default_tester: &str, ended: OffsetDateTime) -> SessionResult<(Session, OffsetDateTime)> {
    let tester = opts.tester.as_deref().unwrap_or(default_tester);
    if tester.trim().is_empty() {
        return Err(SessionError::Message(
            "a tester name is required (pass --tester or run `config set --tester-name`)".into(),
        ));
    }
    if opts.mission.trim().is_empty() {
        return Err(SessionError::Message("a mission is required".into()));
    }

    let started = ended - Duration::minutes(i64::from(opts.minutes));
    let mut session = Session::new().with_charter(tester, &opts.mission);
    session.stamp_times(started, ended)?;

    let lines = [
        (SessionField::Tasks, &opts.tasks),
        (SessionField::Data, &opts.data),
        (SessionField::Notes, &opts.notes),
        (SessionField::Issues, &opts.issues),
        (SessionField::Bugs, &opts.bugs),
        (SessionField::Environment, &opts.environment),
        (SessionField::Area, &opts.area),
    ];
    for (field, values) in lines {
        for value in values {
            session.append(field, value);
        }
    }

    if opts.detect_environment {
        session.append(SessionField::Environment, &EnvironmentInfo::detect().summary());
    }

    Ok((session, started))
}

/// Run the `save` command and return the file written.
///
/// The file is named after the moment the session started.
pub fn run(prefs: &Preferences, opts: SaveOptions) -> SessionResult<PathBuf> {
    let ended = crate::core::timestamp::now();
    let (session, started) = build_session(&opts, &prefs.tester_name, ended)?;

    let store = SessionStore::new(&prefs.session_root);
    let path = store.save_new(&session, started)?;
    eprintln!("Session saved to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn opts() -> SaveOptions {
        SaveOptions {
            mission: "explore checkout".to_string(),
            minutes: 45,
            bugs: vec!["<CPU is at 83%>".to_string(), "cart empties".to_string()],
            ..SaveOptions::default()
        }
    }

    #[test]
    fn test_build_session_fills_times_and_fields() {
        let ended = datetime!(2024-06-15 15:00:00 UTC);
        let (session, started) = build_session(&opts(), "ann", ended).unwrap();
        assert_eq!(started, datetime!(2024-06-15 14:15:00 UTC));
        assert_eq!(session.tester, "ann");
        assert_eq!(session.duration, "45 min(s)");
        assert_eq!(session.bugs, "<CPU is at 83%>\ncart empties\n");
        assert_eq!(session.notes, "");
    }

    #[test]
    fn test_explicit_tester_wins_over_default() {
        let mut o = opts();
        o.tester = Some("bob".to_string());
        let (session, _) = build_session(&o, "ann", datetime!(2024-06-15 15:00:00 UTC)).unwrap();
        assert_eq!(session.tester, "bob");
    }

    #[test]
    fn test_blank_tester_or_mission_rejected() {
        let ended = datetime!(2024-06-15 15:00:00 UTC);
        assert!(build_session(&opts(), "  ", ended).is_err());

        let mut o = opts();
        o.mission = String::new();
        assert!(build_session(&o, "ann", ended).is_err());
    }

    #[test]
    fn test_run_writes_into_session_root() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences {
            tester_name: "ann".to_string(),
            web_report_path: None,
            session_root: dir.path().join("sessions"),
        };
        let path = run(&prefs, opts()).unwrap();
        assert!(path.starts_with(dir.path().join("sessions")));
        let loaded = crate::storage::load(&path).unwrap();
        assert_eq!(loaded.mission, "explore checkout");
    }
}
