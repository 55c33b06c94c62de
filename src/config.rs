//! User preferences.
//!
//! Preferences are stored as TOML and loaded once at startup; the resulting
//! value is passed to whichever command needs a path or a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{SessionError, SessionResult};

const APP_DIR: &str = "session-tester";
const PREFERENCES_FILE: &str = "preferences.toml";
const DEFAULT_SESSION_DIR: &str = ".sessiontester";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Pre-filled tester name for new sessions.
    #[serde(default)]
    pub tester_name: String,
    /// Where `publish` writes when no directory is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_report_path: Option<PathBuf>,
    /// Root of the `<year>/<month>/<day>` session tree.
    #[serde(default = "default_session_root")]
    pub session_root: PathBuf,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            tester_name: String::new(),
            web_report_path: None,
            session_root: default_session_root(),
        }
    }
}

fn default_session_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SESSION_DIR)
}

/// `<config dir>/session-tester/preferences.toml`.
pub fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(PREFERENCES_FILE)
}

impl Preferences {
    pub fn load(path: &Path) -> SessionResult<Self> {
        let s = fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        toml::from_str(&s)
            .map_err(|e| SessionError::Config(format!("{}: {e}", path.display())))
    }

    /// Load preferences from `path`, writing defaults there first if the file
    /// does not exist yet.
    pub fn load_or_create(path: &Path) -> SessionResult<Self> {
        if path.exists() {
            return Self::load(path);
        }
        let prefs = Preferences::default();
        prefs.save(path)?;
        info!(path = %path.display(), "created default preferences");
        Ok(prefs)
    }

    pub fn save(&self, path: &Path) -> SessionResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SessionError::io(parent, e))?;
            }
        }
        let s = toml::to_string_pretty(self)
            .map_err(|e| SessionError::Config(format!("failed to serialize preferences: {e}")))?;
        fs::write(path, s).map_err(|e| SessionError::io(path, e))
    }

    pub fn reset(&mut self) {
        *self = Preferences::default();
    }
}
