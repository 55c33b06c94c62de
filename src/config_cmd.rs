//! CLI command handlers for `config show | reset | set`.

use std::path::{Path, PathBuf};

use crate::SessionResult;
use crate::config::Preferences;

pub fn show(prefs: &Preferences, path: &Path) -> SessionResult<()> {
    println!("# {}", path.display());
    println!("tester_name     = {}", prefs.tester_name);
    println!(
        "web_report_path = {}",
        prefs
            .web_report_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("session_root    = {}", prefs.session_root.display());
    Ok(())
}

pub fn reset(prefs: &mut Preferences, path: &Path) -> SessionResult<()> {
    prefs.reset();
    prefs.save(path)?;
    eprintln!("Preferences reset: {}", path.display());
    Ok(())
}

pub fn set(
    prefs: &mut Preferences,
    path: &Path,
    tester_name: Option<String>,
    web_report_path: Option<PathBuf>,
    session_root: Option<PathBuf>,
) -> SessionResult<()> {
    if let Some(name) = tester_name {
        prefs.tester_name = name;
    }
    if let Some(web) = web_report_path {
        prefs.web_report_path = Some(web);
    }
    if let Some(root) = session_root {
        prefs.session_root = root;
    }
    prefs.save(path)?;
    eprintln!("Preferences saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_updates_only_given_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        let mut prefs = Preferences::default();

        set(&mut prefs, &path, Some("ann".to_string()), None, None).unwrap();
        let loaded = Preferences::load(&path).unwrap();
        assert_eq!(loaded.tester_name, "ann");
        assert_eq!(loaded.web_report_path, None);
        assert_eq!(loaded.session_root, Preferences::default().session_root);

        reset(&mut prefs, &path).unwrap();
        assert_eq!(Preferences::load(&path).unwrap(), Preferences::default());
    }
}
