//! Position within the fixed session-tree hierarchy.

use std::fmt;

use crate::{SessionError, SessionResult};

/// One layer of `root → year → month → day → files`.
///
/// The walk only uses this to know how many directory layers remain and what
/// the layer below is called; actual directory names are never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DirectoryLevel {
    #[default]
    Top,
    Year,
    Month,
    Day,
    Files,
}

impl DirectoryLevel {
    /// The level below this one. `Files` is terminal.
    pub fn next(self) -> SessionResult<DirectoryLevel> {
        match self {
            DirectoryLevel::Top => Ok(DirectoryLevel::Year),
            DirectoryLevel::Year => Ok(DirectoryLevel::Month),
            DirectoryLevel::Month => Ok(DirectoryLevel::Day),
            DirectoryLevel::Day => Ok(DirectoryLevel::Files),
            DirectoryLevel::Files => Err(SessionError::LevelOverflow),
        }
    }

    /// Whether a level exists below this one.
    pub fn has_more_levels(self) -> bool {
        self != DirectoryLevel::Files
    }

    pub fn is_top(self) -> bool {
        self == DirectoryLevel::Top
    }

    pub fn label(self) -> &'static str {
        match self {
            DirectoryLevel::Top => "top",
            DirectoryLevel::Year => "year",
            DirectoryLevel::Month => "month",
            DirectoryLevel::Day => "day",
            DirectoryLevel::Files => "files",
        }
    }

    /// Heading for an index page listing entries of this level.
    pub fn heading(self) -> &'static str {
        match self {
            DirectoryLevel::Top => "Sessions",
            DirectoryLevel::Year => "Year",
            DirectoryLevel::Month => "Month",
            DirectoryLevel::Day => "Day",
            DirectoryLevel::Files => "Testing Sessions",
        }
    }
}

impl fmt::Display for DirectoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_advance_in_order() {
        let mut level = DirectoryLevel::default();
        let mut labels = vec![level.label()];
        while level.has_more_levels() {
            level = level.next().unwrap();
            labels.push(level.label());
        }
        assert_eq!(labels, ["top", "year", "month", "day", "files"]);
    }

    #[test]
    fn test_advancing_past_files_fails() {
        let err = DirectoryLevel::Files.next().unwrap_err();
        assert!(matches!(err, SessionError::LevelOverflow));
    }

    #[test]
    fn test_day_is_last_directory_layer() {
        // Below `day` come the session files themselves, never another directory.
        assert!(DirectoryLevel::Day.has_more_levels());
        assert!(!DirectoryLevel::Day.next().unwrap().has_more_levels());
        assert!(DirectoryLevel::Month.next().unwrap().has_more_levels());
    }

    #[test]
    fn test_only_top_is_top() {
        assert!(DirectoryLevel::Top.is_top());
        assert!(!DirectoryLevel::Year.is_top());
        assert_eq!(DirectoryLevel::Month.to_string(), "month");
    }
}
