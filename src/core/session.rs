//! The testing-session record.
//!
//! A session is a flat set of free-text fields. Nothing here validates content;
//! the only shaping applied is the length cap on tester and mission, which the
//! caller applies before the record is stored.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::SessionResult;
use crate::core::timestamp::display_time;

/// Longest tester name or mission statement kept on a session.
pub const FIELD_MAX_LENGTH: usize = 200;

/// One exploratory testing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub start: String,
    pub end: String,
    pub duration: String,
    pub tester: String,
    pub mission: String,
    pub tasks: String,
    pub data: String,
    pub notes: String,
    pub issues: String,
    pub bugs: String,
    pub environment: String,
    pub area: String,
}

/// Names the twelve fields of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionField {
    Start,
    End,
    Duration,
    Tester,
    Mission,
    Tasks,
    Data,
    Notes,
    Issues,
    Bugs,
    Environment,
    Area,
}

impl SessionField {
    /// Order in which fields are written to a session file.
    pub const STORAGE_ORDER: [SessionField; 12] = [
        SessionField::Start,
        SessionField::End,
        SessionField::Duration,
        SessionField::Tester,
        SessionField::Mission,
        SessionField::Tasks,
        SessionField::Data,
        SessionField::Notes,
        SessionField::Issues,
        SessionField::Bugs,
        SessionField::Environment,
        SessionField::Area,
    ];

    /// Order in which fields appear on a published session report.
    pub const REPORT_ORDER: [SessionField; 12] = [
        SessionField::Start,
        SessionField::End,
        SessionField::Duration,
        SessionField::Tester,
        SessionField::Mission,
        SessionField::Tasks,
        SessionField::Data,
        SessionField::Environment,
        SessionField::Area,
        SessionField::Notes,
        SessionField::Issues,
        SessionField::Bugs,
    ];

    /// Element name used in the session file.
    pub fn tag(self) -> &'static str {
        match self {
            SessionField::Start => "Start",
            SessionField::End => "End",
            SessionField::Duration => "Duration",
            SessionField::Tester => "Tester",
            SessionField::Mission => "Mission",
            SessionField::Tasks => "Tasks",
            SessionField::Data => "Data",
            SessionField::Notes => "Notes",
            SessionField::Issues => "Issues",
            SessionField::Bugs => "Bugs",
            SessionField::Environment => "Environment",
            SessionField::Area => "Area",
        }
    }

    /// Heading shown above the field on a published report.
    pub fn heading(self) -> &'static str {
        match self {
            SessionField::Tasks => "Task Breakdown",
            SessionField::Data => "Data Files",
            SessionField::Notes => "Test Notes",
            other => other.tag(),
        }
    }

    pub fn from_tag(tag: &str) -> Option<SessionField> {
        SessionField::STORAGE_ORDER
            .into_iter()
            .find(|field| field.tag() == tag)
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: SessionField) -> &str {
        match field {
            SessionField::Start => &self.start,
            SessionField::End => &self.end,
            SessionField::Duration => &self.duration,
            SessionField::Tester => &self.tester,
            SessionField::Mission => &self.mission,
            SessionField::Tasks => &self.tasks,
            SessionField::Data => &self.data,
            SessionField::Notes => &self.notes,
            SessionField::Issues => &self.issues,
            SessionField::Bugs => &self.bugs,
            SessionField::Environment => &self.environment,
            SessionField::Area => &self.area,
        }
    }

    pub fn get_mut(&mut self, field: SessionField) -> &mut String {
        match field {
            SessionField::Start => &mut self.start,
            SessionField::End => &mut self.end,
            SessionField::Duration => &mut self.duration,
            SessionField::Tester => &mut self.tester,
            SessionField::Mission => &mut self.mission,
            SessionField::Tasks => &mut self.tasks,
            SessionField::Data => &mut self.data,
            SessionField::Notes => &mut self.notes,
            SessionField::Issues => &mut self.issues,
            SessionField::Bugs => &mut self.bugs,
            SessionField::Environment => &mut self.environment,
            SessionField::Area => &mut self.area,
        }
    }

    pub fn set(&mut self, field: SessionField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Append one line of text to a free-text field.
    ///
    /// Every appended line is terminated with `\n`, so a field built from
    /// three appends ends with a newline.
    pub fn append(&mut self, field: SessionField, line: &str) {
        let value = self.get_mut(field);
        value.push_str(line);
        value.push('\n');
    }

    /// Set tester and mission, capped at [`FIELD_MAX_LENGTH`] characters.
    pub fn with_charter(mut self, tester: &str, mission: &str) -> Self {
        self.tester = truncate_field(tester, FIELD_MAX_LENGTH);
        self.mission = truncate_field(mission, FIELD_MAX_LENGTH);
        self
    }

    /// Record when the session ran and how many whole minutes it lasted.
    pub fn stamp_times(&mut self, started: OffsetDateTime, ended: OffsetDateTime) -> SessionResult<()> {
        self.start = display_time(started)?;
        self.end = display_time(ended)?;
        let minutes = (ended - started).whole_minutes().max(0);
        self.duration = format!("{minutes} min(s)");
        Ok(())
    }
}

/// Cap `input` at `max` characters without splitting a character.
pub fn truncate_field(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((cut, _)) => input[..cut].to_string(),
        None => input.to_string(),
    }
}
