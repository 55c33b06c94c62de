//! CLI command handler for `show`.

use std::path::Path;

use crate::core::{Session, SessionField};
use crate::storage::load;
use crate::{SessionError, SessionResult};

/// Plain-text rendering, one heading per field in report order.
pub fn render_text(session: &Session) -> String {
    let mut out = String::new();
    for field in SessionField::REPORT_ORDER {
        out.push_str(field.heading());
        out.push_str(":\n");
        for line in session.get(field).lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

pub fn run(path: &Path, json: bool) -> SessionResult<()> {
    let session = load(path)?;
    if json {
        let s = serde_json::to_string_pretty(&session)
            .map_err(|e| SessionError::Serialize(e.to_string()))?;
        println!("{s}");
    } else {
        print!("{}", render_text(&session));
    }
    Ok(())
}
