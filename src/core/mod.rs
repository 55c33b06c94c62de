//! Core types for session-tester.
//!
//! This module contains the session record, the file naming scheme derived
//! from timestamps, and host environment detection.

pub mod env;
pub mod session;
pub mod timestamp;

// Re-export key types for convenience
pub use env::EnvironmentInfo;
pub use session::{FIELD_MAX_LENGTH, Session, SessionField, truncate_field};
pub use timestamp::{build_timestamp, display_time, session_file_path};
