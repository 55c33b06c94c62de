//! Storage layer for testing sessions.
//!
//! One XML file per session, filed by creation day under the session root.

pub mod session_store;
pub mod xml;

// Re-export key types
pub use session_store::{SessionStore, load, save};
pub use xml::{ROOT_ELEMENT, from_xml, to_xml};
