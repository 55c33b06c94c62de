pub mod config;
pub mod core;
pub mod error;
pub mod publisher;
pub mod storage;

pub mod config_cmd;
pub mod publish_cmd;
pub mod save_cmd;
pub mod show_cmd;

pub use crate::core::{Session, SessionField};
pub use error::{SessionError, SessionResult};
pub use publisher::{BreadCrumb, DirectoryLevel, PublishSummary, ReportPublisher};
pub use storage::{SessionStore, load, save};
