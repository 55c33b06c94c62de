//! Publish the session tree as a static HTML report.
//!
//! The walk starts at the session root and descends `year → month → day`,
//! writing every page into one flat `report_<stamp>` directory:
//! - `index.html` for the root
//! - `index_<trail>.html` for every directory below it (e.g. `index_2024_06.html`)
//! - `<session>.html` for every session file
//!
//! Each directory's index is written before its children are visited, so an
//! aborted run still leaves readable indexes for what was already covered.
//! The run is all-or-nothing in the sense that the first failure stops it;
//! pages written before the failure are left in place.
//!
//! Page names are flat, so two entries can map to the same page (a `2024_06`
//! directory next to `2024/06`, or same-named files at different levels).
//! The second one fails the run instead of replacing the first page.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::core::timestamp::{self, SESSION_FILE_EXTENSION, report_dir_name};
use crate::storage::SessionStore;
use crate::{SessionError, SessionResult};

use super::breadcrumb::BreadCrumb;
use super::index_html::{IndexLink, render_index_html};
use super::level::DirectoryLevel;
use super::report_html::render_session_report_html;

const ROOT_INDEX: &str = "index.html";
const PAGE_EXTENSION: &str = ".html";

/// What a publish run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    /// The `report_<stamp>` directory holding every page.
    pub report_dir: PathBuf,
    pub index_pages: usize,
    pub session_reports: usize,
}

/// Index page name for the directory reached by `trail`.
pub fn index_file_name(trail: &BreadCrumb) -> String {
    if trail.is_empty() {
        ROOT_INDEX.to_string()
    } else {
        format!("index_{}{PAGE_EXTENSION}", trail.filename_fragment())
    }
}

/// Report page name for a session file.
///
/// Everything from the first `.xml` on is replaced, so `a.xml` becomes
/// `a.html` and `a.xml.bak` also becomes `a.html`.
pub fn report_file_name(session_file_name: &str) -> String {
    let stem = match session_file_name.find(SESSION_FILE_EXTENSION) {
        Some(cut) => &session_file_name[..cut],
        None => session_file_name,
    };
    format!("{stem}{PAGE_EXTENSION}")
}

#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Immediate children of `dir`, sorted by name.
fn list_entries(dir: &Path) -> SessionResult<Vec<Entry>> {
    let read = fs::read_dir(dir).map_err(|e| SessionError::io(dir, e))?;

    let mut entries = Vec::new();
    for item in read {
        let item = item.map_err(|e| SessionError::io(dir, e))?;
        let path = item.path();
        let is_dir = fs::metadata(&path)
            .map_err(|e| SessionError::io(&path, e))?
            .is_dir();
        entries.push(Entry {
            name: item.file_name().to_string_lossy().into_owned(),
            path,
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// State of one publish run.
#[derive(Debug)]
struct PublishRun {
    summary: PublishSummary,
    pages: HashSet<String>,
}

impl PublishRun {
    fn write_page(&mut self, page: String, html: &str) -> SessionResult<()> {
        let path = self.summary.report_dir.join(&page);
        if self.pages.contains(&page) {
            warn!(path = %path.display(), "page name produced twice in one run");
            return Err(SessionError::io(
                &path,
                io::Error::new(io::ErrorKind::AlreadyExists, "page already written in this run"),
            ));
        }
        fs::write(&path, html).map_err(|e| SessionError::io(&path, e))?;
        debug!(path = %path.display(), "wrote page");
        self.pages.insert(page);
        Ok(())
    }
}

/// Renders every session under a [`SessionStore`] root into a browsable
/// report tree.
#[derive(Debug, Clone)]
pub struct ReportPublisher {
    store: SessionStore,
}

impl ReportPublisher {
    pub fn new(store: SessionStore) -> Self {
        ReportPublisher { store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Publish into a fresh `report_<now>` directory inside `output_dir`.
    pub fn publish(&self, output_dir: &Path) -> SessionResult<PublishSummary> {
        self.publish_at(output_dir, timestamp::now())
    }

    /// Publish using `started` to name the report directory.
    ///
    /// # Errors
    /// - `SessionError::InvalidTarget` if `output_dir` is not an existing
    ///   directory; nothing is written in that case
    /// - `SessionError::Io` if the session root cannot be read or a page
    ///   cannot be written
    /// - `SessionError::Parse` if any session file is malformed
    pub fn publish_at(&self, output_dir: &Path, started: OffsetDateTime) -> SessionResult<PublishSummary> {
        if !output_dir.is_dir() {
            return Err(SessionError::InvalidTarget {
                path: output_dir.to_path_buf(),
            });
        }

        let root = self.store.root();
        if !root.is_dir() {
            return Err(SessionError::io(
                root,
                io::Error::new(io::ErrorKind::NotFound, "session root is not a directory"),
            ));
        }

        let report_dir = output_dir.join(report_dir_name(started)?);
        fs::create_dir_all(&report_dir).map_err(|e| SessionError::io(&report_dir, e))?;
        info!(
            root = %root.display(),
            report_dir = %report_dir.display(),
            "publishing sessions"
        );

        let mut run = PublishRun {
            summary: PublishSummary {
                report_dir,
                index_pages: 0,
                session_reports: 0,
            },
            pages: HashSet::new(),
        };
        self.scan_directory(root, DirectoryLevel::Top, &BreadCrumb::new(), &mut run)?;

        info!(
            index_pages = run.summary.index_pages,
            session_reports = run.summary.session_reports,
            "publish complete"
        );
        Ok(run.summary)
    }

    fn scan_directory(
        &self,
        dir: &Path,
        level: DirectoryLevel,
        trail: &BreadCrumb,
        run: &mut PublishRun,
    ) -> SessionResult<()> {
        let entries = list_entries(dir)?;
        let listing = level.next()?;

        self.build_index_page(&entries, listing, trail, run)?;

        let index_name = index_file_name(trail);
        for entry in &entries {
            if !entry.is_dir {
                self.build_report(entry, &index_name, run)?;
            } else if listing.has_more_levels() {
                self.scan_directory(&entry.path, listing, &trail.add(entry.name.as_str()), run)?;
            } else {
                warn!(
                    path = %entry.path.display(),
                    "skipping directory below the {} level", level
                );
            }
        }

        Ok(())
    }

    fn build_index_page(
        &self,
        entries: &[Entry],
        listing: DirectoryLevel,
        trail: &BreadCrumb,
        run: &mut PublishRun,
    ) -> SessionResult<()> {
        let links: Vec<IndexLink> = entries
            .iter()
            .filter_map(|entry| {
                let href = if !entry.is_dir {
                    report_file_name(&entry.name)
                } else if listing.has_more_levels() {
                    index_file_name(&trail.add(entry.name.as_str()))
                } else {
                    return None;
                };
                Some(IndexLink {
                    name: entry.name.clone(),
                    href,
                })
            })
            .collect();

        let up_href = trail.parent().map(|parent| index_file_name(&parent));
        let html = render_index_html(trail, listing, up_href.as_deref(), &links);

        run.write_page(index_file_name(trail), &html)?;
        run.summary.index_pages += 1;
        Ok(())
    }

    fn build_report(&self, entry: &Entry, index_name: &str, run: &mut PublishRun) -> SessionResult<()> {
        let session = self.store.load(&entry.path)?;
        let html = render_session_report_html(&entry.name, &session, Some(index_name));

        run.write_page(report_file_name(&entry.name), &html)?;
        run.summary.session_reports += 1;
        Ok(())
    }
}
