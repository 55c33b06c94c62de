//! Path trail accumulated while descending the session tree.

use im::Vector;

const FRAGMENT_SEPARATOR: &str = "_";
const TRAIL_SEPARATOR: &str = " / ";
const TRAIL_ROOT: &str = "All sessions";

/// Persistent, append-only list of directory names from the session root.
///
/// [`BreadCrumb::add`] returns a new trail and leaves `self` untouched, so
/// sibling branches of the walk never see each other's segments. Clones share
/// structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BreadCrumb {
    segments: Vector<String>,
}

impl BreadCrumb {
    pub fn new() -> Self {
        Self::default()
    }

    /// A trail one segment longer than this one.
    #[must_use]
    pub fn add(&self, segment: impl Into<String>) -> BreadCrumb {
        let mut segments = self.segments.clone();
        segments.push_back(segment.into());
        BreadCrumb { segments }
    }

    /// The trail without its last segment, or `None` at the root.
    pub fn parent(&self) -> Option<BreadCrumb> {
        if self.segments.is_empty() {
            return None;
        }
        Some(BreadCrumb {
            segments: self.segments.take(self.segments.len() - 1),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Human-readable trail, e.g. `All sessions / 2024 / 06`.
    pub fn trail_description(&self) -> String {
        std::iter::once(TRAIL_ROOT)
            .chain(self.segments())
            .collect::<Vec<_>>()
            .join(TRAIL_SEPARATOR)
    }

    /// Segments joined for use inside a file name, e.g. `2024_06`.
    pub fn filename_fragment(&self) -> String {
        self.segments().collect::<Vec<_>>().join(FRAGMENT_SEPARATOR)
    }
}
