//! File type categories and per-category size accounting.

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// MIME subtypes that are grouped into the `archive` category.
///
/// Covers both the legacy `x-` registrations and the modern ones
/// (`application/gzip`, `application/vnd.rar`).
const ARCHIVE_SUBTYPES: &[&str] = &[
    "zip",
    "x-tar",
    "x-gzip",
    "gzip",
    "x-bzip2",
    "x-rar-compressed",
    "vnd.rar",
];

/// The classification bucket a filesystem entry's size is attributed to.
///
/// Not a closed enum: any MIME top-level type (`text`, `image`, `audio`,
/// `video`, ...) passes through verbatim. The mapping rules only produce a
/// fixed set of buckets for `application/*` types, plus the structural
/// categories `directories`, `symlink` and `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(CompactString);

impl Category {
    /// Directories, counted by their own entry size.
    pub const DIRECTORIES: Category = Category(CompactString::const_new("directories"));
    /// Symbolic links, counted by the link's own size.
    pub const SYMLINK: Category = Category(CompactString::const_new("symlink"));
    /// Files with no extension mapping and no recognizable content.
    pub const UNKNOWN: Category = Category(CompactString::const_new("unknown"));
    /// PDF documents.
    pub const PDF: Category = Category(CompactString::const_new("pdf"));
    /// Archive formats (zip, tar, gzip, bzip2, rar).
    pub const ARCHIVE: Category = Category(CompactString::const_new("archive"));
    /// Everything else under `application/*`, octet streams included.
    pub const EXECUTABLE: Category = Category(CompactString::const_new("executable"));
    /// Plain text and other `text/*` types.
    pub const TEXT: Category = Category(CompactString::const_new("text"));

    /// Create a category from an arbitrary identifier.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(CompactString::new(name.as_ref()))
    }

    /// Map a MIME type to its category.
    ///
    /// Non-`application` top-level types are returned verbatim. For
    /// `application/*`, `pdf` subtypes map to [`Category::PDF`], the known
    /// archive formats to [`Category::ARCHIVE`], and anything else to
    /// [`Category::EXECUTABLE`].
    pub fn from_mime(mime: &str) -> Self {
        let (top, sub) = mime.split_once('/').unwrap_or((mime, ""));
        if top != "application" {
            return Self(CompactString::new(top));
        }
        if sub.contains("pdf") {
            return Self::PDF;
        }
        if ARCHIVE_SUBTYPES.iter().any(|archive| sub.contains(archive)) {
            return Self::ARCHIVE;
        }
        Self::EXECUTABLE
    }

    /// Get the category identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running byte totals per category.
///
/// Keys are created lazily on first observation and iteration preserves
/// that first-observation order, which is the order summary lines are
/// printed in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    totals: IndexMap<Category, u64>,
}

impl CategoryTotals {
    /// Create empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `size` bytes to `category`'s total.
    pub fn record(&mut self, category: Category, size: u64) {
        *self.totals.entry(category).or_insert(0) += size;
    }

    /// Get the total for a category (0 if never observed).
    pub fn get(&self, category: &Category) -> u64 {
        self.totals.get(category).copied().unwrap_or(0)
    }

    /// Iterate categories and totals in first-observation order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, u64)> {
        self.totals.iter().map(|(category, &size)| (category, size))
    }

    /// Number of observed categories.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Check whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
