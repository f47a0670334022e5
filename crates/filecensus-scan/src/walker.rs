//! Breadth-first, symlink-cycle-safe directory traversal.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use filecensus_analyze::Analyzer;
use filecensus_core::{ScanConfig, ScanError, normalize};

/// One traversal session.
///
/// The walker exclusively owns the visited set and the work queue for a
/// single run; create a fresh walker per run so cycle state never leaks
/// between runs. The visited set holds canonical directory paths and
/// grows monotonically; the queue is FIFO.
#[derive(Debug)]
pub struct Walker {
    follow_links: bool,
    visited: HashSet<PathBuf>,
    queue: VecDeque<PathBuf>,
}

impl Walker {
    /// Create a walker.
    pub fn new(follow_links: bool) -> Self {
        Self {
            follow_links,
            visited: HashSet::new(),
            queue: VecDeque::new(),
        }
    }

    /// Create a walker from the run configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.follow_links)
    }

    /// Walk the tree rooted at `root`, feeding every entry to `analyzer`.
    ///
    /// Unreadable directories and failing entries are reported to stderr
    /// and skipped; only a root that cannot be walked at all is returned
    /// as an error.
    pub fn run(&mut self, root: &Path, analyzer: &mut Analyzer) -> Result<(), ScanError> {
        let root = normalize(root, None);
        let metadata = fs::metadata(&root).map_err(|e| ScanError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        self.try_enqueue(root.clone(), None);
        // The root itself is counted too, so an empty tree still yields a
        // `directories` summary line.
        if let Err(err) = analyzer.record_path(&root) {
            report_skipped(&err);
        }

        while let Some(dir) = self.queue.pop_front() {
            tracing::debug!(
                dir = %dir.display(),
                pending = self.queue.len(),
                "expanding directory"
            );
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    let err = ScanError::io(&dir, e);
                    eprintln!(
                        "Error: {}: {}. Skipping directory.",
                        dir.display(),
                        err.reason()
                    );
                    continue;
                }
            };

            for entry in entries {
                let result = match entry {
                    Ok(entry) => self.visit(&dir, &entry, analyzer),
                    Err(e) => Err(ScanError::io(&dir, e)),
                };
                if let Err(err) = result {
                    report_skipped(&err);
                }
            }
        }
        Ok(())
    }

    /// Handle one directory entry.
    fn visit(
        &mut self,
        dir: &Path,
        entry: &fs::DirEntry,
        analyzer: &mut Analyzer,
    ) -> Result<(), ScanError> {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ScanError::io(&path, e))?;

        if file_type.is_symlink() {
            if !self.follow_links {
                return analyzer.record_symlink(&path);
            }
            // Resolve the target relative to the entry's directory; when
            // it is itself a directory it joins the queue, subject to the
            // cycle check.
            let target = fs::read_link(&path).map_err(|e| ScanError::io(&path, e))?;
            let resolved = normalize(&target, Some(dir));
            if resolved.is_dir() {
                self.try_enqueue(resolved, Some(&path));
            }
            // Following does not skip the entry's own statistics.
            return analyzer.record_path(&path);
        }

        if file_type.is_dir() {
            self.try_enqueue(normalize(&path, None), None);
        }
        analyzer.record_path(&path)
    }

    /// Enqueue a canonical directory path unless it was already visited.
    ///
    /// A duplicate attempt emits exactly one symlink-loop warning naming
    /// the path and, when known, the symlink that pointed at it, and
    /// leaves the queue untouched. Returns whether the path was enqueued.
    fn try_enqueue(&mut self, path: PathBuf, pointed_by: Option<&Path>) -> bool {
        if self.visited.contains(&path) {
            match pointed_by {
                Some(link) => eprintln!(
                    "Error: symlink loop detected at {}. Pointed by: {}.",
                    path.display(),
                    link.display()
                ),
                None => eprintln!("Error: symlink loop detected at {}.", path.display()),
            }
            return false;
        }
        self.visited.insert(path.clone());
        self.queue.push_back(path);
        true
    }
}

fn report_skipped(err: &ScanError) {
    eprintln!(
        "Error: {}: {}. Skipping.",
        err.path().display(),
        err.reason()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_enqueue_rejects_duplicates() {
        let mut walker = Walker::new(false);
        let path = PathBuf::from("/some/canonical/dir");

        assert!(walker.try_enqueue(path.clone(), None));
        assert_eq!(walker.queue.len(), 1);

        // Second attempt warns and does not grow the queue.
        assert!(!walker.try_enqueue(path.clone(), Some(Path::new("/some/link"))));
        assert_eq!(walker.queue.len(), 1);
        assert_eq!(walker.visited.len(), 1);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut walker = Walker::new(false);
        walker.try_enqueue(PathBuf::from("/a"), None);
        walker.try_enqueue(PathBuf::from("/b"), None);
        walker.try_enqueue(PathBuf::from("/c"), None);

        assert_eq!(walker.queue.pop_front(), Some(PathBuf::from("/a")));
        assert_eq!(walker.queue.pop_front(), Some(PathBuf::from("/b")));
        assert_eq!(walker.queue.pop_front(), Some(PathBuf::from("/c")));
    }
}
