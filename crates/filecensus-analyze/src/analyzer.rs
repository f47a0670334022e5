//! Streaming aggregation of filesystem entries.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use filecensus_core::{
    Category, CategoryTotals, ScanConfig, ScanError, file_mode_string, format_size,
    unusual_permissions,
};

use crate::classify::{Classifier, ClassifyError};

/// An append-only report destination: standard output or a file opened
/// once at construction.
#[derive(Debug)]
pub struct ReportSink {
    target: Option<SinkTarget>,
}

#[derive(Debug)]
enum SinkTarget {
    Stdout,
    File(BufWriter<fs::File>),
}

impl ReportSink {
    /// Open a sink. `None` means standard output.
    pub fn create(path: Option<&Path>) -> Result<Self, ScanError> {
        let target = match path {
            Some(path) => {
                let file = fs::File::create(path).map_err(|source| ScanError::Sink {
                    path: path.to_path_buf(),
                    source,
                })?;
                SinkTarget::File(BufWriter::new(file))
            }
            None => SinkTarget::Stdout,
        };
        Ok(Self {
            target: Some(target),
        })
    }

    /// Append one line to the sink.
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self.target.as_mut() {
            Some(SinkTarget::Stdout) => writeln!(io::stdout().lock(), "{line}"),
            Some(SinkTarget::File(writer)) => writeln!(writer, "{line}"),
            None => Ok(()),
        }
    }

    /// Close the sink, flushing file targets. Standard output is never
    /// actually closed. Subsequent closes are no-ops.
    pub fn close(&mut self) -> io::Result<()> {
        match self.target.take() {
            Some(SinkTarget::File(mut writer)) => writer.flush(),
            _ => Ok(()),
        }
    }
}

/// Ingests files, directories and symlinks one at a time, keeping
/// per-category size totals and writing the unusual-permissions and
/// big-files reports as a side channel.
#[derive(Debug)]
pub struct Analyzer {
    classifier: Classifier,
    totals: CategoryTotals,
    threshold: u64,
    permissions_sink: ReportSink,
    big_files_sink: ReportSink,
}

impl Analyzer {
    /// Build an analyzer from the run configuration, opening both report
    /// sinks.
    ///
    /// The permissions sink is opened first; if the big-files sink then
    /// fails to open, the permissions sink is dropped (and closed) before
    /// the error propagates, so construction acquires either both sinks or
    /// neither.
    pub fn new(config: &ScanConfig, classifier: Classifier) -> Result<Self, ScanError> {
        let permissions_path = config.permissions_report_path();
        let permissions_sink = ReportSink::create(Some(&permissions_path))?;
        let big_files_sink = ReportSink::create(config.big_files_report.as_deref())?;
        tracing::debug!(
            permissions = %permissions_path.display(),
            threshold = config.threshold,
            "report sinks opened"
        );
        Ok(Self {
            classifier,
            totals: CategoryTotals::new(),
            threshold: config.threshold,
            permissions_sink,
            big_files_sink,
        })
    }

    /// Record a file or directory.
    ///
    /// Directories contribute their own reported size (not their
    /// contents) to the `directories` category. Files are classified by
    /// content signature, falling back to extension when the content is
    /// unreadable for lack of permission, and land in the big-files
    /// report when their size strictly exceeds the threshold.
    pub fn record_path(&mut self, path: &Path) -> Result<(), ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::io(path, e))?;
        self.log_permissions(mode_of(&metadata), path)?;

        if metadata.is_dir() {
            self.totals.record(Category::DIRECTORIES, metadata.len());
            return Ok(());
        }

        let category = match self.classifier.from_signature(path) {
            Ok(category) => category,
            Err(ClassifyError::PermissionDenied { .. }) => {
                tracing::debug!(
                    path = %path.display(),
                    "content unreadable, classifying by extension"
                );
                self.classifier.from_extension(path)
            }
            Err(ClassifyError::Io { source, .. }) => return Err(ScanError::io(path, source)),
        };

        let size = metadata.len();
        if size > self.threshold {
            let line = format!("{}: {}", path.display(), format_size(size));
            self.big_files_sink
                .write_line(&line)
                .map_err(|e| ScanError::io(path, e))?;
        }
        self.totals.record(category, size);
        Ok(())
    }

    /// Record a symbolic link without following it.
    ///
    /// The link's own metadata is read with a non-dereferencing stat; its
    /// own size lands in the `symlink` category. Links are never
    /// classified by content or extension.
    pub fn record_symlink(&mut self, path: &Path) -> Result<(), ScanError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| ScanError::io(path, e))?;
        self.log_permissions(mode_of(&metadata), path)?;
        self.totals.record(Category::SYMLINK, metadata.len());
        Ok(())
    }

    /// Totals accumulated so far, in first-observation order.
    pub fn totals(&self) -> &CategoryTotals {
        &self.totals
    }

    /// Write one `<category>: <human-size>.` line per observed category.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (category, size) in self.totals.iter() {
            writeln!(out, "{category}: {}.", format_size(size))?;
        }
        Ok(())
    }

    /// Print the summary to standard output.
    pub fn print_summary(&self) -> io::Result<()> {
        self.write_summary(&mut io::stdout().lock())
    }

    /// Close both report sinks exactly once. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        let permissions = self.permissions_sink.close();
        let big_files = self.big_files_sink.close();
        permissions.and(big_files)
    }

    fn log_permissions(&mut self, mode: u32, path: &Path) -> Result<(), ScanError> {
        if let Some(flag) = unusual_permissions(mode) {
            let line = format!("{}: {} ({})", path.display(), file_mode_string(mode), flag);
            self.permissions_sink
                .write_line(&line)
                .map_err(|e| ScanError::io(path, e))?;
        }
        Ok(())
    }
}

/// Get the full mode bits from metadata.
#[cfg(unix)]
fn mode_of(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn mode_of(_metadata: &fs::Metadata) -> u32 {
    0o100644 // no POSIX permission bits to inspect
}
