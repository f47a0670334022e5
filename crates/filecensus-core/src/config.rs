//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Big-file threshold used when none is configured, in bytes.
pub const DEFAULT_THRESHOLD: u64 = 100;

/// Configuration for one census run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root directory to analyze.
    pub root: PathBuf,

    /// Follow symbolic links during traversal.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_links: bool,

    /// Size above which a file is reported as big, in bytes (strictly
    /// greater-than comparison).
    #[builder(default = "DEFAULT_THRESHOLD")]
    #[serde(default = "default_threshold")]
    pub threshold: u64,

    /// Destination for the big-files report (None = stdout).
    #[builder(default)]
    #[serde(default)]
    pub big_files_report: Option<PathBuf>,

    /// Destination for the unusual-permissions report
    /// (None = `<root>_report.txt`).
    #[builder(default)]
    #[serde(default)]
    pub permissions_report: Option<PathBuf>,
}

fn default_threshold() -> u64 {
    DEFAULT_THRESHOLD
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if self.threshold == Some(0) {
            return Err("Threshold must be a positive number of bytes".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path with defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            threshold: DEFAULT_THRESHOLD,
            big_files_report: None,
            permissions_report: None,
        }
    }

    /// The unusual-permissions report destination, with the default
    /// `<root>_report.txt` applied when none was configured.
    pub fn permissions_report_path(&self) -> PathBuf {
        self.permissions_report
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}_report.txt", self.root.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ScanConfig::builder().root("/tmp/data").build().unwrap();
        assert!(!config.follow_links);
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert!(config.big_files_report.is_none());
        assert_eq!(
            config.permissions_report_path(),
            PathBuf::from("/tmp/data_report.txt")
        );
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(ScanConfig::builder().root("").build().is_err());
        assert!(ScanConfig::builder().build().is_err());
    }

    #[test]
    fn test_builder_rejects_zero_threshold() {
        let result = ScanConfig::builder().root("/tmp").threshold(0u64).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_permissions_report_wins() {
        let config = ScanConfig::builder()
            .root("/tmp/data")
            .permissions_report(Some(PathBuf::from("/var/log/perm.txt")))
            .build()
            .unwrap();
        assert_eq!(
            config.permissions_report_path(),
            PathBuf::from("/var/log/perm.txt")
        );
    }
}
