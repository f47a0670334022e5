//! Classification and aggregation for filecensus.
//!
//! This crate turns the stream of filesystem entries discovered by the
//! walker into per-category size totals and side-channel reports:
//!
//! - **Classification** - content-signature detection with extension
//!   fallback ([`Classifier`])
//! - **Aggregation** - running totals, the unusual-permissions report and
//!   the big-files report ([`Analyzer`])
//!
//! # Example
//!
//! ```rust,no_run
//! use filecensus_analyze::{Analyzer, Classifier};
//! use filecensus_core::ScanConfig;
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let mut analyzer = Analyzer::new(&config, Classifier::new()).unwrap();
//!
//! analyzer.record_path("/path/to/scan/notes.txt".as_ref()).unwrap();
//! analyzer.print_summary();
//! analyzer.close().unwrap();
//! ```

mod analyzer;
mod classify;

pub use analyzer::{Analyzer, ReportSink};
pub use classify::{Classifier, ClassifyError};

// Re-export core types for convenience
pub use filecensus_core::{Category, CategoryTotals, ScanConfig, ScanError};
