//! Directory traversal engine for filecensus.
//!
//! This crate walks a directory tree breadth-first and feeds every
//! discovered entry to the analyzer. Key properties:
//!
//! - **Queue-driven** - strictly one directory expanded at a time,
//!   preserving breadth-first discovery order
//! - **Cycle-safe** - canonical paths are tracked in a visited set, so
//!   symlink loops are reported instead of followed forever
//! - **Fault-tolerant** - unreadable directories and vanishing entries
//!   are reported to stderr and skipped, never aborting the run
//!
//! # Example
//!
//! ```rust,no_run
//! use filecensus_analyze::{Analyzer, Classifier};
//! use filecensus_core::ScanConfig;
//! use filecensus_scan::Walker;
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let mut analyzer = Analyzer::new(&config, Classifier::new()).unwrap();
//! let mut walker = Walker::from_config(&config);
//!
//! walker.run(&config.root, &mut analyzer).unwrap();
//! analyzer.print_summary().unwrap();
//! analyzer.close().unwrap();
//! ```

mod walker;

pub use walker::Walker;

// Re-export core types for convenience
pub use filecensus_core::{ScanConfig, ScanError};
