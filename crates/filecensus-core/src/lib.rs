//! Core types and utilities for filecensus.
//!
//! This crate provides the fundamental data structures shared by the
//! scanning and analysis crates: file type categories and their running
//! size totals, run configuration, error types, path normalization,
//! permission inspection, and report-line size formatting.

mod category;
mod config;
mod error;
mod fmt;
mod path;
mod permissions;

pub use category::{Category, CategoryTotals};
pub use config::{DEFAULT_THRESHOLD, ScanConfig, ScanConfigBuilder};
pub use error::ScanError;
pub use fmt::format_size;
pub use path::normalize;
pub use permissions::{PermissionFlag, file_mode_string, unusual_permissions};
