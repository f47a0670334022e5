//! Human-readable size formatting for report and summary lines.

/// Format a byte count as a one-decimal value with a binary unit.
///
/// Units step by 1024 through B, KB, MB and GB; a terabyte and beyond keep
/// scaling in GB since the reports define no larger unit. Zero renders as
/// `"0 B"`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes == 0 {
        return "0 B".to_string();
    }
    if bytes < KB {
        format!("{:.1} B", bytes as f64)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}
