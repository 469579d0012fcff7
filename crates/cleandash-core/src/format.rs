//! Display formatting shared by listings, exports and logs.

use std::time::SystemTime;

use chrono::{DateTime, Local};

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Format a byte count as megabytes with two decimals, e.g. `"1.50 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MEGABYTE)
}

/// Format a timestamp as local `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
