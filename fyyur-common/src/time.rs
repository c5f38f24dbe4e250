//! Timestamp utilities
//!
//! Show start times are naive wall-clock timestamps; "now" is the local
//! wall clock at the moment of the read.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::{Error, Result};

/// Display format for show start times
pub const SHOW_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Formats accepted when parsing a submitted start time (besides RFC 3339)
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Format a start time for display (`YYYY/MM/DD HH:MM:SS`)
pub fn format_show_time(time: &NaiveDateTime) -> String {
    time.format(SHOW_TIME_FORMAT).to_string()
}

/// Parse a submitted start time
///
/// RFC 3339 input is converted to local time before the offset is dropped.
pub fn parse_start_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|_| Error::InvalidInput(format!("Unrecognized start time: {}", input)))
}
