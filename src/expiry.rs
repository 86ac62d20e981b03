//! Remaining validity and the printed report.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use colored::Color;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Layout of Go's `time.Time` string form, e.g. `2025-03-01 12:00:00 +0000 UTC`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z %Z";

pub const EXPIRED_WARNING: &str = "Warning: The certificate has already expired!";

const RESET: &str = "\x1b[0m";

/// Whole days from now until `expiry`. Negative once expired.
pub fn calculate_remaining_days(expiry: DateTime<Utc>) -> i64 {
    remaining_days_at(expiry, Utc::now())
}

/// Whole days between `now` and `expiry`, truncated toward zero.
pub fn remaining_days_at(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expiry - now).num_seconds() / SECONDS_PER_DAY
}

pub fn is_expired_at(expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expiry < now
}

/// Formats a timestamp the way the report prints it.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Expiry date of a certificate and how much of it is left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryReport {
    pub expiry: DateTime<Utc>,
    pub remaining_days: i64,
    pub expired: bool,
}

impl ExpiryReport {
    pub fn new(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        ExpiryReport {
            expiry,
            remaining_days: remaining_days_at(expiry, now),
            expired: is_expired_at(expiry, now),
        }
    }

    /// Writes the report, preceded by a red warning when expired.
    ///
    /// The warning is always wrapped in ANSI red, whether or not `out` is a
    /// terminal.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.expired {
            writeln!(
                out,
                "\x1b[{}m{}{}",
                Color::Red.to_fg_str(),
                EXPIRED_WARNING,
                RESET
            )?;
        }
        writeln!(out, "Certificate Expiry Date: {}", format_timestamp(&self.expiry))?;
        writeln!(out, "Remaining Days: {}", self.remaining_days)
    }
}
