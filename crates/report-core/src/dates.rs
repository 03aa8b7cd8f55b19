use chrono::NaiveDate;
use tracing::warn;

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses calendar dates from the variety of formats found in exported
/// analytics files.
pub struct DateParser;

impl DateParser {
    /// Attempt to parse a date string.
    ///
    /// Tries each format in a fixed order and returns the first match.
    /// Returns `None` (with a WARN log) when no format applies.
    pub fn parse(s: &str) -> Option<NaiveDate> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }

        const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y"];

        for fmt in FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }

        warn!("DateParser: could not parse date string \"{}\"", trimmed);
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
