//! Deadline text parsing and formatting.
//!
//! Deadlines are typed and displayed as local wall-clock time in the fixed
//! format `YYYY-MM-DD HH:MM` and stored as UTC instants.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::{ModelError, Result};

/// The `chrono` format string for deadline input and display.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Example shown to users next to the deadline field.
pub const DEADLINE_HINT: &str = "YYYY-MM-DD HH:MM";

/// Parses deadline text entered in the local time zone.
///
/// Leading and trailing whitespace is ignored; empty text means "no
/// deadline" and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`ModelError::InvalidDeadline`] when the text does not have the
/// exact `YYYY-MM-DD HH:MM` shape, names an impossible date or time, or
/// falls into a local-time gap.
///
/// # Examples
///
/// ```
/// use lazytodo_model::deadline::parse_deadline;
///
/// assert_eq!(parse_deadline("").unwrap(), None);
/// assert!(parse_deadline("2024-12-25 09:00").unwrap().is_some());
/// assert!(parse_deadline("2024-13-01 00:00").is_err());
/// ```
pub fn parse_deadline(text: &str) -> Result<Option<DateTime<Utc>>> {
    parse_deadline_in(text, &Local)
}

/// Parses deadline text as wall-clock time in `tz`.
///
/// See [`parse_deadline`] for the accepted format.
///
/// # Errors
///
/// Same as [`parse_deadline`].
pub fn parse_deadline_in<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<Option<DateTime<Utc>>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let invalid = |reason: &str| ModelError::InvalidDeadline {
        input: text.to_string(),
        reason: reason.to_string(),
    };

    if !has_deadline_shape(text) {
        return Err(invalid("expected YYYY-MM-DD HH:MM"));
    }

    let naive = NaiveDateTime::parse_from_str(text, DEADLINE_FORMAT)
        .map_err(|e| invalid(&e.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| Some(local.with_timezone(&Utc)))
        .ok_or_else(|| invalid("time does not exist in the local time zone"))
}

/// Formats a deadline for display in the local time zone.
#[must_use]
pub fn format_deadline(deadline: DateTime<Utc>) -> String {
    deadline
        .with_timezone(&Local)
        .format(DEADLINE_FORMAT)
        .to_string()
}

/// Checks the literal `dddd-dd-dd dd:dd` layout that `chrono` alone would
/// accept more loosely (single-digit fields, signed years).
fn has_deadline_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            10 => *byte == b' ',
            13 => *byte == b':',
            _ => byte.is_ascii_digit(),
        })
}
