//! Report date parsing.
//!
//! Raw report dates look like `"01/08/2020 12:00:00 AM"`. Only the leading
//! date part is meaningful; the time component is always midnight in the
//! source data and is ignored.

use chrono::NaiveDate;

/// Number of leading characters that hold the `MM/dd/yyyy` date.
pub const DATE_PREFIX_LEN: usize = 10;

/// Format of the leading date part.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parses the leading `MM/dd/yyyy` part of a raw report date.
///
/// Returns `None` when the string is shorter than [`DATE_PREFIX_LEN`] or the
/// prefix is not a valid calendar date.
#[must_use]
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..DATE_PREFIX_LEN)?;
    NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
}
