//! Code formatting and parsing.

use super::kind::SequenceKind;

/// Width of the zero-padded numeric suffix.
const CODE_WIDTH: usize = 6;

/// Formats a code: prefix plus zero-padded number, e.g. `PUR000042`.
#[must_use]
pub fn format_code(kind: SequenceKind, number: u64) -> String {
    format!("{}{:0width$}", kind.prefix(), number, width = CODE_WIDTH)
}

/// Parses the numeric suffix out of a code for the given kind.
///
/// Returns `None` when the prefix does not match or the suffix is not a
/// number.
#[must_use]
pub fn parse_number(kind: SequenceKind, code: &str) -> Option<u64> {
    let suffix = code.strip_prefix(kind.prefix())?;
    suffix.parse().ok()
}

/// The next number in a sequence, starting at 1 when none exists yet.
#[must_use]
pub fn next_number(last: Option<u64>) -> u64 {
    last.map_or(1, |n| n + 1)
}
