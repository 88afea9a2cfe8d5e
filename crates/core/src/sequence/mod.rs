//! Sequential document code formatting.
//!
//! Every entity type carries human-readable codes like `PUR000042`:
//! a fixed prefix plus a zero-padded number. Allocation (the race-free
//! increment) lives in the database layer; the pure format/parse logic
//! lives here.

pub mod code;
pub mod kind;

pub use code::{format_code, next_number, parse_number};
pub use kind::SequenceKind;
