//! Read-only views over the report collection.
//!
//! Everything here is a pure function of a `read_all()` result; nothing is
//! cached between calls.
//!
//! Submodules:
//! - `feed`: recent-updates table, map markers, and per-issue tallies.

pub mod feed;
