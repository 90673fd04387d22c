//! # Scansheet Core
//!
//! The record-extraction and normalization engine.
//!
//! A scan report goes through two passes: [`schema`] discovers the set of
//! fields present below the hosts, [`extract`] flattens every scored finding
//! into one record over that set. [`format`] narrows and orders the records
//! for output. [`merge`] combines tables written by earlier runs.
//!
//! [`pipeline`] wires these steps to the table ports of `scansheet-common`.

pub mod document;
pub mod extract;
pub mod format;
pub mod merge;
pub mod pipeline;
pub mod schema;
pub mod severity;
