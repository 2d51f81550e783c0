//! File input and output.
//!
//! Thin wrappers around the data model: survey CSV in, reservations
//! YAML in (plus a generated starter template out), human-readable
//! report and CSV export out. No planning logic lives here.

pub mod preferences;
pub mod report;
pub mod reservations;
