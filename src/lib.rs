//! trk - Timesheet ledger
//!
//! Reads a plain-text timesheet with one work entry per line and reports
//! worked time per day and per ISO week, together with a running overtime
//! balance against a weekly quota.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TrkError;
