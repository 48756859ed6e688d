//! Timesheet report use case
//!
//! Reads a timesheet and folds its entries into ledger lines.

use crate::domain::{format_duration, EntryParser, Ledger, LedgerLine};
use crate::error::Result;
use crate::infrastructure::{Config, TimesheetReader};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::Path;
use tracing::info;

/// Service producing the ledger for one timesheet
pub struct ReportService {
    reader: TimesheetReader,
    ledger: Ledger,
    location: Tz,
}

impl ReportService {
    /// Create a report service from a resolved configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a layout is invalid or the location is unknown.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let options = config.parse_options()?;
        let location = options.location;

        Ok(ReportService {
            reader: TimesheetReader::new(EntryParser::new(options)),
            ledger: Ledger::new(config.weekly),
            location,
        })
    }

    /// Read `path` and aggregate it against the current time
    pub fn execute(&self, path: &Path) -> Result<Vec<LedgerLine>> {
        let now = Utc::now().with_timezone(&self.location);
        self.execute_at(path, now)
    }

    /// Read `path` and aggregate it against a given current time
    pub fn execute_at(&self, path: &Path, now: DateTime<Tz>) -> Result<Vec<LedgerLine>> {
        let entries = self.reader.read_path(path)?;
        info!(
            "Aggregating {} entries against a weekly quota of {}",
            entries.len(),
            format_duration(self.ledger.weekly_quota())
        );
        Ok(self.ledger.aggregate(entries, now))
    }

    /// Aggregate timesheet content that is already in memory
    pub fn build(&self, content: &str, now: DateTime<Tz>) -> Vec<LedgerLine> {
        self.ledger.aggregate(self.reader.read_str(content), now)
    }
}
