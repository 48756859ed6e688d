//! Timesheet file reading

use crate::domain::{Entry, EntryParser};
use crate::error::{Result, TrkError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Reads timesheet sources into entries, skipping lines that fail to parse
#[derive(Debug, Clone)]
pub struct TimesheetReader {
    parser: EntryParser,
}

impl TimesheetReader {
    pub fn new(parser: EntryParser) -> Self {
        TimesheetReader { parser }
    }

    /// Read all entries from a file.
    ///
    /// Failing to open or read the file is fatal; malformed lines are logged
    /// and skipped.
    pub fn read_path(&self, path: &Path) -> Result<Vec<Entry>> {
        let file = File::open(path).map_err(|source| TrkError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = self
            .read(BufReader::new(file))
            .map_err(|source| TrkError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Read {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }

    /// Read all entries from an in-memory timesheet
    pub fn read_str(&self, content: &str) -> Vec<Entry> {
        content
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| self.parse_line(idx + 1, line))
            .collect()
    }

    /// Read all entries from any buffered source, preserving input order
    pub fn read<R: BufRead>(&self, reader: R) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(entry) = self.parse_line(idx + 1, &line) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn parse_line(&self, line_number: usize, line: &str) -> Option<Entry> {
        match self.parser.parse(line) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Failed to parse entry on line {}: {:?}: {}",
                    line_number, line, e
                );
                None
            }
        }
    }
}
