//! Domain layer - Timesheet entries, parsing and aggregation

pub mod duration;
pub mod entry;
pub mod ledger;
pub mod parser;

pub use duration::{format_duration, parse_duration, DurationError};
pub use entry::Entry;
pub use ledger::{Ledger, LedgerLine, Row};
pub use parser::{EntryParser, ParseError, ParseOptions, DEFAULT_DATE_LAYOUT, DEFAULT_TIME_LAYOUT};
