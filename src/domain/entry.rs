//! Timesheet entry

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

/// One dated work session parsed from a timesheet line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Day the entry belongs to
    pub date: NaiveDate,

    /// Start of the session, set only for time ranges
    pub from: Option<DateTime<Tz>>,

    /// End of the session, set only for closed time ranges
    pub to: Option<DateTime<Tz>>,

    /// Worked time; absent for an open range that has not been resolved
    pub duration: Option<Duration>,
}

impl Entry {
    /// Entry given as an absolute elapsed time (`6h12m`)
    pub fn absolute(date: NaiveDate, duration: Duration) -> Self {
        Entry {
            date,
            from: None,
            to: None,
            duration: Some(duration),
        }
    }

    /// Entry given as a closed range (`0810-1422`).
    ///
    /// The duration is `to - from` and may be negative when `to` is earlier.
    pub fn closed_range(date: NaiveDate, from: DateTime<Tz>, to: DateTime<Tz>) -> Self {
        Entry {
            date,
            from: Some(from),
            to: Some(to),
            duration: Some(to - from),
        }
    }

    /// Entry given as an open range (`0930-`), i.e. still working
    pub fn open_range(date: NaiveDate, from: DateTime<Tz>) -> Self {
        Entry {
            date,
            from: Some(from),
            to: None,
            duration: None,
        }
    }

    /// Whether this entry has a start but neither an end nor a duration
    pub fn is_open_range(&self) -> bool {
        self.from.is_some() && self.to.is_none() && self.duration.is_none()
    }
}
