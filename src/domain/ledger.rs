//! Running ledger of worked time per day, per ISO week, and overtime carry
//!
//! The ledger folds chronologically ordered entries into rows. Each row holds
//! the entry's own duration plus three running values:
//!
//! - day total: reset whenever the calendar day changes
//! - week total: reset whenever the ISO week changes
//! - carry: overtime (positive) or deficit (negative) for the whole run. The
//!   weekly quota is subtracted once at every week transition, and every
//!   entry's duration is added to it.

use super::entry::Entry;
use chrono::{DateTime, Datelike, Duration, NaiveDate};
use chrono_tz::Tz;

/// One aggregated entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub date: NaiveDate,
    pub from: Option<DateTime<Tz>>,
    pub to: Option<DateTime<Tz>>,
    pub duration: Duration,
    pub day_total: Duration,
    pub week_total: Duration,
    pub carry: Duration,

    /// Duration was computed from the current time (still working)
    pub open: bool,
}

/// Output of the ledger, in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerLine {
    Row(Row),

    /// Entry without a resolvable duration; it contributes to no total
    MissingDuration {
        date: NaiveDate,
        from: Option<DateTime<Tz>>,
    },
}

/// Aggregates entries against a weekly quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ledger {
    weekly_quota: Duration,
}

impl Ledger {
    pub fn new(weekly_quota: Duration) -> Self {
        Ledger { weekly_quota }
    }

    pub fn weekly_quota(&self) -> Duration {
        self.weekly_quota
    }

    /// Order entries, resolve a trailing open range against `now` and fold
    /// them into ledger lines.
    pub fn aggregate(&self, mut entries: Vec<Entry>, now: DateTime<Tz>) -> Vec<LedgerLine> {
        sort_chronologically(&mut entries);

        let last = entries.len().checked_sub(1);
        let mut week: Option<(i32, u32)> = None;
        let mut day: Option<(i32, u32)> = None;
        let mut week_total = Duration::zero();
        let mut day_total = Duration::zero();
        let mut carry = Duration::zero();
        let mut lines = Vec::with_capacity(entries.len());

        for (idx, entry) in entries.into_iter().enumerate() {
            let iso = entry.date.iso_week();
            let week_key = (iso.year(), iso.week());
            if week != Some(week_key) {
                week = Some(week_key);
                week_total = Duration::zero();
                carry -= self.weekly_quota;
            }

            let day_key = (entry.date.year(), entry.date.ordinal());
            if day != Some(day_key) {
                day = Some(day_key);
                day_total = Duration::zero();
            }

            let synthesized = if Some(idx) == last {
                resolve_open_range(&entry, now)
            } else {
                None
            };

            let Some(duration) = entry.duration.or(synthesized) else {
                lines.push(LedgerLine::MissingDuration {
                    date: entry.date,
                    from: entry.from,
                });
                continue;
            };

            day_total += duration;
            week_total += duration;
            carry += duration;

            lines.push(LedgerLine::Row(Row {
                date: entry.date,
                from: entry.from,
                to: entry.to,
                duration,
                day_total,
                week_total,
                carry,
                open: synthesized.is_some(),
            }));
        }

        lines
    }
}

/// Sort by date, then by start time within a day.
///
/// Entries without a start time sort before timed entries of the same day;
/// otherwise input order is kept.
pub fn sort_chronologically(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| (entry.date, entry.from));
}

/// Duration of a still-running open range: `now - from`, truncated to whole
/// minutes.
///
/// Only applies when `entry` is an open range dated on `now`'s calendar day.
pub fn resolve_open_range(entry: &Entry, now: DateTime<Tz>) -> Option<Duration> {
    if !entry.is_open_range() || entry.date != now.date_naive() {
        return None;
    }

    let from = entry.from?;
    Some(Duration::minutes((now - from).num_minutes()))
}
