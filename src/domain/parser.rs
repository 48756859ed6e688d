//! Timesheet line parsing
//!
//! A line holds a date and a duration token separated by whitespace:
//!
//! ```text
//! 19-9-25 0950-1830
//! 19-9-26 8h        # took a day off
//! 19-9-27 1015-
//! ```
//!
//! The duration token is either an elapsed-time literal, a closed time range
//! or an open time range. Everything after `#` is a comment.

use super::duration::{parse_duration, DurationError};
use super::entry::Entry;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

/// Default date layout: two-digit year, numeric month, numeric day
pub const DEFAULT_DATE_LAYOUT: &str = "%y-%m-%d";

/// Default time-of-day layout: 24-hour `HHMM`
pub const DEFAULT_TIME_LAYOUT: &str = "%H%M";

/// Why a line could not be turned into an entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected '<date> <duration>', got '{0}'")]
    MalformedLine(String),

    #[error("invalid date '{token}': {source}")]
    InvalidDate {
        token: String,
        source: chrono::ParseError,
    },

    #[error("missing start of time range '{0}'")]
    MissingRangeStart(String),

    #[error("invalid time '{token}': {reason}")]
    InvalidTime { token: String, reason: String },

    #[error("invalid duration '{token}': {source}")]
    InvalidDuration {
        token: String,
        source: DurationError,
    },
}

/// Layouts and location used to interpret dates and times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// chrono format string for the date token
    pub date_layout: String,

    /// chrono format string for each side of a time range
    pub time_layout: String,

    /// Location in which times of day are interpreted
    pub location: Tz,
}

impl ParseOptions {
    pub fn new(date_layout: impl Into<String>, time_layout: impl Into<String>, location: Tz) -> Self {
        ParseOptions {
            date_layout: date_layout.into(),
            time_layout: time_layout.into(),
            location,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::new(DEFAULT_DATE_LAYOUT, DEFAULT_TIME_LAYOUT, Tz::UTC)
    }
}

/// Turns raw timesheet lines into entries
#[derive(Debug, Clone)]
pub struct EntryParser {
    options: ParseOptions,
}

impl EntryParser {
    pub fn new(options: ParseOptions) -> Self {
        EntryParser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse one line.
    ///
    /// Returns `Ok(None)` for lines that are blank once the comment is
    /// stripped.
    pub fn parse(&self, line: &str) -> Result<Option<Entry>, ParseError> {
        let content = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        }
        .trim();

        if content.is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        let [date_token, duration_token] = fields[..] else {
            return Err(ParseError::MalformedLine(content.to_string()));
        };

        let date = NaiveDate::parse_from_str(date_token, &self.options.date_layout).map_err(
            |source| ParseError::InvalidDate {
                token: date_token.to_string(),
                source,
            },
        )?;

        // A leading dash is a sign, any later dash separates a range
        let range_split = duration_token
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(idx, _)| idx);

        let entry = match range_split {
            Some(idx) => self.parse_range(date, &duration_token[..idx], &duration_token[idx + 1..])?,
            None => {
                let duration =
                    parse_duration(duration_token).map_err(|source| ParseError::InvalidDuration {
                        token: duration_token.to_string(),
                        source,
                    })?;
                Entry::absolute(date, duration)
            }
        };

        Ok(Some(entry))
    }

    fn parse_range(&self, date: NaiveDate, from: &str, to: &str) -> Result<Entry, ParseError> {
        // Unreachable from `parse`, which only splits on a dash after the
        // first character
        if from.is_empty() {
            return Err(ParseError::MissingRangeStart(format!("-{}", to)));
        }

        let start = self.time_on(date, from)?;
        if to.is_empty() {
            return Ok(Entry::open_range(date, start));
        }

        let end = self.time_on(date, to)?;
        Ok(Entry::closed_range(date, start, end))
    }

    /// Combine a time-of-day token with the entry date in the configured location
    fn time_on(&self, date: NaiveDate, token: &str) -> Result<DateTime<Tz>, ParseError> {
        let time = NaiveTime::parse_from_str(token, &self.options.time_layout).map_err(|e| {
            ParseError::InvalidTime {
                token: token.to_string(),
                reason: e.to_string(),
            }
        })?;

        self.options
            .location
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or_else(|| ParseError::InvalidTime {
                token: token.to_string(),
                reason: format!("does not exist on {} in {}", date, self.options.location),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn parser() -> EntryParser {
        EntryParser::new(ParseOptions::default())
    }

    fn parse(line: &str) -> Result<Option<Entry>, ParseError> {
        parser().parse(line)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_absolute_duration() {
        let entry = parse("20-03-02 5h55m").unwrap().unwrap();
        assert_eq!(entry.date, date(2020, 3, 2));
        assert_eq!(entry.duration, Some(parse_duration("5h55m").unwrap()));
        assert!(entry.from.is_none());
        assert!(entry.to.is_none());
    }

    #[test]
    fn test_negative_absolute_duration() {
        let entry = parse("20-03-02 -8h").unwrap().unwrap();
        assert_eq!(entry.duration, Some(Duration::hours(-8)));
    }

    #[test]
    fn test_closed_range() {
        let entry = parse("20-03-02 1000-1600").unwrap().unwrap();
        assert_eq!(entry.duration, Some(Duration::hours(6)));

        let from = entry.from.unwrap();
        let to = entry.to.unwrap();
        assert_eq!(from.date_naive(), date(2020, 3, 2));
        assert_eq!(to.date_naive(), date(2020, 3, 2));
        assert_eq!(to - from, Duration::hours(6));
    }

    #[test]
    fn test_reversed_range_is_negative() {
        let entry = parse("20-03-02 1600-1530").unwrap().unwrap();
        assert_eq!(entry.duration, Some(Duration::minutes(-30)));
    }

    #[test]
    fn test_open_range() {
        let entry = parse("20-03-02 1000-").unwrap().unwrap();
        assert!(entry.is_open_range());
        assert_eq!(entry.duration, None);
        assert_eq!(entry.from.unwrap().date_naive(), date(2020, 3, 2));
    }

    #[test]
    fn test_leading_dash_is_a_sign() {
        let err = parse("20-03-02 -1000").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidDuration {
                source: DurationError::MissingUnit,
                ..
            }
        ));
    }

    #[test]
    fn test_single_digit_month_and_day() {
        let entry = parse("19-9-5 8h").unwrap().unwrap();
        assert_eq!(entry.date, date(2019, 9, 5));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   \t ").unwrap(), None);
        assert_eq!(parse("# holiday").unwrap(), None);
        assert_eq!(parse("   # indented comment").unwrap(), None);

        let entry = parse("19-9-26 8h # took a day off").unwrap().unwrap();
        assert_eq!(entry.duration, Some(Duration::hours(8)));
    }

    #[test]
    fn test_extra_whitespace_between_fields() {
        let entry = parse("  20-03-02 \t 0800-0915  ").unwrap().unwrap();
        assert_eq!(entry.duration, Some(Duration::minutes(75)));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse("20-03-02"),
            Err(ParseError::MalformedLine(_))
        ));
        assert!(matches!(
            parse("20-03-02 8h extra"),
            Err(ParseError::MalformedLine(_))
        ));
    }

    #[test]
    fn test_invalid_date() {
        assert!(matches!(
            parse("2020-03-02 8h"),
            Err(ParseError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse("20-13-02 8h"),
            Err(ParseError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_invalid_time() {
        assert!(matches!(
            parse("20-03-02 1000-2561"),
            Err(ParseError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse("20-03-02 ab-1000"),
            Err(ParseError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_range_without_start() {
        let err = parser()
            .parse_range(date(2020, 3, 2), "", "1000")
            .unwrap_err();
        assert_eq!(err, ParseError::MissingRangeStart("-1000".to_string()));
    }

    #[test]
    fn test_overflowing_duration_is_rejected() {
        let err = parse("20-03-02 94522879700260684295381835.9h").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidDuration {
                source: DurationError::Overflow,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_duration() {
        let err = parse("20-03-02 8x").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidDuration {
                token: "8x".to_string(),
                source: DurationError::UnknownUnit("x".to_string()),
            }
        );
    }

    #[test]
    fn test_custom_layouts() {
        let parser = EntryParser::new(ParseOptions::new("%d.%m.%Y", "%H:%M", Tz::UTC));
        let entry = parser.parse("02.03.2020 08:10-14:22").unwrap().unwrap();
        assert_eq!(entry.date, date(2020, 3, 2));
        assert_eq!(
            entry.duration,
            Some(Duration::hours(6) + Duration::minutes(12))
        );
    }

    #[test]
    fn test_range_across_dst_change() {
        // Clocks in Berlin jumped from 02:00 to 03:00 on 2020-03-29
        let parser = EntryParser::new(ParseOptions::new(
            DEFAULT_DATE_LAYOUT,
            DEFAULT_TIME_LAYOUT,
            Tz::Europe__Berlin,
        ));

        let entry = parser.parse("20-03-29 0100-0400").unwrap().unwrap();
        assert_eq!(entry.duration, Some(Duration::hours(2)));

        assert!(matches!(
            parser.parse("20-03-29 0230-0400"),
            Err(ParseError::InvalidTime { .. })
        ));
    }
}
