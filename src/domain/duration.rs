//! Signed elapsed-time literals such as `6h12m0s`, `-8h` or `1.5h`

use chrono::Duration;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this cannot change a nanosecond value
const MAX_FRACTION_DIGITS: usize = 20;

/// Errors produced while reading an elapsed-time literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid number in duration")]
    InvalidNumber,

    #[error("missing unit in duration")]
    MissingUnit,

    #[error("unknown unit '{0}' in duration")]
    UnknownUnit(String),

    #[error("duration out of range")]
    Overflow,
}

/// Matches one `<number><unit>` component at the start of the input
fn component_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([0-9]*)(?:\.([0-9]*))?([^0-9.]*)").unwrap())
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse a signed elapsed-time literal.
///
/// A literal is an optional sign followed by one or more `<number><unit>`
/// components, e.g. `6h12m`, `-8h`, `1.5h` or `300ms`. Valid units are
/// `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. The bare literal `0` is
/// accepted without a unit.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let caps = component_regex()
            .captures(rest)
            .ok_or(DurationError::InvalidNumber)?;
        let whole = caps.get(1).map_or("", |m| m.as_str());
        let fraction = caps.get(2).map(|m| m.as_str());
        let unit = caps.get(3).map_or("", |m| m.as_str());

        if whole.is_empty() && fraction.map_or(true, str::is_empty) {
            return Err(DurationError::InvalidNumber);
        }
        if unit.is_empty() {
            return Err(DurationError::MissingUnit);
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| DurationError::Overflow)?
        };
        let mut value = whole.checked_mul(scale).ok_or(DurationError::Overflow)?;

        if let Some(digits) = fraction.filter(|f| !f.is_empty()) {
            let digits = &digits[..digits.len().min(MAX_FRACTION_DIGITS)];
            let numerator: u128 = digits.parse().map_err(|_| DurationError::InvalidNumber)?;
            let denominator = 10u128.pow(digits.len() as u32);
            value = value
                .checked_add(numerator * scale / denominator)
                .ok_or(DurationError::Overflow)?;
        }

        total = total.checked_add(value).ok_or(DurationError::Overflow)?;
        rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
    }

    let limit = if negative {
        i64::MAX as u128 + 1
    } else {
        i64::MAX as u128
    };
    if total > limit {
        return Err(DurationError::Overflow);
    }

    let nanos = if negative {
        (total as i128).wrapping_neg() as i64
    } else {
        total as i64
    };
    Ok(Duration::nanoseconds(nanos))
}

/// Render a duration in the canonical literal form, e.g. `-17h35m0s`.
///
/// Leading zero units are omitted (`25m0s`, `42s`), durations below one
/// second use the largest fitting sub-second unit (`1.5ms`) and zero is
/// `0s`. The output parses back to the same value for every duration that
/// fits in `i64` nanoseconds (about 292 years either way); longer durations
/// still render but `parse_duration` rejects them as out of range.
pub fn format_duration(duration: Duration) -> String {
    let total =
        duration.num_seconds() as i128 * NANOS_PER_SECOND as i128 + duration.subsec_nanos() as i128;
    if total == 0 {
        return "0s".to_string();
    }

    let sign = if total < 0 { "-" } else { "" };
    let magnitude = total.unsigned_abs();

    let body = if magnitude < NANOS_PER_SECOND {
        let (scale, unit) = if magnitude < NANOS_PER_MICRO {
            (1, "ns")
        } else if magnitude < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "µs")
        } else {
            (NANOS_PER_MILLI, "ms")
        };
        format!("{}{}", decimal(magnitude, scale), unit)
    } else {
        let seconds = decimal(magnitude % NANOS_PER_MINUTE, NANOS_PER_SECOND);
        let minutes = (magnitude / NANOS_PER_MINUTE) % 60;
        let hours = magnitude / NANOS_PER_HOUR;

        if hours > 0 {
            format!("{}h{}m{}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m{}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    };

    format!("{}{}", sign, body)
}

/// `value / scale` as a decimal with trailing fraction zeros trimmed
fn decimal(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }

    let width = scale.ilog10() as usize;
    let digits = format!("{:0width$}", fraction, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound_literals() {
        assert_eq!(
            parse_duration("6h12m").unwrap(),
            Duration::hours(6) + Duration::minutes(12)
        );
        assert_eq!(
            parse_duration("6h12m0s").unwrap(),
            Duration::hours(6) + Duration::minutes(12)
        );
        assert_eq!(parse_duration("90s").unwrap(), Duration::seconds(90));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::milliseconds(250));
        assert_eq!(parse_duration("3us").unwrap(), Duration::microseconds(3));
        assert_eq!(parse_duration("3µs").unwrap(), Duration::microseconds(3));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::nanoseconds(7));
    }

    #[test]
    fn test_parse_signs() {
        assert_eq!(parse_duration("-8h").unwrap(), Duration::hours(-8));
        assert_eq!(parse_duration("+8h").unwrap(), Duration::hours(8));
        assert_eq!(
            parse_duration("-1h20m").unwrap(),
            -(Duration::hours(1) + Duration::minutes(20))
        );
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("2.m").unwrap(), Duration::minutes(2));
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::zero());
        assert_eq!(parse_duration("-0").unwrap(), Duration::zero());
        assert_eq!(parse_duration("0s").unwrap(), Duration::zero());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert_eq!(parse_duration("-"), Err(DurationError::Empty));
        assert_eq!(parse_duration("1000"), Err(DurationError::MissingUnit));
        assert_eq!(parse_duration("-1000"), Err(DurationError::MissingUnit));
        assert_eq!(parse_duration("8h30"), Err(DurationError::MissingUnit));
        assert_eq!(
            parse_duration("5d"),
            Err(DurationError::UnknownUnit("d".to_string()))
        );
        assert_eq!(parse_duration("h"), Err(DurationError::InvalidNumber));
        assert_eq!(parse_duration(".h"), Err(DurationError::InvalidNumber));
        assert_eq!(
            parse_duration("99999999999999999999h"),
            Err(DurationError::Overflow)
        );
    }

    #[test]
    fn test_huge_whole_part_with_fraction_overflows() {
        assert_eq!(
            parse_duration("94522879700260684295381835.9h"),
            Err(DurationError::Overflow)
        );
    }

    #[test]
    fn test_round_trip_bounds() {
        let longest = Duration::nanoseconds(i64::MAX);
        assert_eq!(parse_duration(&format_duration(longest)).unwrap(), longest);

        let shortest = Duration::nanoseconds(i64::MIN);
        assert_eq!(parse_duration(&format_duration(shortest)).unwrap(), shortest);

        let beyond = longest + Duration::seconds(1);
        assert_eq!(
            parse_duration(&format_duration(beyond)),
            Err(DurationError::Overflow)
        );
    }

    #[test]
    fn test_format_hours_minutes_seconds() {
        assert_eq!(format_duration(Duration::zero()), "0s");
        assert_eq!(format_duration(Duration::minutes(25)), "25m0s");
        assert_eq!(format_duration(Duration::hours(1)), "1h0m0s");
        assert_eq!(format_duration(Duration::seconds(90)), "1m30s");
        assert_eq!(
            format_duration(Duration::hours(22) + Duration::minutes(40)),
            "22h40m0s"
        );
        assert_eq!(
            format_duration(-(Duration::hours(17) + Duration::minutes(35))),
            "-17h35m0s"
        );
    }

    #[test]
    fn test_format_sub_second() {
        assert_eq!(format_duration(Duration::milliseconds(1500)), "1.5s");
        assert_eq!(format_duration(Duration::microseconds(1500)), "1.5ms");
        assert_eq!(format_duration(Duration::nanoseconds(1500)), "1.5µs");
        assert_eq!(format_duration(Duration::nanoseconds(-12)), "-12ns");
    }

    #[test]
    fn test_formatted_values_parse_back() {
        let values = [
            Duration::hours(-24),
            Duration::minutes(25),
            -(Duration::hours(1) + Duration::minutes(20)),
            Duration::hours(24) + Duration::minutes(25),
            Duration::milliseconds(2750),
            Duration::nanoseconds(999_999_999),
        ];

        for value in values {
            assert_eq!(parse_duration(&format_duration(value)).unwrap(), value);
        }
    }
}
