//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for resource dates: front
//! matter `date` values, date-prefixed filenames (`2023-5-1-post.md`) and the
//! build timestamp used as the date fallback.
//!
//! # Accepted input
//!
//! ```text
//! 2024-06-15
//! 2024-6-5                     (1-2 digit month/day)
//! 24-06-15                     (2 digit year -> 2024)
//! 2024-06-15T14:30:45Z
//! 2024-06-15 14:30
//! 2024-06-15 14:30:45 +0200    (offset normalized to UTC)
//! 2024-06-15T14:30:45.250-05:00
//! ```

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use regex::Regex;
use serde::{Serialize, Serializer};

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{2,4})-([0-9]{1,2})-([0-9]{1,2})(?:[T ]([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?(?:\.[0-9]+)?)?[ ]*(Z|[+-][0-9]{2}:?[0-9]{2})?$",
    )
    .expect("date pattern is valid")
});

/// UTC datetime without timezone complexity.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Current wall-clock time in UTC.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self::from_unix(secs)
    }

    /// Parse any of the accepted formats (see module docs).
    ///
    /// Returns `None` for malformed or out-of-range values.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = DATE_RE.captures(s.trim())?;
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        let raw_year = caps.get(1)?;
        let mut year = num(1)?;
        if raw_year.as_str().len() == 2 {
            year += 2000;
        }
        let dt = Self::new(
            u16::try_from(year).ok()?,
            u8::try_from(num(2)?).ok()?,
            u8::try_from(num(3)?).ok()?,
            u8::try_from(num(4).unwrap_or(0)).ok()?,
            u8::try_from(num(5).unwrap_or(0)).ok()?,
            u8::try_from(num(6).unwrap_or(0)).ok()?,
        );
        dt.validate().ok()?;

        match caps.get(7).map(|m| m.as_str()) {
            None | Some("Z") => Some(dt),
            Some(offset) => {
                let offset = parse_offset(offset)?;
                Some(Self::from_unix(dt.to_unix() - offset))
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Seconds since the Unix epoch.
    pub fn to_unix(self) -> i64 {
        let days = days_from_civil(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        );
        days * 86_400
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self::new(
            year.clamp(0, i64::from(u16::MAX)) as u16,
            month as u8,
            day as u8,
            (rem / 3600) as u8,
            ((rem / 60) % 60) as u8,
            (rem % 60) as u8,
        )
    }

    /// Format as RFC 3339 (ISO 8601).
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl Serialize for DateTimeUtc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl std::fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Parse `+HHMM`, `+HH:MM`, `-HHMM` into seconds east of UTC.
fn parse_offset(s: &str) -> Option<i64> {
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits: String = s[1..].chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i64 = digits[..2].parse().ok()?;
    let minutes: i64 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of `days_from_civil`: `(year, month, day)`.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        assert_eq!(
            DateTimeUtc::parse("2024-06-15"),
            Some(DateTimeUtc::from_ymd(2024, 6, 15))
        );
    }

    #[test]
    fn test_parse_short_components() {
        assert_eq!(
            DateTimeUtc::parse("2023-5-1"),
            Some(DateTimeUtc::from_ymd(2023, 5, 1))
        );
        assert_eq!(
            DateTimeUtc::parse("23-05-01"),
            Some(DateTimeUtc::from_ymd(2023, 5, 1))
        );
    }

    #[test]
    fn test_parse_with_time() {
        assert_eq!(
            DateTimeUtc::parse("2024-06-15T14:30:45Z"),
            Some(DateTimeUtc::new(2024, 6, 15, 14, 30, 45))
        );
        assert_eq!(
            DateTimeUtc::parse("2024-06-15 14:30"),
            Some(DateTimeUtc::new(2024, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn test_parse_offset_normalized() {
        assert_eq!(
            DateTimeUtc::parse("2024-06-15 01:30:00 +0200"),
            Some(DateTimeUtc::new(2024, 6, 14, 23, 30, 0))
        );
        assert_eq!(
            DateTimeUtc::parse("2024-12-31T22:00:00-05:00"),
            Some(DateTimeUtc::new(2025, 1, 1, 3, 0, 0))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(DateTimeUtc::parse("yesterday"), None);
        assert_eq!(DateTimeUtc::parse("2024-13-01"), None);
        assert_eq!(DateTimeUtc::parse("2023-02-29"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T25:00"), None);
        assert_eq!(DateTimeUtc::parse(""), None);
    }

    #[test]
    fn test_validate_leap_year() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_unix_conversion() {
        assert_eq!(DateTimeUtc::from_ymd(1970, 1, 1).to_unix(), 0);
        assert_eq!(DateTimeUtc::new(2000, 3, 1, 0, 0, 1).to_unix(), 951_868_801);
        let dt = DateTimeUtc::new(2024, 2, 29, 23, 59, 59);
        assert_eq!(DateTimeUtc::from_unix(dt.to_unix()), dt);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = DateTimeUtc::from_ymd(2023, 1, 1);
        let b = DateTimeUtc::from_ymd(2023, 1, 2);
        let c = DateTimeUtc::new(2023, 1, 1, 10, 0, 0);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn test_rfc3339_and_serialize() {
        let dt = DateTimeUtc::new(2024, 6, 5, 4, 3, 2);
        assert_eq!(dt.to_rfc3339(), "2024-06-05T04:03:02Z");
        assert_eq!(
            serde_json::to_value(dt).unwrap(),
            serde_json::json!("2024-06-05T04:03:02Z")
        );
    }
}
