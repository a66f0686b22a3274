//! Calendar dates for sitemap `lastmod`, page stamps and blog refreshes.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub fn today() -> Self {
        let secs = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
        Self::from_days((secs / 86_400) as i64)
    }

    /// Civil date from days since 1970-01-01 (Howard Hinnant's algorithm).
    fn from_days(days: i64) -> Self {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as u16;
        Self { year, month, day }
    }

    /// Accepts `YYYY-MM-DD` with anything after it (`T09:00:00-05:00`).
    pub fn parse(s: &str) -> Option<Self> {
        let head = s.get(..10)?;
        let mut parts = head.split('-');
        let year = parts.next()?.parse().ok()?;
        let month: u8 = parts.next()?.parse().ok()?;
        let day: u8 = parts.next()?.parse().ok()?;
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { year, month, day })
    }

    /// `"January 5, 2026"` style dates.
    pub fn parse_long(s: &str) -> Option<Self> {
        let (month, rest) = s.trim().split_once(' ')?;
        let (day, year) = rest.split_once(", ")?;
        let month = month_number(month)?;
        Some(Self { year: year.trim().parse().ok()?, month, day: day.trim().parse().ok()? })
    }

    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    pub fn to_long(self) -> String {
        format!("{} {}, {}", MONTHS[usize::from(self.month - 1)], self.day, self.year)
    }

    /// First day of a `YYYY-MM` month.
    pub fn parse_month(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        let month: u8 = month.parse().ok()?;
        (1..=12).contains(&month).then_some(Self { year: year.parse().ok()?, month, day: 1 })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

pub fn month_number(name: &str) -> Option<u8> {
    MONTHS.iter().position(|m| *m == name).map(|i| i as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_days_epoch_and_leap() {
        assert_eq!(Date::from_days(0), Date::new(1970, 1, 1));
        assert_eq!(Date::from_days(19_782), Date::new(2024, 2, 29));
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(Date::parse("2026-01-25T10:00:00-05:00"), Some(Date::new(2026, 1, 25)));
        assert_eq!(Date::parse_long("January 5, 2026"), Some(Date::new(2026, 1, 5)));
        assert_eq!(Date::parse("2026-13-01"), None);
        assert_eq!(Date::new(2026, 2, 9).to_long(), "February 9, 2026");
    }
}
