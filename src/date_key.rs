use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::Error;

/// Canonical `yyyy-MM-dd` identity of a single calendar day.
///
/// Parsing is strict: the key must be zero-padded and name an existing day.
/// Formatting always produces the string the key was parsed from.
///
/// ```
/// use calendar_view::DateKey;
///
/// let key: DateKey = "2024-02-29".parse().unwrap();
/// assert_eq!(key.to_string(), "2024-02-29");
/// assert_eq!((key.year(), key.month(), key.day()), (2024, 2, 29));
///
/// assert!("2024-2-29".parse::<DateKey>().is_err());
/// assert!("2023-02-29".parse::<DateKey>().is_err());
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Build a key from calendar components.
    ///
    /// ```
    /// use calendar_view::DateKey;
    ///
    /// assert_eq!(DateKey::from_ymd(2024, 2, 29).unwrap().to_string(), "2024-02-29");
    /// assert!(DateKey::from_ymd(2024, 13, 1).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, Error> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(Error::InvalidDate { year, month })
    }

    /// Get the day this key points to.
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::InvalidKeyFormat(s.to_string());
        let bytes = s.as_bytes();

        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }

        let digits = bytes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 4 && *i != 7)
            .all(|(_, b)| b.is_ascii_digit());

        if !digits {
            return Err(malformed());
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| malformed())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl fmt::Debug for DateKey {
    /// ```
    /// use calendar_view::DateKey;
    ///
    /// let key = DateKey::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(format!("{key:?}"), "DateKey(2024-02-29)");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateKey({self})")
    }
}
