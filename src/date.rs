use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    DATE_SEPARATOR, Day, EPOCH, MAX_YEAR, MIN_DAY, Month, ParseError, Year,
    prelude::*,
    types::days_in_month,
};

/// Julian Day Number of 0001-01-01.
const MIN_DAY_NUMBER: i64 = 1_721_426;
/// Julian Day Number of 9999-12-31.
const MAX_DAY_NUMBER: i64 = 5_373_484;
const DAYS_PER_WEEK: i64 = 7;

/// A concrete Gregorian calendar date made of local wall-clock components.
///
/// There is no time-of-day and no timezone: two values that compare equal
/// are the same calendar day, whatever the clock said when they were built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl CalendarDate {
    /// The reference date every cycle is counted from.
    pub const EPOCH: Self = Self::from_const(EPOCH.0, EPOCH.1, EPOCH.2);

    /// Creates a validated date from raw components (month is 1-based).
    ///
    /// # Errors
    /// Returns the matching `ParseError` variant for the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from components that are already validated.
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    const fn from_const(year: u16, month: u8, day: u8) -> Self {
        let year = Year::new_const(year);
        let month = Month::new_const(month);
        Self {
            year,
            month,
            day: Day::new_const(day, year, month),
        }
    }

    /// Today's date on the local wall clock.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if the system clock is outside `1..=MAX_YEAR`.
    pub fn today() -> Result<Self, ParseError> {
        Self::try_from(chrono::Local::now().date_naive())
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// The year and month this date falls in.
    pub const fn year_month(&self) -> YearMonth {
        YearMonth {
            year:  self.year,
            month: self.month,
        }
    }

    /// Julian Day Number of this date (proleptic Gregorian).
    ///
    /// Consecutive calendar days differ by exactly one, so subtracting two
    /// day numbers never depends on daylight-saving transitions.
    pub fn day_number(&self) -> i64 {
        let year = i64::from(self.year.get());
        let month = i64::from(self.month.get());
        let day = i64::from(self.day.get());

        let a = (14 - month) / 12;
        let y = year + 4800 - a;
        let m = month + 12 * a - 3;
        day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
    }

    /// Inverse of [`CalendarDate::day_number`].
    /// Returns `None` when the day falls outside years `1..=MAX_YEAR`.
    pub fn from_day_number(number: i64) -> Option<Self> {
        if !(MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(&number) {
            return None;
        }
        let a = number + 32044;
        let b = (4 * a + 3) / 146_097;
        let c = a - 146_097 * b / 4;
        let d = (4 * c + 3) / 1461;
        let e = c - 1461 * d / 4;
        let m = (5 * e + 2) / 153;

        let day = e - (153 * m + 2) / 5 + 1;
        let month = m + 3 - 12 * (m / 10);
        let year = 100 * b + d - 4800 + m / 10;

        if !(1..=i64::from(MAX_YEAR)).contains(&year) {
            return None;
        }
        Self::new(
            u16::try_from(year).ok()?,
            u8::try_from(month).ok()?,
            u8::try_from(day).ok()?,
        )
        .ok()
    }

    /// The date `days` after this one (negative goes backwards).
    /// Returns `None` if the result would leave the supported year range.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        Self::from_day_number(self.day_number().checked_add(days)?)
    }

    /// Day of the week, 0 = Sunday through 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        // JDN 0 is a Monday.
        let index = (self.day_number() + 1).rem_euclid(DAYS_PER_WEEK);
        u8::try_from(index).unwrap_or_default()
    }

    fn parse_part<T: FromStr>(part: &str, width: usize, input: &str) -> Result<T, ParseError> {
        if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(input.to_owned()));
        }
        part.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(input.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {trimmed}"
            )));
        }
        let year = Self::parse_part::<u16>(parts[0], 4, trimmed)?;
        let month = Self::parse_part::<u8>(parts[1], 2, trimmed)?;
        let day = Self::parse_part::<u8>(parts[2], 2, trimmed)?;
        Self::new(year, month, day)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year())
            .map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidMonth(0))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidDay {
            year,
            month,
            day: 0,
        })?;
        Self::new(year, month, day)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A month of a specific year, the unit a ring calendar displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

impl YearMonth {
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    /// Number of days in this month.
    pub const fn days(&self) -> u8 {
        days_in_month(self.year.get(), self.month.get())
    }

    /// The `day`-th day of this month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the month has no such day.
    pub fn date(&self, day: u8) -> Result<CalendarDate, ParseError> {
        let day = Day::new(day, self.year, self.month)?;
        Ok(CalendarDate::from_parts(self.year, self.month, day))
    }

    /// The first day of this month.
    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::from_parts(self.year, self.month, Day::FIRST)
    }

    /// The `day`-th day of this month, clamped to the month's last day.
    pub fn date_clamped(&self, day: u8) -> CalendarDate {
        let day = day.clamp(MIN_DAY, self.days());
        self.date(day).unwrap_or_else(|_| self.first_day())
    }

    /// Whether `date` falls within this month.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month `offset` months away. Returns `None` outside `1..=MAX_YEAR`.
    pub fn shift(&self, offset: i32) -> Option<Self> {
        let index = i64::from(self.year.get()) * 12 + i64::from(self.month.zero_based());
        let shifted = index.checked_add(i64::from(offset))?;
        let year = u16::try_from(shifted.div_euclid(12)).ok()?;
        let month = u8::try_from(shifted.rem_euclid(12)).ok()?;
        Some(Self {
            year:  Year::new(year).ok()?,
            month: Month::from_zero_based(month).ok()?,
        })
    }
}

impl From<CalendarDate> for YearMonth {
    fn from(date: CalendarDate) -> Self {
        date.year_month()
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM, got {trimmed}"
            )));
        }
        let year = CalendarDate::parse_part::<u16>(parts[0], 4, trimmed)?;
        let month = CalendarDate::parse_part::<u8>(parts[1], 2, trimmed)?;
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, year_month};

    #[test]
    fn test_parse_and_display() {
        let d = "1984-01-01".parse::<CalendarDate>().unwrap();
        assert_eq!(d, date(1984, 1, 1));
        assert_eq!(d.to_string(), "1984-01-01");

        let d = " 2024-02-29 ".parse::<CalendarDate>().unwrap();
        assert_eq!(d.day().get(), 29);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        struct TestCase {
            input:       &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase {
                input:       "",
                description: "empty",
            },
            TestCase {
                input:       "2024-02",
                description: "missing day",
            },
            TestCase {
                input:       "2024-2-01",
                description: "single digit month",
            },
            TestCase {
                input:       "2023-02-29",
                description: "not a leap year",
            },
            TestCase {
                input:       "2024-13-01",
                description: "month out of range",
            },
            TestCase {
                input:       "2024-01-XX",
                description: "non-numeric day",
            },
            TestCase {
                input:       "2024-01-01-01",
                description: "too many separators",
            },
        ];

        for case in &cases {
            assert!(
                case.input.parse::<CalendarDate>().is_err(),
                "Expected failure for {:?} ({})",
                case.input,
                case.description
            );
        }
    }

    #[test]
    fn test_day_number_is_continuous() {
        let cases = [
            (date(1984, 1, 31), date(1984, 2, 1)),
            (date(1984, 2, 28), date(1984, 2, 29)),
            (date(1984, 2, 29), date(1984, 3, 1)),
            (date(1983, 12, 31), date(1984, 1, 1)),
            (date(2023, 2, 28), date(2023, 3, 1)),
        ];
        for (before, after) in cases {
            assert_eq!(
                after.day_number() - before.day_number(),
                1,
                "{before} -> {after}"
            );
        }
    }

    #[test]
    fn test_day_number_matches_julian_day() {
        assert_eq!(date(2000, 1, 1).day_number(), 2_451_545);
        assert_eq!(date(1, 1, 1).day_number(), MIN_DAY_NUMBER);
        assert_eq!(date(9999, 12, 31).day_number(), MAX_DAY_NUMBER);
    }

    #[test]
    fn test_from_day_number_inverts() {
        for d in [
            date(1, 1, 1),
            date(1600, 2, 29),
            date(1984, 1, 1),
            date(2024, 12, 31),
            date(9999, 12, 31),
        ] {
            assert_eq!(CalendarDate::from_day_number(d.day_number()), Some(d));
        }
        assert_eq!(date(9999, 12, 31).add_days(1), None);
        assert_eq!(date(1, 1, 1).add_days(-1), None);
    }

    #[test]
    fn test_out_of_range_day_numbers() {
        assert_eq!(CalendarDate::from_day_number(MIN_DAY_NUMBER - 1), None);
        assert_eq!(CalendarDate::from_day_number(MAX_DAY_NUMBER + 1), None);
        assert_eq!(CalendarDate::from_day_number(i64::MAX - 10), None);
        assert_eq!(CalendarDate::from_day_number(i64::MIN), None);
        assert_eq!(date(2024, 1, 1).add_days(i64::MAX / 2), None);
        assert_eq!(date(2024, 1, 1).add_days(i64::MIN / 2), None);
        assert_eq!(date(2024, 1, 1).add_days(i64::MAX), None);
    }

    #[test]
    fn test_consecutive_days_across_years() {
        let mut current = date(1983, 12, 1);
        let end = date(1985, 3, 1);
        let mut steps = 0;
        while current < end {
            let next = current.add_days(1).unwrap();
            let (y, m, d) = (current.year().get(), current.month().get(), current.day().get());
            let expected = if d < days_in_month(y, m) {
                date(y, m, d + 1)
            } else if m < 12 {
                date(y, m + 1, 1)
            } else {
                date(y + 1, 1, 1)
            };
            assert_eq!(next, expected, "day after {current}");
            assert_eq!(next.to_string().parse::<CalendarDate>(), Ok(next));
            assert_eq!(next.weekday(), (current.weekday() + 1) % 7, "weekday after {current}");
            assert_eq!(CalendarDate::from_day_number(next.day_number()), Some(next));
            current = next;
            steps += 1;
        }
        // Dec 1983 (31) + 1984 (366) + Jan and Feb 1985 (59)
        assert_eq!(steps, 31 + 366 + 59);
        assert_eq!(date(1983, 12, 1).add_days(steps), Some(end));
    }

    #[test]
    fn test_add_days() {
        assert_eq!(date(2024, 2, 28).add_days(1), Some(date(2024, 2, 29)));
        assert_eq!(date(2024, 1, 1).add_days(-1), Some(date(2023, 12, 31)));
        assert_eq!(date(1984, 1, 1).add_days(366), Some(date(1985, 1, 1)));
    }

    #[test]
    fn test_epoch_constant() {
        assert_eq!(CalendarDate::EPOCH, date(1984, 1, 1));
    }

    #[test]
    fn test_weekday() {
        assert_eq!(date(1984, 1, 1).weekday(), 0, "Sunday");
        assert_eq!(date(1984, 1, 2).weekday(), 1, "Monday");
        assert_eq!(date(2000, 1, 1).weekday(), 6, "Saturday");
        assert_eq!(date(2024, 2, 29).weekday(), 4, "Thursday");
    }

    #[test]
    fn test_from_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(CalendarDate::try_from(naive).unwrap(), date(2024, 2, 29));

        let naive = NaiveDate::from_ymd_opt(-5, 1, 1).unwrap();
        assert!(CalendarDate::try_from(naive).is_err());
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(1984, 1, 2);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""1984-01-02""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);

        assert!(serde_json::from_str::<CalendarDate>(r#""2024-02-30""#).is_err());
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym = "2024-02".parse::<YearMonth>().unwrap();
        assert_eq!(ym, year_month(2024, 2));
        assert_eq!(ym.to_string(), "2024-02");
        assert_eq!(ym.days(), 29);

        assert!("2024-2".parse::<YearMonth>().is_err());
        assert!("2024-00".parse::<YearMonth>().is_err());
        assert!("24-02".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_shift() {
        let jan = year_month(2024, 1);
        assert_eq!(jan.shift(-1), Some(year_month(2023, 12)));
        assert_eq!(jan.shift(1), Some(year_month(2024, 2)));
        assert_eq!(jan.shift(12), Some(year_month(2025, 1)));
        assert_eq!(jan.shift(-25), Some(year_month(2021, 12)));
        assert_eq!(year_month(9999, 12).shift(1), None);
        assert_eq!(year_month(1, 1).shift(-1), None);
    }

    #[test]
    fn test_year_month_dates() {
        let feb = year_month(2023, 2);
        assert_eq!(feb.first_day(), date(2023, 2, 1));
        assert_eq!(feb.date_clamped(31), date(2023, 2, 28));
        assert!(feb.date(29).is_err());
        assert!(feb.contains(&date(2023, 2, 14)));
        assert!(!feb.contains(&date(2024, 2, 14)));
    }
}
