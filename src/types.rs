use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};

use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR,
};

/// Conversions shared by the calendar newtypes: the raw integer out, and a
/// zero-padded `Display` of the given width.
macro_rules! calendar_field {
    ($name:ident, $raw:ty, $width:literal) => {
        impl From<$name> for $raw {
            fn from(value: $name) -> Self {
                value.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:0width$}", self.get(), width = $width)
            }
        }
    };
}

/// Calendar year, `1..=9999`. Serialized as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// `ParseError::InvalidYear` for 0 or anything above `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        match NonZeroU16::new(value) {
            Some(year) if value <= MAX_YEAR => Ok(Self(year)),
            _ => Err(ParseError::InvalidYear(value)),
        }
    }

    /// Const counterpart of [`Year::new`]; out-of-range input fails const evaluation.
    pub(crate) const fn new_const(value: u16) -> Self {
        match NonZeroU16::new(value) {
            Some(year) if value <= MAX_YEAR => Self(year),
            _ => panic!("year out of range"),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

calendar_field!(Year, u16, 4);

/// A calendar month, stored 1-based (January = 1).
///
/// Views that count months from zero go through [`Month::from_zero_based`]
/// and [`Month::zero_based`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// `ParseError::InvalidMonth` for 0 or anything above 12.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Ok(Self(month)),
            _ => Err(ParseError::InvalidMonth(value)),
        }
    }

    pub(crate) const fn new_const(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Self(month),
            _ => panic!("month out of range"),
        }
    }

    /// Month from a 0-based index (0 = January, 11 = December).
    ///
    /// # Errors
    /// `ParseError::InvalidMonth`, reported 1-based, if `index > 11`.
    pub fn from_zero_based(index: u8) -> Result<Self, ParseError> {
        Self::new(index.saturating_add(1))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    #[inline]
    pub const fn zero_based(self) -> u8 {
        self.0.get() - 1
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

calendar_field!(Month, u8, 2);

/// Day of month. Only constructible against a year and month, so it never
/// exceeds that month's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    /// # Errors
    /// `ParseError::InvalidDay` for 0 or a day past the end of `month`.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        match NonZeroU8::new(value) {
            Some(day) if value <= days_in_month(year.get(), month.get()) => Ok(Self(day)),
            _ => Err(ParseError::InvalidDay {
                year:  year.get(),
                month: month.get(),
                day:   value,
            }),
        }
    }

    pub(crate) const fn new_const(value: u8, year: Year, month: Month) -> Self {
        match NonZeroU8::new(value) {
            Some(day) if value <= days_in_month(year.get(), month.get()) => Self(day),
            _ => panic!("day out of range"),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

calendar_field!(Day, u8, 2);

/// Gregorian leap-year rule.
pub const fn is_leap_year(year: u16) -> bool {
    year % GREGORIAN_CYCLE == 0 || (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0)
}

/// Length of `month` (1-based) in `year`.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    match month {
        FEBRUARY if is_leap_year(year) => FEBRUARY_DAYS_LEAP,
        _ => DAYS_IN_MONTH[month as usize],
    }
}
