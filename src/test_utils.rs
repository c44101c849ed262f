use crate::{CalendarDate, Month, Year, YearMonth};

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

pub fn year_month(year: u16, month: u8) -> YearMonth {
    YearMonth::new(Year::new(year).unwrap(), Month::new(month).unwrap())
}
