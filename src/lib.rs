//! A ring-shaped month calendar annotated with repeating day cycles.
//!
//! Every day carries one label per cycle (periods 2, 3, 5 and 7 by default),
//! chosen by reducing the day's offset from a fixed epoch modulo the period.
//! The month is laid out on concentric rings: the date ring outermost, one
//! label band per cycle inside it.
//!
//! ```
//! use ring_calendar::{CalendarDate, CycleConfig, layout_month};
//!
//! let config = CycleConfig::defaults();
//! let today: CalendarDate = "2024-02-10".parse().unwrap();
//! let layout = layout_month(today.year_month(), &config, &today, None);
//!
//! assert_eq!(layout.days.len(), 29);
//! assert_eq!(layout.selected, today);
//! ```

mod consts;
mod cycle;
mod date;
mod engine;
mod layout;
pub mod prelude;
mod render;
mod session;
mod store;
mod types;
mod view;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use cycle::{ConfigError, CycleConfig, CycleDefinition, ImportError, MIN_PERIOD};
pub use date::{CalendarDate, YearMonth};
pub use engine::{ClockLabels, CycleLabel, CycleLabels, cycle_index, cycle_label, cycle_stamp, day_offset};
pub use layout::{
    Band, ListEntry, MonthDayRecord, MonthLayout, Point, Pointer, RingGeometry, day_angle, days_in_month,
    layout_month,
};
pub use render::{SvgDocument, TextListing, escape_xml, render_svg, render_text};
pub use session::{DayDetail, Session, SessionError};
pub use store::{SettingsStore, StoreError, export_file_name};
pub use types::{Day, Month, Year, is_leap_year};
pub use view::{ViewState, parse_fragment};

use derive_more::Display;

/// Error type for textual calendar input (dates, months, fragments).
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    /// Input is not shaped like `YYYY-MM-DD` / `YYYY-MM`.
    #[display(fmt = "Malformed calendar input: {_0}")]
    InvalidFormat(String),
    /// Year is 0 or above `MAX_YEAR`.
    #[display(fmt = "Year {} outside 1..={}", "_0", MAX_YEAR)]
    InvalidYear(u16),
    /// Month is 0 or above 12.
    #[display(fmt = "Month {} outside 1..={}", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    /// Day is 0 or past the end of its month.
    #[display(fmt = "{year}-{month:02} has no day {day}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    /// Fragment lacks the `#` or `#!` prefix.
    #[display(fmt = "Not a month fragment (expected #YYYY-MM): {_0}")]
    InvalidFragment(String),
    /// Nothing but whitespace.
    #[display(fmt = "Empty calendar input")]
    EmptyInput,
}

impl std::error::Error for ParseError {}
