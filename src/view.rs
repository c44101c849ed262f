use serde::Serialize;
use tracing::debug;

use crate::{CalendarDate, CycleConfig, MonthLayout, ParseError, YearMonth, layout_month};

/// Fragment markers accepted in front of `YYYY-MM`.
const FRAGMENT_PREFIXES: [&str; 2] = ["#!", "#"];

/// What the interactive session is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    view:     YearMonth,
    selected: CalendarDate,
    today:    CalendarDate,
}

impl ViewState {
    /// Shows the month of `today` with today selected.
    pub const fn new(today: CalendarDate) -> Self {
        Self {
            view: today.year_month(),
            selected: today,
            today,
        }
    }

    /// Shows `view`, selecting today's day-of-month there if it exists, else day 1.
    pub fn for_month(view: YearMonth, today: CalendarDate) -> Self {
        let selected = view
            .date(today.day().get())
            .unwrap_or_else(|_| view.first_day());
        Self {
            view,
            selected,
            today,
        }
    }

    /// Restores the view from a `#YYYY-MM` (or `#!YYYY-MM`) fragment.
    /// Anything unparsable shows the current month instead.
    pub fn from_fragment(fragment: &str, today: CalendarDate) -> Self {
        match parse_fragment(fragment) {
            Ok(view) => Self::for_month(view, today),
            Err(e) => {
                debug!(fragment, error = %e, "ignoring fragment");
                Self::new(today)
            },
        }
    }

    /// The fragment that links back to this view, e.g. `#2024-02`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.view)
    }

    pub const fn view(&self) -> YearMonth {
        self.view
    }

    pub const fn selected(&self) -> CalendarDate {
        self.selected
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    /// Moves the view by `offset` months, keeping the selected day-of-month
    /// and clamping it to the length of the new month.
    /// Returns `false` (and changes nothing) past the supported year range.
    pub fn shift_month(&mut self, offset: i32) -> bool {
        let Some(view) = self.view.shift(offset) else {
            return false;
        };
        self.view = view;
        self.selected = view.date_clamped(self.selected.day().get());
        true
    }

    /// Jumps back to today's month and selects today.
    pub const fn go_today(&mut self) {
        self.view = self.today.year_month();
        self.selected = self.today;
    }

    /// Selects `date`, moving the view to its month.
    pub const fn select(&mut self, date: CalendarDate) {
        self.view = date.year_month();
        self.selected = date;
    }

    /// Updates today's date without touching the view or the selection.
    pub const fn tick(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Lays out the viewed month and keeps the selection the layout settled on.
    pub fn render(&mut self, config: &CycleConfig) -> MonthLayout {
        let layout = layout_month(self.view, config, &self.today, Some(&self.selected));
        self.selected = layout.selected;
        layout
    }
}

/// Parses a `#YYYY-MM` or `#!YYYY-MM` fragment.
///
/// # Errors
/// Returns `ParseError::InvalidFragment` without a leading `#`, otherwise
/// whatever [`YearMonth`] parsing reports.
pub fn parse_fragment(fragment: &str) -> Result<YearMonth, ParseError> {
    let trimmed = fragment.trim();
    let body = FRAGMENT_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .ok_or_else(|| ParseError::InvalidFragment(trimmed.to_owned()))?;
    body.parse()
}
