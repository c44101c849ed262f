//! Prelude module for ring_calendar crate.
//!
//! Re-exports the types most callers need, plus the derive_more macros
//! used inside the crate.

pub(crate) use derive_more::Display;

pub use crate::{
    CalendarDate, CycleConfig, CycleLabels, MonthLayout, Session, SettingsStore, ViewState,
    YearMonth, layout_month,
};
