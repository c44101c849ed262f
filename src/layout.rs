//! Geometry and per-day records for one month of the ring.
//!
//! Angles are in radians with SVG orientation (y grows downwards), so
//! `-π/2` points at 12 o'clock and angles grow clockwise. Day `d` of `N`
//! sits at `2π·(d − 0.5)/N − π/2`: the ring is cut into `N` equal wedges,
//! the first starting at 12 o'clock, and each day is centred in its wedge.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::{
    BAND_STEP, CalendarDate, CycleConfig, CycleLabels, DATE_RING_RATIO, Month, POINTER_OVERHANG,
    POINTER_TIP_GAP, RING_SIZE, Year, YearMonth, types,
};

/// Number of days in `month` of `year`.
pub const fn days_in_month(year: Year, month: Month) -> u8 {
    types::days_in_month(year.get(), month.get())
}

/// Angle (radians) of the centre of `day`'s wedge on a ring of `total` days.
pub fn day_angle(day: u8, total: u8) -> f64 {
    debug_assert!(day >= 1 && day <= total, "day {day} outside 1..={total}");
    TAU * ((f64::from(day) - 0.5) / f64::from(total)) - FRAC_PI_2
}

/// A point on the SVG canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One concentric label ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub period: usize,
    pub radius: f64,
}

/// Fixed radii of the ring: the date ring outermost, then one band per
/// cycle in ascending period order, each `BAND_STEP` further in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingGeometry {
    pub size:        f64,
    pub center:      f64,
    pub date_radius: f64,
    pub bands:       Vec<Band>,
}

impl RingGeometry {
    pub fn for_config(config: &CycleConfig) -> Self {
        let date_radius = RING_SIZE * DATE_RING_RATIO;
        let bands = config
            .periods()
            .enumerate()
            .map(|(tier, period)| Band {
                period,
                radius: BAND_STEP.mul_add(-((tier + 1) as f64), date_radius),
            })
            .collect();
        Self {
            size: RING_SIZE,
            center: RING_SIZE / 2.0,
            date_radius,
            bands,
        }
    }

    /// The point at `radius` from the centre in direction `angle`.
    pub fn point(&self, radius: f64, angle: f64) -> Point {
        Point {
            x: radius.mul_add(angle.cos(), self.center),
            y: radius.mul_add(angle.sin(), self.center),
        }
    }

    pub fn band(&self, period: usize) -> Option<&Band> {
        self.bands.iter().find(|b| b.period == period)
    }
}

/// Everything the renderer needs to draw one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthDayRecord {
    pub day:         u8,
    pub date:        CalendarDate,
    pub labels:      CycleLabels,
    /// Radians, see the module documentation.
    pub angle:       f64,
    pub is_today:    bool,
    pub is_selected: bool,
}

/// The line from the centre to today's day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    pub angle: f64,
    pub start: Point,
    pub end:   Point,
    pub tip:   Point,
}

/// A full month laid out on the ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLayout {
    pub year_month: YearMonth,
    pub geometry:   RingGeometry,
    pub days:       Vec<MonthDayRecord>,
    /// The selection actually shown; differs from the requested one when
    /// that fell outside this month.
    pub selected:   CalendarDate,
    pub pointer:    Option<Pointer>,
}

/// Lays out every day of `year_month`.
///
/// `selected` is honoured when it falls inside the month. Otherwise the
/// selection falls back to today's day when this is the current month, or
/// to day 1, and the adjusted date is reported in [`MonthLayout::selected`].
pub fn layout_month(
    year_month: YearMonth,
    config: &CycleConfig,
    today: &CalendarDate,
    selected: Option<&CalendarDate>,
) -> MonthLayout {
    let total = year_month.days();
    let today_day = year_month
        .contains(today)
        .then(|| today.day().get());
    let selected = selected
        .filter(|d| year_month.contains(d))
        .copied()
        .unwrap_or_else(|| year_month.date_clamped(today_day.unwrap_or(1)));
    let selected_day = selected.day().get();

    let days: Vec<MonthDayRecord> = (1..=total)
        .filter_map(|day| year_month.date(day).ok().map(|date| (day, date)))
        .map(|(day, date)| MonthDayRecord {
            day,
            date,
            labels: CycleLabels::for_date(&date, config),
            angle: day_angle(day, total),
            is_today: today_day == Some(day),
            is_selected: day == selected_day,
        })
        .collect();
    debug_assert_eq!(days.len(), usize::from(total));

    let geometry = RingGeometry::for_config(config);
    let pointer = today_day.map(|day| {
        let angle = day_angle(day, total);
        let length = geometry.date_radius + POINTER_OVERHANG;
        Pointer {
            angle,
            start: geometry.point(0.0, angle),
            end: geometry.point(length, angle),
            tip: geometry.point(length + POINTER_TIP_GAP, angle),
        }
    });

    debug!(month = %year_month, days = total, selected = %selected, "laid out month");
    MonthLayout {
        year_month,
        geometry,
        days,
        selected,
        pointer,
    }
}

impl MonthLayout {
    /// Title shown above the ring, e.g. `2024年 02月の環状月暦`.
    pub fn title(&self) -> String {
        format!(
            "{}年 {}月の環状月暦",
            self.year_month.year(),
            self.year_month.month()
        )
    }

    /// Heading of the textual listing, e.g. `2024年02月 日別サイクル`.
    pub fn list_heading(&self) -> String {
        format!(
            "{}年{}月 日別サイクル",
            self.year_month.year(),
            self.year_month.month()
        )
    }

    /// The same records without geometry, for non-graphical output.
    pub fn fallback_list(&self) -> Vec<ListEntry> {
        self.days
            .iter()
            .map(|record| ListEntry {
                day:    record.day,
                labels: record.labels.iter().map(|l| l.label.clone()).collect(),
            })
            .collect()
    }

    /// The record of the selected day.
    pub fn selected_record(&self) -> Option<&MonthDayRecord> {
        self.days.iter().find(|r| r.is_selected)
    }

    /// The record of today, when today is in this month.
    pub fn today_record(&self) -> Option<&MonthDayRecord> {
        self.days.iter().find(|r| r.is_today)
    }
}

/// One line of the textual listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub day:    u8,
    pub labels: Vec<String>,
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}日: {}", self.day, self.labels.join(" / "))
    }
}
