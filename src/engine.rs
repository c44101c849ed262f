//! Day offsets and cycle labels.
//!
//! Every label is a pure function of the date, the period and the label list:
//! the day offset from [`CalendarDate::EPOCH`] is reduced modulo the period and
//! used as an index. Nothing is recalibrated per month or year.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{CalendarDate, CycleConfig, ParseError};

/// Whole days from `epoch` to `date`; negative before the epoch.
///
/// Both sides are calendar dates, so the difference is exact across month,
/// year and daylight-saving boundaries.
pub fn day_offset(date: &CalendarDate, epoch: &CalendarDate) -> i64 {
    date.day_number() - epoch.day_number()
}

/// Position of `offset` within a cycle of `period`, always in `0..period`.
///
/// Equivalent to `((offset % period) + period) % period`.
pub fn cycle_index(offset: i64, period: usize) -> usize {
    debug_assert!(period > 0, "cycle period must be positive");
    let period = i64::try_from(period.max(1)).unwrap_or(i64::MAX);
    usize::try_from(offset.rem_euclid(period)).unwrap_or_default()
}

/// Label of `date` in the cycle of `period`, or `None` if `config` has no such cycle.
///
/// A missing or blank slot yields the 1-based position as text, so the
/// result is never empty even for a configuration that skipped normalization.
pub fn cycle_label(date: &CalendarDate, period: usize, config: &CycleConfig) -> Option<String> {
    let def = config.get(period)?;
    let index = cycle_index(day_offset(date, &CalendarDate::EPOCH), def.period());
    Some(label_or_position(def.label(index), index))
}

/// One label per configured cycle, concatenated in ascending period order.
pub fn cycle_stamp(date: &CalendarDate, config: &CycleConfig) -> String {
    CycleLabels::for_date(date, config).stamp()
}

fn label_or_position(label: Option<&str>, index: usize) -> String {
    match label.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => (index + 1).to_string(),
    }
}

/// The label a single cycle assigns to a date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CycleLabel {
    pub period: usize,
    pub index:  usize,
    pub label:  String,
}

/// Every cycle's label for one date, in ascending period order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CycleLabels(Vec<CycleLabel>);

impl CycleLabels {
    pub fn for_date(date: &CalendarDate, config: &CycleConfig) -> Self {
        let offset = day_offset(date, &CalendarDate::EPOCH);
        Self(
            config
                .iter()
                .map(|def| {
                    let index = cycle_index(offset, def.period());
                    CycleLabel {
                        period: def.period(),
                        index,
                        label: label_or_position(def.label(index), index),
                    }
                })
                .collect(),
        )
    }

    /// Label for `period`, if that cycle is configured.
    pub fn get(&self, period: usize) -> Option<&str> {
        self.0
            .iter()
            .find(|l| l.period == period)
            .map(|l| l.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CycleLabel> {
        self.0.iter()
    }

    /// All labels joined with no separator.
    pub fn stamp(&self) -> String {
        self.join("")
    }

    pub fn join(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(|l| l.label.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// The two lines of the live clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockLabels {
    /// `YYYY-MM-DD (<cycle stamp>)`
    pub date_label: String,
    /// `HH:MM:SS`
    pub time_label: String,
}

impl ClockLabels {
    /// Labels for the wall-clock instant `now`.
    ///
    /// Each call starts from `now` alone, so a skipped tick never shifts later ones.
    ///
    /// # Errors
    /// Returns `ParseError` if `now` is outside the supported year range.
    pub fn at(now: NaiveDateTime, config: &CycleConfig) -> Result<Self, ParseError> {
        let date = CalendarDate::try_from(now.date())?;
        Ok(Self {
            date_label: format!("{date} ({})", cycle_stamp(&date, config)),
            time_label: now.format("%H:%M:%S").to_string(),
        })
    }

    /// Labels for the current local time.
    ///
    /// # Errors
    /// Returns `ParseError` if the system clock is outside the supported year range.
    pub fn now(config: &CycleConfig) -> Result<Self, ParseError> {
        Self::at(chrono::Local::now().naive_local(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CycleDefinition, test_utils::date};
    use chrono::NaiveDate;

    #[test]
    fn test_day_offset_around_epoch() {
        let epoch = CalendarDate::EPOCH;
        assert_eq!(day_offset(&epoch, &epoch), 0);
        assert_eq!(day_offset(&date(1984, 1, 2), &epoch), 1);
        assert_eq!(day_offset(&date(1983, 12, 31), &epoch), -1);
        assert_eq!(day_offset(&date(1985, 1, 1), &epoch), 366);
    }

    #[test]
    fn test_day_offset_is_monotonic_across_dst_dates() {
        // Common DST switch days; offsets must still step by exactly one.
        for (y, m, d) in [(2024, 3, 10), (2024, 3, 31), (2024, 10, 27), (2024, 11, 3)] {
            let day = date(y, m, d);
            let next = day.add_days(1).unwrap();
            assert_eq!(next, date(y, m, d + 1));
            assert_eq!(
                day_offset(&next, &CalendarDate::EPOCH) - day_offset(&day, &CalendarDate::EPOCH),
                1
            );
        }
    }

    #[test]
    fn test_cycle_index_is_periodic_and_in_range() {
        for period in [2_usize, 3, 5, 7] {
            let p = i64::try_from(period).unwrap();
            for offset in -50..50 {
                let index = cycle_index(offset, period);
                assert!(index < period, "offset {offset}, period {period}");
                assert_eq!(index, cycle_index(offset + p, period));
                assert_eq!(index, cycle_index(offset - 10 * p, period));
            }
        }
    }

    #[test]
    fn test_cycle_index_negative_offsets() {
        assert_eq!(cycle_index(-1, 3), 2);
        assert_eq!(cycle_index(-3, 3), 0);
        assert_eq!(cycle_index(-8, 7), 6);
        assert_eq!(cycle_index(i64::MIN, 2), 0);
    }

    #[test]
    fn test_epoch_labels() {
        let config = CycleConfig::defaults();
        let labels = CycleLabels::for_date(&CalendarDate::EPOCH, &config);
        assert_eq!(labels.join(","), "陰,石,風,日");

        let labels = CycleLabels::for_date(&date(1984, 1, 2), &config);
        assert_eq!(labels.join(","), "陽,鋏,雨,月");
    }

    #[test]
    fn test_seven_day_cycle_tracks_weekday() {
        let config = CycleConfig::defaults();
        let names = ["日", "月", "火", "水", "木", "金", "土"];
        for d in [date(1900, 3, 1), date(1983, 12, 31), date(2000, 1, 1), date(2024, 2, 29)] {
            assert_eq!(
                cycle_label(&d, 7, &config).unwrap(),
                names[usize::from(d.weekday())],
                "{d}"
            );
        }
    }

    #[test]
    fn test_cycle_label_before_epoch() {
        let config = CycleConfig::defaults();
        let day = date(1983, 12, 31);
        assert_eq!(cycle_label(&day, 2, &config).as_deref(), Some("陽"));
        assert_eq!(cycle_label(&day, 3, &config).as_deref(), Some("紙"));
        assert_eq!(cycle_label(&day, 5, &config).as_deref(), Some("霧"));
        assert_eq!(cycle_label(&day, 4, &config), None);
    }

    #[test]
    fn test_cycle_label_is_deterministic() {
        let config = CycleConfig::defaults();
        let day = date(2031, 7, 19);
        assert_eq!(cycle_stamp(&day, &config), cycle_stamp(&day, &config));
        assert_eq!(cycle_label(&day, 5, &config), cycle_label(&day, 5, &config));
    }

    #[test]
    fn test_blank_slot_falls_back_to_position() {
        let config = CycleConfig::from_definitions([
            CycleDefinition::new(3, ["a", " "]).unwrap(),
            CycleDefinition::new(2, ["x", "y"]).unwrap(),
        ]);
        // Offsets 0, 1, 2 hit "a", blank and missing.
        assert_eq!(cycle_label(&date(1984, 1, 1), 3, &config).as_deref(), Some("a"));
        assert_eq!(cycle_label(&date(1984, 1, 2), 3, &config).as_deref(), Some("2"));
        assert_eq!(cycle_label(&date(1984, 1, 3), 3, &config).as_deref(), Some("3"));
        assert_eq!(cycle_stamp(&date(1984, 1, 3), &config), "x3");
    }

    #[test]
    fn test_stamp_uses_ascending_period_order() {
        let config = CycleConfig::defaults();
        assert_eq!(cycle_stamp(&CalendarDate::EPOCH, &config), "陰石風日");
        let labels = CycleLabels::for_date(&CalendarDate::EPOCH, &config);
        let periods: Vec<usize> = labels.iter().map(|l| l.period).collect();
        assert_eq!(periods, vec![2, 3, 5, 7]);
        assert_eq!(labels.get(5), Some("風"));
    }

    #[test]
    fn test_clock_labels() {
        let now = NaiveDate::from_ymd_opt(1984, 1, 2)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap();
        let clock = ClockLabels::at(now, &CycleConfig::defaults()).unwrap();
        assert_eq!(clock.date_label, "1984-01-02 (陽鋏雨月)");
        assert_eq!(clock.time_label, "07:05:09");
    }
}
