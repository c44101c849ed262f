//! Calendar constants, built-in cycle labels and ring geometry.

// Gregorian calendar

/// Last representable year.
pub const MAX_YEAR: u16 = 9999;
/// December, the last 1-based month.
pub const MAX_MONTH: u8 = 12;
/// Every month starts on day 1.
pub const MIN_DAY: u8 = 1;
/// 1-based month number of February.
pub const FEBRUARY: u8 = 2;
/// February's length in a leap year.
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Month lengths in a common year, indexed by 1-based month.
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Years divisible by this are leap years...
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// ...except centuries...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...unless also divisible by this.
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator of `YYYY-MM-DD` and `YYYY-MM`.
pub const DATE_SEPARATOR: char = '-';

// Cycles

/// Reference date every day offset is counted from: (year, month, day).
/// 1984-01-01 fell on a Sunday.
pub const EPOCH: (u16, u8, u8) = (1984, 1, 1);

/// Cycle periods carried by every configuration, in canonical (ascending) order.
pub const SUPPORTED_PERIODS: [usize; 4] = [2, 3, 5, 7];

/// Built-in labels for the 2-day cycle
pub const DEFAULT_LABELS_2: [&str; 2] = ["陰", "陽"];
/// Built-in labels for the 3-day cycle
pub const DEFAULT_LABELS_3: [&str; 3] = ["石", "鋏", "紙"];
/// Built-in labels for the 5-day cycle
pub const DEFAULT_LABELS_5: [&str; 5] = ["風", "雨", "雷", "雲", "霧"];
/// Built-in labels for the 7-day cycle, aligned so that the epoch (a Sunday) is 日
pub const DEFAULT_LABELS_7: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

// Ring geometry

/// Side length of the square SVG canvas
pub const RING_SIZE: f64 = 600.0;
/// Radius of the date ring as a fraction of the canvas
pub const DATE_RING_RATIO: f64 = 0.4;
/// Distance between two neighbouring label bands
pub const BAND_STEP: f64 = 38.0;
/// Radius of the circle drawn behind each day number
pub const DAY_CIRCLE_RADIUS: f64 = 18.0;
/// Radius of the outline drawn around the selected day
pub const SELECTED_OUTLINE_RADIUS: f64 = 22.0;
/// How far the today pointer reaches past the date ring
pub const POINTER_OVERHANG: f64 = 36.0;
/// Gap between the pointer end and its tip
pub const POINTER_TIP_GAP: f64 = 6.0;
/// Radius of the pointer tip
pub const POINTER_TIP_RADIUS: f64 = 4.0;

// Files

/// Prefix of exported label files
pub const EXPORT_FILE_PREFIX: &str = "cycle-labels";
/// Settings file used when none is given
pub const DEFAULT_SETTINGS_FILE: &str = "ring_calendar.json";
