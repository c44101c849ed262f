use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ring_calendar::{CalendarDate, DEFAULT_SETTINGS_FILE, YearMonth};

/// Ring-shaped month calendar with repeating day cycles.
#[derive(Parser)]
#[command(
    name = "ringcal",
    version,
    about = "Ring-shaped month calendar with repeating day cycles"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path of the JSON file holding the cycle labels.
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Lay out a month as SVG, text or JSON.
    Show(ShowArgs),
    /// Print every cycle label of one date.
    Day(DayArgs),
    /// Print the clock line (date with cycle stamp, then time).
    Clock(ClockArgs),
    /// Inspect or change the stored cycle labels.
    #[command(subcommand)]
    Labels(LabelsCommand),
}

/// Output format of `show`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Svg,
    Json,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Month to show (YYYY-MM); defaults to the current month.
    #[arg(short, long, conflicts_with = "fragment")]
    pub month: Option<YearMonth>,

    /// Month to show as a link fragment (#YYYY-MM or #!YYYY-MM).
    #[arg(long)]
    pub fragment: Option<String>,

    /// Day to select (YYYY-MM-DD); also moves the view to its month.
    #[arg(long)]
    pub select: Option<CalendarDate>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `day` subcommand.
#[derive(clap::Args)]
pub struct DayArgs {
    /// Date to describe (YYYY-MM-DD).
    pub date: CalendarDate,
}

/// Arguments for the `clock` subcommand.
#[derive(clap::Args)]
pub struct ClockArgs {
    /// Keep printing once per second until interrupted.
    #[arg(short, long)]
    pub watch: bool,
}

/// Label management subcommands.
#[derive(Subcommand)]
pub enum LabelsCommand {
    /// Print the labels as JSON.
    Show,
    /// Replace one label; blank text restores the built-in one.
    Set {
        /// Cycle period (2, 3, 5 or 7).
        period: usize,
        /// Position within the cycle, starting at 0.
        index: usize,
        /// New label.
        text: String,
    },
    /// Restore the built-in labels.
    Reset,
    /// Replace the labels with the contents of a JSON file.
    Import {
        /// File to read.
        file: PathBuf,
    },
    /// Write the labels to a timestamped JSON file.
    Export {
        /// Directory to write into.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}
