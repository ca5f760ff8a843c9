use chrono::Weekday;
use clap::{Parser, Subcommand};

use crate::schedule::AirType;

#[derive(Debug, Parser)]
#[command(
    name = "baka",
    version,
    about = "Browse this week's anime broadcast schedule"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Which releases to show
    #[arg(long, value_enum, default_value_t = AirType::Sub, global = true)]
    pub air_type: AirType,

    /// ISO week number to fetch instead of the current week
    #[arg(long, global = true)]
    pub week: Option<u32>,

    /// Year of `--week`
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Ignore the cached timetable and fetch a new one
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Write debug logs to the log file
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive weekly view (default)
    Tui,
    /// Print the schedule grouped by weekday
    List {
        /// Only print this weekday (e.g. `mon`, `friday`)
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// Delete the cached timetable
    ClearCache,
}
