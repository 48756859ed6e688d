//! CLI command definitions

use crate::cli::OutputFormat;
use crate::infrastructure::ConfigOverrides;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

const FILE_FORMAT_HELP: &str = "\
File format:
  Each non-empty line of FILENAME is an entry: a date and a duration
  separated by whitespace. The duration is either an absolute value or a
  time range.
    Absolute value: 6h12m0s
    Time range:     0810-1422

  The last entry of a file can be an open range (e.g. `0930-`). If it is
  dated today, trk assumes you are still working and uses the current time
  to calculate its duration.

  Everything following a number sign (#) on the same line is ignored.

  Examples:
    19-9-25 0950-1830
    19-9-26 8h # took a day off
    19-9-27 1015-

Output (tsv):
  date, duration, week total and overtime, separated by tabs.

  Example (with --weekly 24h):
    Wed 04.03.  6h20m0s  22h40m0s  -1h20m0s
    Fri 06.03.  1h45m0s  24h25m0s  25m0s
    Mon 09.03.  6h0m0s   6h0m0s    -17h35m0s

  After Wednesday 1h20m of the week's quota were still open. Friday ended
  the week with 25m of overtime, so Monday started the next week 17h35m
  short of its quota.

Output (table):
  Date, From, To, Dur., Day, Week and Total (running overtime) columns.

Layouts use chrono format strings, e.g. %y-%m-%d or %H%M.";

#[derive(Parser, Debug)]
#[command(name = "trk")]
#[command(about = "Track worked time and overtime from a plain-text timesheet", long_about = None)]
#[command(version)]
#[command(after_long_help = FILE_FORMAT_HELP)]
pub struct Cli {
    /// Timesheet file
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    /// Weekly working time (e.g. 24h, 38h30m) [default: 24h]
    #[arg(long, value_name = "DURATION")]
    pub weekly: Option<String>,

    /// Layout of date input [default: %y-%m-%d]
    #[arg(long = "date-in", value_name = "LAYOUT")]
    pub date_in: Option<String>,

    /// Layout of time input [default: %H%M]
    #[arg(long = "time-in", value_name = "LAYOUT")]
    pub time_in: Option<String>,

    /// Layout of date output [default: "%a %d.%m."]
    #[arg(long = "date-out", value_name = "LAYOUT")]
    pub date_out: Option<String>,

    /// Layout of time output [default: %H:%M]
    #[arg(long = "time-out", value_name = "LAYOUT")]
    pub time_out: Option<String>,

    /// Timezone for times of day (IANA name) [default: system timezone]
    #[arg(long, value_name = "TZ")]
    pub location: Option<String>,

    /// Output format (tsv, table) [default: tsv]
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Config file (default: $TRK_CONFIG)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Settings given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            weekly: self.weekly.clone(),
            date_in: self.date_in.clone(),
            time_in: self.time_in.clone(),
            date_out: self.date_out.clone(),
            time_out: self.time_out.clone(),
            location: self.location.clone(),
            format: self.format,
        }
    }
}
