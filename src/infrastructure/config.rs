//! Configuration management
//!
//! Settings come from built-in defaults, optionally overlaid by a TOML file
//! and finally by command-line overrides:
//!
//! ```toml
//! weekly = "38h30m"
//! date_in = "%Y-%m-%d"
//! time_in = "%H:%M"
//! location = "Europe/Berlin"
//! format = "table"
//! ```

use crate::cli::OutputFormat;
use crate::domain::{parse_duration, ParseOptions, DEFAULT_DATE_LAYOUT, DEFAULT_TIME_LAYOUT};
use crate::error::{Result, TrkError};
use chrono::format::{Item, StrftimeItems};
use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "TRK_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Expected working time per ISO week
    #[serde(deserialize_with = "deserialize_duration")]
    pub weekly: Duration,

    pub date_in: String,
    pub time_in: String,
    pub date_out: String,
    pub time_out: String,

    /// IANA timezone name; the system timezone when unset
    pub location: Option<String>,

    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            weekly: Duration::hours(24),
            date_in: DEFAULT_DATE_LAYOUT.to_string(),
            time_in: DEFAULT_TIME_LAYOUT.to_string(),
            date_out: "%a %d.%m.".to_string(),
            time_out: "%H:%M".to_string(),
            location: None,
            format: OutputFormat::default(),
        }
    }
}

/// Values given on the command line, each replacing the configured one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub weekly: Option<String>,
    pub date_in: Option<String>,
    pub time_in: Option<String>,
    pub date_out: Option<String>,
    pub time_out: Option<String>,
    pub location: Option<String>,
    pub format: Option<OutputFormat>,
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let literal = String::deserialize(deserializer)?;
    parse_duration(&literal).map_err(|e| serde::de::Error::custom(format!("{}: '{}'", e, literal)))
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TrkError::Config(format!("Config file not found: {}", path.display()))
            } else {
                TrkError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config file named explicitly or by `TRK_CONFIG`, falling back
    /// to defaults when neither is given
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Config::default()),
        }
    }

    /// Replace configured values with the given overrides
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(weekly) = overrides.weekly {
            self.weekly = parse_duration(&weekly).map_err(|e| {
                TrkError::Config(format!("Invalid weekly quota '{}': {}", weekly, e))
            })?;
        }
        if let Some(layout) = overrides.date_in {
            self.date_in = layout;
        }
        if let Some(layout) = overrides.time_in {
            self.time_in = layout;
        }
        if let Some(layout) = overrides.date_out {
            self.date_out = layout;
        }
        if let Some(layout) = overrides.time_out {
            self.time_out = layout;
        }
        if let Some(location) = overrides.location {
            self.location = Some(location);
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        Ok(())
    }

    /// Check that every layout is a usable chrono format string
    pub fn validate(&self) -> Result<()> {
        for (key, layout) in [
            ("date_in", &self.date_in),
            ("time_in", &self.time_in),
            ("date_out", &self.date_out),
            ("time_out", &self.time_out),
        ] {
            if layout.is_empty() || StrftimeItems::new(layout).any(|item| item == Item::Error) {
                return Err(TrkError::Config(format!(
                    "Invalid layout for {}: '{}'",
                    key, layout
                )));
            }
        }
        Ok(())
    }

    /// Resolve the configured location, defaulting to the system timezone
    pub fn location(&self) -> Result<Tz> {
        match &self.location {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| TrkError::Config(format!("Unknown timezone: {}", name))),
            None => Ok(system_timezone()),
        }
    }

    /// Parser settings derived from this config
    pub fn parse_options(&self) -> Result<ParseOptions> {
        Ok(ParseOptions::new(
            self.date_in.clone(),
            self.time_in.clone(),
            self.location()?,
        ))
    }
}

/// Timezone of the running system, UTC when it cannot be determined
fn system_timezone() -> Tz {
    let name = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
    name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("Unrecognised system timezone \"{}\", falling back to UTC", name);
        Tz::UTC
    })
}
