//! Infrastructure layer - File I/O, configuration and logging

pub mod config;
pub mod logging;
pub mod reader;

pub use config::{Config, ConfigOverrides};
pub use reader::TimesheetReader;
