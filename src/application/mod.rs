//! Application layer - Use cases

pub mod report;

pub use report::ReportService;
