//! Output formatting utilities

use crate::domain::{format_duration, LedgerLine, Row};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fmt::Write;
use std::str::FromStr;

/// Shape of the rendered ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated date, duration, week total and overtime
    #[default]
    Tsv,
    /// Aligned columns with start/end times and day totals
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Invalid format: {}. Valid formats: tsv, table", s)),
        }
    }
}

/// chrono layouts used for dates and times of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayouts {
    pub date: String,
    pub time: String,
}

const TABLE_HEADER: [&str; 7] = ["Date", "From", "To", "Dur.", "Day", "Week", "Total"];

/// Render ledger lines in the requested format
pub fn format_ledger(lines: &[LedgerLine], format: OutputFormat, layouts: &OutputLayouts) -> String {
    match format {
        OutputFormat::Tsv => format_tsv(lines, layouts),
        OutputFormat::Table => format_table(lines, layouts),
    }
}

fn format_tsv(lines: &[LedgerLine], layouts: &OutputLayouts) -> String {
    let mut output = String::new();
    for line in lines {
        match line {
            LedgerLine::Row(row) => {
                output.push_str(&format!(
                    "{}\t{}\t{}\t{}\n",
                    render_date(row.date, &layouts.date),
                    format_duration(row.duration),
                    format_duration(row.week_total),
                    format_duration(row.carry)
                ));
            }
            LedgerLine::MissingDuration { date, .. } => {
                output.push_str(&missing_notice(*date, layouts));
            }
        }
    }
    output
}

fn format_table(lines: &[LedgerLine], layouts: &OutputLayouts) -> String {
    let cells: Vec<Option<[String; 7]>> = lines
        .iter()
        .map(|line| match line {
            LedgerLine::Row(row) => Some(table_cells(row, layouts)),
            LedgerLine::MissingDuration { .. } => None,
        })
        .collect();

    let mut widths = TABLE_HEADER.map(str::len);
    for row in cells.iter().flatten() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_table_line(&mut output, &TABLE_HEADER.map(String::from), &widths);
    for (line, row) in lines.iter().zip(&cells) {
        match (line, row) {
            (_, Some(row)) => push_table_line(&mut output, row, &widths),
            (LedgerLine::MissingDuration { date, .. }, None) => {
                output.push_str(&missing_notice(*date, layouts));
            }
            (LedgerLine::Row(_), None) => {}
        }
    }
    output
}

fn table_cells(row: &Row, layouts: &OutputLayouts) -> [String; 7] {
    let to = match (row.to, row.open) {
        (Some(to), _) => render_time(to, &layouts.time),
        (None, true) => "now".to_string(),
        (None, false) => String::new(),
    };

    [
        render_date(row.date, &layouts.date),
        row.from
            .map(|from| render_time(from, &layouts.time))
            .unwrap_or_default(),
        to,
        format_duration(row.duration),
        format_duration(row.day_total),
        format_duration(row.week_total),
        format_duration(row.carry),
    ]
}

/// Text columns are left aligned, duration columns right aligned
fn push_table_line(output: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        if idx < 3 {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        } else {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        }
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

fn missing_notice(date: NaiveDate, layouts: &OutputLayouts) -> String {
    format!("Missing duration on {}\n", render_date(date, &layouts.date))
}

/// Format a date, falling back to ISO 8601 when the layout needs a time of day
fn render_date(date: NaiveDate, layout: &str) -> String {
    let mut rendered = String::new();
    match write!(rendered, "{}", date.format(layout)) {
        Ok(()) => rendered,
        Err(_) => date.to_string(),
    }
}

fn render_time(time: DateTime<Tz>, layout: &str) -> String {
    let mut rendered = String::new();
    match write!(rendered, "{}", time.format(layout)) {
        Ok(()) => rendered,
        Err(_) => time.to_rfc3339(),
    }
}
