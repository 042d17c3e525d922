// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Span;
use jiff::civil::{Date, DateTime, Time};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

const INVALID_DATETIME: &str =
    "Invalid date format. Expected format: YYYY-MM-DD, HH:MM and YYYY-MM-DD HH:MM";

/// Parses a date, a time of `today`, or both.
///
/// A bare date means midnight.
pub fn parse_datetime(today: Date, dt: &str) -> Result<DateTime, &'static str> {
    let dt = dt.trim();
    if let Ok(dt) = DateTime::strptime("%Y-%m-%d %H:%M", dt) {
        Ok(dt)
    } else if let Ok(dt) = dt.parse::<DateTime>() {
        Ok(dt)
    } else if let Ok(time) = Time::strptime("%H:%M", dt) {
        // If the input is just a time, we assume it's today
        Ok(today.to_datetime(time))
    } else if let Ok(date) = dt.parse::<Date>() {
        Ok(date.at(0, 0, 0, 0))
    } else {
        Err(INVALID_DATETIME)
    }
}

/// Parses a start and an end, where a bare end time is read relative to the start.
///
/// An end time earlier than the start time falls on the next day.
pub fn parse_datetime_range(
    today: Date,
    start: &str,
    end: &str,
) -> Result<(DateTime, DateTime), &'static str> {
    let start = parse_datetime(today, start)?;
    let end = match Time::strptime("%H:%M", end.trim()) {
        Ok(time) if time >= start.time() => start.date().to_datetime(time),
        Ok(time) => start
            .date()
            .checked_add(Span::new().days(1))
            .map_err(|_| INVALID_DATETIME)?
            .to_datetime(time),
        Err(_) => parse_datetime(today, end)?,
    };
    Ok((start, end))
}

/// Parses a plain `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Result<Date, &'static str> {
    date.trim()
        .parse()
        .map_err(|_| "Invalid date format. Expected format: YYYY-MM-DD")
}

pub fn format_datetime(dt: DateTime) -> String {
    dt.strftime("%Y-%m-%d %H:%M").to_string()
}

/// Formats an event's span, dropping the end date when it matches the start.
pub fn format_datetime_span(start: DateTime, end: DateTime) -> String {
    if start == end {
        format_datetime(start)
    } else if start.date() == end.date() {
        format!("{}~{}", format_datetime(start), end.strftime("%H:%M"))
    } else {
        format!("{}~{}", format_datetime(start), format_datetime(end))
    }
}
