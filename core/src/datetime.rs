// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Span;
use jiff::civil::{Date, DateTime};

use crate::Error;

/// Formats a timestamp for storage as ISO 8601, e.g. `2024-02-29T07:05:09`.
///
/// NOTE: Used for storing in the database, so it should be stable across
/// different runs. Sub-second precision is written only when present.
pub(crate) fn format_stable(dt: &DateTime) -> String {
    dt.to_string()
}

/// Parses a timestamp written by [`format_stable`].
pub(crate) fn parse_stable(s: &str) -> Result<DateTime, jiff::Error> {
    s.parse()
}

/// A closed time window `[start, end]` used by the range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First instant included in the window.
    pub start: DateTime,

    /// Last instant included in the window.
    pub end: DateTime,
}

impl DateWindow {
    /// The window of a single day, from 00:00:01 to 23:59:59.
    pub fn day(date: Date) -> Self {
        Self {
            start: date.at(0, 0, 1, 0),
            end: date.at(23, 59, 59, 0),
        }
    }

    /// The seven days starting on the Monday of the week containing `date`.
    pub fn week(date: Date) -> Result<Self, Error> {
        let offset = i64::from(date.weekday().to_monday_zero_offset());
        let monday = date
            .checked_sub(Span::new().days(offset))
            .map_err(|e| Error::InvalidDate(format!("no Monday before {date}: {e}")))?;
        let sunday = monday
            .checked_add(Span::new().days(6))
            .map_err(|e| Error::InvalidDate(format!("no Sunday after {monday}: {e}")))?;

        Ok(Self {
            start: monday.at(0, 0, 1, 0),
            end: sunday.at(23, 59, 59, 0),
        })
    }

    /// The whole month `month` (1-12) of `year`.
    pub fn month(year: i16, month: i8) -> Result<Self, Error> {
        let first = Date::new(year, month, 1)
            .map_err(|e| Error::InvalidDate(format!("{year}-{month}: {e}")))?;

        Ok(Self {
            start: first.at(0, 0, 0, 0),
            end: first.last_of_month().at(23, 59, 59, 0),
        })
    }

    /// The whole year containing `date`.
    pub fn year(date: Date) -> Self {
        Self {
            start: date.first_of_year().at(0, 0, 0, 0),
            end: date.last_of_year().at(23, 59, 59, 0),
        }
    }

    /// Whether the closed interval `[start, end]` intersects this window.
    pub fn intersects(&self, start: DateTime, end: DateTime) -> bool {
        start <= self.end && end >= self.start
    }
}
