// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use almanac_core::Event;
use colored::Color;
use jiff::civil::DateTime;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, format_datetime, format_datetime_span};

/// An event together with its position in the store.
#[derive(Debug, Clone)]
pub struct EventRow {
    pub index: usize,
    pub event: Event,
}

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(now: DateTime, columns: Vec<EventColumn>) -> Self {
        let columns = columns
            .into_iter()
            .map(|col| match col {
                EventColumn::TimeRange(_) => EventColumn::TimeRange(EventColumnTimeRange { now }),
                col => col,
            })
            .collect();
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [EventRow]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [EventRow],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = Table::new(self.formatter.format, &self.formatter.columns, self.events);
        write!(f, "{table}")
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Index,
    TimeRange(EventColumnTimeRange),
    Title,
    Place,
    Alarm,
    Note,
    Contact,
}

impl EventColumn {
    pub fn index() -> Self {
        EventColumn::Index
    }

    /// The time range column; its reference time is set by the formatter.
    pub fn time_range() -> Self {
        EventColumn::TimeRange(EventColumnTimeRange {
            now: DateTime::MIN,
        })
    }

    pub fn title() -> Self {
        EventColumn::Title
    }

    pub fn place() -> Self {
        EventColumn::Place
    }

    pub fn alarm() -> Self {
        EventColumn::Alarm
    }

    pub fn note() -> Self {
        EventColumn::Note
    }

    pub fn contact() -> Self {
        EventColumn::Contact
    }
}

impl TableColumn<EventRow> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Index => "index",
            EventColumn::TimeRange(_) => "time_range",
            EventColumn::Title => "title",
            EventColumn::Place => "place",
            EventColumn::Alarm => "alarm",
            EventColumn::Note => "note",
            EventColumn::Contact => "contact",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a EventRow) -> Cow<'a, str> {
        let event = &data.event;
        match self {
            EventColumn::Index => format!("#{}", data.index).into(),
            EventColumn::TimeRange(_) => format_datetime_span(event.start, event.end).into(),
            EventColumn::Title => event.title.as_str().into(),
            EventColumn::Place => event.place.as_deref().unwrap_or("").into(),
            EventColumn::Alarm => match &event.alarm {
                Some(alarm) => format!("⏰ {}", format_datetime(alarm.due)).into(),
                None => "".into(),
            },
            EventColumn::Note => event.note.as_deref().unwrap_or("").into(),
            EventColumn::Contact => match &event.contact {
                Some(contact) => contact.to_string().into(),
                None => "".into(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Index => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &EventRow) -> Option<Color> {
        match self {
            EventColumn::TimeRange(a) => a.get_color(&data.event),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnTimeRange {
    now: DateTime,
}

impl EventColumnTimeRange {
    fn get_color(&self, event: &Event) -> Option<Color> {
        if event.ended_before(self.now) {
            Some(Color::BrightBlack)
        } else if event.start <= self.now {
            Some(Color::Yellow)
        } else {
            None
        }
    }
}
