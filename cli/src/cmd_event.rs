// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::{Alarm, Event, EventFilter};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use crate::app::App;
use crate::arg::{CommonArgs, EventArgs};
use crate::event_formatter::{EventColumn, EventFormatter, EventRow};
use crate::util::{OutputFormat, parse_date, parse_datetime, parse_datetime_range};

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub filter: EventFilter,
    pub date: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List events")
            .arg(
                arg!(-f --filter <FILTER> "Only show events of the day, week, month or year")
                    .value_parser(value_parser!(EventFilter))
                    .default_value("all"),
            )
            .arg(arg!(--date <DATE> "Anchor the filter on this day instead of today"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            filter: matches
                .get_one("filter")
                .copied()
                .unwrap_or(EventFilter::All),
            date: matches.get_one("date").cloned(),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        if let Some(date) = &self.date {
            app.controller.set_today(parse_date(date)?);
        }
        app.controller.change_event_filter(self.filter)?;

        let window = self.filter.window(app.controller.today())?;
        let rows = app.event_rows(window.as_ref());
        print_events(app, &rows, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventAdd {
    pub title: String,
    pub start: String,
    pub end: String,
    pub note: Option<String>,
    pub place: Option<String>,
    pub alarm: Option<String>,

    pub output_format: OutputFormat,
}

impl CmdEventAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Add a new event")
            .arg(EventArgs::title())
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::note())
            .arg(EventArgs::place())
            .arg(EventArgs::alarm())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: EventArgs::get_title(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),
            note: EventArgs::get_note(matches),
            place: EventArgs::get_place(matches),
            alarm: EventArgs::get_alarm(matches),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let event = self.build(app)?;
        app.controller.add_event(event.clone())?;
        app.mark_dirty();

        let index = app.event_rows(None).len() - 1;
        print_events(app, &[EventRow { index, event }], self.output_format, true);
        Ok(())
    }

    fn build(&self, app: &App) -> Result<Event, Box<dyn Error>> {
        let today = app.now().date();
        let (start, end) = parse_datetime_range(today, &self.start, &self.end)?;
        if end < start {
            return Err("End must not be before start".into());
        }

        let mut event = Event::new(self.title.clone(), start, end);
        if let Some(note) = &self.note {
            event = event.with_note(note.clone());
        }
        if let Some(place) = &self.place {
            event = event.with_place(place.clone());
        }
        if let Some(alarm) = &self.alarm {
            let due = parse_datetime(start.date(), alarm)?;
            event = event.with_alarm(Alarm::new(due, app.config().alarm_sound.clone()));
        }
        Ok(event)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventRemove {
    pub index: usize,
}

impl CmdEventRemove {
    pub const NAME: &str = "remove";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Remove an event")
            .arg(CommonArgs::index("event"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            index: CommonArgs::get_index(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "removing event...");
        match app.controller.remove_event_at(self.index)? {
            Some(event) => {
                app.mark_dirty();
                println!("{} {}", "Removed:".green(), event);
                Ok(())
            }
            None => Err(format!("No event at index #{}", self.index).into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventPrune {
    pub before: Option<String>,
}

impl CmdEventPrune {
    pub const NAME: &str = "prune";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Remove events that ended before a cutoff, now by default")
            .arg(arg!(--before <DATETIME> "Cutoff date and time"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            before: matches.get_one("before").cloned(),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "pruning events...");
        let cutoff = match &self.before {
            Some(before) => parse_datetime(app.now().date(), before)?,
            None => app.now(),
        };

        let count = app.controller.remove_expired_events(cutoff)?;
        if count > 0 {
            app.mark_dirty();
        }
        println!("Removed {count} expired event(s)");
        Ok(())
    }
}

pub fn print_events(app: &App, rows: &[EventRow], output_format: OutputFormat, verbose: bool) {
    let columns = if verbose {
        vec![
            EventColumn::index(),
            EventColumn::time_range(),
            EventColumn::title(),
            EventColumn::place(),
            EventColumn::alarm(),
            EventColumn::contact(),
            EventColumn::note(),
        ]
    } else {
        vec![
            EventColumn::index(),
            EventColumn::time_range(),
            EventColumn::title(),
            EventColumn::place(),
        ]
    };
    let formatter = EventFormatter::new(app.now(), columns).with_output_format(output_format);
    print!("{}", formatter.format(rows));
}
