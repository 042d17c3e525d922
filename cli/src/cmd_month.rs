// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::DateWindow;
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use crate::app::App;
use crate::arg::CommonArgs;
use crate::cmd_event::print_events;
use crate::event_formatter::EventRow;
use crate::util::OutputFormat;

/// Shows the events overlapping one month, the current one by default.
#[derive(Debug, Clone, Copy)]
pub struct CmdMonth {
    pub year: Option<i16>,
    pub month: Option<i8>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("m")
            .about("Show the events of a month")
            .arg(arg!(year: [YEAR] "Year to show").value_parser(value_parser!(i16)))
            .arg(
                arg!(month: [MONTH] "Month to show, from 1 to 12")
                    .value_parser(value_parser!(i8).range(1..=12)),
            )
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            year: matches.get_one("year").copied(),
            month: matches.get_one("month").copied(),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing month...");
        let rows = self.rows(app)?;

        if self.output_format == OutputFormat::Table {
            let heading = app.controller.displayed_month().strftime("%B %Y");
            println!("🗓️ {}", heading.to_string().bold());
        }
        print_events(app, &rows, self.output_format, self.verbose);
        Ok(())
    }

    fn rows(&self, app: &mut App) -> Result<Vec<EventRow>, Box<dyn Error>> {
        let today = app.controller.today();
        let year = self.year.unwrap_or(today.year());
        let month = self.month.unwrap_or(today.month());

        app.controller.change_displayed_month(year, month)?;
        let window = DateWindow::month(year, month)?;
        Ok(app.event_rows(Some(&window)))
    }
}
