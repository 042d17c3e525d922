// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    /// A position in the listing, as printed in the index column.
    pub fn index(what: &str) -> Arg {
        arg!(index: <INDEX>)
            .help(format!("Index of the {what}, as shown by the list command"))
            .value_parser(parse_index)
    }

    pub fn get_index(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("index")
            .copied()
            .expect("index is required")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn title() -> Arg {
        arg!(title: <TITLE> "Title of the event")
    }

    pub fn get_title(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("title")
            .expect("title is required")
            .clone()
    }

    pub fn start() -> Arg {
        arg!(--start <START> "Start date and time of the event").required(true)
    }

    pub fn get_start(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("start")
            .expect("start is required")
            .clone()
    }

    pub fn end() -> Arg {
        arg!(--end <END> "End date and time of the event, a bare HH:MM is relative to start")
            .required(true)
    }

    pub fn get_end(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("end")
            .expect("end is required")
            .clone()
    }

    pub fn note() -> Arg {
        arg!(--note <NOTE> "Free-form note")
    }

    pub fn get_note(matches: &ArgMatches) -> Option<String> {
        matches.get_one("note").cloned()
    }

    pub fn place() -> Arg {
        arg!(--place <PLACE> "Where the event takes place")
    }

    pub fn get_place(matches: &ArgMatches) -> Option<String> {
        matches.get_one("place").cloned()
    }

    pub fn alarm() -> Arg {
        arg!(--alarm <ALARM> "When to ring the alarm, a bare HH:MM is on the start day")
    }

    pub fn get_alarm(matches: &ArgMatches) -> Option<String> {
        matches.get_one("alarm").cloned()
    }
}

/// Accepts `3` as well as `#3`, the form printed in listings.
fn parse_index(s: &str) -> Result<usize, String> {
    s.strip_prefix('#')
        .unwrap_or(s)
        .parse()
        .map_err(|e| format!("Invalid index {s:?}: {e}"))
}
