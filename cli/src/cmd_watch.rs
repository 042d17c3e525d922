// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use almanac_core::{AlarmSink, Event};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::app::App;
use crate::util::format_datetime;

/// Prints fired alarms to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl AlarmSink for TerminalSink {
    fn play_alarm(&self, sound: &str) -> Result<(), almanac_core::Error> {
        // Ring the terminal bell, the sound name is only shown.
        println!("\x07{} {}", "♪".yellow(), sound);
        Ok(())
    }

    fn stop_alarm(&self, sound: &str) {
        tracing::debug!(sound, "alarm stopped");
    }

    fn remind(&self, event: &Event) {
        println!("{}", reminder(event));
    }
}

fn reminder(event: &Event) -> String {
    format!(
        "{} {} will begin soon ({})",
        "Reminder:".bold(),
        event.title,
        format_datetime(event.start)
    )
}

/// Runs the alarm poller in the foreground until interrupted.
#[derive(Debug, Clone, Copy)]
pub struct CmdWatch;

impl CmdWatch {
    pub const NAME: &str = "watch";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Watch for due alarms until interrupted with Ctrl-C")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        let interval = app.config().poll_interval.get();
        tracing::debug!(?interval, "watching alarms...");
        println!("Watching alarms, press Ctrl-C to stop");

        let handle = app
            .controller
            .spawn_alarm_poller(Arc::new(TerminalSink), interval);
        let signal = tokio::signal::ctrl_c().await;
        handle.abort();
        signal?;

        // Fired alarms are cleared from their events.
        app.mark_dirty();
        Ok(())
    }
}
