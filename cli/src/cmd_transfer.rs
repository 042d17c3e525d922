// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use almanac_core::FileTransmitter;
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};

use crate::app::App;

fn file_arg(help: &'static str) -> clap::Arg {
    arg!(file: <FILE>)
        .help(help)
        .value_parser(value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn get_file(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("file")
        .expect("file is required")
        .clone()
}

/// Replaces all events with the ones stored in a JSON file.
#[derive(Debug, Clone)]
pub struct CmdImport {
    pub file: PathBuf,
}

impl CmdImport {
    pub const NAME: &str = "import";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Replace all events with the ones in a file")
            .arg(file_arg("File to import events from"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: get_file(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "importing events...");
        let count = app
            .controller
            .import_events(&FileTransmitter::new(), &self.file)
            .await?;
        app.mark_dirty();
        println!("Imported {count} event(s) from {}", self.file.display());
        Ok(())
    }
}

/// Writes all events to a JSON file.
#[derive(Debug, Clone)]
pub struct CmdExport {
    pub file: PathBuf,
}

impl CmdExport {
    pub const NAME: &str = "export";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Write all events to a file")
            .arg(file_arg("File to export events to"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: get_file(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "exporting events...");
        let count = app
            .controller
            .export_events(&FileTransmitter::new(), &self.file)
            .await?;
        println!("Exported {count} event(s) to {}", self.file.display());
        Ok(())
    }
}
