// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use almanac_core::APP_NAME;
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cmd_contact::{CmdContactAdd, CmdContactList, CmdContactRemove};
use crate::cmd_event::{CmdEventAdd, CmdEventList, CmdEventPrune, CmdEventRemove};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_month::CmdMonth;
use crate::cmd_transfer::{CmdExport, CmdImport};
use crate::cmd_watch::CmdWatch;
use crate::config::parse_config;
use crate::util::OutputFormat;

/// Run the almanac command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Keep your calendar, contacts and alarms in one place.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // defaults to the current month
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/almanac/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/almanac/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdMonth::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventAdd::command())
                    .subcommand(CmdEventRemove::command())
                    .subcommand(CmdEventPrune::command()),
            )
            .subcommand(
                Command::new("contact")
                    .alias("c")
                    .about("Manage your contacts")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdContactList::command())
                    .subcommand(CmdContactAdd::command())
                    .subcommand(CmdContactRemove::command()),
            )
            .subcommand(CmdImport::command())
            .subcommand(CmdExport::command())
            .subcommand(CmdWatch::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventAdd::NAME, matches)) => EventAdd(CmdEventAdd::from(matches)),
                Some((CmdEventRemove::NAME, matches)) => EventRemove(CmdEventRemove::from(matches)),
                Some((CmdEventPrune::NAME, matches)) => EventPrune(CmdEventPrune::from(matches)),
                _ => unreachable!(),
            },
            Some(("contact", matches)) => match matches.subcommand() {
                Some((CmdContactList::NAME, matches)) => ContactList(CmdContactList::from(matches)),
                Some((CmdContactAdd::NAME, matches)) => ContactAdd(CmdContactAdd::from(matches)),
                Some((CmdContactRemove::NAME, matches)) => {
                    ContactRemove(CmdContactRemove::from(matches))
                }
                _ => unreachable!(),
            },
            Some((CmdImport::NAME, matches)) => Import(CmdImport::from(matches)),
            Some((CmdExport::NAME, matches)) => Export(CmdExport::from(matches)),
            Some((CmdWatch::NAME, matches)) => Watch(CmdWatch::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Month(CmdMonth {
                year: None,
                month: None,
                output_format: OutputFormat::Table,
                verbose: false,
            }),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the events of a month
    Month(CmdMonth),

    /// List events
    EventList(CmdEventList),

    /// Add a new event
    EventAdd(CmdEventAdd),

    /// Remove an event
    EventRemove(CmdEventRemove),

    /// Remove expired events
    EventPrune(CmdEventPrune),

    /// List contacts
    ContactList(CmdContactList),

    /// Add a new contact
    ContactAdd(CmdContactAdd),

    /// Remove a contact
    ContactRemove(CmdContactRemove),

    /// Replace all events with the ones in a file
    Import(CmdImport),

    /// Write all events to a file
    Export(CmdExport),

    /// Fire alarms until interrupted
    Watch(CmdWatch),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Month(a)         => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventList(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventAdd(a)      => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventRemove(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventPrune(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ContactList(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ContactAdd(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ContactRemove(a) => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Import(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Export(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Watch(a)         => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut App) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let mut app = App::open(config).await?;

        f(&mut app).await?;

        app.close().await?;
        Ok(())
    }
}
