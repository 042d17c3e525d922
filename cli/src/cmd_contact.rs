// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::Contact;
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use crate::app::App;
use crate::arg::CommonArgs;
use crate::contact_formatter::format_contacts;
use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdContactList {
    pub output_format: OutputFormat,
}

impl CmdContactList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List contacts")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing contacts...");
        print!("{}", format_contacts(&app.contact_rows(), self.output_format));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdContactAdd {
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CmdContactAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Add a new contact")
            .arg(arg!(name: <NAME> "Name of the contact"))
            .arg(arg!(--company <COMPANY> "Company the contact works for"))
            .arg(arg!(--email <EMAIL> "Email address"))
            .arg(arg!(--phone <PHONE> "Phone number"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: matches
                .get_one::<String>("name")
                .expect("name is required")
                .clone(),
            company: matches.get_one("company").cloned(),
            email: matches.get_one("email").cloned(),
            phone: matches.get_one("phone").cloned(),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new contact...");
        let contact = self.build();
        app.controller.add_contact(contact.clone())?;
        app.mark_dirty();
        println!("{} {}", "Added:".green(), contact);
        Ok(())
    }

    fn build(self) -> Contact {
        let mut contact = Contact::new(self.name);
        if let Some(company) = self.company {
            contact = contact.with_company(company);
        }
        if let Some(email) = self.email {
            contact = contact.with_email(email);
        }
        if let Some(phone) = self.phone {
            contact = contact.with_phone(phone);
        }
        contact
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdContactRemove {
    pub index: usize,
}

impl CmdContactRemove {
    pub const NAME: &str = "remove";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Remove a contact")
            .arg(CommonArgs::index("contact"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            index: CommonArgs::get_index(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "removing contact...");
        match app.controller.remove_contact_at(self.index)? {
            Some(contact) => {
                app.mark_dirty();
                println!("{} {}", "Removed:".green(), contact);
                Ok(())
            }
            None => Err(format!("No contact at index #{}", self.index).into()),
        }
    }
}
