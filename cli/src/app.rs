// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use almanac_core::{Config, Controller, DateWindow, EventStore, SqliteTransmitter, lock_store};
use jiff::Zoned;
use jiff::civil::DateTime;

use crate::contact_formatter::ContactRow;
use crate::event_formatter::EventRow;

/// One command invocation: the store loaded from the database, written back
/// on close when a command changed it.
#[derive(Debug)]
pub struct App {
    pub controller: Controller,
    config: Config,
    database: PathBuf,
    adapter: SqliteTransmitter,
    now: DateTime,
    dirty: bool,
}

impl App {
    pub async fn open(config: Config) -> Result<Self, Box<dyn Error>> {
        let database = config.database_file()?;
        let adapter = SqliteTransmitter::new(config.alarm_sound.clone());
        let now = Zoned::now().datetime();
        let mut controller = Controller::new(EventStore::new().into_shared(), now.date());

        if database.is_file() {
            controller.import_from_database(&adapter, &database).await?;
        } else {
            tracing::debug!(path = %database.display(), "no database yet, starting empty");
        }

        Ok(Self {
            controller,
            config,
            database,
            adapter,
            now,
            dirty: false,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The time the invocation started.
    pub fn now(&self) -> DateTime {
        self.now
    }

    /// Marks the store as changed so it is saved on close.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Events overlapping `window`, or all of them, with their store index.
    pub fn event_rows(&self, window: Option<&DateWindow>) -> Vec<EventRow> {
        let store = self.controller.store();
        let store = lock_store(&store);
        store
            .events()
            .iter()
            .enumerate()
            .filter(|(_, event)| window.is_none_or(|w| event.overlaps(w)))
            .map(|(index, event)| EventRow {
                index,
                event: event.clone(),
            })
            .collect()
    }

    pub fn contact_rows(&self) -> Vec<ContactRow> {
        self.controller
            .contacts()
            .into_iter()
            .enumerate()
            .map(|(index, contact)| ContactRow { index, contact })
            .collect()
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        if !self.dirty {
            tracing::debug!("store unchanged, skipping save");
            return Ok(());
        }

        if let Some(parent) = self.database.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tracing::debug!(path = %self.database.display(), "saving store");
        self.controller
            .export_to_database(&self.adapter, &self.database)
            .await?;
        Ok(())
    }
}
