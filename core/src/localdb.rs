// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod contacts;
mod events;


use std::fmt::Display;
use std::path::Path;
#[cfg(test)]
use std::sync::atomic::AtomicUsize;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::localdb::contacts::{ContactRecord, Contacts};
use crate::localdb::events::{EventRecord, Events};
use crate::{Contact, Error, Event, Transmitter};

#[cfg(test)]
pub(crate) static IN_MEMORY_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

type DbError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub events: Events,
    pub contacts: Contacts,
}

impl LocalDb {
    /// Opens a sqlite database connection, creating the file if needed.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, DbError> {
        let options = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            SqliteConnectOptions::new()
                .filename(filename.to_str().ok_or("Invalid path encoding")?)
                .create_if_missing(true)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            SqliteConnectOptions::new().in_memory(true)
        };

        // an in-memory database lives in its connection, so keep exactly one
        let pool_options = match filename {
            Some(_) => SqlitePoolOptions::new(),
            None => SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
        };

        Self::connect(options, pool_options).await
    }

    /// Opens an existing sqlite database file, failing if it is missing.
    pub async fn open_existing(filename: &Path) -> Result<Self, DbError> {
        if !filename.is_file() {
            return Err(format!("No such database: {}", filename.display()).into());
        }

        tracing::info!(path = %filename.display(), "connecting to existing SQLite database");
        let options = SqliteConnectOptions::new()
            .filename(filename.to_str().ok_or("Invalid path encoding")?)
            .create_if_missing(false);

        Self::connect(options, SqlitePoolOptions::new()).await
    }

    async fn connect(
        options: SqliteConnectOptions,
        pool_options: SqlitePoolOptions,
    ) -> Result<Self, DbError> {
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        tracing::debug!("ensuring tables in the database");
        let events = Events::new(pool.clone());
        let contacts = Contacts::new(pool.clone());
        Ok(LocalDb {
            pool,
            events,
            contacts,
        })
    }

    /// Replaces every contact and every event in a single transaction.
    pub async fn replace_all(
        &self,
        contacts: &[ContactRecord],
        events: &[EventRecord],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        Contacts::write_all(&mut *tx, contacts).await?;
        Events::write_all(&mut *tx, events).await?;
        tx.commit().await
    }

    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }
}

/// Reads and writes events and contacts in a SQLite database file.
///
/// Each call opens its own connection pool and closes it before returning.
/// Exports replace the whole table inside a single transaction, and
/// [`Transmitter::export_all`] replaces both tables in one.
#[derive(Debug, Clone)]
pub struct SqliteTransmitter {
    default_sound: String,
}

impl SqliteTransmitter {
    /// Creates a transmitter. Imported alarms stored without a sound get
    /// `default_sound`.
    pub fn new(default_sound: impl Into<String>) -> Self {
        Self {
            default_sound: default_sound.into(),
        }
    }
}

#[async_trait]
impl Transmitter for SqliteTransmitter {
    async fn import_events(&self, source: &Path) -> Result<Vec<Event>, Error> {
        let db = LocalDb::open_existing(source)
            .await
            .map_err(|e| import_error(source, e))?;
        let records = db.events.list().await;
        db.close().await;

        let events = records
            .map_err(|e| import_error(source, e))?
            .into_iter()
            .map(|record| record.into_event(&self.default_sound))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| import_error(source, e))?;

        tracing::debug!(path = %source.display(), count = events.len(), "imported events");
        Ok(events)
    }

    async fn export_events(&self, destination: &Path, events: &[Event]) -> Result<(), Error> {
        let db = LocalDb::open(Some(destination))
            .await
            .map_err(|e| export_error(destination, e))?;
        let records: Vec<_> = events.iter().map(EventRecord::from_event).collect();
        let result = db.events.replace_all(&records).await;
        db.close().await;

        result.map_err(|e| export_error(destination, e))?;
        tracing::debug!(path = %destination.display(), count = events.len(), "exported events");
        Ok(())
    }

    async fn import_contacts(&self, source: &Path) -> Result<Vec<Contact>, Error> {
        let db = LocalDb::open_existing(source)
            .await
            .map_err(|e| import_error(source, e))?;
        let records = db.contacts.list().await;
        db.close().await;

        let contacts: Vec<_> = records
            .map_err(|e| import_error(source, e))?
            .into_iter()
            .map(ContactRecord::into_contact)
            .collect();

        tracing::debug!(path = %source.display(), count = contacts.len(), "imported contacts");
        Ok(contacts)
    }

    async fn export_contacts(
        &self,
        destination: &Path,
        contacts: &[Contact],
    ) -> Result<(), Error> {
        let db = LocalDb::open(Some(destination))
            .await
            .map_err(|e| export_error(destination, e))?;
        let records: Vec<_> = contacts.iter().map(ContactRecord::from_contact).collect();
        let result = db.contacts.replace_all(&records).await;
        db.close().await;

        result.map_err(|e| export_error(destination, e))?;
        tracing::debug!(path = %destination.display(), count = contacts.len(), "exported contacts");
        Ok(())
    }

    async fn export_all(
        &self,
        destination: &Path,
        contacts: &[Contact],
        events: &[Event],
    ) -> Result<(), Error> {
        let db = LocalDb::open(Some(destination))
            .await
            .map_err(|e| export_error(destination, e))?;
        let contact_records: Vec<_> = contacts.iter().map(ContactRecord::from_contact).collect();
        let event_records: Vec<_> = events.iter().map(EventRecord::from_event).collect();
        let result = db.replace_all(&contact_records, &event_records).await;
        db.close().await;

        result.map_err(|e| export_error(destination, e))?;
        tracing::debug!(
            path = %destination.display(),
            contacts = contacts.len(),
            events = events.len(),
            "exported contacts and events"
        );
        Ok(())
    }
}

fn import_error(path: &Path, err: impl Display) -> Error {
    Error::Import(format!("{}: {err}", path.display()))
}

fn export_error(path: &Path, err: impl Display) -> Error {
    Error::Export(format!("{}: {err}", path.display()))
}
