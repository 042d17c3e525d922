// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Contact, Error, Event, Transmitter};

/// Stores events or contacts as a pretty-printed JSON list, one list per file.
///
/// Writes go to a sibling temporary file that is renamed over the destination,
/// so a failed export leaves the previous file in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTransmitter;

impl FileTransmitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transmitter for FileTransmitter {
    async fn import_events(&self, source: &Path) -> Result<Vec<Event>, Error> {
        let events: Vec<Event> = read_json(source).await?;
        tracing::debug!(path = %source.display(), count = events.len(), "read events file");
        Ok(events)
    }

    async fn export_events(&self, destination: &Path, events: &[Event]) -> Result<(), Error> {
        write_json(destination, events).await?;
        tracing::debug!(path = %destination.display(), count = events.len(), "wrote events file");
        Ok(())
    }

    async fn import_contacts(&self, source: &Path) -> Result<Vec<Contact>, Error> {
        let contacts: Vec<Contact> = read_json(source).await?;
        tracing::debug!(path = %source.display(), count = contacts.len(), "read contacts file");
        Ok(contacts)
    }

    async fn export_contacts(
        &self,
        destination: &Path,
        contacts: &[Contact],
    ) -> Result<(), Error> {
        write_json(destination, contacts).await?;
        tracing::debug!(path = %destination.display(), count = contacts.len(), "wrote contacts file");
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(source: &Path) -> Result<T, Error> {
    let content = tokio::fs::read_to_string(source)
        .await
        .map_err(|e| Error::Import(format!("{}: {e}", source.display())))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Import(format!("{}: malformed content: {e}", source.display())))
}

async fn write_json<T: Serialize + ?Sized>(destination: &Path, value: &T) -> Result<(), Error> {
    let export_error = |e: &dyn std::fmt::Display| {
        Error::Export(format!("{}: {e}", destination.display()))
    };

    let content = serde_json::to_string_pretty(value).map_err(|e| export_error(&e))?;
    let tmp = temp_path(destination);
    tokio::fs::write(&tmp, content)
        .await
        .map_err(|e| export_error(&e))?;

    if let Err(e) = tokio::fs::rename(&tmp, destination).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(export_error(&e));
    }
    Ok(())
}

fn temp_path(destination: &Path) -> PathBuf {
    let mut name = destination.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    destination.with_file_name(name)
}
