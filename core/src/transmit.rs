// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use async_trait::async_trait;

use crate::{Contact, Error, Event};

/// Moves events and contacts between the store and an external location.
///
/// A location is a database file or a serialized file, depending on the
/// implementation. Every failure is reported as [`Error::Import`] or
/// [`Error::Export`], and an import either yields the whole batch or nothing.
#[async_trait]
pub trait Transmitter: Send + Sync {
    /// Reads every event stored at `source`.
    async fn import_events(&self, source: &Path) -> Result<Vec<Event>, Error>;

    /// Replaces the events stored at `destination`.
    async fn export_events(&self, destination: &Path, events: &[Event]) -> Result<(), Error>;

    /// Reads every contact stored at `source`.
    async fn import_contacts(&self, source: &Path) -> Result<Vec<Contact>, Error>;

    /// Replaces the contacts stored at `destination`.
    async fn export_contacts(&self, destination: &Path, contacts: &[Contact])
    -> Result<(), Error>;

    /// Replaces both contacts and events stored at `destination`.
    ///
    /// The default writes contacts, then events. A failure while writing the
    /// events leaves the new contacts in place; implementations that can
    /// should write both atomically.
    async fn export_all(
        &self,
        destination: &Path,
        contacts: &[Contact],
        events: &[Event],
    ) -> Result<(), Error> {
        self.export_contacts(destination, contacts).await?;
        self.export_events(destination, events).await
    }
}
