// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::error::Error as StdError;

use jiff::civil::Date;

use crate::{Contact, Error, Event};

/// The error a subscriber may return to stop a publish.
pub type SubscriberError = Box<dyn StdError + Send + Sync>;

/// A callback registered for one kind of notification.
pub type Subscriber = Box<dyn FnMut(&Notification) -> Result<(), SubscriberError> + Send>;

/// Tags the category of change a [`Notification`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The displayed month changed.
    DisplayedDateChanged,

    /// The filtered event list changed.
    DisplayedEventsChanged,

    /// The contact list changed.
    DisplayedContactsChanged,
}

/// A change broadcast to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A new month is displayed, with the events overlapping it.
    DisplayedDateChanged {
        /// First day of the displayed month.
        month: Date,
        events: Vec<Event>,
    },

    /// The list of events matching the current filter.
    DisplayedEventsChanged { events: Vec<Event> },

    /// The list of contacts.
    DisplayedContactsChanged { contacts: Vec<Contact> },
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::DisplayedDateChanged { .. } => NotificationKind::DisplayedDateChanged,
            Notification::DisplayedEventsChanged { .. } => NotificationKind::DisplayedEventsChanged,
            Notification::DisplayedContactsChanged { .. } => {
                NotificationKind::DisplayedContactsChanged
            }
        }
    }
}

/// Synchronous publish/subscribe registry keyed by [`NotificationKind`].
///
/// Subscribers run on the publishing thread in registration order. The first
/// failing subscriber stops the publish, later subscribers are not called.
#[derive(Default)]
pub struct Dispatcher {
    subscribers: HashMap<NotificationKind, Vec<Subscriber>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscriber for `kind`. The same callback may be added twice.
    pub fn subscribe(&mut self, kind: NotificationKind, subscriber: Subscriber) {
        self.subscribers.entry(kind).or_default().push(subscriber);
    }

    /// Number of subscribers registered for `kind`.
    pub fn subscriber_count(&self, kind: NotificationKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    pub fn publish(&mut self, notification: &Notification) -> Result<(), Error> {
        let kind = notification.kind();
        let Some(subscribers) = self.subscribers.get_mut(&kind) else {
            tracing::trace!(?kind, "no subscribers");
            return Ok(());
        };

        for (i, subscriber) in subscribers.iter_mut().enumerate() {
            if let Err(err) = subscriber(notification) {
                tracing::warn!(?kind, index = i, %err, "subscriber failed, aborting publish");
                return Err(Error::Subscriber(err.to_string()));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .subscribers
            .iter()
            .map(|(kind, subs)| (kind, subs.len()))
            .collect();
        f.debug_struct("Dispatcher")
            .field("subscribers", &counts)
            .finish()
    }
}
