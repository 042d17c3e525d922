// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jiff::civil::{Date, DateTime};

use crate::alarm::{AlarmSink, FiredAlarm};
use crate::{Contact, DateWindow, Error, Event};

/// The handle shared by the controller and the alarm poller.
pub type SharedStore = Arc<Mutex<EventStore>>;

/// Locks the shared store, recovering the data if a previous holder panicked.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, EventStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the events and contacts, and answers range queries over them.
///
/// Events keep their insertion order and duplicates are allowed. Removal by
/// value drops the first equal element and reports a miss as `false`.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
    contacts: Vec<Contact>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the store into a [`SharedStore`].
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn add_event(&mut self, event: Event) {
        tracing::debug!(title = %event.title, "adding event");
        self.events.push(event);
    }

    /// Removes the first event equal to `event`, returns whether one was found.
    pub fn remove_event(&mut self, event: &Event) -> bool {
        match self.events.iter().position(|e| e == event) {
            Some(index) => {
                self.events.remove(index);
                true
            }
            None => {
                tracing::debug!(title = %event.title, "event to remove not found");
                false
            }
        }
    }

    /// Removes the event at `index`, `None` if out of range.
    pub fn remove_event_at(&mut self, index: usize) -> Option<Event> {
        (index < self.events.len()).then(|| self.events.remove(index))
    }

    /// Removes `old` if present, then appends `new`.
    ///
    /// Returns whether `old` was found. When it was not, `new` is added anyway.
    pub fn replace_event(&mut self, old: &Event, new: Event) -> bool {
        let found = self.remove_event(old);
        self.add_event(new);
        found
    }

    /// Adds a contact, rejecting one with a blank name.
    pub fn add_contact(&mut self, contact: Contact) -> Result<(), Error> {
        if !contact.is_valid() {
            return Err(Error::InvalidContact("name must not be empty".into()));
        }

        tracing::debug!(name = %contact.name, "adding contact");
        self.contacts.push(contact);
        Ok(())
    }

    /// Removes the first contact equal to `contact`, returns whether one was found.
    ///
    /// Events linked to the contact are kept.
    pub fn remove_contact(&mut self, contact: &Contact) -> bool {
        match self.contacts.iter().position(|c| c == contact) {
            Some(index) => {
                self.contacts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the contact at `index`, `None` if out of range.
    pub fn remove_contact_at(&mut self, index: usize) -> Option<Contact> {
        (index < self.contacts.len()).then(|| self.contacts.remove(index))
    }

    /// A snapshot of every event.
    pub fn all_events(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Events overlapping `date` between 00:00:01 and 23:59:59.
    pub fn events_in_day(&self, date: Date) -> Vec<Event> {
        self.events_in(&DateWindow::day(date))
    }

    /// Events overlapping the Monday-to-Sunday week containing `date`.
    pub fn events_in_week(&self, date: Date) -> Result<Vec<Event>, Error> {
        Ok(self.events_in(&DateWindow::week(date)?))
    }

    /// Events overlapping the given month, `month` counted from 1.
    pub fn events_in_month(&self, year: i16, month: i8) -> Result<Vec<Event>, Error> {
        Ok(self.events_in(&DateWindow::month(year, month)?))
    }

    /// Events overlapping the year containing `date`.
    pub fn events_in_year(&self, date: Date) -> Vec<Event> {
        self.events_in(&DateWindow::year(date))
    }

    /// Events whose interval intersects the window, in store order.
    pub fn events_in(&self, window: &DateWindow) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.overlaps(window))
            .cloned()
            .collect()
    }

    /// Removes every event that ended strictly before `cutoff`.
    ///
    /// Returns the number of removed events.
    pub fn remove_expired_events(&mut self, cutoff: DateTime) -> usize {
        let before = self.events.len();
        self.events.retain(|e| !e.ended_before(cutoff));
        let removed = before - self.events.len();
        tracing::debug!(%cutoff, removed, "removed expired events");
        removed
    }

    /// Fires every alarm due at `now` and clears it from its event.
    ///
    /// A sink failure only affects its own event: the alarm is kept so the
    /// next scan retries it, and the remaining events are still processed.
    pub fn fire_due_alarms(&mut self, now: DateTime, sink: &dyn AlarmSink) -> Vec<FiredAlarm> {
        let mut fired = Vec::new();
        for event in &mut self.events {
            let Some(alarm) = event.alarm.as_ref().filter(|a| a.is_due(now)) else {
                continue;
            };

            if let Err(err) = sink.play_alarm(&alarm.sound) {
                tracing::warn!(title = %event.title, %err, "failed to play alarm, will retry");
                continue;
            }

            sink.remind(event);
            if let Some(alarm) = event.alarm.take() {
                tracing::info!(title = %event.title, due = %alarm.due, "alarm fired");
                fired.push(FiredAlarm {
                    title: event.title.clone(),
                    alarm,
                });
            }
        }
        fired
    }

    /// Replaces every event, as a file import does.
    pub fn replace_all_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// Appends the events, as a database import does.
    pub fn extend_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    /// Replaces every contact. Imported contacts are not re-validated.
    pub fn replace_all_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }
}
