// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::civil::DateTime;

use crate::contact::non_empty;
use crate::{Contact, DateWindow};

/// A calendar event, with an optional alarm and linked contact.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    /// The title of the event.
    pub title: String,

    /// When the event starts.
    pub start: DateTime,

    /// When the event ends. Front ends should keep it at or after `start`.
    pub end: DateTime,

    /// A free-form note, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Where the event takes place, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,

    /// The alarm scheduled for this event. It is cleared once fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm: Option<Alarm>,

    /// The contact this event is linked to. This is a copy, removing the
    /// contact from the store leaves the event untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

impl Event {
    /// Creates an event without note, place, alarm or contact.
    pub fn new(title: impl Into<String>, start: DateTime, end: DateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            note: None,
            place: None,
            alarm: None,
            contact: None,
        }
    }

    /// Sets the note, empty strings are treated as absent.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = non_empty(note.into());
        self
    }

    /// Sets the place, empty strings are treated as absent.
    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = non_empty(place.into());
        self
    }

    /// Attaches an alarm, replacing any existing one.
    pub fn with_alarm(mut self, alarm: Alarm) -> Self {
        self.alarm = Some(alarm);
        self
    }

    /// Links a contact to the event.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Whether the event ends at or after it starts.
    pub fn is_well_formed(&self) -> bool {
        self.end >= self.start
    }

    /// Whether the event's `[start, end]` interval intersects the window.
    pub fn overlaps(&self, window: &DateWindow) -> bool {
        window.intersects(self.start, self.end)
    }

    /// Whether the event ended strictly before `cutoff`.
    pub fn ended_before(&self, cutoff: DateTime) -> bool {
        self.end < cutoff
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FORMAT: &str = "%A %d %B %H:%M";
        write!(
            f,
            "{}: {} - {}",
            self.title,
            self.start.strftime(FORMAT),
            self.end.strftime(FORMAT)
        )?;
        if let Some(alarm) = &self.alarm {
            write!(f, ", {alarm}")?;
        }
        if let Some(place) = &self.place {
            write!(f, ", at {place}")?;
        }
        Ok(())
    }
}

/// An alarm that fires once its due time is reached.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Alarm {
    /// When the alarm should fire.
    pub due: DateTime,

    /// The audio resource played when the alarm fires.
    pub sound: String,
}

impl Alarm {
    pub fn new(due: DateTime, sound: impl Into<String>) -> Self {
        Self {
            due,
            sound: sound.into(),
        }
    }

    /// Whether the alarm should fire at `now`.
    pub fn is_due(&self, now: DateTime) -> bool {
        self.due <= now
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alarm at {}", self.due.strftime("%Y-%m-%d %H:%M"))
    }
}
