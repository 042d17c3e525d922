// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;
use std::sync::Mutex;

use almanac_core::{Alarm, AlarmSink, Config, Contact, Error, Event};
use jiff::civil::{DateTime, date};

/// Creates a test configuration storing its database under `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        ..Config::default()
    }
}

/// Shorthand for a whole-hour timestamp.
#[must_use]
pub fn at(year: i16, month: i8, day: i8, hour: i8) -> DateTime {
    date(year, month, day).at(hour, 0, 0, 0)
}

/// Three events in March 2024: one bare, one with an alarm, one with a contact.
#[must_use]
pub fn sample_events() -> Vec<Event> {
    vec![
        Event::new("Standup", at(2024, 3, 4, 9), at(2024, 3, 4, 10)),
        Event::new("Dentist", at(2024, 3, 6, 15), at(2024, 3, 6, 16))
            .with_place("Main St 12")
            .with_alarm(Alarm::new(at(2024, 3, 6, 14), "bell.wav")),
        Event::new("Lunch", at(2024, 3, 8, 12), at(2024, 3, 8, 13))
            .with_note("the usual place")
            .with_contact(Contact::new("Ana").with_email("ana@example.com")),
    ]
}

#[must_use]
pub fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::new("Ana").with_email("ana@example.com"),
        Contact::new("Bo").with_company("Acme").with_phone("555-0100"),
    ]
}

/// An alarm sink that records what it was asked to do.
///
/// Playing fails while `broken` is set, which lets tests check retries.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Mutex<Vec<String>>,
    pub reminded: Mutex<Vec<String>>,
    pub broken: Mutex<bool>,
}

impl AlarmSink for RecordingSink {
    fn play_alarm(&self, sound: &str) -> Result<(), Error> {
        if *self.broken.lock().unwrap() {
            return Err(Error::Alarm(format!("cannot play {sound}")));
        }
        self.played.lock().unwrap().push(sound.to_string());
        Ok(())
    }

    fn stop_alarm(&self, _sound: &str) {}

    fn remind(&self, event: &Event) {
        self.reminded.lock().unwrap().push(event.title.clone());
    }
}
