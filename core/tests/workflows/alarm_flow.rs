// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Alarm workflows: scheduling through the controller, firing through the poller.

use std::sync::Arc;
use std::time::Duration;

use almanac_core::{Alarm, AlarmPoller, Controller, Event, EventStore, lock_store};
use jiff::civil::date;

use crate::common::{RecordingSink, at};

#[test]
fn alarm_flow_fires_once_and_clears() {
    // Arrange
    let mut controller = Controller::new(EventStore::new().into_shared(), date(2024, 3, 6));
    controller
        .add_event(
            Event::new("Dentist", at(2024, 3, 6, 15), at(2024, 3, 6, 16))
                .with_alarm(Alarm::new(at(2024, 3, 6, 14), "bell.wav")),
        )
        .unwrap();
    let sink = Arc::new(RecordingSink::default());
    let poller = AlarmPoller::new(controller.store(), sink.clone(), Duration::from_secs(20));

    // Act
    let early = poller.scan(at(2024, 3, 6, 13));
    let due = poller.scan(at(2024, 3, 6, 14));
    let again = poller.scan(at(2024, 3, 6, 15));

    // Assert
    assert!(early.is_empty());
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].title, "Dentist");
    assert!(again.is_empty());
    assert_eq!(*sink.played.lock().unwrap(), vec!["bell.wav"]);
    assert_eq!(*sink.reminded.lock().unwrap(), vec!["Dentist"]);
    let store = controller.store();
    assert!(lock_store(&store).events()[0].alarm.is_none());
}

#[test]
fn alarm_flow_failed_sound_is_retried() {
    // Arrange
    let mut store = EventStore::new();
    store.add_event(
        Event::new("Call", at(2024, 3, 6, 10), at(2024, 3, 6, 11))
            .with_alarm(Alarm::new(at(2024, 3, 6, 9), "ring.wav")),
    );
    store.add_event(
        Event::new("Walk", at(2024, 3, 6, 10), at(2024, 3, 6, 11))
            .with_alarm(Alarm::new(at(2024, 3, 6, 9), "chime.wav")),
    );
    let store = store.into_shared();
    let sink = Arc::new(RecordingSink::default());
    *sink.broken.lock().unwrap() = true;
    let poller = AlarmPoller::new(store.clone(), sink.clone(), Duration::from_secs(20));

    // Act
    let while_broken = poller.scan(at(2024, 3, 6, 9));
    *sink.broken.lock().unwrap() = false;
    let after_repair = poller.scan(at(2024, 3, 6, 9));

    // Assert
    assert!(while_broken.is_empty());
    assert_eq!(after_repair.len(), 2);
    assert_eq!(*sink.played.lock().unwrap(), vec!["ring.wav", "chime.wav"]);
    assert!(lock_store(&store).events().iter().all(|e| e.alarm.is_none()));
}

#[test]
fn alarm_flow_removed_event_never_fires() {
    let mut controller = Controller::new(EventStore::new().into_shared(), date(2024, 3, 6));
    let event = Event::new("Cancelled", at(2024, 3, 6, 15), at(2024, 3, 6, 16))
        .with_alarm(Alarm::new(at(2024, 3, 6, 14), "bell.wav"));
    controller.add_event(event.clone()).unwrap();
    let sink = Arc::new(RecordingSink::default());
    let poller = AlarmPoller::new(controller.store(), sink.clone(), Duration::from_secs(20));

    assert!(controller.remove_event(&event).unwrap());
    let fired = poller.scan(at(2024, 3, 6, 18));

    assert!(fired.is_empty());
    assert!(sink.played.lock().unwrap().is_empty());
}
