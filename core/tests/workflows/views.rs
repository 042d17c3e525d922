// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! A front end following the controller through notifications.

use std::sync::{Arc, Mutex};

use almanac_core::{
    Controller, Event, EventFilter, EventStore, Notification, NotificationKind, SubscriberError,
};
use jiff::civil::{Date, date};

use crate::common::{at, sample_events};

/// What a minimal view would render.
#[derive(Debug, Default)]
struct View {
    month: Option<Date>,
    month_titles: Vec<String>,
    list_titles: Vec<String>,
    contact_names: Vec<String>,
}

fn attach_view(controller: &mut Controller) -> Arc<Mutex<View>> {
    let view = Arc::new(Mutex::new(View::default()));
    for kind in [
        NotificationKind::DisplayedDateChanged,
        NotificationKind::DisplayedEventsChanged,
        NotificationKind::DisplayedContactsChanged,
    ] {
        let view = view.clone();
        controller.subscribe(
            kind,
            Box::new(move |n: &Notification| -> Result<(), SubscriberError> {
                let titles = |events: &[Event]| -> Vec<String> {
                    events.iter().map(|e| e.title.clone()).collect()
                };
                let mut view = view.lock().unwrap();
                match n {
                    Notification::DisplayedDateChanged { month, events } => {
                        view.month = Some(*month);
                        view.month_titles = titles(events);
                    }
                    Notification::DisplayedEventsChanged { events } => {
                        view.list_titles = titles(events);
                    }
                    Notification::DisplayedContactsChanged { contacts } => {
                        view.contact_names = contacts.iter().map(|c| c.name.clone()).collect();
                    }
                }
                Ok(())
            }),
        );
    }
    view
}

#[test]
fn views_follow_month_navigation_and_filters() {
    // Arrange: today is Wednesday 2024-03-06
    let mut store = EventStore::new();
    store.extend_events(sample_events());
    store.add_event(Event::new("April fool", at(2024, 4, 1, 9), at(2024, 4, 1, 10)));
    let mut controller = Controller::new(store.into_shared(), date(2024, 3, 6));
    let view = attach_view(&mut controller);

    // Act & Assert: initial render
    controller.initialize().unwrap();
    {
        let view = view.lock().unwrap();
        assert_eq!(view.month, Some(date(2024, 3, 1)));
        assert_eq!(view.month_titles, vec!["Standup", "Dentist", "Lunch"]);
        assert_eq!(view.list_titles.len(), 4);
        assert!(view.contact_names.is_empty());
    }

    // Act & Assert: next month
    controller.change_displayed_month(2024, 4).unwrap();
    assert_eq!(view.lock().unwrap().month_titles, vec!["April fool"]);

    // Act & Assert: today only
    controller.change_event_filter(EventFilter::Day).unwrap();
    assert_eq!(view.lock().unwrap().list_titles, vec!["Dentist"]);
}

#[test]
fn views_refresh_after_pruning() {
    let mut store = EventStore::new();
    store.extend_events(sample_events());
    let mut controller = Controller::new(store.into_shared(), date(2024, 3, 6));
    let view = attach_view(&mut controller);

    let removed = controller.remove_expired_events(at(2024, 3, 7, 0)).unwrap();

    assert_eq!(removed, 2);
    let view = view.lock().unwrap();
    assert_eq!(view.month_titles, vec!["Lunch"]);
    assert_eq!(view.list_titles, vec!["Lunch"]);
}
