// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use jiff::civil::{Date, DateTime};
use tokio::task::JoinHandle;

use crate::store::{SharedStore, lock_store};
use crate::{
    AlarmPoller, AlarmSink, Contact, DateWindow, Dispatcher, Error, Event, Notification,
    NotificationKind, Subscriber, Transmitter,
};

/// Which events the event list shows, relative to today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventFilter {
    #[default]
    All,
    Day,
    Week,
    Month,
    Year,
}

impl EventFilter {
    /// The window this filter selects around `today`, `None` for every event.
    pub fn window(self, today: Date) -> Result<Option<DateWindow>, Error> {
        Ok(match self {
            EventFilter::All => None,
            EventFilter::Day => Some(DateWindow::day(today)),
            EventFilter::Week => Some(DateWindow::week(today)?),
            EventFilter::Month => Some(DateWindow::month(today.year(), today.month())?),
            EventFilter::Year => Some(DateWindow::year(today)),
        })
    }
}

/// Mediates between the store and the presentation layer.
///
/// Every mutation goes through the shared store and is followed by the
/// notifications a view needs to redraw. A mutation is kept even when a
/// subscriber fails afterwards; the failure is returned to the caller.
pub struct Controller {
    store: SharedStore,
    dispatcher: Dispatcher,
    displayed_month: Date,
    filter: EventFilter,
    today: Date,
}

impl Controller {
    /// Creates a controller displaying the month of `today` and all events.
    pub fn new(store: SharedStore, today: Date) -> Self {
        Self {
            store,
            dispatcher: Dispatcher::new(),
            displayed_month: today.first_of_month(),
            filter: EventFilter::All,
            today,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Moves "today" to another date, for views anchored elsewhere.
    pub fn set_today(&mut self, today: Date) {
        self.today = today;
    }

    pub fn subscribe(&mut self, kind: NotificationKind, subscriber: Subscriber) {
        self.dispatcher.subscribe(kind, subscriber);
    }

    /// A handle on the store shared with the alarm poller.
    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    /// First day of the displayed month.
    pub fn displayed_month(&self) -> Date {
        self.displayed_month
    }

    pub fn filter(&self) -> EventFilter {
        self.filter
    }

    /// The events of the displayed month.
    pub fn displayed_month_events(&self) -> Result<Vec<Event>, Error> {
        let month = self.displayed_month;
        lock_store(&self.store).events_in_month(month.year(), month.month())
    }

    /// The events matching the current filter.
    pub fn filtered_events(&self) -> Result<Vec<Event>, Error> {
        let window = self.filter.window(self.today)?;
        let store = lock_store(&self.store);
        Ok(match window {
            Some(window) => store.events_in(&window),
            None => store.all_events(),
        })
    }

    pub fn contacts(&self) -> Vec<Contact> {
        lock_store(&self.store).contacts().to_vec()
    }

    /// Publishes the displayed month, the filtered events and the contacts.
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.publish_date_changed()?;
        self.publish_events_changed()?;
        self.publish_contacts_changed()
    }

    pub fn change_displayed_month(&mut self, year: i16, month: i8) -> Result<(), Error> {
        self.displayed_month = Date::new(year, month, 1)
            .map_err(|e| Error::InvalidDate(format!("{year}-{month}: {e}")))?;
        tracing::debug!(month = %self.displayed_month, "displayed month changed");
        self.publish_date_changed()
    }

    pub fn change_event_filter(&mut self, filter: EventFilter) -> Result<(), Error> {
        self.filter = filter;
        tracing::debug!(?filter, "event filter changed");
        self.publish_events_changed()
    }

    pub fn add_event(&mut self, event: Event) -> Result<(), Error> {
        lock_store(&self.store).add_event(event);
        self.publish_events_updated()
    }

    pub fn remove_event(&mut self, event: &Event) -> Result<bool, Error> {
        let removed = lock_store(&self.store).remove_event(event);
        if removed {
            self.publish_events_updated()?;
        }
        Ok(removed)
    }

    pub fn remove_event_at(&mut self, index: usize) -> Result<Option<Event>, Error> {
        let removed = lock_store(&self.store).remove_event_at(index);
        if removed.is_some() {
            self.publish_events_updated()?;
        }
        Ok(removed)
    }

    /// Replaces `old` with `new`, returns whether `old` was present.
    pub fn replace_event(&mut self, old: &Event, new: Event) -> Result<bool, Error> {
        let found = lock_store(&self.store).replace_event(old, new);
        self.publish_events_updated()?;
        Ok(found)
    }

    pub fn remove_expired_events(&mut self, cutoff: DateTime) -> Result<usize, Error> {
        let count = lock_store(&self.store).remove_expired_events(cutoff);
        self.publish_events_updated()?;
        Ok(count)
    }

    pub fn add_contact(&mut self, contact: Contact) -> Result<(), Error> {
        lock_store(&self.store).add_contact(contact)?;
        self.publish_contacts_changed()
    }

    pub fn remove_contact(&mut self, contact: &Contact) -> Result<bool, Error> {
        let removed = lock_store(&self.store).remove_contact(contact);
        if removed {
            self.publish_contacts_changed()?;
        }
        Ok(removed)
    }

    pub fn remove_contact_at(&mut self, index: usize) -> Result<Option<Contact>, Error> {
        let removed = lock_store(&self.store).remove_contact_at(index);
        if removed.is_some() {
            self.publish_contacts_changed()?;
        }
        Ok(removed)
    }

    /// Replaces the contacts and appends the events stored at `source`.
    ///
    /// Nothing changes unless both lists were read successfully.
    #[tracing::instrument(skip(self, adapter))]
    pub async fn import_from_database(
        &mut self,
        adapter: &dyn Transmitter,
        source: &Path,
    ) -> Result<(), Error> {
        let contacts = adapter.import_contacts(source).await?;
        let events = adapter.import_events(source).await?;
        tracing::info!(
            contacts = contacts.len(),
            events = events.len(),
            "imported from database"
        );

        {
            let mut store = lock_store(&self.store);
            store.replace_all_contacts(contacts);
            store.extend_events(events);
        }
        self.publish_contacts_changed()?;
        self.publish_events_updated()
    }

    /// Replaces the events with the ones stored at `source`.
    #[tracing::instrument(skip(self, adapter))]
    pub async fn import_events(
        &mut self,
        adapter: &dyn Transmitter,
        source: &Path,
    ) -> Result<usize, Error> {
        let events = adapter.import_events(source).await?;
        let count = events.len();
        lock_store(&self.store).replace_all_events(events);
        self.publish_events_updated()?;
        Ok(count)
    }

    /// Writes the contacts and events to `destination`, atomically when the
    /// adapter supports it (see [`Transmitter::export_all`]).
    #[tracing::instrument(skip(self, adapter))]
    pub async fn export_to_database(
        &self,
        adapter: &dyn Transmitter,
        destination: &Path,
    ) -> Result<(), Error> {
        let (contacts, events) = {
            let store = lock_store(&self.store);
            (store.contacts().to_vec(), store.all_events())
        };
        adapter.export_all(destination, &contacts, &events).await
    }

    /// Writes the events to `destination`, returns how many were written.
    #[tracing::instrument(skip(self, adapter))]
    pub async fn export_events(
        &self,
        adapter: &dyn Transmitter,
        destination: &Path,
    ) -> Result<usize, Error> {
        let events = lock_store(&self.store).all_events();
        adapter.export_events(destination, &events).await?;
        Ok(events.len())
    }

    /// Starts an alarm poller on the shared store.
    pub fn spawn_alarm_poller(
        &self,
        sink: Arc<dyn AlarmSink>,
        interval: Duration,
    ) -> JoinHandle<()> {
        AlarmPoller::new(self.store(), sink, interval).spawn()
    }

    fn publish_events_updated(&mut self) -> Result<(), Error> {
        self.publish_date_changed()?;
        self.publish_events_changed()
    }

    fn publish_date_changed(&mut self) -> Result<(), Error> {
        let events = self.displayed_month_events()?;
        self.dispatcher.publish(&Notification::DisplayedDateChanged {
            month: self.displayed_month,
            events,
        })
    }

    fn publish_events_changed(&mut self) -> Result<(), Error> {
        let events = self.filtered_events()?;
        self.dispatcher
            .publish(&Notification::DisplayedEventsChanged { events })
    }

    fn publish_contacts_changed(&mut self) -> Result<(), Error> {
        let contacts = self.contacts();
        self.dispatcher
            .publish(&Notification::DisplayedContactsChanged { contacts })
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("dispatcher", &self.dispatcher)
            .field("displayed_month", &self.displayed_month)
            .field("filter", &self.filter)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use jiff::civil::date;

    use super::*;
    use crate::{EventStore, SubscriberError};

    type Log = Arc<Mutex<Vec<Notification>>>;

    fn record_all(controller: &mut Controller) -> Log {
        let log = Log::default();
        for kind in [
            NotificationKind::DisplayedDateChanged,
            NotificationKind::DisplayedEventsChanged,
            NotificationKind::DisplayedContactsChanged,
        ] {
            let log = log.clone();
            controller.subscribe(
                kind,
                Box::new(move |n: &Notification| -> Result<(), SubscriberError> {
                    log.lock().unwrap().push(n.clone());
                    Ok(())
                }),
            );
        }
        log
    }

    fn at(y: i16, m: i8, d: i8, h: i8) -> DateTime {
        date(y, m, d).at(h, 0, 0, 0)
    }

    fn controller() -> Controller {
        Controller::new(EventStore::new().into_shared(), date(2024, 2, 14))
    }

    /// Reads contacts but fails on events, both ways.
    struct BrokenTransmitter;

    #[async_trait]
    impl Transmitter for BrokenTransmitter {
        async fn import_events(&self, source: &Path) -> Result<Vec<Event>, Error> {
            Err(Error::Import(source.display().to_string()))
        }

        async fn export_events(&self, destination: &Path, _: &[Event]) -> Result<(), Error> {
            Err(Error::Export(destination.display().to_string()))
        }

        async fn import_contacts(&self, _: &Path) -> Result<Vec<Contact>, Error> {
            Ok(vec![Contact::new("Ghost")])
        }

        async fn export_contacts(&self, _: &Path, _: &[Contact]) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn filter_window_matches_store_queries() {
        let today = date(2024, 2, 14);
        assert_eq!(EventFilter::All.window(today).unwrap(), None);
        assert_eq!(
            EventFilter::Week.window(today).unwrap(),
            Some(DateWindow::week(today).unwrap())
        );
        assert_eq!(
            EventFilter::Month.window(today).unwrap(),
            Some(DateWindow::month(2024, 2).unwrap())
        );
    }

    #[test]
    fn new_displays_month_of_today() {
        let controller = controller();
        assert_eq!(controller.displayed_month(), date(2024, 2, 1));
        assert_eq!(controller.filter(), EventFilter::All);
    }

    #[test]
    fn initialize_publishes_every_view() {
        let mut controller = controller();
        let log = record_all(&mut controller);

        controller.initialize().unwrap();

        let kinds: Vec<_> = log.lock().unwrap().iter().map(Notification::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::DisplayedDateChanged,
                NotificationKind::DisplayedEventsChanged,
                NotificationKind::DisplayedContactsChanged,
            ]
        );
    }

    #[test]
    fn change_displayed_month_publishes_month_events() {
        // Arrange
        let mut controller = controller();
        controller
            .add_event(Event::new("March", at(2024, 3, 5, 9), at(2024, 3, 5, 10)))
            .unwrap();
        controller
            .add_event(Event::new("April", at(2024, 4, 5, 9), at(2024, 4, 5, 10)))
            .unwrap();
        let log = record_all(&mut controller);

        // Act
        controller.change_displayed_month(2024, 3).unwrap();

        // Assert
        assert_eq!(controller.displayed_month(), date(2024, 3, 1));
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        match &log[0] {
            Notification::DisplayedDateChanged { month, events } => {
                assert_eq!(*month, date(2024, 3, 1));
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].title, "March");
            }
            other => panic!("unexpected notification: {other:?}"),
        }
    }

    #[test]
    fn change_displayed_month_rejects_invalid_month() {
        let mut controller = controller();
        let result = controller.change_displayed_month(2024, 0);
        assert!(matches!(result, Err(Error::InvalidDate(_))));
        assert_eq!(controller.displayed_month(), date(2024, 2, 1));
    }

    #[test]
    fn change_event_filter_limits_event_list() {
        // Arrange: today is Wednesday 2024-02-14
        let mut controller = controller();
        for (title, day) in [("today", 14), ("same week", 12), ("same month", 2)] {
            controller
                .add_event(Event::new(title, at(2024, 2, day, 9), at(2024, 2, day, 10)))
                .unwrap();
        }
        controller
            .add_event(Event::new("next year", at(2025, 1, 1, 9), at(2025, 1, 1, 10)))
            .unwrap();

        let count = |c: &mut Controller, filter| {
            c.change_event_filter(filter).unwrap();
            c.filtered_events().unwrap().len()
        };

        // Act & Assert
        assert_eq!(count(&mut controller, EventFilter::Day), 1);
        assert_eq!(count(&mut controller, EventFilter::Week), 2);
        assert_eq!(count(&mut controller, EventFilter::Month), 3);
        assert_eq!(count(&mut controller, EventFilter::Year), 3);
        assert_eq!(count(&mut controller, EventFilter::All), 4);
    }

    #[test]
    fn filtered_events_use_filter_window() {
        // Arrange: events spread around a week that crosses into March
        let mut controller = controller();
        for day in [26, 29] {
            controller
                .add_event(Event::new("feb", at(2024, 2, day, 9), at(2024, 2, day, 10)))
                .unwrap();
        }
        controller
            .add_event(Event::new("mar", at(2024, 3, 2, 9), at(2024, 3, 2, 10)))
            .unwrap();
        controller.set_today(date(2024, 2, 29));

        for filter in [
            EventFilter::All,
            EventFilter::Day,
            EventFilter::Week,
            EventFilter::Month,
            EventFilter::Year,
        ] {
            // Act
            controller.change_event_filter(filter).unwrap();
            let filtered = controller.filtered_events().unwrap();

            // Assert
            let store = controller.store();
            let expected = match filter.window(controller.today()).unwrap() {
                Some(window) => lock_store(&store).events_in(&window),
                None => lock_store(&store).all_events(),
            };
            assert_eq!(filtered, expected, "filter {filter:?}");
        }
    }

    #[test]
    fn mutations_publish_date_and_event_lists() {
        let mut controller = controller();
        let log = record_all(&mut controller);
        let event = Event::new("Lunch", at(2024, 2, 14, 12), at(2024, 2, 14, 13));

        controller.add_event(event.clone()).unwrap();
        assert!(controller.remove_event(&event).unwrap());
        assert!(!controller.remove_event(&event).unwrap());

        let kinds: Vec<_> = log.lock().unwrap().iter().map(Notification::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::DisplayedDateChanged,
                NotificationKind::DisplayedEventsChanged,
                NotificationKind::DisplayedDateChanged,
                NotificationKind::DisplayedEventsChanged,
            ]
        );
    }

    #[test]
    fn invalid_contact_is_rejected_without_notification() {
        let mut controller = controller();
        let log = record_all(&mut controller);

        let result = controller.add_contact(Contact::new("  "));

        assert!(matches!(result, Err(Error::InvalidContact(_))));
        assert!(log.lock().unwrap().is_empty());
        assert!(controller.contacts().is_empty());
    }

    #[test]
    fn failing_subscriber_keeps_mutation() {
        let mut controller = controller();
        controller.subscribe(
            NotificationKind::DisplayedContactsChanged,
            Box::new(|_: &Notification| -> Result<(), SubscriberError> { Err("closed".into()) }),
        );

        let result = controller.add_contact(Contact::new("Ana"));

        assert!(matches!(result, Err(Error::Subscriber(_))));
        assert_eq!(controller.contacts().len(), 1);
    }

    #[tokio::test]
    async fn failed_import_leaves_store_untouched() {
        // Arrange
        let mut controller = controller();
        controller.add_contact(Contact::new("Ana")).unwrap();
        let log = record_all(&mut controller);

        // Act
        let result = controller
            .import_from_database(&BrokenTransmitter, Path::new("calendar.db"))
            .await;

        // Assert
        assert!(matches!(result, Err(Error::Import(_))));
        assert_eq!(controller.contacts(), vec![Contact::new("Ana")]);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_export_is_reported() {
        let controller = controller();
        let result = controller
            .export_events(&BrokenTransmitter, Path::new("out.json"))
            .await;
        assert!(matches!(result, Err(Error::Export(_))));
    }

    #[tokio::test]
    async fn spawned_poller_shares_the_store() {
        let mut controller = controller();
        let past = at(2000, 1, 1, 0);
        controller
            .add_event(Event::new("Old", past, past).with_alarm(crate::Alarm::new(past, "a.wav")))
            .unwrap();

        let handle =
            controller.spawn_alarm_poller(Arc::new(crate::TracingSink), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert!(lock_store(&controller.store()).events()[0].alarm.is_none());
    }
}
