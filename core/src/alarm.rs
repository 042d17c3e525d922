// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use jiff::Zoned;
use jiff::civil::DateTime;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::store::{SharedStore, lock_store};
use crate::{Alarm, Error, Event};

/// How often the poller looks for due alarms unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Where fired alarms are delivered: a speaker, a desktop notification, a log.
pub trait AlarmSink: Send + Sync {
    /// Starts playing the alarm sound.
    fn play_alarm(&self, sound: &str) -> Result<(), Error>;

    /// Stops the alarm sound if it is still playing.
    fn stop_alarm(&self, sound: &str);

    /// Tells the user that the event is about to begin.
    fn remind(&self, event: &Event) {
        tracing::info!(title = %event.title, start = %event.start, "event will begin soon");
    }
}

/// A sink that only writes fired alarms to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AlarmSink for TracingSink {
    fn play_alarm(&self, sound: &str) -> Result<(), Error> {
        tracing::info!(sound, "playing alarm");
        Ok(())
    }

    fn stop_alarm(&self, sound: &str) {
        tracing::debug!(sound, "stopping alarm");
    }
}

/// An alarm that was delivered and cleared from its event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredAlarm {
    /// Title of the event the alarm belonged to.
    pub title: String,

    /// The alarm as it was before being cleared.
    pub alarm: Alarm,
}

/// Periodically scans the shared store and fires due alarms.
///
/// Each alarm fires at most once. A skipped tick makes an alarm late, never
/// lost, as long as its event stays in the store.
pub struct AlarmPoller {
    store: SharedStore,
    sink: Arc<dyn AlarmSink>,
    interval: Duration,
}

impl AlarmPoller {
    pub fn new(store: SharedStore, sink: Arc<dyn AlarmSink>, interval: Duration) -> Self {
        Self {
            store,
            sink,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// The time between two scans.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single scan, holding the store lock for its whole duration.
    pub fn scan(&self, now: DateTime) -> Vec<FiredAlarm> {
        lock_store(&self.store).fire_due_alarms(now, self.sink.as_ref())
    }

    /// Spawns the poller on the current tokio runtime. It runs until aborted.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Scans on every tick, the first tick completes immediately.
    pub async fn run(self) {
        tracing::debug!(interval = ?self.interval, "starting alarm poller");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let now = Zoned::now().datetime();
            let fired = self.scan(now);
            if !fired.is_empty() {
                tracing::debug!(count = fired.len(), "alarms fired in this tick");
            }
        }
    }
}
