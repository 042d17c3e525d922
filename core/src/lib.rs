// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the almanac calendar: an in-memory event and contact store, a
//! background alarm poller, change notifications for front ends and
//! persistence to SQLite or JSON files.

mod alarm;
mod config;
mod contact;
mod controller;
mod datetime;
mod dispatcher;
mod error;
mod event;
mod file;
mod localdb;
mod store;
mod transmit;

pub use crate::alarm::{AlarmPoller, AlarmSink, DEFAULT_POLL_INTERVAL, FiredAlarm, TracingSink};
pub use crate::config::{APP_NAME, Config, ConfigInterval, expand_path, get_config_dir};
pub use crate::contact::Contact;
pub use crate::controller::{Controller, EventFilter};
pub use crate::datetime::DateWindow;
pub use crate::dispatcher::{
    Dispatcher, Notification, NotificationKind, Subscriber, SubscriberError,
};
pub use crate::error::{Error, Result};
pub use crate::event::{Alarm, Event};
pub use crate::file::FileTransmitter;
pub use crate::localdb::{LocalDb, SqliteTransmitter};
pub use crate::store::{EventStore, SharedStore, lock_store};
pub use crate::transmit::Transmitter;
