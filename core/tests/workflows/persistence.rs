// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Import and export workflows through the SQLite and JSON adapters.

use almanac_core::{
    Contact, Controller, Error, EventStore, FileTransmitter, SqliteTransmitter, Transmitter,
    lock_store,
};
use jiff::civil::date;

use crate::common::{
    assert_file_exists, assert_titles, sample_contacts, sample_events, setup_temp_dirs,
};

fn controller_with(events: Vec<almanac_core::Event>) -> Controller {
    let mut store = EventStore::new();
    store.extend_events(events);
    Controller::new(store.into_shared(), date(2024, 3, 6))
}

#[tokio::test]
async fn persistence_database_round_trip() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let path = dirs.state_dir.join("almanac.db");
    let adapter = SqliteTransmitter::new("alarm.wav");
    let mut source = controller_with(sample_events());
    for contact in sample_contacts() {
        source.add_contact(contact).unwrap();
    }

    // Act
    source.export_to_database(&adapter, &path).await.unwrap();
    let mut target = controller_with(vec![]);
    target.import_from_database(&adapter, &path).await.unwrap();

    // Assert
    assert_file_exists(&path);
    let store = target.store();
    let store = lock_store(&store);
    assert_eq!(store.events(), sample_events().as_slice());
    assert_eq!(store.contacts(), sample_contacts().as_slice());
}

#[tokio::test]
async fn persistence_database_import_appends_events_and_replaces_contacts() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let path = dirs.state_dir.join("almanac.db");
    let adapter = SqliteTransmitter::new("alarm.wav");
    adapter.export_events(&path, &sample_events()[..1]).await.unwrap();
    adapter
        .export_contacts(&path, &sample_contacts())
        .await
        .unwrap();

    let mut controller = controller_with(sample_events()[1..].to_vec());
    controller.add_contact(Contact::new("Old friend")).unwrap();

    // Act
    controller
        .import_from_database(&adapter, &path)
        .await
        .unwrap();

    // Assert
    let store = controller.store();
    let store = lock_store(&store);
    assert_titles(store.events(), &["Dentist", "Lunch", "Standup"]);
    assert_eq!(store.contacts(), sample_contacts().as_slice());
}

#[tokio::test]
async fn persistence_event_file_import_replaces_events() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let path = dirs.export_dir.join("events.json");
    let source = controller_with(sample_events());
    let mut target = controller_with(vec![almanac_core::Event::new(
        "Stale",
        date(2020, 1, 1).at(0, 0, 0, 0),
        date(2020, 1, 1).at(1, 0, 0, 0),
    )]);

    // Act
    let exported = source.export_events(&FileTransmitter, &path).await.unwrap();
    let imported = target.import_events(&FileTransmitter, &path).await.unwrap();

    // Assert
    assert_eq!(exported, 3);
    assert_eq!(imported, 3);
    let store = target.store();
    assert_eq!(lock_store(&store).events(), sample_events().as_slice());
}

#[tokio::test]
async fn persistence_failed_file_import_keeps_store() {
    let dirs = setup_temp_dirs().await.unwrap();
    let path = dirs.export_dir.join("events.json");
    tokio::fs::write(&path, "not json").await.unwrap();
    let mut controller = controller_with(sample_events());

    let result = controller.import_events(&FileTransmitter, &path).await;

    assert!(matches!(result, Err(Error::Import(_))));
    let store = controller.store();
    assert_eq!(lock_store(&store).len(), 3);
}

#[tokio::test]
async fn persistence_empty_store_round_trip() {
    let dirs = setup_temp_dirs().await.unwrap();
    let path = dirs.state_dir.join("empty.db");
    let adapter = SqliteTransmitter::new("alarm.wav");

    adapter.export_events(&path, &[]).await.unwrap();

    assert!(adapter.import_events(&path).await.unwrap().is_empty());
    assert!(adapter.import_contacts(&path).await.unwrap().is_empty());
}
