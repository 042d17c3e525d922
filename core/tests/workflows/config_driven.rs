// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Workflows driven by a parsed configuration.

use almanac_core::{Alarm, Config, SqliteTransmitter, Transmitter};

use crate::common::{at, setup_temp_dirs, test_config};

#[tokio::test]
async fn config_driven_database_lives_in_state_dir() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&dirs.state_dir);
    let path = config.database_file().unwrap();
    let adapter = SqliteTransmitter::new(config.alarm_sound.clone());

    // Act
    adapter.export_events(&path, &[]).await.unwrap();

    // Assert
    assert_eq!(path, dirs.state_dir.join("almanac.db"));
    assert!(path.is_file());
}

#[tokio::test]
async fn config_driven_alarm_sound_fills_missing_sounds() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let mut config: Config = toml::from_str(r#"alarm_sound = "gong.wav""#).unwrap();
    config.state_dir = Some(dirs.state_dir.clone());
    let path = config.database_file().unwrap();
    let due = at(2024, 3, 6, 14);
    let silent = almanac_core::Event::new("Silent", due, due).with_alarm(Alarm::new(due, ""));

    // Act
    SqliteTransmitter::new("ignored.wav")
        .export_events(&path, &[silent])
        .await
        .unwrap();
    let imported = SqliteTransmitter::new(config.alarm_sound.clone())
        .import_events(&path)
        .await
        .unwrap();

    // Assert
    assert_eq!(imported[0].alarm, Some(Alarm::new(due, "gong.wav")));
}
