// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors surfaced by the almanac core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A contact was rejected before it reached the store.
    #[error("Invalid contact: {0}")]
    InvalidContact(String),

    /// A date or month outside the calendar was requested.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Importing events or contacts failed, nothing was applied.
    #[error("Import failed: {0}")]
    Import(String),

    /// Exporting events or contacts failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// A subscriber failed while handling a notification.
    #[error("Subscriber failed: {0}")]
    Subscriber(String),

    /// The alarm sink could not deliver an alarm.
    #[error("Alarm failed: {0}")]
    Alarm(String),

    /// The configuration could not be loaded or normalized.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for almanac operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
