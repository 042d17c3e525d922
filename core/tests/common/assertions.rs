// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::path::Path;

use almanac_core::Event;

/// Asserts that `events` carry exactly the given titles, in order.
pub fn assert_titles(events: &[Event], titles: &[&str]) {
    let actual: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(actual, titles, "Event titles mismatch");
}

/// Asserts that a file exists at the given path.
pub fn assert_file_exists(path: &Path) {
    assert!(path.is_file(), "Expected file to exist: {}", path.display());
}
