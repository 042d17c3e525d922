// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the almanac-core crate.
//!
//! These tests drive the controller together with the store, the alarm
//! poller and the persistence adapters.

mod alarm_flow;
mod config_driven;
mod persistence;
mod views;
