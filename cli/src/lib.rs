// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod arg;
mod cli;
mod cmd_contact;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_month;
mod cmd_transfer;
mod cmd_watch;
mod config;
mod contact_formatter;
mod event_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
