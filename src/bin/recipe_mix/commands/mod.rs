// ABOUTME: Command implementations for the recipe-mix CLI
// ABOUTME: Provides the mix and match subcommands plus shared JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod matching;
pub mod mix;

use anyhow::Result;
use serde::Serialize;

/// Print `value` as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
