// ABOUTME: recipe-mix CLI - runs the mix engine or the ingredient matcher over JSON fixtures
// ABOUTME: Prints the response as JSON on stdout; logs go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Mix three recipes from a catalog fixture
//! recipe-mix mix --catalog catalog.json --vocabulary vocabulary.json \
//!     --ingredients "ca ro,thit ga,hanh la" --count 3 --allergy tôm
//!
//! # Resolve raw tokens against the vocabulary
//! recipe-mix match --vocabulary vocabulary.json "ca ro" "thit ga"
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recipe_mix::logging::{LogFormat, LoggingConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "recipe-mix",
    about = "Recipe mix engine CLI",
    long_about = "Catalog-first recipe sourcing with fuzzy ingredient matching, run against JSON fixtures."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Log format override (json, pretty, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Produce a recipe mix for a set of ingredients
    Mix {
        /// JSON array of catalog records
        #[arg(long)]
        catalog: PathBuf,

        /// JSON array of vocabulary entries
        #[arg(long)]
        vocabulary: PathBuf,

        /// Comma-separated ingredient tokens
        #[arg(long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,

        /// Number of recipes wanted (1-5)
        #[arg(long, default_value = "3")]
        count: usize,

        /// Allergen to exclude (repeatable)
        #[arg(long = "allergy")]
        allergies: Vec<String>,

        /// Dietary restriction, e.g. vegetarian (repeatable)
        #[arg(long = "diet")]
        diets: Vec<String>,

        /// Preferred technique, queried first (repeatable)
        #[arg(long = "technique")]
        techniques: Vec<String>,
    },

    /// Resolve raw ingredient tokens against the vocabulary
    Match {
        /// JSON array of vocabulary entries
        #[arg(long)]
        vocabulary: PathBuf,

        /// Raw tokens to resolve
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Some(format) = cli.log_format.as_deref() {
        logging = logging.with_format(LogFormat::from_str_or_default(format));
    }
    logging.init()?;

    match cli.command {
        Command::Mix {
            catalog,
            vocabulary,
            ingredients,
            count,
            allergies,
            diets,
            techniques,
        } => {
            let args = commands::mix::MixArgs {
                catalog,
                vocabulary,
                ingredients,
                count,
                allergies,
                diets,
                techniques,
            };
            commands::mix::run(args, cli.pretty).await?;
        }
        Command::Match { vocabulary, tokens } => {
            commands::matching::run(&vocabulary, &tokens, cli.pretty).await?;
        }
    }

    Ok(())
}
