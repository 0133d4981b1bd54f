// ABOUTME: Main library entry point for the recipe mix engine
// ABOUTME: Wires collaborator traits, catalog and generative sourcing, configuration, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Mix
//!
//! Given a handful of raw, possibly misspelled ingredient names and a recipe
//! count, returns a diverse set of recipes drawn first from a curated
//! catalog, filling any gap through a generative collaborator, while
//! honouring allergies and dietary restrictions and reporting provenance and
//! the generative spend avoided.
//!
//! ## Architecture
//!
//! - **`recipe-mix-core`**: error types, constants, and data models
//! - **`recipe-mix-intelligence`**: similarity, matching, dedup, dietary
//!   filtering, technique planning, and stats (pure, synchronous)
//! - **this crate**: collaborator traits, the async [`mix::MixEngine`],
//!   the ingredient validation service, configuration, logging, and the
//!   `recipe-mix` CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_mix::config::MixConfig;
//! use recipe_mix::errors::AppResult;
//! use recipe_mix::mix::MixEngine;
//! use recipe_mix::models::MixRequest;
//! use recipe_mix::providers::{InMemoryIngredientDirectory, InMemoryRecipeStore, UnconfiguredGenerator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let engine = MixEngine::new(
//!         Arc::new(InMemoryRecipeStore::load("catalog.json").await?),
//!         Arc::new(InMemoryIngredientDirectory::load("vocabulary.json").await?),
//!         Arc::new(UnconfiguredGenerator),
//!         MixConfig::from_env()?,
//!     );
//!     let response = engine.generate(MixRequest::new(["cà rốt", "thịt gà"], 3)).await?;
//!     println!("{} recipes, {}% from catalog", response.recipes.len(), response.stats.coverage_pct);
//!     Ok(())
//! }
//! ```

/// Environment-only configuration
pub mod config;

/// Unified error handling (re-exported from `recipe-mix-core`)
pub mod errors;

/// Logging configuration and structured mix events
pub mod logging;

/// The mix engine and its catalog and generative sources
pub mod mix;

/// Collaborator traits, record validation, and in-memory collaborators
pub mod providers;

/// Ingredient validation service
pub mod services;

/// Data models (re-exported from `recipe-mix-core`)
pub mod models {
    pub use recipe_mix_core::models::*;
}

/// Constants (re-exported from `recipe-mix-core`)
pub mod constants {
    pub use recipe_mix_core::constants::*;
}

pub use config::{ConfigError, MixConfig};
pub use mix::MixEngine;
pub use services::IngredientValidationService;
