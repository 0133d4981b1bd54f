// ABOUTME: mix subcommand - loads fixtures, builds the engine, and prints the MixResponse
// ABOUTME: The generator is unconfigured, so gaps are reported as warnings rather than filled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use recipe_mix::config::MixConfig;
use recipe_mix::mix::MixEngine;
use recipe_mix::models::{MixRequest, UserConstraints};
use recipe_mix::providers::{
    InMemoryIngredientDirectory, InMemoryRecipeStore, UnconfiguredGenerator,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use super::print_json;

/// Arguments of the mix subcommand
pub struct MixArgs {
    pub catalog: PathBuf,
    pub vocabulary: PathBuf,
    pub ingredients: Vec<String>,
    pub count: usize,
    pub allergies: Vec<String>,
    pub diets: Vec<String>,
    pub techniques: Vec<String>,
}

/// Run one mix request and print the response
pub async fn run(args: MixArgs, pretty: bool) -> Result<()> {
    let config = MixConfig::from_env().context("invalid RECIPE_MIX_* configuration")?;
    let store = InMemoryRecipeStore::load(&args.catalog).await?;
    let directory = InMemoryIngredientDirectory::load(&args.vocabulary).await?;
    info!(
        catalog = %args.catalog.display(),
        records = store.len(),
        "Loaded catalog fixture"
    );

    let engine = MixEngine::new(
        Arc::new(store),
        Arc::new(directory),
        Arc::new(UnconfiguredGenerator),
        config,
    );

    let constraints = UserConstraints {
        allergies: args.allergies,
        dietary_restrictions: args.diets,
        preferred_techniques: args.techniques,
    };
    let request = MixRequest::new(args.ingredients, args.count).with_constraints(constraints);

    let response = engine.generate(request).await?;
    print_json(&response, pretty)
}
