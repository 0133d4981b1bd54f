// ABOUTME: match subcommand - resolves raw tokens through the ingredient validation service
// ABOUTME: Prints the batch match report with suggestions for unmatched tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use recipe_mix::providers::InMemoryIngredientDirectory;
use recipe_mix::services::IngredientValidationService;
use std::path::Path;
use std::sync::Arc;

use super::print_json;

/// Resolve `tokens` and print the report
pub async fn run(vocabulary: &Path, tokens: &[String], pretty: bool) -> Result<()> {
    let directory = InMemoryIngredientDirectory::load(vocabulary).await?;
    let service = IngredientValidationService::new(Arc::new(directory));
    let report = service.validate(tokens).await?;
    print_json(&report, pretty)
}
