// ABOUTME: In-memory recipe store and ingredient directory loaded from JSON, plus a stub generator
// ABOUTME: Used by the CLI and integration tests; record order in the file is the ranking order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use recipe_mix_core::errors::{AppError, AppResult, SourceError, SourceKind};
use recipe_mix_core::models::{GenerationRequest, MasterIngredient};
use recipe_mix_intelligence::normalize;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use super::records::{CatalogRecord, GeneratedRecipe};
use super::{IngredientDirectory, RecipeGenerator, RecipeStore};

async fn read_json_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("cannot read {}: {e}", path.display())).with_source(e)
    })
}

/// Recipe store over a fixed list of records
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeStore {
    records: Vec<CatalogRecord>,
}

impl InMemoryRecipeStore {
    /// Store over `records`, ranked in the given order
    #[must_use]
    pub const fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the text is not a JSON array of
    /// objects. Individual records are not validated here.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a JSON array of records from disk
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = read_json_file(path.as_ref()).await?;
        Self::from_json(&json)
    }

    /// Number of records held
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    fn name(&self) -> &'static str {
        "in_memory_recipe_store"
    }

    async fn query_by_technique(
        &self,
        technique: &str,
        limit: usize,
    ) -> Result<Vec<CatalogRecord>, SourceError> {
        let wanted = normalize(technique);
        let records: Vec<CatalogRecord> = self
            .records
            .iter()
            .filter(|record| {
                record
                    .technique
                    .as_deref()
                    .is_some_and(|t| normalize(t) == wanted)
            })
            .take(limit)
            .cloned()
            .collect();
        debug!(technique, limit, returned = records.len(), "In-memory catalog query");
        Ok(records)
    }
}

/// Ingredient directory over a fixed vocabulary
#[derive(Debug, Clone, Default)]
pub struct InMemoryIngredientDirectory {
    entries: Vec<MasterIngredient>,
}

impl InMemoryIngredientDirectory {
    /// Directory over `entries`
    #[must_use]
    pub const fn new(entries: Vec<MasterIngredient>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of vocabulary entries
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the text is not a valid entry array.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a JSON array of vocabulary entries from disk
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = read_json_file(path.as_ref()).await?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl IngredientDirectory for InMemoryIngredientDirectory {
    fn name(&self) -> &'static str {
        "in_memory_ingredient_directory"
    }

    async fn list_active(&self) -> Result<Vec<MasterIngredient>, SourceError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.is_active)
            .cloned()
            .collect())
    }
}

/// Generator used when no generative backend is wired in; every call fails
/// as unavailable, so gaps stay unfilled and are reported as warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

#[async_trait]
impl RecipeGenerator for UnconfiguredGenerator {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedRecipe, SourceError> {
        Err(SourceError::unavailable(
            SourceKind::Generative,
            format!(
                "no recipe generator configured (technique '{}')",
                request.technique
            ),
        ))
    }
}
