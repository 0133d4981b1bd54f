// ABOUTME: Collaborator traits for the recipe store, ingredient directory, and recipe generator
// ABOUTME: Async seams the mix engine calls; record validation and in-memory versions live alongside
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Collaborator Providers
//!
//! The engine never talks to a database or model endpoint directly. It calls
//! the three traits below, each returning [`SourceError`] on failure so the
//! engine can decide whether the failure is fatal (vocabulary for the
//! validation service) or recoverable (catalog queries, generative calls).

/// In-memory collaborators backed by JSON fixtures
pub mod memory;
/// Loosely-typed collaborator records and their validation into candidates
pub mod records;

pub use memory::{InMemoryIngredientDirectory, InMemoryRecipeStore, UnconfiguredGenerator};
pub use records::{CatalogIngredient, CatalogRecord, GeneratedRecipe};

use async_trait::async_trait;
use recipe_mix_core::errors::SourceError;
use recipe_mix_core::models::{GenerationRequest, MasterIngredient};

// ============================================================================
// Provider Traits
// ============================================================================

/// Curated recipe store queried one technique at a time
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Store identifier used in logs
    fn name(&self) -> &'static str;

    /// Up to `limit` records for `technique`, best-ranked first
    async fn query_by_technique(
        &self,
        technique: &str,
        limit: usize,
    ) -> Result<Vec<CatalogRecord>, SourceError>;
}

/// Master ingredient vocabulary
#[async_trait]
pub trait IngredientDirectory: Send + Sync {
    /// Directory identifier used in logs
    fn name(&self) -> &'static str;

    /// Every active vocabulary entry; inactive ones may be included and are
    /// filtered by the matcher
    async fn list_active(&self) -> Result<Vec<MasterIngredient>, SourceError>;
}

/// Generative recipe synthesis
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Generator identifier used in logs
    fn name(&self) -> &'static str;

    /// Produce one recipe for the requested technique
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedRecipe, SourceError>;
}
