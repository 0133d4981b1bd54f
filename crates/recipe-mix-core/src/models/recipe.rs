// ABOUTME: Recipe candidate model shared by catalog and generative sources
// ABOUTME: Defines RecipeCandidate, RecipeIngredient, Provenance, and GenerationRequest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::mix::UserConstraints;

/// Where a recipe candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Curated, pre-approved recipe store
    Catalog,
    /// On-demand generative synthesis
    Generated,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient name as written in the recipe
    pub name: String,
    /// Optional ingredients do not count toward ingredient overlap
    #[serde(default)]
    pub is_optional: bool,
}

impl RecipeIngredient {
    /// Create a required ingredient
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_optional: false,
        }
    }

    /// Create an optional ingredient
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_optional: true,
        }
    }
}

/// A recipe considered for the mix response
///
/// Request-scoped: candidates are discarded once the response is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCandidate {
    /// Identifier in the source that produced it
    pub id: String,
    /// Display title
    pub title: String,
    /// Cooking technique label
    pub technique: String,
    /// Ingredient lines
    pub ingredients: Vec<RecipeIngredient>,
    /// Catalog or generated
    pub provenance: Provenance,
    /// Passed moderation (always false for generated recipes)
    pub is_approved: bool,
    /// Visible to all users
    pub is_public: bool,
}

impl RecipeCandidate {
    /// Ingredients that count toward overlap
    pub fn required_ingredients(&self) -> impl Iterator<Item = &RecipeIngredient> {
        self.ingredients.iter().filter(|i| !i.is_optional)
    }

    /// Whether the candidate came from the catalog
    #[must_use]
    pub fn is_catalog(&self) -> bool {
        self.provenance == Provenance::Catalog
    }

    /// Whether the candidate came from generative synthesis
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.provenance == Provenance::Generated
    }

    /// Whether the candidate may be served from the catalog
    #[must_use]
    pub const fn is_servable(&self) -> bool {
        self.is_approved && self.is_public
    }
}

/// Input handed to the generative collaborator for one missing technique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Ingredient names, canonical where the matcher resolved them
    pub ingredients: Vec<String>,
    /// Technique the recipe must use
    pub technique: String,
    /// The caller's constraints, passed through unchanged
    pub constraints: UserConstraints,
}
