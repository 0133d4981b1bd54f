// ABOUTME: Mix request/response models with provenance statistics and non-fatal warnings
// ABOUTME: Defines MixRequest, UserConstraints, MixResponse, MixStats, and MixWarning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ingredient::{InvalidReason, MatchSuggestion};
use super::recipe::RecipeCandidate;
use crate::errors::SourceKind;

/// Allergy, diet, and technique preferences supplied with a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConstraints {
    /// Ingredient fragments that must not appear in any returned recipe
    pub allergies: Vec<String>,
    /// Diet labels (e.g. "vegetarian")
    pub dietary_restrictions: Vec<String>,
    /// Techniques to query first, in order
    pub preferred_techniques: Vec<String>,
}

impl UserConstraints {
    /// Add an allergy
    #[must_use]
    pub fn with_allergy(mut self, allergy: impl Into<String>) -> Self {
        self.allergies.push(allergy.into());
        self
    }

    /// Add a dietary restriction label
    #[must_use]
    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.dietary_restrictions.push(restriction.into());
        self
    }

    /// Add a preferred technique
    #[must_use]
    pub fn with_preferred_technique(mut self, technique: impl Into<String>) -> Self {
        self.preferred_techniques.push(technique.into());
        self
    }
}

/// A request for `desired_count` recipes built from `ingredients`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixRequest {
    /// Raw ingredient tokens (1..=20)
    pub ingredients: Vec<String>,
    /// Number of recipes wanted (1..=5)
    pub desired_count: usize,
    /// Allergy, diet, and technique preferences
    #[serde(default)]
    pub constraints: UserConstraints,
}

impl MixRequest {
    /// Create a request with no constraints
    #[must_use]
    pub fn new<I, S>(ingredients: I, desired_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            desired_count,
            constraints: UserConstraints::default(),
        }
    }

    /// Attach constraints
    #[must_use]
    pub fn with_constraints(mut self, constraints: UserConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Provenance breakdown of the returned recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixStats {
    /// The requested `desired_count`
    pub requested: usize,
    /// Returned recipes that came from the catalog
    pub from_catalog: usize,
    /// Returned recipes that came from generative synthesis
    pub from_generated: usize,
    /// `round(100 * from_catalog / requested)`
    pub coverage_pct: u32,
}

impl MixStats {
    /// Zero-valued stats for a request that produced nothing
    #[must_use]
    pub const fn empty(requested: usize) -> Self {
        Self {
            requested,
            from_catalog: 0,
            from_generated: 0,
            coverage_pct: 0,
        }
    }
}

/// Non-fatal problem encountered while serving a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MixWarning {
    /// An ingredient token matched no vocabulary entry
    UnmatchedIngredient {
        /// Token as entered
        original: String,
        /// Near misses, best first
        suggestions: Vec<MatchSuggestion>,
    },
    /// An ingredient token was refused before matching
    InvalidIngredient {
        /// Token as entered
        original: String,
        /// Why it was refused
        reason: InvalidReason,
    },
    /// A collaborator call failed and contributed nothing
    SourceUnavailable {
        /// Which collaborator
        source: SourceKind,
        /// Technique the call was for, if any
        technique: Option<String>,
        /// Failure description
        message: String,
    },
    /// A catalog record failed schema validation and was dropped
    RejectedRecord {
        /// Record identifier, when present
        record_id: Option<String>,
        /// What was wrong with it
        reason: String,
    },
}

/// Recipes selected for a request plus provenance and cost accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixResponse {
    /// Correlation id for caller-side logging
    pub request_id: Uuid,
    /// At most `desired_count` recipes in technique-priority order
    pub recipes: Vec<RecipeCandidate>,
    /// Provenance breakdown
    pub stats: MixStats,
    /// Generative spend avoided by serving catalog recipes (USD)
    pub cost_estimate: f64,
    /// Non-fatal problems encountered along the way
    pub warnings: Vec<MixWarning>,
    /// When the response was finalized
    pub generated_at: DateTime<Utc>,
    /// Wall-clock time spent producing the response
    pub elapsed_ms: u64,
}

impl MixResponse {
    /// Whether the request produced no recipes at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
