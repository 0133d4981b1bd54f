// ABOUTME: Matching and selection algorithms for the recipe mix engine
// ABOUTME: Extracted from the application crate so the pure logic compiles and tests in isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Mix Intelligence
//!
//! The CPU-bound steps of the mix pipeline. Nothing here performs I/O or
//! holds state across requests; the application crate wires these pieces
//! between its collaborator calls.
//!
//! - [`similarity`]: normalization and edit-distance similarity, the single
//!   source of truth for every fuzzy comparison
//! - [`matcher`]: exact → alias → fuzzy resolution against a vocabulary, and
//!   ingredient-overlap checks for catalog candidates
//! - [`dedup`]: near-duplicate title suppression
//! - [`dietary`]: allergy and vegetarian filtering
//! - [`diversity`]: technique ordering and gap computation
//! - [`stats`]: coverage and cost accounting

/// Near-duplicate title suppression for catalog candidates
pub mod dedup;
/// Allergy and dietary restriction filtering
pub mod dietary;
/// Technique ordering and missing-technique selection
pub mod diversity;
/// Raw token resolution against the master vocabulary
pub mod matcher;
/// Text normalization and edit-distance similarity
pub mod similarity;
/// Coverage and cost accounting for the final selection
pub mod stats;

pub use dedup::dedup_by_title;
pub use dietary::DietaryFilter;
pub use diversity::{missing_techniques, recipe_gap, TechniquePlan, TechniqueSlot};
pub use matcher::{resolved_names, IngredientSet, IngredientVocabulary};
pub use similarity::{normalize, normalized_similarity, similarity};
pub use stats::{compute_stats, cost_avoided};
