// ABOUTME: Core data models shared by the matcher, sourcing pipeline, and callers
// ABOUTME: Re-exports ingredient, recipe candidate, and mix request/response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Master vocabulary entries and ingredient match results
pub mod ingredient;
/// Mix request, response, statistics, and warnings
pub mod mix;
/// Recipe candidates and generation requests
pub mod recipe;

pub use ingredient::{
    BatchMatchReport, InvalidReason, MasterIngredient, MatchOutcome, MatchResult, MatchSuggestion,
    MatchType,
};
pub use mix::{MixRequest, MixResponse, MixStats, MixWarning, UserConstraints};
pub use recipe::{GenerationRequest, Provenance, RecipeCandidate, RecipeIngredient};
