// ABOUTME: Coverage and cost-avoided accounting for the final recipe selection
// ABOUTME: Counts provenance over the returned slice and prices catalog hits at the unit cost
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_mix_core::models::{MixStats, RecipeCandidate};

/// Provenance counts and coverage over the recipes actually returned
///
/// `coverage_pct = round(100 * from_catalog / requested)`; a zero `requested`
/// (never produced by a validated request) yields zero coverage.
#[must_use]
pub fn compute_stats(requested: usize, recipes: &[RecipeCandidate]) -> MixStats {
    let from_catalog = recipes.iter().filter(|r| r.is_catalog()).count();
    let from_generated = recipes.iter().filter(|r| r.is_generated()).count();
    let coverage_pct = if requested == 0 {
        0
    } else {
        (100.0 * from_catalog as f64 / requested as f64).round() as u32
    };

    MixStats {
        requested,
        from_catalog,
        from_generated,
        coverage_pct,
    }
}

/// Generative spend avoided by serving `stats.from_catalog` recipes from the catalog
#[must_use]
pub fn cost_avoided(stats: &MixStats, unit_cost: f64) -> f64 {
    stats.from_catalog as f64 * unit_cost
}
