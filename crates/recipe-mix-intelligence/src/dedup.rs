// ABOUTME: Near-duplicate title suppression for catalog recipe candidates
// ABOUTME: First-seen candidate wins; later titles within the similarity threshold are dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_mix_core::constants::matching::TITLE_DUPLICATE_THRESHOLD;
use recipe_mix_core::models::RecipeCandidate;
use tracing::debug;

use crate::similarity::{normalize, similarity};

/// Drop candidates whose normalized title is at least 0.8 similar to a
/// candidate kept earlier. Order of the survivors is preserved.
#[must_use]
pub fn dedup_by_title(candidates: Vec<RecipeCandidate>) -> Vec<RecipeCandidate> {
    let mut kept: Vec<RecipeCandidate> = Vec::with_capacity(candidates.len());
    let mut kept_titles: Vec<String> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let title = normalize(&candidate.title);
        let duplicate_of = kept_titles
            .iter()
            .position(|existing| similarity(&title, existing) >= TITLE_DUPLICATE_THRESHOLD);

        if let Some(index) = duplicate_of {
            debug!(
                recipe.id = %candidate.id,
                recipe.title = %candidate.title,
                duplicate_of = %kept[index].id,
                "Dropping near-duplicate recipe"
            );
            continue;
        }

        kept_titles.push(title);
        kept.push(candidate);
    }

    kept
}
