// ABOUTME: Technique ordering for catalog sourcing and missing-technique selection for generation
// ABOUTME: Preferred techniques come first, then the remaining default vocabulary in fixed order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_mix_core::constants::sourcing::{PREFERRED_TECHNIQUE_LIMIT, SWEEP_TECHNIQUE_LIMIT};
use recipe_mix_core::models::RecipeCandidate;
use std::collections::HashSet;

use crate::similarity::normalize;

/// One technique to query and how many accepted candidates to take from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechniqueSlot {
    /// Technique label as it will be sent to the store
    pub technique: String,
    /// Accepted candidates to take (2 preferred, 1 sweep)
    pub limit: usize,
    /// Whether the caller asked for this technique
    pub preferred: bool,
}

/// Ordered technique queries for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechniquePlan {
    slots: Vec<TechniqueSlot>,
}

impl TechniquePlan {
    /// Preferred techniques (deduplicated, blanks skipped) followed by every
    /// default technique not already listed
    #[must_use]
    pub fn new<S: AsRef<str>>(preferred: &[S], defaults: &[&str]) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut slots = Vec::with_capacity(preferred.len() + defaults.len());

        for technique in preferred {
            let label = technique.as_ref().trim();
            let key = normalize(label);
            if key.is_empty() || !seen.insert(key) {
                continue;
            }
            slots.push(TechniqueSlot {
                technique: label.to_owned(),
                limit: PREFERRED_TECHNIQUE_LIMIT,
                preferred: true,
            });
        }

        for technique in defaults {
            if seen.insert(normalize(technique)) {
                slots.push(TechniqueSlot {
                    technique: (*technique).to_owned(),
                    limit: SWEEP_TECHNIQUE_LIMIT,
                    preferred: false,
                });
            }
        }

        Self { slots }
    }

    /// Slots in query order
    #[must_use]
    pub fn slots(&self) -> &[TechniqueSlot] {
        &self.slots
    }

    /// Number of technique queries the plan could issue
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the plan has no techniques at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Recipes still needed after catalog sourcing
#[must_use]
pub const fn recipe_gap(desired_count: usize, deduped_catalog: usize) -> usize {
    desired_count.saturating_sub(deduped_catalog)
}

/// Default techniques not represented among the catalog candidates, in
/// vocabulary order, truncated to `gap`
#[must_use]
pub fn missing_techniques(
    catalog: &[RecipeCandidate],
    defaults: &[&str],
    gap: usize,
) -> Vec<String> {
    let represented: HashSet<String> = catalog.iter().map(|c| normalize(&c.technique)).collect();
    defaults
        .iter()
        .filter(|technique| !represented.contains(&normalize(technique)))
        .take(gap)
        .map(|technique| (*technique).to_owned())
        .collect()
}
