// ABOUTME: Allergy and dietary restriction filtering for recipe candidates
// ABOUTME: Case-insensitive substring checks against allergens and a fixed meat keyword list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dietary Filter
//!
//! Comparisons are lowercase in composed Unicode form but keep diacritics:
//! in Vietnamese "cá" (fish) and "cà" (eggplant) are different words, so
//! stripping accents here would turn vegetables into allergens.

use recipe_mix_core::constants::dietary::{MEAT_KEYWORDS, VEGETARIAN_LABELS};
use recipe_mix_core::models::{RecipeCandidate, UserConstraints};
use tracing::debug;

use crate::similarity::fold_case;

/// Dietary restriction parsed from a free-text label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DietaryRestriction {
    /// No meat or seafood
    Vegetarian,
    /// Any other label; accepted but not enforced
    Custom(String),
}

impl DietaryRestriction {
    /// Parse a label case-insensitively
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let folded = fold_case(label.trim());
        if VEGETARIAN_LABELS.contains(&folded.as_str()) {
            Self::Vegetarian
        } else {
            Self::Custom(folded)
        }
    }
}

/// Filter built once per request from the caller's constraints
#[derive(Debug, Clone, Default)]
pub struct DietaryFilter {
    allergens: Vec<String>,
    vegetarian: bool,
}

impl DietaryFilter {
    /// Build from request constraints; blank allergy entries are ignored
    #[must_use]
    pub fn from_constraints(constraints: &UserConstraints) -> Self {
        let allergens = constraints
            .allergies
            .iter()
            .map(|allergy| fold_case(allergy.trim()))
            .filter(|allergy| !allergy.is_empty())
            .collect();
        let vegetarian = constraints
            .dietary_restrictions
            .iter()
            .any(|label| DietaryRestriction::from_label(label) == DietaryRestriction::Vegetarian);
        Self {
            allergens,
            vegetarian,
        }
    }

    /// Whether the filter rejects nothing
    #[must_use]
    pub fn is_permissive(&self) -> bool {
        self.allergens.is_empty() && !self.vegetarian
    }

    /// The first rule the candidate breaks, if any
    #[must_use]
    pub fn violation(&self, candidate: &RecipeCandidate) -> Option<String> {
        if self.is_permissive() {
            return None;
        }
        candidate.ingredients.iter().find_map(|ingredient| {
            let name = fold_case(&ingredient.name);
            if let Some(allergen) = self.allergens.iter().find(|a| name.contains(a.as_str())) {
                return Some(format!("ingredient '{}' contains allergen '{allergen}'", ingredient.name));
            }
            if self.vegetarian {
                if let Some(keyword) = MEAT_KEYWORDS.iter().find(|k| name.contains(**k)) {
                    return Some(format!(
                        "ingredient '{}' is not vegetarian ({keyword})",
                        ingredient.name
                    ));
                }
            }
            None
        })
    }

    /// Whether the candidate satisfies every constraint
    #[must_use]
    pub fn allows(&self, candidate: &RecipeCandidate) -> bool {
        self.violation(candidate).is_none()
    }

    /// Keep only candidates that satisfy every constraint, preserving order
    #[must_use]
    pub fn apply(&self, candidates: Vec<RecipeCandidate>) -> Vec<RecipeCandidate> {
        candidates
            .into_iter()
            .filter(|candidate| match self.violation(candidate) {
                Some(reason) => {
                    debug!(recipe.id = %candidate.id, %reason, "Dietary filter dropped recipe");
                    false
                }
                None => true,
            })
            .collect()
    }
}
