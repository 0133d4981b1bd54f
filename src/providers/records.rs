// ABOUTME: Raw collaborator records and their validation into recipe candidates
// ABOUTME: Catalog records missing required fields are rejected, never filled with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_mix_core::constants::sourcing::GENERATED_ID_PREFIX;
use recipe_mix_core::errors::SourceError;
use recipe_mix_core::models::{Provenance, RecipeCandidate, RecipeIngredient};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ingredient line as the store returned it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogIngredient {
    /// Ingredient name
    pub name: Option<String>,
    /// Optional flag; absent means required
    pub is_optional: Option<bool>,
}

impl CatalogIngredient {
    /// Required ingredient line
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_optional: None,
        }
    }

    /// Optional ingredient line
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_optional: Some(true),
        }
    }
}

/// A recipe record as the store returned it; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRecord {
    /// Store identifier
    pub id: Option<String>,
    /// Display title
    pub title: Option<String>,
    /// Technique label; the queried technique is used when absent
    pub technique: Option<String>,
    /// Ingredient lines
    pub ingredients: Option<Vec<CatalogIngredient>>,
    /// Moderation flag
    pub is_approved: Option<bool>,
    /// Visibility flag
    pub is_public: Option<bool>,
}

impl CatalogRecord {
    /// Approved, public record with the given ingredient lines
    #[must_use]
    pub fn approved(
        id: impl Into<String>,
        title: impl Into<String>,
        technique: impl Into<String>,
        ingredients: Vec<CatalogIngredient>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            technique: Some(technique.into()),
            ingredients: Some(ingredients),
            is_approved: Some(true),
            is_public: Some(true),
        }
    }

    /// Validate into a catalog candidate
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MalformedRecord`] when the id, title, ingredient
    /// list, an ingredient name, or a moderation flag is missing.
    pub fn into_candidate(self, queried_technique: &str) -> Result<RecipeCandidate, SourceError> {
        let Some(id) = non_blank(self.id) else {
            return Err(SourceError::malformed(None, "missing id"));
        };
        let Some(title) = non_blank(self.title) else {
            return Err(SourceError::malformed(Some(id), "missing title"));
        };
        let Some(lines) = self.ingredients else {
            return Err(SourceError::malformed(Some(id), "missing ingredient list"));
        };
        let (Some(is_approved), Some(is_public)) = (self.is_approved, self.is_public) else {
            return Err(SourceError::malformed(Some(id), "missing moderation flags"));
        };

        let mut ingredients = Vec::with_capacity(lines.len());
        for (index, line) in lines.into_iter().enumerate() {
            let Some(name) = non_blank(line.name) else {
                return Err(SourceError::malformed(
                    Some(id),
                    format!("ingredient #{} has no name", index + 1),
                ));
            };
            ingredients.push(RecipeIngredient {
                name,
                is_optional: line.is_optional.unwrap_or(false),
            });
        }

        let technique = non_blank(self.technique).unwrap_or_else(|| queried_technique.to_owned());

        Ok(RecipeCandidate {
            id,
            title,
            technique,
            ingredients,
            provenance: Provenance::Catalog,
            is_approved,
            is_public,
        })
    }
}

/// Raw output of the generative collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    /// Identifier, when the generator assigns one
    #[serde(default)]
    pub id: Option<String>,
    /// Display title
    pub title: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

impl GeneratedRecipe {
    /// Generated recipe without an id
    #[must_use]
    pub fn new(title: impl Into<String>, ingredients: Vec<RecipeIngredient>) -> Self {
        Self {
            id: None,
            title: title.into(),
            ingredients,
        }
    }

    /// Convert into an unapproved, private candidate for `technique`
    ///
    /// The technique is always the one that was requested, whatever the
    /// generator wrote.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MalformedRecord`] when the title is blank.
    pub fn into_candidate(self, technique: &str) -> Result<RecipeCandidate, SourceError> {
        let id = non_blank(self.id)
            .unwrap_or_else(|| format!("{GENERATED_ID_PREFIX}{}", Uuid::new_v4()));
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SourceError::malformed(Some(id), "generated recipe has no title"));
        }

        Ok(RecipeCandidate {
            title: title.to_owned(),
            id,
            technique: technique.to_owned(),
            ingredients: self.ingredients,
            provenance: Provenance::Generated,
            is_approved: false,
            is_public: false,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
