// ABOUTME: Batch ingredient validation - resolves raw tokens against the master vocabulary
// ABOUTME: Loads the vocabulary once per batch and reports matched, unmatched, and invalid tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_mix_core::constants::limits::MAX_INGREDIENTS_PER_REQUEST;
use recipe_mix_core::errors::{AppError, AppResult};
use recipe_mix_core::models::BatchMatchReport;
use recipe_mix_intelligence::IngredientVocabulary;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::providers::IngredientDirectory;

/// Resolves user-entered ingredient lists for callers outside the mix engine
#[derive(Clone)]
pub struct IngredientValidationService {
    directory: Arc<dyn IngredientDirectory>,
}

impl IngredientValidationService {
    /// Create a service over `directory`
    #[must_use]
    pub fn new(directory: Arc<dyn IngredientDirectory>) -> Self {
        Self { directory }
    }

    /// Match every token, in order
    ///
    /// # Errors
    ///
    /// - `ValueOutOfRange` for more than 20 tokens, before the vocabulary is loaded
    /// - `ExternalServiceUnavailable` when the vocabulary cannot be loaded
    #[instrument(
        skip(self, tokens),
        fields(tokens = tokens.len(), directory = self.directory.name())
    )]
    pub async fn validate<S>(&self, tokens: &[S]) -> AppResult<BatchMatchReport>
    where
        S: AsRef<str> + Sync,
    {
        if tokens.len() > MAX_INGREDIENTS_PER_REQUEST {
            return Err(AppError::out_of_range(
                "ingredients",
                format!(
                    "at most {MAX_INGREDIENTS_PER_REQUEST} ingredients may be validated at once, got {}",
                    tokens.len()
                ),
            ));
        }

        let entries = self.directory.list_active().await?;
        let vocabulary = IngredientVocabulary::new(entries);
        let report = vocabulary.match_batch(tokens)?;

        info!(
            vocabulary = vocabulary.len(),
            matched = report.matched().count(),
            unmatched = report.unmatched().count(),
            invalid = report.invalid().count(),
            "Ingredient batch validated"
        );
        Ok(report)
    }
}
