// ABOUTME: Mix engine - catalog-first recipe sourcing with generative gap fill
// ABOUTME: Drives matching, catalog waves, gap computation, generation, dedup, filtering, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Mix Engine
//!
//! One call to [`MixEngine::generate`] walks a request through these phases:
//!
//! ```text
//! RECEIVED → CATALOG_SOURCED → GAP_COMPUTED → GENERATIVE_FILLED → DEDUPED → FILTERED → FINALIZED
//! ```
//!
//! Only request validation can fail the call. Every collaborator failure
//! after that point is recovered, reported as a [`MixWarning`], and the
//! request still reaches `FINALIZED`, possibly with no recipes at all.

/// Catalog source: technique-wave queries against the recipe store
pub mod catalog;
/// Generative source adapter: bounded, cancellable gap fill
pub mod generative;

pub use catalog::{CatalogSource, CatalogSourcing};
pub use generative::{GenerativeFill, GenerativeSource};

use chrono::Utc;
use recipe_mix_core::constants::limits::{
    MAX_DESIRED_COUNT, MAX_INGREDIENTS_PER_REQUEST, MIN_DESIRED_COUNT,
};
use recipe_mix_core::constants::techniques::DEFAULT_TECHNIQUES;
use recipe_mix_core::errors::{AppError, AppResult, SourceError, SourceKind};
use recipe_mix_core::models::{
    BatchMatchReport, MatchOutcome, MixRequest, MixResponse, MixWarning,
};
use recipe_mix_intelligence::{
    compute_stats, cost_avoided, dedup_by_title, missing_techniques, recipe_gap, resolved_names,
    DietaryFilter, IngredientSet, IngredientVocabulary, TechniquePlan,
};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::MixConfig;
use crate::logging::MixLogger;
use crate::providers::{IngredientDirectory, RecipeGenerator, RecipeStore};

/// Per-request pipeline phase, logged at each transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixPhase {
    /// Request validated and ingredients matched
    Received,
    /// Catalog queries finished
    CatalogSourced,
    /// Gap and missing techniques known
    GapComputed,
    /// Generative calls finished (zero or more)
    GenerativeFilled,
    /// Catalog and generated recipes merged, catalog titles already deduplicated
    Deduped,
    /// Dietary filter applied
    Filtered,
    /// Response assembled
    Finalized,
}

impl MixPhase {
    /// Stable upper-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::CatalogSourced => "CATALOG_SOURCED",
            Self::GapComputed => "GAP_COMPUTED",
            Self::GenerativeFilled => "GENERATIVE_FILLED",
            Self::Deduped => "DEDUPED",
            Self::Filtered => "FILTERED",
            Self::Finalized => "FINALIZED",
        }
    }
}

impl fmt::Display for MixPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a recovered collaborator failure into a response warning
pub(crate) fn source_warning(
    kind: SourceKind,
    technique: Option<&str>,
    error: SourceError,
) -> MixWarning {
    match error {
        SourceError::MalformedRecord { record_id, reason } => {
            MixWarning::RejectedRecord { record_id, reason }
        }
        other => MixWarning::SourceUnavailable {
            source: other.kind().unwrap_or(kind),
            technique: technique.map(str::to_owned),
            message: other.to_string(),
        },
    }
}

/// Warnings for tokens that did not resolve to a vocabulary entry
#[must_use]
pub fn matching_warnings(report: &BatchMatchReport) -> Vec<MixWarning> {
    report
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            MatchOutcome::Matched(_) => None,
            MatchOutcome::Unmatched {
                original,
                suggestions,
            } => Some(MixWarning::UnmatchedIngredient {
                original: original.clone(),
                suggestions: suggestions.clone(),
            }),
            MatchOutcome::Invalid { original, reason } => Some(MixWarning::InvalidIngredient {
                original: original.clone(),
                reason: *reason,
            }),
        })
        .collect()
}

/// Reject a request before any sourcing begins
///
/// # Errors
///
/// - `ValueOutOfRange` when `desired_count` is outside 1..=5 or more than 20
///   ingredients are given
/// - `MissingRequiredField` when the ingredient list is empty
/// - `InvalidInput` when every ingredient token is blank
pub fn validate_request(request: &MixRequest) -> AppResult<()> {
    if !(MIN_DESIRED_COUNT..=MAX_DESIRED_COUNT).contains(&request.desired_count) {
        return Err(AppError::out_of_range(
            "desired_count",
            format!(
                "desired_count must be between {MIN_DESIRED_COUNT} and {MAX_DESIRED_COUNT}, got {}",
                request.desired_count
            ),
        ));
    }
    if request.ingredients.is_empty() {
        return Err(AppError::missing_field("ingredients"));
    }
    if request.ingredients.len() > MAX_INGREDIENTS_PER_REQUEST {
        return Err(AppError::out_of_range(
            "ingredients",
            format!(
                "at most {MAX_INGREDIENTS_PER_REQUEST} ingredients are allowed, got {}",
                request.ingredients.len()
            ),
        ));
    }
    if request.ingredients.iter().all(|token| token.trim().is_empty()) {
        return Err(
            AppError::invalid_input("ingredients must contain at least one non-blank token")
                .with_field("ingredients"),
        );
    }
    Ok(())
}

/// Catalog-first recipe mixer
///
/// Holds only shared handles to read-only collaborators and immutable
/// configuration, so one engine can serve concurrent requests.
#[derive(Clone)]
pub struct MixEngine {
    store: Arc<dyn RecipeStore>,
    directory: Arc<dyn IngredientDirectory>,
    generator: Arc<dyn RecipeGenerator>,
    config: MixConfig,
}

impl MixEngine {
    /// Create an engine over the given collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn RecipeStore>,
        directory: Arc<dyn IngredientDirectory>,
        generator: Arc<dyn RecipeGenerator>,
        config: MixConfig,
    ) -> Self {
        Self {
            store,
            directory,
            generator,
            config,
        }
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &MixConfig {
        &self.config
    }

    /// Produce up to `desired_count` recipes for `request`
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`validate_request`]; collaborator
    /// failures never fail the call.
    pub async fn generate(&self, request: MixRequest) -> AppResult<MixResponse> {
        self.generate_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// As [`Self::generate`], abandoning outstanding generative calls once
    /// `cancel` fires; the response is still finalized
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`validate_request`].
    #[instrument(
        skip(self, request, cancel),
        fields(desired_count = request.desired_count, ingredients = request.ingredients.len())
    )]
    pub async fn generate_with_cancellation(
        &self,
        request: MixRequest,
        cancel: &CancellationToken,
    ) -> AppResult<MixResponse> {
        validate_request(&request)?;
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let desired_count = request.desired_count;
        let mut warnings = Vec::new();

        let (vocabulary, vocabulary_warning) = self.load_vocabulary().await;
        warnings.extend(vocabulary_warning);
        let report = vocabulary.match_batch(&request.ingredients)?;
        warnings.extend(matching_warnings(&report));
        let requested = IngredientSet::from_report(&report, vocabulary);
        let filter = DietaryFilter::from_constraints(&request.constraints);
        let plan = TechniquePlan::new(&request.constraints.preferred_techniques, &DEFAULT_TECHNIQUES);
        Self::enter(MixPhase::Received, request_id);

        let catalog = CatalogSource::new(Arc::clone(&self.store), &self.config)
            .source(desired_count, &plan, &requested, &filter)
            .await;
        warnings.extend(catalog.warnings);
        Self::enter(MixPhase::CatalogSourced, request_id);

        // Dedup runs before the gap is computed so that a dropped duplicate
        // leaves its technique open for generation; DEDUPED is logged once
        // the merged list is settled
        let catalog_recipes = dedup_by_title(catalog.candidates);
        let gap = recipe_gap(desired_count, catalog_recipes.len());
        let missing = missing_techniques(&catalog_recipes, &DEFAULT_TECHNIQUES, gap);
        debug!(%request_id, gap, missing = ?missing, "Gap computed");
        Self::enter(MixPhase::GapComputed, request_id);

        let generated = if missing.is_empty() {
            GenerativeFill::default()
        } else {
            GenerativeSource::new(Arc::clone(&self.generator), &self.config)
                .fill(
                    &missing,
                    &resolved_names(&report),
                    &request.constraints,
                    cancel,
                )
                .await
        };
        warnings.extend(generated.warnings);
        Self::enter(MixPhase::GenerativeFilled, request_id);

        // Generated recipes are not compared against catalog titles or each other
        let mut recipes = catalog_recipes;
        recipes.extend(generated.candidates);
        Self::enter(MixPhase::Deduped, request_id);

        let mut recipes = filter.apply(recipes);
        Self::enter(MixPhase::Filtered, request_id);

        recipes.truncate(desired_count);
        let stats = compute_stats(desired_count, &recipes);
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        MixLogger::log_mix_completed(&request_id.to_string(), &stats, warnings.len(), elapsed_ms);
        Self::enter(MixPhase::Finalized, request_id);

        Ok(MixResponse {
            request_id,
            recipes,
            cost_estimate: cost_avoided(&stats, self.config.unit_cost_usd),
            stats,
            warnings,
            generated_at: Utc::now(),
            elapsed_ms,
        })
    }

    async fn load_vocabulary(&self) -> (IngredientVocabulary, Option<MixWarning>) {
        let timeout_ms = self.config.catalog_timeout_ms;
        let error = match timeout(self.config.catalog_timeout(), self.directory.list_active()).await
        {
            Ok(Ok(entries)) => return (IngredientVocabulary::new(entries), None),
            Ok(Err(error)) => error,
            Err(_) => SourceError::timeout(SourceKind::Vocabulary, timeout_ms),
        };
        MixLogger::log_source_failure(SourceKind::Vocabulary, None, &error);
        (
            IngredientVocabulary::default(),
            Some(source_warning(SourceKind::Vocabulary, None, error)),
        )
    }

    fn enter(phase: MixPhase, request_id: Uuid) {
        debug!(%request_id, %phase, "Mix phase");
    }
}
