// ABOUTME: Catalog source - per-technique store queries with overlap, moderation, and dietary checks
// ABOUTME: Queries run in concurrent waves that never exceed what a sequential stop-when-full loop issues
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalog Source
//!
//! Each technique slot takes up to its limit of accepted candidates from an
//! over-fetched, ranked query result. A candidate is accepted when it is
//! approved, public, at least half of its required ingredients resolve
//! against the request, and it passes the dietary filter.
//!
//! Slots are queried in waves. A wave is the shortest run of upcoming slots
//! whose limits add up to the remaining need, so a slot is only queried when
//! every earlier slot filling completely would still leave the request short.

use futures_util::future::join_all;
use recipe_mix_core::constants::sourcing::MIN_INGREDIENT_OVERLAP;
use recipe_mix_core::errors::{SourceError, SourceKind};
use recipe_mix_core::models::{MixWarning, RecipeCandidate};
use recipe_mix_intelligence::{DietaryFilter, IngredientSet, TechniquePlan, TechniqueSlot};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

use super::source_warning;
use crate::config::MixConfig;
use crate::logging::MixLogger;
use crate::providers::RecipeStore;

/// Candidates and warnings gathered from the catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogSourcing {
    /// Accepted candidates in technique-plan order (not yet deduplicated)
    pub candidates: Vec<RecipeCandidate>,
    /// Rejected records and failed queries
    pub warnings: Vec<MixWarning>,
    /// Technique queries actually issued
    pub queries_issued: usize,
}

#[derive(Debug, Default)]
struct SlotOutcome {
    accepted: Vec<RecipeCandidate>,
    warnings: Vec<MixWarning>,
}

/// Per-request view over the recipe store
pub struct CatalogSource {
    store: Arc<dyn RecipeStore>,
    query_limit: usize,
    query_timeout: Duration,
}

impl CatalogSource {
    /// Wrap `store` with the configured over-fetch limit and deadline
    #[must_use]
    pub fn new(store: Arc<dyn RecipeStore>, config: &MixConfig) -> Self {
        Self {
            store,
            query_limit: config.catalog_query_limit,
            query_timeout: config.catalog_timeout(),
        }
    }

    /// Source up to `desired_count` candidates following `plan`
    pub async fn source(
        &self,
        desired_count: usize,
        plan: &TechniquePlan,
        requested: &IngredientSet,
        filter: &DietaryFilter,
    ) -> CatalogSourcing {
        let slots = plan.slots();
        let mut sourcing = CatalogSourcing::default();
        let mut next = 0;

        while sourcing.candidates.len() < desired_count && next < slots.len() {
            let need = desired_count - sourcing.candidates.len();
            let start = next;
            let mut capacity = 0;
            while next < slots.len() && capacity < need {
                capacity += slots[next].limit;
                next += 1;
            }

            let wave = &slots[start..next];
            debug!(
                wave_size = wave.len(),
                need,
                first_technique = %wave[0].technique,
                "Issuing catalog query wave"
            );
            let outcomes = join_all(
                wave.iter()
                    .map(|slot| self.query_slot(slot, requested, filter)),
            )
            .await;

            sourcing.queries_issued += wave.len();
            for outcome in outcomes {
                sourcing.candidates.extend(outcome.accepted);
                sourcing.warnings.extend(outcome.warnings);
            }
        }

        info!(
            desired_count,
            accepted = sourcing.candidates.len(),
            queries = sourcing.queries_issued,
            "Catalog sourcing complete"
        );
        sourcing
    }

    async fn query_slot(
        &self,
        slot: &TechniqueSlot,
        requested: &IngredientSet,
        filter: &DietaryFilter,
    ) -> SlotOutcome {
        let query = self
            .store
            .query_by_technique(&slot.technique, self.query_limit);
        let records = match timeout(self.query_timeout, query).await {
            Ok(Ok(records)) => records,
            Ok(Err(error)) => return Self::failed(slot, error),
            Err(_) => {
                let timeout_ms = u64::try_from(self.query_timeout.as_millis()).unwrap_or(u64::MAX);
                return Self::failed(slot, SourceError::timeout(SourceKind::Catalog, timeout_ms));
            }
        };

        let mut outcome = SlotOutcome::default();
        for record in records {
            if outcome.accepted.len() >= slot.limit {
                break;
            }
            let candidate = match record.into_candidate(&slot.technique) {
                Ok(candidate) => candidate,
                Err(error) => {
                    debug!(technique = %slot.technique, %error, "Rejected catalog record");
                    outcome.warnings.push(source_warning(
                        SourceKind::Catalog,
                        Some(slot.technique.as_str()),
                        error,
                    ));
                    continue;
                }
            };
            if let Some(reason) = Self::rejection(&candidate, requested, filter) {
                debug!(
                    recipe.id = %candidate.id,
                    technique = %slot.technique,
                    %reason,
                    "Skipping catalog candidate"
                );
                continue;
            }
            outcome.accepted.push(candidate);
        }
        outcome
    }

    fn rejection(
        candidate: &RecipeCandidate,
        requested: &IngredientSet,
        filter: &DietaryFilter,
    ) -> Option<String> {
        if !candidate.is_servable() {
            return Some("not approved or not public".to_owned());
        }
        let overlap = requested.overlap_ratio(candidate);
        if overlap < MIN_INGREDIENT_OVERLAP {
            return Some(format!("ingredient overlap {overlap:.2} below threshold"));
        }
        filter.violation(candidate)
    }

    fn failed(slot: &TechniqueSlot, error: SourceError) -> SlotOutcome {
        let technique = Some(slot.technique.as_str());
        MixLogger::log_source_failure(SourceKind::Catalog, technique, &error);
        SlotOutcome {
            accepted: Vec::new(),
            warnings: vec![source_warning(SourceKind::Catalog, technique, error)],
        }
    }
}
