// ABOUTME: Generative source adapter - one bounded, cancellable call per missing technique
// ABOUTME: Results are collected in missing-technique order; failures become warnings, never errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use futures_util::stream::{self, StreamExt};
use recipe_mix_core::errors::{SourceError, SourceKind};
use recipe_mix_core::models::{GenerationRequest, MixWarning, RecipeCandidate, UserConstraints};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::source_warning;
use crate::config::MixConfig;
use crate::logging::MixLogger;
use crate::providers::RecipeGenerator;

/// Candidates and warnings gathered from the generator
#[derive(Debug, Clone, Default)]
pub struct GenerativeFill {
    /// Generated candidates in missing-technique order
    pub candidates: Vec<RecipeCandidate>,
    /// Failed, timed-out, or cancelled calls
    pub warnings: Vec<MixWarning>,
    /// Generator calls started
    pub calls_issued: usize,
}

/// Per-request view over the recipe generator
pub struct GenerativeSource {
    generator: Arc<dyn RecipeGenerator>,
    call_timeout: Duration,
    max_concurrent: usize,
}

impl GenerativeSource {
    /// Wrap `generator` with the configured deadline and fan-out bound
    #[must_use]
    pub fn new(generator: Arc<dyn RecipeGenerator>, config: &MixConfig) -> Self {
        Self {
            generator,
            call_timeout: config.generation_timeout(),
            max_concurrent: config.max_concurrent_generations.max(1),
        }
    }

    /// Make exactly one attempt per technique in `techniques`
    pub async fn fill(
        &self,
        techniques: &[String],
        ingredients: &[String],
        constraints: &UserConstraints,
        cancel: &CancellationToken,
    ) -> GenerativeFill {
        let calls = techniques.iter().map(|technique| {
            let request = GenerationRequest {
                ingredients: ingredients.to_vec(),
                technique: technique.clone(),
                constraints: constraints.clone(),
            };
            self.invoke(request, cancel)
        });
        let results: Vec<Result<RecipeCandidate, SourceError>> = stream::iter(calls)
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut fill = GenerativeFill {
            calls_issued: techniques.len(),
            ..GenerativeFill::default()
        };
        for (technique, result) in techniques.iter().zip(results) {
            match result {
                Ok(candidate) => {
                    debug!(recipe.id = %candidate.id, %technique, "Generated recipe");
                    fill.candidates.push(candidate);
                }
                Err(error) => {
                    let technique = Some(technique.as_str());
                    MixLogger::log_source_failure(SourceKind::Generative, technique, &error);
                    fill.warnings
                        .push(source_warning(SourceKind::Generative, technique, error));
                }
            }
        }

        info!(
            requested = techniques.len(),
            generated = fill.candidates.len(),
            generator = self.generator.name(),
            "Generative fill complete"
        );
        fill
    }

    async fn invoke(
        &self,
        request: GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<RecipeCandidate, SourceError> {
        if cancel.is_cancelled() {
            return Err(SourceError::cancelled(SourceKind::Generative));
        }
        let technique = request.technique.clone();
        let call = timeout(self.call_timeout, self.generator.generate(request));

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(SourceError::cancelled(SourceKind::Generative)),
            outcome = call => match outcome {
                Ok(Ok(recipe)) => recipe.into_candidate(&technique),
                Ok(Err(error)) => Err(error),
                Err(_) => {
                    let timeout_ms = u64::try_from(self.call_timeout.as_millis()).unwrap_or(u64::MAX);
                    Err(SourceError::timeout(SourceKind::Generative, timeout_ms))
                }
            },
        }
    }
}
