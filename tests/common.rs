// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, a scriptable recipe store, a counting generator, and fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `recipe_mix`

use async_trait::async_trait;
use recipe_mix::config::MixConfig;
use recipe_mix::errors::{SourceError, SourceKind};
use recipe_mix::mix::MixEngine;
use recipe_mix::models::{GenerationRequest, MasterIngredient, RecipeIngredient};
use recipe_mix::providers::{
    CatalogIngredient, CatalogRecord, GeneratedRecipe, IngredientDirectory,
    InMemoryIngredientDirectory, RecipeGenerator, RecipeStore,
};
use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::time::sleep;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// Master vocabulary used across tests
pub fn vocabulary() -> Vec<MasterIngredient> {
    vec![
        MasterIngredient::new("ing-001", "Cà rốt").with_category("vegetable"),
        MasterIngredient::new("ing-002", "Thịt gà")
            .with_category("meat")
            .with_aliases(["gà", "gà ta"]),
        MasterIngredient::new("ing-003", "Hành lá")
            .with_category("vegetable")
            .with_aliases(["hành xanh"]),
        MasterIngredient::new("ing-004", "Tôm").with_category("seafood"),
        MasterIngredient::new("ing-005", "Đậu hũ")
            .with_category("protein")
            .with_aliases(["đậu phụ"]),
        MasterIngredient::new("ing-006", "Cà chua").with_category("vegetable"),
        MasterIngredient::new("ing-007", "Nước mắm").with_category("condiment"),
        MasterIngredient::new("ing-008", "Thịt heo").inactive(),
    ]
}

/// Approved, public catalog record with required ingredients
pub fn record(id: &str, title: &str, technique: &str, ingredients: &[&str]) -> CatalogRecord {
    CatalogRecord::approved(
        id,
        title,
        technique,
        ingredients
            .iter()
            .map(|name| CatalogIngredient::required(*name))
            .collect(),
    )
}

/// Directory over [`vocabulary`]
pub fn directory() -> Arc<dyn IngredientDirectory> {
    Arc::new(InMemoryIngredientDirectory::new(vocabulary()))
}

/// Engine over the given store and generator with default configuration
pub fn engine(store: Arc<MockRecipeStore>, generator: Arc<CountingGenerator>) -> MixEngine {
    engine_with_config(store, generator, MixConfig::default())
}

/// Engine over the given store and generator
pub fn engine_with_config(
    store: Arc<MockRecipeStore>,
    generator: Arc<CountingGenerator>,
    config: MixConfig,
) -> MixEngine {
    init_test_logging();
    MixEngine::new(store, directory(), generator, config)
}

// ============================================================================
// Scriptable recipe store
// ============================================================================

/// Recipe store keyed by technique with failure injection and call recording
#[derive(Default)]
pub struct MockRecipeStore {
    records: HashMap<String, Vec<CatalogRecord>>,
    failing: HashSet<String>,
    fail_all: bool,
    delay: Option<Duration>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ranked record under its technique
    pub fn with_record(mut self, record: CatalogRecord) -> Self {
        let technique = record.technique.clone().unwrap_or_default();
        self.records.entry(technique).or_default().push(record);
        self
    }

    /// Add a record under an explicit technique key (for records lacking one)
    pub fn with_record_for(mut self, technique: &str, record: CatalogRecord) -> Self {
        self.records
            .entry(technique.to_owned())
            .or_default()
            .push(record);
        self
    }

    /// Make queries for `technique` fail
    pub fn failing_on(mut self, technique: &str) -> Self {
        self.failing.insert(technique.to_owned());
        self
    }

    /// Make every query fail
    pub fn failing_everywhere(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Delay every query
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Techniques queried, with the limit passed, in call order
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn queried_techniques(&self) -> Vec<String> {
        self.queries().into_iter().map(|(t, _)| t).collect()
    }
}

#[async_trait]
impl RecipeStore for MockRecipeStore {
    fn name(&self) -> &'static str {
        "mock_recipe_store"
    }

    async fn query_by_technique(
        &self,
        technique: &str,
        limit: usize,
    ) -> Result<Vec<CatalogRecord>, SourceError> {
        self.queries
            .lock()
            .unwrap()
            .push((technique.to_owned(), limit));
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        if self.fail_all || self.failing.contains(technique) {
            return Err(SourceError::unavailable(
                SourceKind::Catalog,
                format!("store offline for {technique}"),
            ));
        }
        Ok(self
            .records
            .get(technique)
            .map(|records| records.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// Counting generator
// ============================================================================

/// Generator that records every request and can fail or stall per technique
#[derive(Default)]
pub struct CountingGenerator {
    failing: HashSet<String>,
    fail_all: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl CountingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, technique: &str) -> Self {
        self.failing.insert(technique.to_owned());
        self
    }

    pub fn failing_everywhere(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requested_techniques(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.technique).collect()
    }
}

#[async_trait]
impl RecipeGenerator for CountingGenerator {
    fn name(&self) -> &'static str {
        "counting_generator"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedRecipe, SourceError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        if self.fail_all || self.failing.contains(&request.technique) {
            return Err(SourceError::unavailable(
                SourceKind::Generative,
                "model endpoint returned 503",
            ));
        }
        Ok(GeneratedRecipe::new(
            format!("Món {} đặc biệt", request.technique),
            request
                .ingredients
                .iter()
                .map(|name| RecipeIngredient::required(name.as_str()))
                .collect(),
        ))
    }
}

/// Directory whose every call fails
pub struct FailingDirectory;

#[async_trait]
impl IngredientDirectory for FailingDirectory {
    fn name(&self) -> &'static str {
        "failing_directory"
    }

    async fn list_active(&self) -> Result<Vec<MasterIngredient>, SourceError> {
        Err(SourceError::unavailable(
            SourceKind::Vocabulary,
            "vocabulary table locked",
        ))
    }
}
