// ABOUTME: Domain service layer for operations outside the mix pipeline
// ABOUTME: Provides protocol-agnostic services a caller can expose through any entry point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer

/// Batch ingredient validation against the master vocabulary
pub mod ingredient_validation;

pub use ingredient_validation::IngredientValidationService;
