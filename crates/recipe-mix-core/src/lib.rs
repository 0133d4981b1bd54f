// ABOUTME: Core types and constants for the recipe mix engine
// ABOUTME: Foundation crate with error handling, sourcing constants, and request/response models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Mix Core
//!
//! Foundation crate providing shared types and constants for the recipe mix
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `SourceError`
//! - **constants**: Request limits, matching thresholds, and the technique vocabulary
//! - **models**: Ingredients, recipe candidates, and mix request/response types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (ingredients, recipe candidates, mix request/response)
pub mod models;
