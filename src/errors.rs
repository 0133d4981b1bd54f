// ABOUTME: Re-exports the unified error types from recipe-mix-core
// ABOUTME: Keeps `recipe_mix::errors::*` paths stable for the binary and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `recipe-mix-core` so the intelligence crate can
//! return them too; this module re-exports them under the application crate.

pub use recipe_mix_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails,
    SourceError, SourceKind,
};
