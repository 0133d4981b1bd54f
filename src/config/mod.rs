// ABOUTME: Environment-only configuration for the recipe mix engine
// ABOUTME: Exposes MixConfig and the ConfigError raised while loading or validating it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Configuration
//!
//! All tunables come from environment variables with compiled-in defaults.
//! Matching thresholds and the technique vocabulary are constants in
//! `recipe_mix_core::constants`, not configuration.

/// Mix engine tunables (cost, over-fetch, deadlines, fan-out)
pub mod mix;

pub use mix::MixConfig;

use crate::errors::{AppError, ErrorCode};
use std::env::VarError;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] VarError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::Parse(_) | ConfigError::EnvVar(_) | ConfigError::MissingField(_) => {
                ErrorCode::ConfigError
            }
            ConfigError::InvalidRange(_) | ConfigError::ValueOutOfRange(_) => {
                ErrorCode::ConfigInvalid
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
