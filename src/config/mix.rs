// ABOUTME: Mix engine configuration loaded from RECIPE_MIX_* environment variables
// ABOUTME: Unit cost, catalog over-fetch limit, per-call deadlines, and generative fan-out bound
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_mix_core::constants::cost::DEFAULT_UNIT_COST_USD;
use recipe_mix_core::constants::sourcing::{
    DEFAULT_CATALOG_QUERY_LIMIT, DEFAULT_MAX_CONCURRENT_GENERATIONS, PREFERRED_TECHNIQUE_LIMIT,
};
use recipe_mix_core::constants::timeouts::{
    DEFAULT_CATALOG_TIMEOUT_MS, DEFAULT_GENERATION_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use super::ConfigError;

/// Environment variable names
pub mod env_vars {
    /// Cost (USD) of one generative call
    pub const UNIT_COST_USD: &str = "RECIPE_MIX_UNIT_COST_USD";
    /// Records requested per catalog technique query
    pub const CATALOG_QUERY_LIMIT: &str = "RECIPE_MIX_CATALOG_QUERY_LIMIT";
    /// Deadline for one catalog query (milliseconds)
    pub const CATALOG_TIMEOUT_MS: &str = "RECIPE_MIX_CATALOG_TIMEOUT_MS";
    /// Deadline for one generative call (milliseconds)
    pub const GENERATION_TIMEOUT_MS: &str = "RECIPE_MIX_GENERATION_TIMEOUT_MS";
    /// Generative calls in flight at once
    pub const MAX_CONCURRENT_GENERATIONS: &str = "RECIPE_MIX_MAX_CONCURRENT_GENERATIONS";
}

/// Tunables for [`crate::mix::MixEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixConfig {
    /// Generative spend avoided per catalog recipe served (USD)
    pub unit_cost_usd: f64,
    /// Records requested per technique query
    pub catalog_query_limit: usize,
    /// Deadline for one catalog query (milliseconds)
    pub catalog_timeout_ms: u64,
    /// Deadline for one generative call (milliseconds)
    pub generation_timeout_ms: u64,
    /// Generative calls in flight at once
    pub max_concurrent_generations: usize,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            unit_cost_usd: DEFAULT_UNIT_COST_USD,
            catalog_query_limit: DEFAULT_CATALOG_QUERY_LIMIT,
            catalog_timeout_ms: DEFAULT_CATALOG_TIMEOUT_MS,
            generation_timeout_ms: DEFAULT_GENERATION_TIMEOUT_MS,
            max_concurrent_generations: DEFAULT_MAX_CONCURRENT_GENERATIONS,
        }
    }
}

impl MixConfig {
    /// Load from environment variables, falling back to defaults for unset ones
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when a variable is set but not a valid
    /// number, or a range error from [`Self::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            unit_cost_usd: parse_env(env_vars::UNIT_COST_USD, DEFAULT_UNIT_COST_USD)?,
            catalog_query_limit: parse_env(
                env_vars::CATALOG_QUERY_LIMIT,
                DEFAULT_CATALOG_QUERY_LIMIT,
            )?,
            catalog_timeout_ms: parse_env(env_vars::CATALOG_TIMEOUT_MS, DEFAULT_CATALOG_TIMEOUT_MS)?,
            generation_timeout_ms: parse_env(
                env_vars::GENERATION_TIMEOUT_MS,
                DEFAULT_GENERATION_TIMEOUT_MS,
            )?,
            max_concurrent_generations: parse_env(
                env_vars::MAX_CONCURRENT_GENERATIONS,
                DEFAULT_MAX_CONCURRENT_GENERATIONS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.unit_cost_usd.is_finite() || self.unit_cost_usd < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "unit_cost_usd must be a finite, non-negative amount",
            ));
        }
        if self.catalog_query_limit < PREFERRED_TECHNIQUE_LIMIT {
            return Err(ConfigError::InvalidRange(
                "catalog_query_limit must cover at least the preferred-technique limit",
            ));
        }
        if self.catalog_timeout_ms == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "catalog_timeout_ms must be greater than zero",
            ));
        }
        if self.generation_timeout_ms == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "generation_timeout_ms must be greater than zero",
            ));
        }
        if self.max_concurrent_generations == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_concurrent_generations must be at least 1",
            ));
        }
        Ok(())
    }

    /// Catalog query deadline
    #[must_use]
    pub const fn catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.catalog_timeout_ms)
    }

    /// Generative call deadline
    #[must_use]
    pub const fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    /// Override the catalog deadline
    #[must_use]
    pub fn with_catalog_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.catalog_timeout_ms = timeout_ms;
        self
    }

    /// Override the generative deadline
    #[must_use]
    pub fn with_generation_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.generation_timeout_ms = timeout_ms;
        self
    }

    /// Override the unit cost
    #[must_use]
    pub fn with_unit_cost_usd(mut self, unit_cost_usd: f64) -> Self {
        self.unit_cost_usd = unit_cost_usd;
        self
    }
}

fn parse_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::Parse(format!("{name}={raw}: {e}"))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}
