// ABOUTME: Master ingredient vocabulary entries and the results of matching raw tokens
// ABOUTME: Defines MasterIngredient, MatchResult, MatchOutcome, and BatchMatchReport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Canonical vocabulary entry for an ingredient
///
/// Immutable for the duration of a request. `normalized_name` is whatever the
/// directory stored; matching always recomputes normalization from `name` so
/// that every call site shares one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterIngredient {
    /// Stable identifier, also the deterministic iteration key
    pub id: String,
    /// Display name (e.g. "Cà rốt")
    pub name: String,
    /// Normalized name as stored by the directory
    #[serde(default)]
    pub normalized_name: String,
    /// Category label (e.g. "vegetable", "protein")
    #[serde(default)]
    pub category: Option<String>,
    /// Alternative spellings and regional names
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Inactive entries are never matched
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl MasterIngredient {
    /// Create an active entry with no aliases or category
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            normalized_name: String::new(),
            category: None,
            aliases: Vec::new(),
            is_active: true,
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add aliases
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Mark the entry inactive
    #[must_use]
    pub const fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// How a raw token was resolved to a vocabulary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Normalized token equals the normalized name
    Exact,
    /// Normalized token equals a normalized alias
    Alias,
    /// Best edit-distance similarity above the fuzzy threshold
    Fuzzy,
}

/// A raw token resolved to a canonical ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Token as entered by the user
    pub original: String,
    /// Matched vocabulary id
    pub ingredient_id: Option<String>,
    /// Matched vocabulary display name
    pub matched_name: Option<String>,
    /// Matched vocabulary category
    pub category: Option<String>,
    /// Which matching stage succeeded
    pub match_type: MatchType,
    /// Confidence in `[0, 1]`
    pub score: f64,
}

/// Near miss offered when a token could not be matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    /// Vocabulary id
    pub ingredient_id: String,
    /// Vocabulary display name
    pub name: String,
    /// Similarity in `[0, 1]`
    pub score: f64,
}

/// Why a token was refused before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Token was empty or whitespace only
    Empty,
}

impl InvalidReason {
    /// Stable reason string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => crate::constants::matching::EMPTY_TOKEN_REASON,
        }
    }
}

/// Result of matching one raw token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Token resolved to a vocabulary entry
    Matched(MatchResult),
    /// No entry reached the fuzzy threshold
    Unmatched {
        /// Token as entered by the user
        original: String,
        /// Up to three near misses, best first
        suggestions: Vec<MatchSuggestion>,
    },
    /// Token was refused before matching
    Invalid {
        /// Token as entered by the user
        original: String,
        /// Why it was refused
        reason: InvalidReason,
    },
}

impl MatchOutcome {
    /// Token as entered by the user
    #[must_use]
    pub fn original(&self) -> &str {
        match self {
            Self::Matched(result) => &result.original,
            Self::Unmatched { original, .. } | Self::Invalid { original, .. } => original,
        }
    }

    /// The match result, when the token resolved
    #[must_use]
    pub const fn as_matched(&self) -> Option<&MatchResult> {
        match self {
            Self::Matched(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the token resolved
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Outcomes for a batch of tokens, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMatchReport {
    /// One outcome per input token
    pub outcomes: Vec<MatchOutcome>,
}

impl BatchMatchReport {
    /// Resolved tokens
    pub fn matched(&self) -> impl Iterator<Item = &MatchResult> {
        self.outcomes.iter().filter_map(MatchOutcome::as_matched)
    }

    /// Tokens that did not reach the fuzzy threshold
    pub fn unmatched(&self) -> impl Iterator<Item = &MatchOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MatchOutcome::Unmatched { .. }))
    }

    /// Tokens refused before matching
    pub fn invalid(&self) -> impl Iterator<Item = &MatchOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MatchOutcome::Invalid { .. }))
    }

    /// Whether every token resolved
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.outcomes.iter().all(MatchOutcome::is_matched)
    }
}
