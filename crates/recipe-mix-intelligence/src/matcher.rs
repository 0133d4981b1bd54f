// ABOUTME: Resolves raw ingredient tokens against the master vocabulary (exact, alias, fuzzy)
// ABOUTME: Also decides whether a recipe's ingredients overlap enough with the requested set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient Matcher
//!
//! [`IngredientVocabulary`] is built once per request batch from the active
//! vocabulary entries. Entries are sorted by id so that fuzzy ties resolve the
//! same way on every run, whatever order the directory returned them in.
//!
//! Matching stages, first success wins:
//!
//! 1. exact: `normalize(raw) == normalize(name)`, score 1.0
//! 2. alias: `normalize(raw)` equals a normalized alias, score 0.95
//! 3. fuzzy: best `similarity(normalize(raw), normalize(name))`, accepted at 0.7
//!
//! Tokens that fail every stage get up to three suggestions scoring at least 0.5.

use recipe_mix_core::constants::limits::MAX_INGREDIENTS_PER_REQUEST;
use recipe_mix_core::constants::matching::{
    ALIAS_MATCH_SCORE, EXACT_MATCH_SCORE, FUZZY_MATCH_THRESHOLD, MAX_SUGGESTIONS,
    SUGGESTION_THRESHOLD,
};
use recipe_mix_core::errors::{AppError, AppResult};
use recipe_mix_core::models::{
    BatchMatchReport, InvalidReason, MasterIngredient, MatchOutcome, MatchResult, MatchSuggestion,
    MatchType, RecipeCandidate,
};
use std::cmp::Ordering;

use crate::similarity::{fold_case, normalize, similarity};

#[derive(Debug, Clone)]
struct VocabularyEntry {
    ingredient: MasterIngredient,
    normalized_name: String,
    normalized_aliases: Vec<String>,
}

impl VocabularyEntry {
    fn new(ingredient: MasterIngredient) -> Self {
        let normalized_name = normalize(&ingredient.name);
        let normalized_aliases = ingredient
            .aliases
            .iter()
            .map(|alias| normalize(alias))
            .filter(|alias| !alias.is_empty())
            .collect();
        Self {
            ingredient,
            normalized_name,
            normalized_aliases,
        }
    }

    fn to_result(&self, original: &str, match_type: MatchType, score: f64) -> MatchResult {
        MatchResult {
            original: original.to_owned(),
            ingredient_id: Some(self.ingredient.id.clone()),
            matched_name: Some(self.ingredient.name.clone()),
            category: self.ingredient.category.clone(),
            match_type,
            score,
        }
    }
}

/// Active vocabulary entries in deterministic (id) order
#[derive(Debug, Clone, Default)]
pub struct IngredientVocabulary {
    entries: Vec<VocabularyEntry>,
}

impl IngredientVocabulary {
    /// Build from directory entries; inactive entries are dropped
    #[must_use]
    pub fn new(ingredients: impl IntoIterator<Item = MasterIngredient>) -> Self {
        let mut entries: Vec<VocabularyEntry> = ingredients
            .into_iter()
            .filter(|ingredient| ingredient.is_active)
            .map(VocabularyEntry::new)
            .collect();
        entries.sort_by(|a, b| a.ingredient.id.cmp(&b.ingredient.id));
        Self { entries }
    }

    /// Number of active entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no active entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve one raw token
    #[must_use]
    pub fn match_token(&self, raw: &str) -> MatchOutcome {
        let token = normalize(raw);
        if token.is_empty() {
            return MatchOutcome::Invalid {
                original: raw.to_owned(),
                reason: InvalidReason::Empty,
            };
        }

        if let Some(entry) = self.entries.iter().find(|e| e.normalized_name == token) {
            return MatchOutcome::Matched(entry.to_result(raw, MatchType::Exact, EXACT_MATCH_SCORE));
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.normalized_aliases.iter().any(|alias| *alias == token))
        {
            return MatchOutcome::Matched(entry.to_result(raw, MatchType::Alias, ALIAS_MATCH_SCORE));
        }

        let scored: Vec<(&VocabularyEntry, f64)> = self
            .entries
            .iter()
            .map(|entry| (entry, similarity(&token, &entry.normalized_name)))
            .collect();

        // Strict comparison keeps the earliest entry on equal scores
        let mut best: Option<(&VocabularyEntry, f64)> = None;
        for &(entry, score) in &scored {
            let improves = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improves {
                best = Some((entry, score));
            }
        }

        if let Some((entry, score)) = best {
            if score >= FUZZY_MATCH_THRESHOLD {
                return MatchOutcome::Matched(entry.to_result(raw, MatchType::Fuzzy, score));
            }
        }

        MatchOutcome::Unmatched {
            original: raw.to_owned(),
            suggestions: suggestions_from(&scored),
        }
    }

    /// Resolve a batch of tokens, in input order
    ///
    /// # Errors
    ///
    /// Returns a `ValueOutOfRange` error, before any matching, when the batch
    /// holds more than 20 tokens.
    pub fn match_batch<S: AsRef<str>>(&self, tokens: &[S]) -> AppResult<BatchMatchReport> {
        if tokens.len() > MAX_INGREDIENTS_PER_REQUEST {
            return Err(AppError::out_of_range(
                "ingredients",
                format!(
                    "at most {MAX_INGREDIENTS_PER_REQUEST} ingredients may be matched at once, got {}",
                    tokens.len()
                ),
            ));
        }

        Ok(BatchMatchReport {
            outcomes: tokens
                .iter()
                .map(|token| self.match_token(token.as_ref()))
                .collect(),
        })
    }
}

fn suggestions_from(scored: &[(&VocabularyEntry, f64)]) -> Vec<MatchSuggestion> {
    let mut candidates: Vec<&(&VocabularyEntry, f64)> = scored
        .iter()
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    // Stable sort: equal scores stay in vocabulary order
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    candidates
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(entry, score)| MatchSuggestion {
            ingredient_id: entry.ingredient.id.clone(),
            name: entry.ingredient.name.clone(),
            score: *score,
        })
        .collect()
}

/// Ingredient names to hand to a generator: canonical names where a token
/// resolved, the trimmed token otherwise; invalid tokens are skipped
#[must_use]
pub fn resolved_names(report: &BatchMatchReport) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(report.outcomes.len());
    for outcome in &report.outcomes {
        let name = match outcome {
            MatchOutcome::Matched(result) => result
                .matched_name
                .clone()
                .unwrap_or_else(|| result.original.trim().to_owned()),
            MatchOutcome::Unmatched { original, .. } => original.trim().to_owned(),
            MatchOutcome::Invalid { .. } => continue,
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// The requested ingredients, used to score recipe overlap
///
/// Recipe ingredients resolve through the same vocabulary as the request and
/// compare by ingredient id. Names the vocabulary does not know fall back to
/// text: whole-word containment or fuzzy similarity on accent-preserving
/// text, so "cá" (fish) never stands in for "cà" (eggplant). Only requested
/// terms typed without diacritics also compare on stripped text.
#[derive(Debug, Clone, Default)]
pub struct IngredientSet {
    ids: Vec<String>,
    terms: Vec<RequestedTerm>,
    vocabulary: IngredientVocabulary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestedTerm {
    folded: String,
    unaccented: bool,
}

impl RequestedTerm {
    fn new(raw: &str) -> Option<Self> {
        let folded = fold_case(raw.trim());
        if folded.is_empty() {
            return None;
        }
        let unaccented = normalize(&folded) == folded;
        Some(Self { folded, unaccented })
    }

    fn covers(&self, ingredient_name: &str) -> bool {
        let name = fold_case(ingredient_name.trim());
        text_overlaps(&self.folded, &name)
            || (self.unaccented && text_overlaps(&self.folded, &normalize(&name)))
    }
}

fn text_overlaps(term: &str, name: &str) -> bool {
    contains_words(name, term)
        || contains_words(term, name)
        || similarity(term, name) >= FUZZY_MATCH_THRESHOLD
}

fn contains_words(haystack: &str, needle: &str) -> bool {
    let haystack: Vec<&str> = haystack.split_whitespace().collect();
    let needle: Vec<&str> = needle.split_whitespace().collect();
    !needle.is_empty()
        && haystack
            .windows(needle.len())
            .any(|window| window == needle.as_slice())
}

impl IngredientSet {
    /// Build from raw tokens alone (blank tokens are ignored)
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for token in tokens {
            set.insert_term(token.as_ref());
        }
        set
    }

    /// Build from a match report and the vocabulary that produced it
    ///
    /// Resolved tokens contribute their ingredient id and canonical name;
    /// unresolved tokens contribute their raw text.
    #[must_use]
    pub fn from_report(report: &BatchMatchReport, vocabulary: IngredientVocabulary) -> Self {
        let mut set = Self {
            vocabulary,
            ..Self::default()
        };
        for outcome in &report.outcomes {
            match outcome {
                MatchOutcome::Matched(result) => {
                    if let Some(id) = &result.ingredient_id {
                        if !set.ids.contains(id) {
                            set.ids.push(id.clone());
                        }
                    }
                    set.insert_term(result.matched_name.as_deref().unwrap_or(&result.original));
                }
                MatchOutcome::Unmatched { original, .. } => set.insert_term(original),
                MatchOutcome::Invalid { .. } => {}
            }
        }
        set
    }

    fn insert_term(&mut self, raw: &str) {
        if let Some(term) = RequestedTerm::new(raw) {
            if !self.terms.contains(&term) {
                self.terms.push(term);
            }
        }
    }

    /// Whether nothing usable was requested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.terms.is_empty()
    }

    /// Whether a recipe ingredient name resolves to a requested ingredient
    #[must_use]
    pub fn resolves(&self, ingredient_name: &str) -> bool {
        match self.vocabulary.match_token(ingredient_name) {
            MatchOutcome::Invalid { .. } => false,
            MatchOutcome::Matched(MatchResult {
                ingredient_id: Some(id),
                ..
            }) => self.ids.contains(&id),
            _ => self.terms.iter().any(|term| term.covers(ingredient_name)),
        }
    }

    /// Fraction of the recipe's required ingredients that resolve
    ///
    /// A recipe with no required ingredients scores 1.0.
    #[must_use]
    pub fn overlap_ratio(&self, recipe: &RecipeCandidate) -> f64 {
        let (total, resolved) = recipe
            .required_ingredients()
            .fold((0_usize, 0_usize), |(total, resolved), ingredient| {
                (
                    total + 1,
                    resolved + usize::from(self.resolves(&ingredient.name)),
                )
            });
        if total == 0 {
            1.0
        } else {
            resolved as f64 / total as f64
        }
    }
}
