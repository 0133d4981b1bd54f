// ABOUTME: Text normalization and normalized Levenshtein similarity
// ABOUTME: Shared by ingredient matching, overlap resolution, and title deduplication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Similarity Module
//!
//! `normalize` folds case, strips combining diacritics, and trims, so that
//! "Cà Rốt " and "ca rot" compare equal (and "Đậu hũ" and "dau hu"). `similarity` is
//! `1 - levenshtein(a, b) / max(len(a), len(b))` over Unicode scalar values,
//! with two empty strings considered identical.
//!
//! ```
//! use recipe_mix_intelligence::similarity::{normalize, similarity};
//!
//! assert_eq!(normalize("  Thịt Gà "), "thit ga");
//! assert!((similarity("ca ro", "ca rot") - 5.0 / 6.0).abs() < 1e-9);
//! ```

use strsim::normalized_levenshtein;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, strip combining diacritics, and trim surrounding whitespace
///
/// "đ" has no decomposition, so it is folded to "d" by hand.
/// Total: every input produces a (possibly empty) string.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Edit-distance similarity in `[0, 1]`
///
/// Symmetric; `similarity(a, a) == 1.0`; `similarity("", "") == 1.0`.
/// Inputs are compared as given; callers comparing raw text should use
/// [`normalized_similarity`].
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b).clamp(0.0, 1.0)
}

/// Similarity of the normalized forms of two raw strings
#[must_use]
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    similarity(&normalize(a), &normalize(b))
}

/// Lowercase in composed (NFC) form, without stripping diacritics
///
/// Used where accents carry meaning, e.g. allergen checks where "cá" (fish)
/// must not match "cà" (eggplant).
#[must_use]
pub fn fold_case(input: &str) -> String {
    input.nfc().collect::<String>().to_lowercase()
}
