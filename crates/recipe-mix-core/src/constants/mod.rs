// ABOUTME: Application constants for request limits, matching thresholds, and technique vocabulary
// ABOUTME: Response invariants depend on these values, so they are constants rather than config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain

/// Limits enforced on incoming mix and validation requests
pub mod limits {
    /// Maximum number of ingredient tokens in one request or validation batch
    pub const MAX_INGREDIENTS_PER_REQUEST: usize = 20;

    /// Smallest recipe count a caller may request
    pub const MIN_DESIRED_COUNT: usize = 1;

    /// Largest recipe count a caller may request
    pub const MAX_DESIRED_COUNT: usize = 5;
}

/// Scores and thresholds used by the ingredient matcher and deduplicator
pub mod matching {
    /// Score assigned to an exact name match
    pub const EXACT_MATCH_SCORE: f64 = 1.0;

    /// Score assigned to an alias match
    pub const ALIAS_MATCH_SCORE: f64 = 0.95;

    /// Minimum similarity for a fuzzy match to be accepted
    pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

    /// Minimum similarity for a vocabulary entry to be offered as a suggestion
    pub const SUGGESTION_THRESHOLD: f64 = 0.5;

    /// Maximum number of suggestions returned for an unmatched token
    pub const MAX_SUGGESTIONS: usize = 3;

    /// Title similarity at or above which two catalog recipes are duplicates
    pub const TITLE_DUPLICATE_THRESHOLD: f64 = 0.8;

    /// Reason reported for blank ingredient tokens
    pub const EMPTY_TOKEN_REASON: &str = "empty";
}

/// Catalog sourcing parameters
pub mod sourcing {
    /// Fraction of a recipe's required ingredients that must resolve against the request
    pub const MIN_INGREDIENT_OVERLAP: f64 = 0.5;

    /// Accepted candidates taken per preferred technique
    pub const PREFERRED_TECHNIQUE_LIMIT: usize = 2;

    /// Accepted candidates taken per technique in the sweep pass
    pub const SWEEP_TECHNIQUE_LIMIT: usize = 1;

    /// Prefix for identifiers assigned to generated recipes lacking one
    pub const GENERATED_ID_PREFIX: &str = "gen-";

    /// Records requested per technique query, so rejected top hits can be replaced
    pub const DEFAULT_CATALOG_QUERY_LIMIT: usize = 10;

    /// Generative calls allowed in flight at once
    pub const DEFAULT_MAX_CONCURRENT_GENERATIONS: usize = 5;
}

/// Collaborator call deadlines
pub mod timeouts {
    /// Deadline for one catalog technique query (milliseconds)
    pub const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 5_000;

    /// Deadline for one generative call (milliseconds)
    pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 30_000;
}

/// Cooking technique vocabulary used to diversify results
pub mod techniques {
    /// Stir-fry
    pub const STIR_FRY: &str = "xào";
    /// Soup
    pub const SOUP: &str = "canh";
    /// Braise / caramelised simmer
    pub const BRAISE: &str = "kho";
    /// Deep or pan fry
    pub const FRY: &str = "chiên";
    /// Steam
    pub const STEAM: &str = "hấp";
    /// Boil
    pub const BOIL: &str = "luộc";
    /// Grill
    pub const GRILL: &str = "nướng";

    /// Default technique vocabulary in sweep order
    pub const DEFAULT_TECHNIQUES: [&str; 7] = [STIR_FRY, SOUP, BRAISE, FRY, STEAM, BOIL, GRILL];
}

/// Dietary constraint vocabulary
pub mod dietary {
    /// Restriction labels that switch on the vegetarian meat check
    pub const VEGETARIAN_LABELS: &[&str] = &["vegetarian", "chay"];

    /// Ingredient-name fragments treated as meat or seafood
    pub const MEAT_KEYWORDS: &[&str] = &[
        "thịt",
        "gà",
        "bò",
        "heo",
        "lợn",
        "vịt",
        "ngan",
        "dê",
        "cừu",
        "sườn",
        "cá",
        "tôm",
        "cua",
        "mực",
        "nghêu",
        "sò",
        "lạp xưởng",
        "xúc xích",
        "chicken",
        "beef",
        "pork",
        "duck",
        "lamb",
        "meat",
        "bacon",
        "fish",
        "shrimp",
        "prawn",
        "crab",
        "squid",
    ];
}

/// Cost accounting
pub mod cost {
    /// Default cost (USD) of one generative call, used to express cost avoided
    pub const DEFAULT_UNIT_COST_USD: f64 = 0.002;
}

/// Service identity used in logs
pub mod service_names {
    /// Name reported by the logging subsystem
    pub const RECIPE_MIX: &str = "recipe-mix";
}
