// ABOUTME: Integration tests for the mix engine pipeline end to end
// ABOUTME: Covers sourcing order, gap fill, dedup, dietary filtering, failures, and cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{engine, engine_with_config, record, CountingGenerator, FailingDirectory, MockRecipeStore};
use recipe_mix::config::MixConfig;
use recipe_mix::errors::{ErrorCode, SourceKind};
use recipe_mix::mix::MixEngine;
use recipe_mix::models::{MixRequest, MixStats, MixWarning, Provenance, UserConstraints};
use recipe_mix::providers::{
    CatalogRecord, InMemoryIngredientDirectory, InMemoryRecipeStore, UnconfiguredGenerator,
};
use recipe_mix_intelligence::{normalize, similarity};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn scenario_a_store() -> MockRecipeStore {
    MockRecipeStore::new()
        .with_record(record(
            "cat-xao-1",
            "Gà xào cà rốt",
            "xào",
            &["thịt gà", "cà rốt"],
        ))
        .with_record(record(
            "cat-canh-1",
            "Canh cà rốt thịt gà",
            "canh",
            &["cà rốt", "thịt gà", "nước mắm"],
        ))
}

// ============================================================================
// Core scenarios
// ============================================================================

#[tokio::test]
async fn test_catalog_first_with_single_generative_fill() {
    let store = Arc::new(scenario_a_store());
    let generator = Arc::new(CountingGenerator::new());
    let engine = engine(store.clone(), generator.clone());

    let response = engine
        .generate(MixRequest::new(["ca ro", "thit ga", "hanh la"], 3))
        .await
        .unwrap();

    assert_eq!(response.stats.from_catalog, 2);
    assert_eq!(response.stats.from_generated, 1);
    assert_eq!(response.stats.coverage_pct, 67);
    assert!((response.cost_estimate - 0.004).abs() < 1e-9);
    assert_eq!(generator.call_count(), 1);
    assert_eq!(generator.requested_techniques(), vec!["kho".to_owned()]);

    let ids: Vec<&str> = response.recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(&ids[..2], &["cat-xao-1", "cat-canh-1"]);
    assert!(ids[2].starts_with("gen-"));
    assert!(response.warnings.is_empty());
}

#[tokio::test]
async fn test_generator_receives_canonical_names() {
    let generator = Arc::new(CountingGenerator::new());
    let engine = engine(Arc::new(scenario_a_store()), generator.clone());

    engine
        .generate(MixRequest::new(["ca ro", "thit ga", "hanh la"], 3))
        .await
        .unwrap();

    let calls = generator.calls();
    assert_eq!(
        calls[0].ingredients,
        vec!["Cà rốt".to_owned(), "Thịt gà".to_owned(), "Hành lá".to_owned()]
    );
}

#[tokio::test]
async fn test_total_sourcing_failure_returns_empty_response() {
    let store = Arc::new(MockRecipeStore::new().failing_everywhere());
    let generator = Arc::new(CountingGenerator::new().failing_everywhere());
    let engine = engine(store, generator.clone());

    let response = engine
        .generate(MixRequest::new(["cà rốt"], 3))
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(response.stats, MixStats::empty(3));
    assert!(response.cost_estimate.abs() < f64::EPSILON);
    assert_eq!(generator.call_count(), 3);
    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::SourceUnavailable {
            source: SourceKind::Catalog,
            ..
        }
    )));
    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::SourceUnavailable {
            source: SourceKind::Generative,
            ..
        }
    )));
}

#[tokio::test]
async fn test_allergen_candidate_replaced_by_next_ranked() {
    let store = Arc::new(
        MockRecipeStore::new()
            .with_record(record(
                "cat-tom",
                "Tôm xào cà rốt",
                "xào",
                &["tôm xào", "cà rốt"],
            ))
            .with_record(record(
                "cat-ga",
                "Gà xào cà rốt",
                "xào",
                &["thịt gà", "cà rốt"],
            )),
    );
    let engine = engine(store.clone(), Arc::new(CountingGenerator::new()));
    let request = MixRequest::new(["cà rốt", "thịt gà"], 1)
        .with_constraints(UserConstraints::default().with_allergy("tôm"));

    let response = engine.generate(request).await.unwrap();

    assert_eq!(response.recipes.len(), 1);
    assert_eq!(response.recipes[0].id, "cat-ga");
    assert_eq!(store.queried_techniques(), vec!["xào".to_owned()]);
}

#[tokio::test]
async fn test_near_duplicate_titles_keep_first() {
    let store = Arc::new(
        MockRecipeStore::new()
            .with_record(record("r1", "Gà xào sả ớt", "xào", &["thịt gà"]))
            .with_record(record("r2", "Gà xào sả ớt", "canh", &["thịt gà"])),
    );
    let generator = Arc::new(CountingGenerator::new().failing_everywhere());
    let engine = engine(store, generator.clone());

    let response = engine
        .generate(MixRequest::new(["thịt gà"], 2))
        .await
        .unwrap();

    let ids: Vec<&str> = response.recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1"]);
    // The dropped duplicate leaves "canh" unrepresented, so it is generated
    assert_eq!(generator.requested_techniques(), vec!["canh".to_owned()]);
}

// ============================================================================
// Sourcing order and limits
// ============================================================================

#[tokio::test]
async fn test_preferred_technique_takes_two_and_comes_first() {
    let store = Arc::new(
        scenario_a_store()
            .with_record(record("kho-1", "Gà kho gừng", "kho", &["thịt gà"]))
            .with_record(record("kho-2", "Cà rốt kho", "kho", &["cà rốt"]))
            .with_record(record("kho-3", "Gà kho sả", "kho", &["thịt gà"])),
    );
    let engine = engine(store.clone(), Arc::new(CountingGenerator::new()));
    let request = MixRequest::new(["cà rốt", "thịt gà"], 3)
        .with_constraints(UserConstraints::default().with_preferred_technique("kho"));

    let response = engine.generate(request).await.unwrap();

    let ids: Vec<&str> = response.recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["kho-1", "kho-2", "cat-xao-1"]);
    assert_eq!(response.stats.coverage_pct, 100);
    assert_eq!(
        store.queried_techniques(),
        vec!["kho".to_owned(), "xào".to_owned()]
    );
}

#[tokio::test]
async fn test_queries_stop_once_enough_candidates() {
    let store = Arc::new(scenario_a_store());
    let engine = engine(store.clone(), Arc::new(CountingGenerator::new()));

    engine
        .generate(MixRequest::new(["cà rốt", "thịt gà"], 1))
        .await
        .unwrap();

    assert_eq!(store.queried_techniques(), vec!["xào".to_owned()]);
}

#[tokio::test]
async fn test_sweep_visits_every_default_technique_when_short() {
    let store = Arc::new(MockRecipeStore::new());
    let engine = engine(store.clone(), Arc::new(CountingGenerator::new()));

    engine
        .generate(MixRequest::new(["cà rốt"], 2))
        .await
        .unwrap();

    let queried = store.queried_techniques();
    assert_eq!(
        queried,
        vec!["xào", "canh", "kho", "chiên", "hấp", "luộc", "nướng"]
    );
    assert!(store.queries().iter().all(|(_, limit)| *limit == 10));
}

#[tokio::test]
async fn test_low_overlap_and_unapproved_candidates_skipped() {
    let mut unapproved = record("hidden", "Gà xào nấm", "xào", &["thịt gà"]);
    unapproved.is_approved = Some(false);
    let store = Arc::new(
        MockRecipeStore::new()
            .with_record(unapproved)
            .with_record(record(
                "low-overlap",
                "Cá lóc xào hành tây",
                "xào",
                &["cá lóc", "hành tây", "thịt gà"],
            ))
            .with_record(record("ok", "Gà xào gừng", "xào", &["thịt gà", "gừng"])),
    );
    let engine = engine(store, Arc::new(CountingGenerator::new()));

    let response = engine
        .generate(MixRequest::new(["thịt gà"], 1))
        .await
        .unwrap();

    assert_eq!(response.recipes[0].id, "ok");
}

#[tokio::test]
async fn test_lookalike_ingredients_do_not_count_as_overlap() {
    // "cá" (fish) and "ớt" (chili) only resemble "cà rốt" once accents are stripped
    let store = Arc::new(MockRecipeStore::new().with_record(record(
        "fish",
        "Cá kho ớt",
        "kho",
        &["cá", "ớt"],
    )));
    let generator = Arc::new(CountingGenerator::new());
    let engine = engine(store, generator.clone());

    let response = engine
        .generate(MixRequest::new(["cà rốt"], 1))
        .await
        .unwrap();

    assert!(response.recipes.iter().all(|r| r.id != "fish"));
    assert_eq!(response.stats.from_catalog, 0);
    assert_eq!(response.stats.from_generated, 1);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_recipe_ingredients_resolve_through_vocabulary() {
    // "gà ta" is an alias and "CÀ RỐT" an exact match for the requested ingredients
    let store = Arc::new(MockRecipeStore::new().with_record(record(
        "alias",
        "Gà ta hầm cà rốt",
        "hầm",
        &["gà ta", "CÀ RỐT", "nước mắm"],
    )));
    let engine = engine(store.clone(), Arc::new(CountingGenerator::new()));
    let request = MixRequest::new(["thit ga", "ca rot"], 1)
        .with_constraints(UserConstraints::default().with_preferred_technique("hầm"));

    let response = engine.generate(request).await.unwrap();

    assert_eq!(response.recipes[0].id, "alias");
    assert_eq!(store.queried_techniques(), vec!["hầm".to_owned()]);
}

#[tokio::test]
async fn test_malformed_record_reported_and_skipped() {
    let broken = CatalogRecord {
        title: None,
        ..record("broken", "", "xào", &["thịt gà"])
    };
    let store = Arc::new(
        MockRecipeStore::new()
            .with_record_for("xào", broken)
            .with_record(record("good", "Gà xào gừng", "xào", &["thịt gà"])),
    );
    let engine = engine(store, Arc::new(CountingGenerator::new()));

    let response = engine
        .generate(MixRequest::new(["thịt gà"], 1))
        .await
        .unwrap();

    assert_eq!(response.recipes[0].id, "good");
    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::RejectedRecord { record_id: Some(id), .. } if id == "broken"
    )));
}

#[tokio::test]
async fn test_failing_technique_does_not_block_others() {
    let store = Arc::new(scenario_a_store().failing_on("xào"));
    let engine = engine(store, Arc::new(CountingGenerator::new().failing_everywhere()));

    let response = engine
        .generate(MixRequest::new(["cà rốt", "thịt gà"], 1))
        .await
        .unwrap();

    assert_eq!(response.recipes[0].id, "cat-canh-1");
    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::SourceUnavailable { technique: Some(t), .. } if t == "xào"
    )));
}

// ============================================================================
// Dietary constraints
// ============================================================================

#[tokio::test]
async fn test_vegetarian_drops_meat_from_catalog_and_generated() {
    let store = Arc::new(
        scenario_a_store().with_record(record(
            "chay-1",
            "Đậu hũ sốt cà chua",
            "chiên",
            &["đậu hũ", "cà chua"],
        )),
    );
    let engine = engine(store, Arc::new(CountingGenerator::new()));
    let request = MixRequest::new(["đậu hũ", "cà chua", "thịt gà"], 3)
        .with_constraints(UserConstraints::default().with_restriction("chay"));

    let response = engine.generate(request).await.unwrap();

    assert!(response.recipes.iter().any(|r| r.id == "chay-1"));
    for recipe in &response.recipes {
        assert!(
            recipe
                .ingredients
                .iter()
                .all(|i| !i.name.to_lowercase().contains("thịt")),
            "{} contains meat",
            recipe.id
        );
    }
    assert_eq!(response.stats.from_generated, 0);
}

// ============================================================================
// Response invariants
// ============================================================================

#[tokio::test]
async fn test_response_invariants_hold_for_every_count() {
    let store = Arc::new(
        scenario_a_store()
            .with_record(record("dup", "Gà xào cà rốt", "kho", &["thịt gà"]))
            .with_record(record("tom", "Tôm hấp", "hấp", &["tôm"]))
            .with_record(record("luoc", "Gà luộc", "luộc", &["thịt gà"])),
    );
    let engine = engine(store, Arc::new(CountingGenerator::new()));

    for count in 1..=5 {
        let request = MixRequest::new(["cà rốt", "thịt gà", "tôm"], count)
            .with_constraints(UserConstraints::default().with_allergy("tôm"));
        let response = engine.generate(request).await.unwrap();

        assert!(response.recipes.len() <= count);
        assert_eq!(
            response.stats.from_catalog + response.stats.from_generated,
            response.recipes.len()
        );
        let expected = (100.0 * response.stats.from_catalog as f64 / count as f64).round() as u32;
        assert_eq!(response.stats.coverage_pct, expected);

        for recipe in &response.recipes {
            assert!(recipe
                .ingredients
                .iter()
                .all(|i| !i.name.to_lowercase().contains("tôm")));
        }

        let catalog: Vec<_> = response
            .recipes
            .iter()
            .filter(|r| r.provenance == Provenance::Catalog)
            .collect();
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert!(similarity(&normalize(&a.title), &normalize(&b.title)) < 0.8);
            }
        }
    }
}

#[tokio::test]
async fn test_generated_recipes_are_private_and_unapproved() {
    let engine = engine(
        Arc::new(MockRecipeStore::new()),
        Arc::new(CountingGenerator::new()),
    );

    let response = engine
        .generate(MixRequest::new(["cà rốt"], 2))
        .await
        .unwrap();

    assert_eq!(response.stats.from_generated, 2);
    let techniques: Vec<&str> = response.recipes.iter().map(|r| r.technique.as_str()).collect();
    assert_eq!(techniques, vec!["xào", "canh"]);
    assert!(response
        .recipes
        .iter()
        .all(|r| !r.is_approved && !r.is_public && r.provenance == Provenance::Generated));
}

// ============================================================================
// Matching warnings
// ============================================================================

#[tokio::test]
async fn test_unmatched_and_blank_tokens_become_warnings() {
    let engine = engine(
        Arc::new(scenario_a_store()),
        Arc::new(CountingGenerator::new()),
    );

    let response = engine
        .generate(MixRequest::new(["cà rốt", "   ", "sầu riêng"], 1))
        .await
        .unwrap();

    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::UnmatchedIngredient { original, .. } if original == "sầu riêng"
    )));
    assert!(response
        .warnings
        .iter()
        .any(|w| matches!(w, MixWarning::InvalidIngredient { .. })));
}

#[tokio::test]
async fn test_vocabulary_failure_degrades_to_raw_tokens() {
    let engine = MixEngine::new(
        Arc::new(scenario_a_store()),
        Arc::new(FailingDirectory),
        Arc::new(CountingGenerator::new()),
        MixConfig::default(),
    );

    let response = engine
        .generate(MixRequest::new(["cà rốt", "thịt gà"], 1))
        .await
        .unwrap();

    assert_eq!(response.recipes[0].id, "cat-xao-1");
    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::SourceUnavailable {
            source: SourceKind::Vocabulary,
            ..
        }
    )));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_requests_rejected_before_sourcing() {
    let store = Arc::new(MockRecipeStore::new());
    let generator = Arc::new(CountingGenerator::new());
    let engine = engine(store.clone(), generator.clone());

    let too_many: Vec<String> = (0..21).map(|i| format!("ingredient {i}")).collect();
    let cases = vec![
        (MixRequest::new(["cà rốt"], 0), ErrorCode::ValueOutOfRange),
        (MixRequest::new(["cà rốt"], 6), ErrorCode::ValueOutOfRange),
        (
            MixRequest::new(Vec::<String>::new(), 2),
            ErrorCode::MissingRequiredField,
        ),
        (MixRequest::new(too_many, 2), ErrorCode::ValueOutOfRange),
        (MixRequest::new([" ", "\t"], 2), ErrorCode::InvalidInput),
    ];

    for (request, code) in cases {
        let error = engine.generate(request).await.unwrap_err();
        assert_eq!(error.code, code);
    }
    assert!(store.queries().is_empty());
    assert_eq!(generator.call_count(), 0);
}

// ============================================================================
// Timeouts and cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_slow_generator_times_out() {
    let generator = Arc::new(CountingGenerator::new().with_delay(Duration::from_secs(60)));
    let config = MixConfig::default().with_generation_timeout_ms(100);
    let engine = engine_with_config(Arc::new(scenario_a_store()), generator.clone(), config);

    let response = engine
        .generate(MixRequest::new(["cà rốt", "thịt gà"], 3))
        .await
        .unwrap();

    assert_eq!(response.stats.from_catalog, 2);
    assert_eq!(response.stats.from_generated, 0);
    assert_eq!(generator.call_count(), 1);
    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::SourceUnavailable { message, .. } if message.contains("timed out")
    )));
}

#[tokio::test(start_paused = true)]
async fn test_slow_catalog_query_times_out() {
    let store = Arc::new(scenario_a_store().with_delay(Duration::from_secs(30)));
    let config = MixConfig::default().with_catalog_timeout_ms(50);
    let generator = Arc::new(CountingGenerator::new());
    let engine = engine_with_config(store, generator.clone(), config);

    let response = engine
        .generate(MixRequest::new(["cà rốt"], 2))
        .await
        .unwrap();

    assert_eq!(response.stats.from_catalog, 0);
    assert_eq!(response.stats.from_generated, 2);
}

#[tokio::test]
async fn test_cancelled_request_still_finalizes() {
    let generator = Arc::new(CountingGenerator::new());
    let engine = engine(Arc::new(scenario_a_store()), generator.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let response = engine
        .generate_with_cancellation(MixRequest::new(["cà rốt", "thịt gà"], 3), &cancel)
        .await
        .unwrap();

    assert_eq!(response.stats.from_catalog, 2);
    assert_eq!(response.stats.from_generated, 0);
    assert_eq!(generator.call_count(), 0);
    assert!(response.warnings.iter().any(|w| matches!(
        w,
        MixWarning::SourceUnavailable { message, .. } if message.contains("cancelled")
    )));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_aborts_in_flight_generation() {
    let generator = Arc::new(CountingGenerator::new().with_delay(Duration::from_secs(10)));
    let engine = engine(Arc::new(MockRecipeStore::new()), generator.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let response = engine
        .generate_with_cancellation(MixRequest::new(["cà rốt"], 2), &cancel)
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(generator.call_count(), 2);
}

// ============================================================================
// Fixture loading
// ============================================================================

#[tokio::test]
async fn test_engine_over_json_catalog() {
    let json = r#"[
        {"id": "r1", "title": "Gà xào cà rốt", "technique": "xào",
         "ingredients": [{"name": "thịt gà"}, {"name": "cà rốt"}, {"name": "tiêu", "is_optional": true}],
         "is_approved": true, "is_public": true},
        {"id": "r2", "technique": "canh", "ingredients": [], "is_approved": true, "is_public": true}
    ]"#;
    let store = InMemoryRecipeStore::from_json(json).unwrap();
    let engine = MixEngine::new(
        Arc::new(store),
        common::directory(),
        Arc::new(CountingGenerator::new().failing_everywhere()),
        MixConfig::default(),
    );

    let response = engine
        .generate(MixRequest::new(["ca rot", "ga"], 2))
        .await
        .unwrap();

    assert_eq!(response.recipes.len(), 1);
    assert_eq!(response.recipes[0].id, "r1");
    assert!(response
        .warnings
        .iter()
        .any(|w| matches!(w, MixWarning::RejectedRecord { record_id: Some(id), .. } if id == "r2")));
}

#[tokio::test]
async fn test_fixtures_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    let vocabulary_path = dir.path().join("vocabulary.json");
    std::fs::write(
        &catalog_path,
        r#"[{"id": "r1", "title": "Canh chua cá", "technique": "canh",
             "ingredients": [{"name": "cà chua"}], "is_approved": true, "is_public": true}]"#,
    )
    .unwrap();
    std::fs::write(
        &vocabulary_path,
        r#"[{"id": "ing-006", "name": "Cà chua", "category": "vegetable"}]"#,
    )
    .unwrap();

    let engine = MixEngine::new(
        Arc::new(InMemoryRecipeStore::load(&catalog_path).await.unwrap()),
        Arc::new(InMemoryIngredientDirectory::load(&vocabulary_path).await.unwrap()),
        Arc::new(UnconfiguredGenerator),
        MixConfig::default(),
    );

    let response = engine
        .generate(MixRequest::new(["ca chua"], 1))
        .await
        .unwrap();

    assert_eq!(response.recipes[0].id, "r1");
    assert!(InMemoryRecipeStore::load(dir.path().join("missing.json"))
        .await
        .is_err());
}
