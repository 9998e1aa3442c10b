//! Contract Test: Manifest Reconciliation
//!
//! Constraints verified:
//! - Every declared resource is applied and persisted under `<type>.<name>`
//! - A second pass over the same manifest changes nothing
//! - Persisted addresses no longer declared are destroyed
//! - One bad resource does not stop the others
//! - Lookups are deterministic and never persisted
//! - A failing lookup stops the pass before any resource is written
//! - Concurrent applies on distinct addresses do not interfere

mod common;

use std::sync::Arc;

use common::*;
use whimsy_core::config::{LookupConfig, ResourceConfig};
use whimsy_core::engine::ResourceOutcome;
use whimsy_core::model::{EntitySpec, NameConfig, TriggerMap};
use whimsy_core::{Category, EngineConfig, ResourceRegistry, WhimsyConfig};

fn manifest() -> WhimsyConfig {
    WhimsyConfig::new()
        .with_resource(
            ResourceConfig::new("whimsy_plant", "server").with_triggers([("env", "prod")]),
        )
        .with_resource(ResourceConfig::new("whimsy_animal", "mascot"))
        .with_resource(
            ResourceConfig::new("whimsy_name", "bucket")
                .with_parts(["color", "plant"])
                .with_delimiter("_"),
        )
        .with_lookup(LookupConfig::new("color", "theme").with_triggers([("team", "infra")]))
}

#[tokio::test]
async fn reconcile_applies_every_resource_once() {
    let source = CountingNameSource::new();
    let store = MockStateStore::new();
    let registry = ResourceRegistry::with_builtins();
    let (engine, _events) = engine_with(
        CountingNameSource::sharing_counters_with(&source),
        MockStateStore::sharing_counters_with(&store),
        EngineConfig::default(),
    );

    let report = engine.reconcile(&manifest(), &registry).await.unwrap();
    assert!(!report.has_failures());
    assert_eq!(report.resources.len(), 3);
    assert!(
        report
            .resources
            .iter()
            .all(|outcome| matches!(outcome, ResourceOutcome::Created { .. }))
    );
    assert_eq!(source.single_calls(), 2 + 1); // two resources plus the lookup
    assert_eq!(source.compound_calls(), 1);
    assert_eq!(store.flush_call_count(), 1);

    let bucket = store.name_at("whimsy_name.bucket").unwrap();
    let parts: Vec<&str> = bucket.split('_').collect();
    assert_eq!(parts.len(), 2);
    assert!(in_category(parts[0], Category::Color));
    assert!(in_category(parts[1], Category::Plant));

    assert_eq!(report.lookups.len(), 1);
    assert_eq!(report.lookups[0].lookup, "theme");
    assert_eq!(report.lookups[0].id, report.lookups[0].name);
    assert!(in_category(&report.lookups[0].name, Category::Color));

    // Second pass: nothing regenerates
    let second = engine.reconcile(&manifest(), &registry).await.unwrap();
    assert!(
        second
            .resources
            .iter()
            .all(|outcome| matches!(outcome, ResourceOutcome::Kept { .. }))
    );
    assert_eq!(source.compound_calls(), 1);
    assert_eq!(second.lookups, report.lookups);
    assert_eq!(store.name_at("whimsy_name.bucket"), Some(bucket));
}

#[tokio::test]
async fn compound_defaults_are_persisted() {
    let store = MockStateStore::new();
    let registry = ResourceRegistry::with_builtins();
    let (engine, _events) = engine_with(
        CountingNameSource::new(),
        MockStateStore::sharing_counters_with(&store),
        EngineConfig::default(),
    );

    let config = WhimsyConfig::new().with_resource(ResourceConfig::new("whimsy_name", "plain"));
    engine.reconcile(&config, &registry).await.unwrap();

    let entity = engine.read("whimsy_name.plain").await.unwrap().unwrap();
    assert_eq!(
        entity.spec(),
        &EntitySpec::compound(NameConfig::default(), TriggerMap::new())
    );
}

#[tokio::test]
async fn undeclared_addresses_are_destroyed() {
    let store = MockStateStore::new();
    let registry = ResourceRegistry::with_builtins();
    let (engine, _events) = engine_with(
        CountingNameSource::new(),
        MockStateStore::sharing_counters_with(&store),
        EngineConfig::default(),
    );

    engine.reconcile(&manifest(), &registry).await.unwrap();

    let mut shrunk = manifest();
    shrunk.resources.retain(|resource| resource.name != "mascot");
    let report = engine.reconcile(&shrunk, &registry).await.unwrap();

    let deleted: Vec<&str> = report
        .resources
        .iter()
        .filter(|outcome| matches!(outcome, ResourceOutcome::Deleted { .. }))
        .map(ResourceOutcome::address)
        .collect();
    assert_eq!(deleted, vec!["whimsy_animal.mascot"]);
    assert_eq!(store.name_at("whimsy_animal.mascot"), None);
    assert!(store.name_at("whimsy_plant.server").is_some());
}

#[tokio::test]
async fn bad_resource_does_not_stop_the_pass() {
    let store = MockStateStore::new();
    let registry = ResourceRegistry::with_builtins();
    let (engine, _events) = engine_with(
        CountingNameSource::new(),
        MockStateStore::sharing_counters_with(&store),
        EngineConfig::default(),
    );

    let config = WhimsyConfig::new()
        .with_resource(ResourceConfig::new("whimsy_mineral", "rock"))
        .with_resource(ResourceConfig::new("whimsy_color", "accent"));

    let report = engine.reconcile(&config, &registry).await.unwrap();
    assert_eq!(report.failures(), 1);
    assert!(matches!(
        &report.resources[0],
        ResourceOutcome::Failed { address, .. } if address == "whimsy_mineral.rock"
    ));
    assert!(matches!(&report.resources[1], ResourceOutcome::Created { .. }));
    assert!(store.name_at("whimsy_color.accent").is_some());
}

#[tokio::test]
async fn invalid_manifest_is_rejected_before_any_work() {
    let source = CountingNameSource::new();
    let registry = ResourceRegistry::with_builtins();
    let (engine, _events) = engine_with(
        CountingNameSource::sharing_counters_with(&source),
        MockStateStore::new(),
        EngineConfig::default(),
    );

    let config = WhimsyConfig::new()
        .with_resource(ResourceConfig::new("whimsy_name", "a").with_parts(["plant", "mineral"]));
    assert!(engine.reconcile(&config, &registry).await.is_err());
    assert_eq!(source.generation_calls(), 0);
}

#[tokio::test]
async fn failing_lookup_stops_the_pass_before_any_write() {
    let source = CountingNameSource::new();
    let store = MockStateStore::new();
    let registry = ResourceRegistry::with_builtins();
    let (engine, _events) = engine_with(
        CountingNameSource::sharing_counters_with(&source),
        MockStateStore::sharing_counters_with(&store),
        EngineConfig::default(),
    );

    let config = WhimsyConfig::new()
        .with_resource(ResourceConfig::new("whimsy_name", "bucket"))
        .with_lookup(LookupConfig::new("color", "theme"));

    source.fail_single(true);
    assert!(engine.reconcile(&config, &registry).await.is_err());
    assert_eq!(source.compound_calls(), 0);
    assert_eq!(store.set_call_count(), 0);
    assert_eq!(store.name_at("whimsy_name.bucket"), None);

    source.fail_single(false);
    let report = engine.reconcile(&config, &registry).await.unwrap();
    assert!(!report.has_failures());
    assert_eq!(report.lookups.len(), 1);
    assert!(store.name_at("whimsy_name.bucket").is_some());
}

#[tokio::test]
async fn concurrent_applies_on_distinct_addresses() {
    const ENTITIES: usize = 64;

    let store = MockStateStore::new();
    let source = CountingNameSource::new();
    let (engine, _events) = engine_with(
        CountingNameSource::sharing_counters_with(&source),
        MockStateStore::sharing_counters_with(&store),
        EngineConfig::default(),
    );
    let engine = Arc::new(engine);

    let spec = EntitySpec::compound(
        NameConfig::new(vec![Category::Plant, Category::Animal, Category::Color])
            .with_shuffle(true),
        TriggerMap::new(),
    );

    let mut handles = Vec::new();
    for i in 0..ENTITIES {
        let engine = Arc::clone(&engine);
        let spec = spec.clone();
        handles.push(tokio::spawn(async move {
            let address = format!("whimsy_name.n{i}");
            let transition = engine.apply(&address, spec).await.unwrap();
            (address, transition.entity.name().to_string())
        }));
    }

    for handle in handles {
        let (address, name) = handle.await.unwrap();
        assert_eq!(store.name_at(&address), Some(name.clone()));

        let mut categories: Vec<Category> = name
            .split('-')
            .map(|part| category_of(part).unwrap())
            .collect();
        categories.sort();
        assert_eq!(
            categories,
            vec![Category::Plant, Category::Animal, Category::Color]
        );
    }

    assert_eq!(source.compound_calls(), ENTITIES);
    assert_eq!(store.set_call_count(), ENTITIES);
}
