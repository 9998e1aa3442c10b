//! Test doubles and common utilities for contract tests
//!
//! The doubles wrap real behavior and count calls, so tests can assert when
//! generation and persistence happen without faking the names themselves.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use whimsy_core::error::{Error, Result};
use whimsy_core::model::{GeneratedEntity, NameConfig, TriggerMap};
use whimsy_core::traits::{NameSource, StateRecord, StateStore};
use whimsy_core::{Catalog, CatalogSource, Category, EngineConfig, EngineEvent, NameEngine};

/// A NameSource that delegates to the built-in catalog and counts calls
pub struct CountingNameSource {
    inner: CatalogSource,
    /// Call counter for generate_single()
    single_calls: Arc<AtomicUsize>,
    /// Call counter for generate_single_random()
    random_calls: Arc<AtomicUsize>,
    /// Call counter for generate_compound()
    compound_calls: Arc<AtomicUsize>,
    /// When set, generate_single() fails
    fail_single: Arc<AtomicBool>,
}

impl CountingNameSource {
    pub fn new() -> Self {
        Self {
            inner: CatalogSource::builtin(),
            single_calls: Arc::new(AtomicUsize::new(0)),
            random_calls: Arc::new(AtomicUsize::new(0)),
            compound_calls: Arc::new(AtomicUsize::new(0)),
            fail_single: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a new CountingNameSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            inner: other.inner,
            single_calls: Arc::clone(&other.single_calls),
            random_calls: Arc::clone(&other.random_calls),
            compound_calls: Arc::clone(&other.compound_calls),
            fail_single: Arc::clone(&other.fail_single),
        }
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }

    pub fn compound_calls(&self) -> usize {
        self.compound_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent keyed selections fail
    pub fn fail_single(&self, fail: bool) {
        self.fail_single.store(fail, Ordering::SeqCst);
    }

    /// Total generation calls of any kind
    pub fn generation_calls(&self) -> usize {
        self.single_calls() + self.random_calls() + self.compound_calls()
    }
}

impl NameSource for CountingNameSource {
    fn generate_single(&self, category: Category, triggers: &TriggerMap) -> Result<String> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_single.load(Ordering::SeqCst) {
            return Err(Error::empty_word_set(category.tag()));
        }
        self.inner.generate_single(category, triggers)
    }

    fn generate_single_random(&self, category: Category) -> Result<String> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate_single_random(category)
    }

    fn generate_compound(&self, config: &NameConfig) -> Result<String> {
        self.compound_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate_compound(config)
    }

    fn source_name(&self) -> &'static str {
        "counting"
    }
}

/// A mock StateStore that tracks calls
pub struct MockStateStore {
    /// Call counter for get_entity()
    get_call_count: Arc<AtomicUsize>,
    /// Call counter for set_entity()
    set_call_count: Arc<AtomicUsize>,
    /// Call counter for delete_record()
    delete_call_count: Arc<AtomicUsize>,
    /// Call counter for flush()
    flush_call_count: Arc<AtomicUsize>,
    /// When set, set_entity() fails
    fail_writes: Arc<AtomicBool>,
    /// Stored records
    state: Arc<Mutex<BTreeMap<String, StateRecord>>>,
}

impl MockStateStore {
    pub fn new() -> Self {
        Self {
            get_call_count: Arc::new(AtomicUsize::new(0)),
            set_call_count: Arc::new(AtomicUsize::new(0)),
            delete_call_count: Arc::new(AtomicUsize::new(0)),
            flush_call_count: Arc::new(AtomicUsize::new(0)),
            fail_writes: Arc::new(AtomicBool::new(false)),
            state: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Create a new MockStateStore that shares counters and state with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            get_call_count: Arc::clone(&other.get_call_count),
            set_call_count: Arc::clone(&other.set_call_count),
            delete_call_count: Arc::clone(&other.delete_call_count),
            flush_call_count: Arc::clone(&other.flush_call_count),
            fail_writes: Arc::clone(&other.fail_writes),
            state: Arc::clone(&other.state),
        }
    }

    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    pub fn set_call_count(&self) -> usize {
        self.set_call_count.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_call_count.load(Ordering::SeqCst)
    }

    pub fn flush_call_count(&self) -> usize {
        self.flush_call_count.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Persisted name at an address
    pub fn name_at(&self, address: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .get(address)
            .map(|record| record.entity.name().to_string())
    }

    /// Seed a record directly, bypassing the counters
    pub fn seed(&self, address: &str, entity: GeneratedEntity) {
        let now = chrono::Utc::now();
        self.state.lock().unwrap().insert(
            address.to_string(),
            StateRecord {
                entity,
                created_at: now,
                last_updated: now,
            },
        );
    }
}

#[async_trait::async_trait]
impl StateStore for MockStateStore {
    async fn get_entity(&self, address: &str) -> Result<Option<GeneratedEntity>> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.record(address).map(|record| record.entity))
    }

    async fn get_record(&self, address: &str) -> Result<Option<StateRecord>> {
        Ok(self.record(address))
    }

    async fn set_entity(&self, address: &str, entity: &GeneratedEntity) -> Result<()> {
        self.set_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::state_store("write refused"));
        }

        let mut state = self.state.lock().unwrap();
        let now = chrono::Utc::now();
        let created_at = state
            .get(address)
            .map(|record| record.created_at)
            .unwrap_or(now);
        state.insert(
            address.to_string(),
            StateRecord {
                entity: entity.clone(),
                created_at,
                last_updated: now,
            },
        );
        Ok(())
    }

    async fn delete_record(&self, address: &str) -> Result<()> {
        self.delete_call_count.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().remove(address);
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().unwrap().keys().cloned().collect())
    }

    async fn flush(&self) -> Result<()> {
        self.flush_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl MockStateStore {
    fn record(&self, address: &str) -> Option<StateRecord> {
        self.state.lock().unwrap().get(address).cloned()
    }
}

/// Build an engine over the given doubles
pub fn engine_with(
    source: CountingNameSource,
    store: MockStateStore,
    config: EngineConfig,
) -> (NameEngine, mpsc::Receiver<EngineEvent>) {
    NameEngine::new(Box::new(source), Box::new(store), config)
        .expect("engine construction succeeds")
}

/// Drain every event currently buffered
pub fn drain(events: &mut mpsc::Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

/// Whether a word belongs to a category of the built-in catalog
pub fn in_category(word: &str, category: Category) -> bool {
    Catalog::global().words(category).contains(word)
}

/// Category of a built-in word, if any
pub fn category_of(word: &str) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|category| in_category(word, *category))
}
