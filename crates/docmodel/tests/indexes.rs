// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Index definitions derived from models, and their submission to a store.

use std::time::Duration;

use docmodel::{
    DocumentStore, IndexDescriptor, IndexFailure, MemoryStore, MemoryStoreError, Model, Policy,
    StoreConfig, StoreError, async_trait, create_indexes, prepare_collections
};

#[derive(Model)]
pub struct AbcIndex {
    #[field(index = "true")]
    pub field1: String,
    #[field(index = "true:-1")]
    pub field2: String,
    #[field(index = "idx_something")]
    pub field3: String,
    #[field(index = "idx_something2:-1")]
    pub field4: String,
    #[field(index = "idx_name(field1, field2:-1, field3)")]
    pub field5: i32,
    #[field(index = "true|idx_that(field3:-1)")]
    pub field6: i32
}

#[derive(Model)]
pub struct DefUniqueIndex {
    #[field(unique = "true")]
    pub field1: String,
    #[field(unique = "true:-1")]
    pub field2: String,
    #[field(unique = "idx_something")]
    pub field3: String,
    #[field(unique = "idx_something2:-1")]
    pub field4: String,
    #[field(unique = "idx_name(field1, field2:-1, field3)")]
    pub field5: i32,
    #[field(unique = "true|idx_that(field3:-1)")]
    pub field6: i32
}

fn check_fixture(list: &[IndexDescriptor], unique: bool) {
    let expected: [(&str, &[&str], &[i32]); 7] = [
        ("idx_field1", &["field1"], &[1]),
        ("idx_field2", &["field2"], &[-1]),
        ("idx_something", &["field3"], &[1]),
        ("idx_something2", &["field4"], &[-1]),
        ("idx_name", &["field1", "field2", "field3"], &[1, -1, 1]),
        ("idx_field6", &["field6"], &[1]),
        ("idx_that", &["field3"], &[-1])
    ];
    assert_eq!(list.len(), expected.len());
    for (index, (name, fields, order)) in list.iter().zip(expected) {
        assert_eq!(index.name(), name);
        assert_eq!(index.is_unique(), unique, "{name}");
        assert_eq!(index.fields(), fields, "{name}");
        assert_eq!(index.order(), order, "{name}");
    }
}

#[test]
fn all_indexes() {
    check_fixture(&AbcIndex::indexes(), false);
}

#[test]
fn all_unique_indexes() {
    check_fixture(&DefUniqueIndex::indexes(), true);
}

#[derive(Model)]
pub struct Home {
    #[field(index = "true")]
    pub zip: String
}

#[derive(Model)]
#[model(store = "document")]
pub struct Person {
    #[field(unique = "true")]
    pub email: String,
    pub home:  Option<Home>
}

#[test]
fn nested_fields_use_dotted_paths() {
    let list = Person::indexes();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].name(), "idx_home.zip");
    assert_eq!(list[1].fields(), ["home.zip"]);
    assert!(!list[1].is_unique());
}

#[derive(Model)]
#[model(store = "document", timestamped)]
pub struct Event {
    #[field(index = "true")]
    pub kind: String
}

#[test]
fn timestamped_models_index_timestamps() {
    let names: Vec<String> = Event::indexes().iter().map(|i| i.name().to_owned()).collect();
    assert_eq!(names, ["idx_kind", "idx_created_at", "idx_updated_at"]);
}

#[tokio::test]
async fn timestamp_indexes_follow_policy() {
    let store = MemoryStore::new();
    let config = StoreConfig::default().with_policy(Policy::DEFAULT.with_keys("createdAt", "updatedAt"));
    let report = create_indexes(&store, Event::descriptor(), &config).await.unwrap();

    assert_eq!(report.created, ["idx_kind", "idx_createdAt", "idx_updatedAt"]);
    assert_eq!(store.indexes("event").len(), 3 + 1);
}

#[tokio::test]
async fn create_on_memory_store() {
    let store = MemoryStore::new();
    let report = create_indexes(&store, DefUniqueIndex::descriptor(), &StoreConfig::default())
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.collection, "def_unique_index");
    assert_eq!(report.created.len(), 7);
    assert_eq!(store.indexes("def_unique_index").len(), 7 + 1);

    let again = create_indexes(&store, DefUniqueIndex::descriptor(), &StoreConfig::default())
        .await
        .unwrap();
    assert!(again.is_complete());
    assert_eq!(store.indexes("def_unique_index").len(), 7 + 1);
}

#[tokio::test]
async fn prepare_several_collections() {
    let store = MemoryStore::new();
    let models = [AbcIndex::descriptor(), Person::descriptor()];
    let reports = prepare_collections(&store, &models, &StoreConfig::default())
        .await
        .unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.is_complete()));
    assert_eq!(store.collections(), ["abc_index", "person"]);
    assert_eq!(store.indexes("person").len(), 3);
}

/// Store that refuses one index name, or every collection.
struct Picky {
    refuse:  &'static str,
    offline: bool
}

#[async_trait]
impl DocumentStore for Picky {
    type Target = String;
    type Error = MemoryStoreError;

    async fn resolve_target(&self, collection: &str) -> Result<Self::Target, Self::Error> {
        if self.offline {
            return Err(MemoryStoreError::UnknownCollection(collection.to_owned()));
        }
        Ok(collection.to_owned())
    }

    async fn create_index(
        &self,
        _target: &Self::Target,
        index: &IndexDescriptor
    ) -> Result<String, Self::Error> {
        if index.name() == self.refuse {
            return Err(MemoryStoreError::Conflict {
                name: index.name().to_owned()
            });
        }
        Ok(index.name().to_owned())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn rejected_index_does_not_stop_batch() {
    init_tracing();
    let store = Picky {
        refuse:  "idx_something",
        offline: false
    };
    let report = create_indexes(&store, AbcIndex::descriptor(), &StoreConfig::default())
        .await
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.created.len(), 6);
    assert_eq!(
        report.failed,
        vec![IndexFailure::Rejected {
            name:   "idx_something".into(),
            reason: "index 'idx_something' already exists with different options".into()
        }]
    );
}

#[tokio::test]
async fn unresolvable_collection() {
    let store = Picky {
        refuse:  "",
        offline: true
    };
    let err = create_indexes(&store, AbcIndex::descriptor(), &StoreConfig::default())
        .await
        .unwrap_err();

    let StoreError::Resolve {
        collection,
        source
    } = &err;
    assert_eq!(collection, "abc_index");
    assert_eq!(source, &MemoryStoreError::UnknownCollection("abc_index".into()));
    assert_eq!(
        err.to_string(),
        "failed to resolve collection 'abc_index': collection 'abc_index' does not exist"
    );

    let models = [Person::descriptor()];
    assert!(prepare_collections(&store, &models, &StoreConfig::default()).await.is_err());
}

/// Store that answers after a fixed delay.
struct Slow {
    delay: Duration
}

#[async_trait]
impl DocumentStore for Slow {
    type Target = ();
    type Error = MemoryStoreError;

    async fn resolve_target(&self, _collection: &str) -> Result<Self::Target, Self::Error> {
        Ok(())
    }

    async fn create_index(
        &self,
        _target: &Self::Target,
        index: &IndexDescriptor
    ) -> Result<String, Self::Error> {
        tokio::time::sleep(self.delay).await;
        Ok(index.name().to_owned())
    }
}

#[tokio::test(start_paused = true)]
async fn wait_budget_is_shared_by_the_batch() {
    init_tracing();
    let store = Slow {
        delay: Duration::from_secs(3)
    };
    let config = StoreConfig::new(Duration::from_secs(10));
    let report = create_indexes(&store, AbcIndex::descriptor(), &config)
        .await
        .unwrap();

    assert_eq!(
        report.created,
        ["idx_field1", "idx_field2", "idx_something"]
    );
    assert_eq!(report.failed.len(), 4);
    assert!(
        report
            .failed
            .iter()
            .all(|f| matches!(f, IndexFailure::TimedOut { .. }))
    );
    assert_eq!(report.failed[0].name(), "idx_something2");
}
