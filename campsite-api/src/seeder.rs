//! Startup seeding of default content.
//!
//! The seeder runs once per process, before the server accepts traffic:
//!
//! - camping and fishing pages are inserted only if missing
//! - the contact page is inserted if missing, otherwise its canonical fields
//!   are refreshed
//! - the default rules are inserted only if the rules collection is empty
//!
//! Every step is a check followed by a write, so running the seeder again is
//! harmless. Any store error aborts seeding.

use std::fmt;
use std::sync::Arc;

use campsite_repository::DocumentStore;
use campsite_shared::{Collection, ContactInfo, SingletonDocument};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::defaults;
use crate::errors::SeedError;

/// Collections that get a unique index on `id` before seeding.
pub const UNIQUE_ID_COLLECTIONS: [Collection; 4] = [
    Collection::CampingInfo,
    Collection::FishingInfo,
    Collection::ContactInfo,
    Collection::Rules,
];

/// What seeding did to one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// This many documents were written.
    Inserted(usize),
    /// Existing content was left untouched.
    AlreadyPresent,
    /// The existing document's canonical fields were overwritten.
    Refreshed,
}

impl fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedOutcome::Inserted(count) => write!(f, "inserted {}", count),
            SeedOutcome::AlreadyPresent => write!(f, "already present"),
            SeedOutcome::Refreshed => write!(f, "refreshed"),
        }
    }
}

/// Per-collection result of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub camping: SeedOutcome,
    pub fishing: SeedOutcome,
    pub contact: SeedOutcome,
    pub rules: SeedOutcome,
}

/// Writes the default site content into the store.
pub struct Seeder {
    store: Arc<dyn DocumentStore>,
}

impl Seeder {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Run every seeding step in order.
    ///
    /// # Returns
    ///
    /// * `Ok(SeedReport)` - What happened to each collection
    /// * `Err(SeedError)` - The first store failure; later steps are not attempted
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        self.ensure_indexes().await?;

        let report = SeedReport {
            camping: self.insert_if_absent(&defaults::camping_info()).await?,
            fishing: self.insert_if_absent(&defaults::fishing_info()).await?,
            contact: self.upsert_contact().await?,
            rules: self.seed_rules().await?,
        };

        info!(
            camping = %report.camping,
            fishing = %report.fishing,
            contact = %report.contact,
            rules = %report.rules,
            "Seeding complete"
        );

        Ok(report)
    }

    /// Request a unique `id` index on every seeded collection.
    ///
    /// Existing duplicate ids leave that collection unindexed; seeding still
    /// runs on it through the usual presence checks.
    async fn ensure_indexes(&self) -> Result<(), SeedError> {
        for collection in UNIQUE_ID_COLLECTIONS {
            match self.store.ensure_unique_id(collection.as_str()).await {
                Ok(()) => {}
                Err(e) if e.is_duplicate_key() => {
                    warn!(
                        collection = %collection,
                        error = %e,
                        "Existing documents share an id, continuing without a unique index"
                    );
                }
                Err(e) => return Err(SeedError::store(collection, e)),
            }
        }
        Ok(())
    }

    /// Insert `document` unless its collection already holds the reserved id.
    async fn insert_if_absent<T>(&self, document: &T) -> Result<SeedOutcome, SeedError>
    where
        T: SingletonDocument + Serialize,
    {
        let collection = T::COLLECTION;

        let existing = self
            .store
            .find_one(collection.as_str(), T::ID)
            .await
            .map_err(|e| SeedError::store(collection, e))?;
        if existing.is_some() {
            debug!(collection = %collection, "Singleton already present");
            return Ok(SeedOutcome::AlreadyPresent);
        }

        let document =
            bson::to_document(document).map_err(|e| SeedError::serialization(collection, e))?;

        match self.store.insert_one(collection.as_str(), document).await {
            Ok(()) => {
                info!(collection = %collection, id = %T::ID, "Inserted default content");
                Ok(SeedOutcome::Inserted(1))
            }
            // Another instance inserted it between our check and our write.
            Err(e) if e.is_duplicate_key() => {
                warn!(collection = %collection, id = %T::ID, "Singleton inserted concurrently");
                Ok(SeedOutcome::AlreadyPresent)
            }
            Err(e) => Err(SeedError::store(collection, e)),
        }
    }

    async fn upsert_contact(&self) -> Result<SeedOutcome, SeedError> {
        let outcome = self.insert_if_absent(&defaults::contact_info()).await?;
        if outcome != SeedOutcome::AlreadyPresent {
            return Ok(outcome);
        }

        let collection = ContactInfo::COLLECTION;
        let matched = self
            .store
            .update_fields(
                collection.as_str(),
                ContactInfo::ID,
                defaults::contact_refresh_fields(),
            )
            .await
            .map_err(|e| SeedError::store(collection, e))?;

        if matched {
            info!(collection = %collection, "Refreshed contact details");
            Ok(SeedOutcome::Refreshed)
        } else {
            warn!(collection = %collection, "Contact document vanished before refresh");
            Ok(SeedOutcome::AlreadyPresent)
        }
    }

    async fn seed_rules(&self) -> Result<SeedOutcome, SeedError> {
        let collection = Collection::Rules;

        let existing = self
            .store
            .count(collection.as_str())
            .await
            .map_err(|e| SeedError::store(collection, e))?;
        if existing > 0 {
            debug!(collection = %collection, existing, "Rules already present");
            return Ok(SeedOutcome::AlreadyPresent);
        }

        let documents = defaults::rules()
            .iter()
            .map(bson::to_document)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SeedError::serialization(collection, e))?;

        let inserted = self
            .store
            .insert_many(collection.as_str(), documents)
            .await
            .map_err(|e| SeedError::store(collection, e))?;

        info!(collection = %collection, inserted, "Inserted default rules");
        Ok(SeedOutcome::Inserted(inserted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bson::{doc, Document};
    use campsite_repository::{FindQuery, InMemoryStore, StoreError};
    use campsite_shared::{CampingInfo, FishingInfo};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn seeder_with(store: &Arc<InMemoryStore>) -> Seeder {
        Seeder::new(store.clone())
    }

    fn without_internal_id(mut document: Document) -> Document {
        document.remove("_id");
        document
    }

    #[tokio::test]
    async fn test_seeds_empty_store() {
        let store = Arc::new(InMemoryStore::new());
        let report = seeder_with(&store).run().await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                camping: SeedOutcome::Inserted(1),
                fishing: SeedOutcome::Inserted(1),
                contact: SeedOutcome::Inserted(1),
                rules: SeedOutcome::Inserted(6),
            }
        );

        let camping = store.find_one("camping_info", "camping_info").await.unwrap().unwrap();
        assert_eq!(camping.get_str("title").unwrap(), "Camping at Birchwood");
        assert_eq!(store.count("gallery").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let store = Arc::new(InMemoryStore::new());
        let seeder = seeder_with(&store);
        seeder.run().await.unwrap();

        let camping_before = store.documents("camping_info").unwrap();
        let fishing_before = store.documents("fishing_info").unwrap();

        let report = seeder.run().await.unwrap();

        assert_eq!(report.camping, SeedOutcome::AlreadyPresent);
        assert_eq!(report.fishing, SeedOutcome::AlreadyPresent);
        assert_eq!(report.contact, SeedOutcome::Refreshed);
        assert_eq!(report.rules, SeedOutcome::AlreadyPresent);

        assert_eq!(store.documents("camping_info").unwrap(), camping_before);
        assert_eq!(store.documents("fishing_info").unwrap(), fishing_before);
        assert_eq!(store.count("contact_info").await.unwrap(), 1);
        assert_eq!(store.count("rules").await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_customized_camping_is_not_overwritten() {
        let store = Arc::new(InMemoryStore::new());
        let mut custom = defaults::camping_info();
        custom.title = "Our Campsite".to_string();
        store
            .insert_one("camping_info", bson::to_document(&custom).unwrap())
            .await
            .unwrap();

        seeder_with(&store).run().await.unwrap();

        let camping: CampingInfo = bson::from_document(without_internal_id(
            store.find_one("camping_info", "camping_info").await.unwrap().unwrap(),
        ))
        .unwrap();
        assert_eq!(camping.title, "Our Campsite");
    }

    #[tokio::test]
    async fn test_customized_fishing_is_not_overwritten() {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_one(
                "fishing_info",
                doc! { "id": "fishing_info", "title": "Lake closed for winter" },
            )
            .await
            .unwrap();

        let report = seeder_with(&store).run().await.unwrap();

        assert_eq!(report.fishing, SeedOutcome::AlreadyPresent);
        let fishing = store.find_one("fishing_info", "fishing_info").await.unwrap().unwrap();
        assert_eq!(fishing.get_str("title").unwrap(), "Lake closed for winter");
        assert!(!fishing.contains_key("species"));
        assert!(bson::from_document::<FishingInfo>(without_internal_id(fishing)).is_err());
    }

    #[tokio::test]
    async fn test_contact_refresh_restores_phone_and_keeps_email() {
        let store = Arc::new(InMemoryStore::new());
        let seeder = seeder_with(&store);
        seeder.run().await.unwrap();

        store
            .update_fields(
                "contact_info",
                "contact_info",
                doc! {
                    "phone": "01234 000000",
                    "email": "bookings@example.com",
                    "opening_hours": "9am - 5pm",
                },
            )
            .await
            .unwrap();
        let updated_at_before = store
            .find_one("contact_info", "contact_info")
            .await
            .unwrap()
            .unwrap()
            .get_datetime("updated_at")
            .unwrap()
            .to_owned();

        seeder.run().await.unwrap();

        let contact = store.find_one("contact_info", "contact_info").await.unwrap().unwrap();
        assert_eq!(contact.get_str("phone").unwrap(), defaults::CONTACT_PHONE);
        assert_eq!(contact.get_str("email").unwrap(), "bookings@example.com");
        assert_eq!(contact.get_str("opening_hours").unwrap(), "9am - 5pm");
        assert_eq!(contact.get_datetime("updated_at").unwrap(), &updated_at_before);
    }

    #[tokio::test]
    async fn test_contact_refresh_sets_every_canonical_field() {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_one(
                "contact_info",
                doc! {
                    "id": "contact_info",
                    "phone": "old",
                    "email": "old@example.com",
                    "address": "old",
                    "latitude": 0.0,
                    "longitude": 0.0,
                },
            )
            .await
            .unwrap();

        let report = seeder_with(&store).run().await.unwrap();
        assert_eq!(report.contact, SeedOutcome::Refreshed);

        let contact = store.find_one("contact_info", "contact_info").await.unwrap().unwrap();
        assert_eq!(contact.get_str("address").unwrap(), defaults::CONTACT_ADDRESS);
        assert_eq!(contact.get_f64("latitude").unwrap(), defaults::CONTACT_LATITUDE);
        assert_eq!(contact.get_f64("longitude").unwrap(), defaults::CONTACT_LONGITUDE);
        assert_eq!(contact.get_str("facebook").unwrap(), defaults::CONTACT_FACEBOOK);
        assert_eq!(contact.get_str("email").unwrap(), "old@example.com");
        assert!(!contact.contains_key("updated_at"));
    }

    #[tokio::test]
    async fn test_duplicate_existing_rules_do_not_block_startup() {
        let store = Arc::new(InMemoryStore::new());
        // Rules written twice by an earlier unguarded seeding race.
        for _ in 0..2 {
            let documents = defaults::rules()
                .iter()
                .map(|rule| bson::to_document(rule).unwrap())
                .collect();
            store.insert_many("rules", documents).await.unwrap();
        }

        let seeder = seeder_with(&store);
        let report = seeder.run().await.unwrap();

        assert_eq!(report.rules, SeedOutcome::AlreadyPresent);
        assert_eq!(report.camping, SeedOutcome::Inserted(1));
        assert_eq!(store.count("rules").await.unwrap(), 12);

        let report = seeder.run().await.unwrap();
        assert_eq!(report.rules, SeedOutcome::AlreadyPresent);
        assert_eq!(store.count("rules").await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_rules_seeded_with_orders_one_to_six() {
        let store = Arc::new(InMemoryStore::new());
        seeder_with(&store).run().await.unwrap();

        let rules = store.find_many("rules", &FindQuery::all()).await.unwrap();
        let orders: Vec<i32> = rules.iter().map(|r| r.get_i32("order").unwrap()).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_single_existing_rule_blocks_rule_seeding() {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_one(
                "rules",
                doc! {
                    "id": "rule_1",
                    "title": "Leftover",
                    "description": "Partially seeded",
                    "category": "general",
                    "order": 1,
                },
            )
            .await
            .unwrap();

        let report = seeder_with(&store).run().await.unwrap();

        assert_eq!(report.rules, SeedOutcome::AlreadyPresent);
        assert_eq!(store.count("rules").await.unwrap(), 1);
    }

    /// Store that fails every call after a set number of successful calls.
    struct FailingStore {
        inner: InMemoryStore,
        calls: AtomicUsize,
        fail_after: usize,
    }

    impl FailingStore {
        fn failing_after(fail_after: usize) -> Self {
            Self {
                inner: InMemoryStore::new(),
                calls: AtomicUsize::new(0),
                fail_after,
            }
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= self.fail_after {
                return Err(StoreError::connection("Mock failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn ping(&self) -> Result<(), StoreError> {
            self.check()
        }

        async fn find_one(
            &self,
            collection: &str,
            id: &str,
        ) -> Result<Option<Document>, StoreError> {
            self.check()?;
            self.inner.find_one(collection, id).await
        }

        async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
            self.check()?;
            self.inner.insert_one(collection, document).await
        }

        async fn insert_many(
            &self,
            collection: &str,
            documents: Vec<Document>,
        ) -> Result<usize, StoreError> {
            self.check()?;
            self.inner.insert_many(collection, documents).await
        }

        async fn update_fields(
            &self,
            collection: &str,
            id: &str,
            fields: Document,
        ) -> Result<bool, StoreError> {
            self.check()?;
            self.inner.update_fields(collection, id, fields).await
        }

        async fn count(&self, collection: &str) -> Result<u64, StoreError> {
            self.check()?;
            self.inner.count(collection).await
        }

        async fn find_many(
            &self,
            collection: &str,
            query: &FindQuery,
        ) -> Result<Vec<Document>, StoreError> {
            self.check()?;
            self.inner.find_many(collection, query).await
        }

        async fn ensure_unique_id(&self, collection: &str) -> Result<(), StoreError> {
            self.check()?;
            self.inner.ensure_unique_id(collection).await
        }
    }

    #[tokio::test]
    async fn test_store_failure_aborts_seeding() {
        let store = Arc::new(FailingStore::failing_after(0));
        let err = Seeder::new(store).run().await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::Store {
                collection: Collection::CampingInfo,
                source: StoreError::ConnectionError(_),
            }
        ));
    }

    #[tokio::test]
    async fn test_failure_midway_leaves_later_collections_untouched() {
        // 4 index calls, then find + insert for camping, then fishing's find fails.
        let store = Arc::new(FailingStore::failing_after(6));
        let err = Seeder::new(store.clone()).run().await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::Store {
                collection: Collection::FishingInfo,
                ..
            }
        ));
        assert_eq!(store.inner.count("camping_info").await.unwrap(), 1);
        assert_eq!(store.inner.count("fishing_info").await.unwrap(), 0);
        assert_eq!(store.inner.count("rules").await.unwrap(), 0);
    }

    /// Store whose singleton lookups always miss, as if another instance
    /// wrote the document between the check and the insert.
    struct RacingStore {
        inner: InMemoryStore,
    }

    #[async_trait]
    impl DocumentStore for RacingStore {
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn find_one(
            &self,
            _collection: &str,
            _id: &str,
        ) -> Result<Option<Document>, StoreError> {
            Ok(None)
        }

        async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
            self.inner.insert_one(collection, document).await
        }

        async fn insert_many(
            &self,
            collection: &str,
            documents: Vec<Document>,
        ) -> Result<usize, StoreError> {
            self.inner.insert_many(collection, documents).await
        }

        async fn update_fields(
            &self,
            collection: &str,
            id: &str,
            fields: Document,
        ) -> Result<bool, StoreError> {
            self.inner.update_fields(collection, id, fields).await
        }

        async fn count(&self, collection: &str) -> Result<u64, StoreError> {
            self.inner.count(collection).await
        }

        async fn find_many(
            &self,
            collection: &str,
            query: &FindQuery,
        ) -> Result<Vec<Document>, StoreError> {
            self.inner.find_many(collection, query).await
        }

        async fn ensure_unique_id(&self, collection: &str) -> Result<(), StoreError> {
            self.inner.ensure_unique_id(collection).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_insert_is_tolerated() {
        let store = Arc::new(RacingStore {
            inner: InMemoryStore::new(),
        });
        let seeder = Seeder::new(store.clone());
        seeder.run().await.unwrap();

        let report = seeder.run().await.unwrap();

        assert_eq!(report.camping, SeedOutcome::AlreadyPresent);
        assert_eq!(report.fishing, SeedOutcome::AlreadyPresent);
        assert_eq!(report.contact, SeedOutcome::Refreshed);
        assert_eq!(store.inner.count("camping_info").await.unwrap(), 1);
        assert_eq!(store.inner.count("contact_info").await.unwrap(), 1);
    }
}
