//! In-process mirror of the session's dataset collection.
//!
//! The store owns the canonical in-session collection. It knows nothing
//! about the ledger; every mutation here must be followed by a full
//! [`crate::ledger::LedgerGateway::save`] to remain durable.

use indexmap::IndexSet;
use tracing::debug;

use crate::codec;
use crate::dataset::{DataCategory, DatasetRecord, NewDataset};
use crate::error::{EngineError, Result};
use crate::util::unix_timestamp;

#[derive(Debug, Default)]
pub struct DatasetStore {
    records: Vec<DatasetRecord>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Replace the whole mirror with a snapshot loaded from the ledger.
    pub fn reset(&mut self, records: Vec<DatasetRecord>) {
        debug!(count = records.len(), "dataset mirror reset");
        self.records = records;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Register a new dataset.
    ///
    /// Ids are assigned sequentially as `len + 1` and never reused (the
    /// collection does not support deletion). The seed value is encoded
    /// before it is stored; the plaintext never enters the record.
    pub fn create(&mut self, input: NewDataset, creator: &str) -> Result<DatasetRecord> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(EngineError::Validation("title must not be empty".to_string()));
        }
        let description = input.description.trim();
        if description.is_empty() {
            return Err(EngineError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        let mut contributors = IndexSet::new();
        contributors.insert(creator.to_string());

        let record = DatasetRecord {
            id: self.records.len() as u64 + 1,
            title: title.to_string(),
            description: description.to_string(),
            protected_value: codec::encode(input.seed_value),
            category: input.category,
            contributors,
            created_at: unix_timestamp(),
            creator: creator.to_string(),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn find_by_id(&self, id: u64) -> Result<&DatasetRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(EngineError::NotFound(id))
    }

    /// Apply `updater` to the record with the given id and write the result
    /// back in place.
    pub fn replace<F>(&mut self, id: u64, updater: F) -> Result<DatasetRecord>
    where
        F: FnOnce(DatasetRecord) -> DatasetRecord,
    {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::NotFound(id))?;
        let updated = updater(slot.clone());
        *slot = updated.clone();
        Ok(updated)
    }

    /// Pure read over the collection in insertion order.
    pub fn filter<P>(&self, predicate: P) -> Vec<DatasetRecord>
    where
        P: Fn(&DatasetRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over title and description with an
    /// optional category filter.
    pub fn search(&self, query: &str, category: Option<DataCategory>) -> Vec<DatasetRecord> {
        let needle = query.to_lowercase();
        self.filter(|r| {
            let matches_text = needle.is_empty()
                || r.title.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle);
            let matches_category = category.map_or(true, |c| r.category == c);
            matches_text && matches_category
        })
    }

    /// Full-collection clone, in insertion order, for persistence.
    pub fn snapshot(&self) -> Vec<DatasetRecord> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, category: DataCategory, seed: f64) -> NewDataset {
        NewDataset {
            title: title.to_string(),
            description: format!("{title} description"),
            category,
            seed_value: seed,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = DatasetStore::new();
        for i in 1..=5u64 {
            let record = store
                .create(sample(&format!("set {i}"), DataCategory::Other, 10.0), "alice")
                .unwrap();
            assert_eq!(record.id, i);
        }
        let ids: Vec<u64> = store.snapshot().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_create_validates_required_fields() {
        let mut store = DatasetStore::new();
        let mut input = sample("ok", DataCategory::Medical, 1.0);
        input.title = "   ".to_string();
        assert!(matches!(
            store.create(input, "alice"),
            Err(EngineError::Validation(_))
        ));

        let mut input = sample("ok", DataCategory::Medical, 1.0);
        input.description = String::new();
        assert!(matches!(
            store.create(input, "alice"),
            Err(EngineError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_protects_seed_value() {
        let mut store = DatasetStore::new();
        let record = store
            .create(sample("seeded", DataCategory::Genomic, 50.0), "alice")
            .unwrap();
        assert!(record.protected_value.starts_with(codec::TOKEN_PREFIX));
        assert_eq!(codec::decode(&record.protected_value).unwrap(), 50.0);
        assert_eq!(record.creator, "alice");
        assert!(record.contributors.contains("alice"));
    }

    #[test]
    fn test_find_and_replace() {
        let mut store = DatasetStore::new();
        store
            .create(sample("one", DataCategory::Clinical, 1.0), "alice")
            .unwrap();

        assert!(store.find_by_id(1).is_ok());
        assert!(matches!(store.find_by_id(7), Err(EngineError::NotFound(7))));

        let updated = store
            .replace(1, |mut r| {
                r.protected_value = codec::encode(99.0);
                r
            })
            .unwrap();
        assert_eq!(codec::decode(&updated.protected_value).unwrap(), 99.0);
        assert_eq!(
            codec::decode(&store.find_by_id(1).unwrap().protected_value).unwrap(),
            99.0
        );
        assert!(matches!(
            store.replace(7, |r| r),
            Err(EngineError::NotFound(7))
        ));
    }

    #[test]
    fn test_search_and_filter() {
        let mut store = DatasetStore::new();
        store
            .create(sample("Genome Atlas", DataCategory::Genomic, 1.0), "alice")
            .unwrap();
        store
            .create(sample("Heart Study", DataCategory::Medical, 2.0), "bob")
            .unwrap();
        store
            .create(sample("Genome Panel", DataCategory::Clinical, 3.0), "carol")
            .unwrap();

        assert_eq!(store.search("genome", None).len(), 2);
        assert_eq!(store.search("", Some(DataCategory::Medical)).len(), 1);
        assert_eq!(
            store.search("genome", Some(DataCategory::Clinical)).len(),
            1
        );
        assert_eq!(store.search("", None).len(), 3);
        assert_eq!(store.filter(|r| r.creator == "bob").len(), 1);
    }
}
