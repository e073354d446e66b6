use crate::{
    cache::{CacheError, CacheStore},
    fingerprint::Fingerprint,
};
use std::{collections::HashMap, sync::RwLock};

///
/// MemoryCache
///
/// In-process store. Grows without bound; nothing is ever evicted.
///

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<Fingerprint, Vec<u8>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored fingerprint, in no particular order.
    #[must_use]
    pub fn fingerprints(&self) -> Vec<Fingerprint> {
        self.entries
            .read()
            .map_or_else(|_| Vec::new(), |entries| entries.keys().cloned().collect())
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, fingerprint: &Fingerprint) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;

        Ok(entries.get(fingerprint).cloned())
    }

    fn put(&self, fingerprint: &Fingerprint, raw: Vec<u8>) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(fingerprint.clone(), raw);

        Ok(())
    }

    fn remove(&self, fingerprint: &Fingerprint) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(fingerprint);

        Ok(())
    }
}

// a poisoned store is reported as unavailable and degrades to a miss upstream
fn poisoned<T>(_: std::sync::PoisonError<T>) -> CacheError {
    CacheError::Unavailable("memory cache lock poisoned".to_string())
}
