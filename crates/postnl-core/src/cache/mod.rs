//! Raw response cache.
//!
//! Stores the last successful raw response per request fingerprint. Entries
//! never expire; a later `put` under the same fingerprint replaces the old
//! one. Deciding when to `put` is the caller's job.
mod memory;

pub use memory::MemoryCache;

use crate::fingerprint::Fingerprint;
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// CacheError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CacheError {
    #[error("cache store unavailable: {0}")]
    Unavailable(String),
}

///
/// CacheEntry
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CacheEntry {
    pub fingerprint: Fingerprint,
    pub raw: Vec<u8>,
}

///
/// CacheLookup
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CacheLookup {
    Hit(CacheEntry),
    Miss,
}

impl CacheLookup {
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

///
/// CacheStore
///
/// Backing store. Each call must be safe on its own; callers do not
/// coordinate concurrent lookups for the same fingerprint.
///

pub trait CacheStore: Send + Sync {
    fn get(&self, fingerprint: &Fingerprint) -> Result<Option<Vec<u8>>, CacheError>;

    fn put(&self, fingerprint: &Fingerprint, raw: Vec<u8>) -> Result<(), CacheError>;

    fn remove(&self, fingerprint: &Fingerprint) -> Result<(), CacheError>;
}

///
/// ResponseCache
///
/// Cloneable handle injected into clients.
///

#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
}

impl ResponseCache {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Cache backed by a fresh in-process [`MemoryCache`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCache::new()))
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Result<CacheLookup, CacheError> {
        let lookup = match self.store.get(fingerprint)? {
            Some(raw) => CacheLookup::Hit(CacheEntry {
                fingerprint: fingerprint.clone(),
                raw,
            }),
            None => CacheLookup::Miss,
        };

        Ok(lookup)
    }

    pub fn put(&self, fingerprint: &Fingerprint, raw: Vec<u8>) -> Result<(), CacheError> {
        self.store.put(fingerprint, raw)
    }

    pub fn remove(&self, fingerprint: &Fingerprint) -> Result<(), CacheError> {
        self.store.remove(fingerprint)
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache").finish_non_exhaustive()
    }
}
