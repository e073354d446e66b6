//! Keyed, insertion-ordered entity container with a single cursor.

use crate::entity::Entity;
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// CollectionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum CollectionError {
    #[error("position {position} is out of bounds for a collection of {len}")]
    Index { position: usize, len: usize },

    #[error("collection of '{expected}' cannot hold '{found}'")]
    InvalidValue {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer keys are exhausted")]
    KeysExhausted,
}

///
/// CollectionKey
///
/// Integer keys are assigned by `append`; name keys come from callers.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum CollectionKey {
    #[display("{_0}")]
    Index(u64),
    #[display("{_0}")]
    Name(String),
}

impl From<u64> for CollectionKey {
    fn from(i: u64) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for CollectionKey {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for CollectionKey {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

///
/// OrderedCollection
///
/// Entries stay in insertion order. Replacing an existing key keeps its
/// position; a new key is appended. Keys are local addressing only, so
/// equality compares the element type and the ordered elements.
///

#[derive(Clone, Debug)]
pub struct OrderedCollection {
    element_type: &'static str,
    entries: Vec<(CollectionKey, Entity)>,
    // `None` once `u64::MAX` has been used
    next_index: Option<u64>,
    cursor: usize,
}

impl OrderedCollection {
    /// Create an empty collection holding entities of `element_type`.
    #[must_use]
    pub const fn new(element_type: &'static str) -> Self {
        Self {
            element_type,
            entries: Vec::new(),
            next_index: Some(0),
            cursor: 0,
        }
    }

    #[must_use]
    pub const fn element_type(&self) -> &'static str {
        self.element_type
    }

    /// Number of elements.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append under the next unused integer key, returning that key.
    pub fn append(&mut self, value: Entity) -> Result<CollectionKey, CollectionError> {
        self.check(&value)?;

        let key = CollectionKey::Index(self.take_index()?);
        self.entries.push((key.clone(), value));

        Ok(key)
    }

    // decoders only produce entities of the element type
    pub(crate) fn push_decoded(&mut self, value: Entity) -> Result<(), CollectionError> {
        debug_assert_eq!(value.type_id(), self.element_type);
        let key = CollectionKey::Index(self.take_index()?);
        self.entries.push((key, value));

        Ok(())
    }

    /// Insert or replace the element stored under `key`.
    pub fn set(
        &mut self,
        key: impl Into<CollectionKey>,
        value: Entity,
    ) -> Result<Option<Entity>, CollectionError> {
        self.check(&value)?;
        let key = key.into();

        if let Some(pos) = self.find(&key) {
            return Ok(Some(std::mem::replace(&mut self.entries[pos].1, value)));
        }

        if let CollectionKey::Index(i) = key {
            self.next_index = self
                .next_index
                .zip(i.checked_add(1))
                .map(|(n, after)| n.max(after));
        }
        self.entries.push((key, value));

        Ok(None)
    }

    #[must_use]
    pub fn get(&self, key: impl Into<CollectionKey>) -> Option<&Entity> {
        self.find(&key.into()).map(|pos| &self.entries[pos].1)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: impl Into<CollectionKey>) -> Option<&mut Entity> {
        self.find(&key.into()).map(|pos| &mut self.entries[pos].1)
    }

    #[must_use]
    pub fn has(&self, key: impl Into<CollectionKey>) -> bool {
        self.find(&key.into()).is_some()
    }

    /// Remove the element under `key`. A cursor past the removed entry moves
    /// back so it keeps pointing at the same element.
    pub fn remove(&mut self, key: impl Into<CollectionKey>) -> Option<Entity> {
        let pos = self.find(&key.into())?;
        if pos < self.cursor {
            self.cursor -= 1;
        }

        Some(self.entries.remove(pos).1)
    }

    ///
    /// CURSOR
    ///

    /// Element under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Entity> {
        self.entries.get(self.cursor).map(|(_, v)| v)
    }

    /// Key under the cursor.
    #[must_use]
    pub fn key(&self) -> Option<&CollectionKey> {
        self.entries.get(self.cursor).map(|(k, _)| k)
    }

    /// Advance the cursor by one element.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Returns `false` once the cursor has passed the last element.
    #[must_use]
    pub const fn valid(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub const fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to `position`.
    pub fn seek(&mut self, position: usize) -> Result<(), CollectionError> {
        if position >= self.entries.len() {
            return Err(CollectionError::Index {
                position,
                len: self.entries.len(),
            });
        }
        self.cursor = position;

        Ok(())
    }

    ///
    /// ITERATION
    ///

    /// `(key, element)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&CollectionKey, &Entity)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Entity> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &CollectionKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    fn check(&self, value: &Entity) -> Result<(), CollectionError> {
        if value.type_id() == self.element_type {
            Ok(())
        } else {
            Err(CollectionError::InvalidValue {
                expected: self.element_type,
                found: value.type_id(),
            })
        }
    }

    // every integer key handed out is above all integer keys in use
    fn take_index(&mut self) -> Result<u64, CollectionError> {
        let index = self
            .next_index
            .ok_or(CollectionError::KeysExhausted)?;
        self.next_index = index.checked_add(1);

        Ok(index)
    }

    fn find(&self, key: &CollectionKey) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl PartialEq for OrderedCollection {
    fn eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type && self.values().eq(other.values())
    }
}

impl Eq for OrderedCollection {}
