// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interning caches keyed by [`ShaderGroup`].
//!
//! Each distinct key is built at most once per pack build. The builder is where characters
//! are allocated and bitmap providers registered, so a second registration of the same key
//! must never run it again.

use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;

use crate::shader::ShaderGroup;

/// Which glyph family a cache holds.
///
/// Caches of different kinds are separate instances, so an image and a text font that happen
/// to share a content name never see each other's entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Image frame glyphs.
    Image,
    /// Per-line text font keys.
    Text,
    /// Player head row glyphs.
    Head,
}

/// Statistics about cache usage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to build a value.
    pub misses: u64,
    /// Distinct keys held.
    pub entries: usize,
}

/// Map from [`ShaderGroup`] to an already-built value.
///
/// Entries are never overwritten or removed; the first value stored for a key stays for the
/// lifetime of the cache.
pub struct InternCache<V> {
    kind: CacheKind,
    entries: HashMap<ShaderGroup, V>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> InternCache<V> {
    /// Creates an empty cache.
    pub fn new(kind: CacheKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// The glyph family held by this cache.
    pub fn kind(&self) -> CacheKind {
        self.kind
    }

    /// Looks up `key`, counting the lookup as a hit or miss.
    pub fn get(&mut self, key: &ShaderGroup) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Whether `key` is present. Not counted in the statistics.
    pub fn contains(&self, key: &ShaderGroup) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key` unless the key is already present.
    ///
    /// Returns `false`, leaving the existing value in place, when the key was present.
    pub fn insert(&mut self, key: ShaderGroup, value: V) -> bool {
        match self.entries.entry(key) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Returns the value for `key`, building it with `make` on the first request only.
    pub fn get_or_insert_with(&mut self, key: ShaderGroup, make: impl FnOnce() -> V) -> V {
        match self.try_get_or_insert_with(key, || Ok::<V, core::convert::Infallible>(make())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), but `make` may fail.
    ///
    /// Nothing is stored when `make` fails, so a later call runs it again.
    pub fn try_get_or_insert_with<E>(
        &mut self,
        key: ShaderGroup,
        make: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = make()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Number of distinct keys held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl<V> Debug for InternCache<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InternCache")
            .field("kind", &self.kind)
            .field("entries", &self.entries.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
