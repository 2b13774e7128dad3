// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Append-only registries with stable, typed handles.
//!
//! Every glTF top-level array (buffers, buffer views, accessors, meshes,
//! nodes, materials) is built by pushing into a [`Registry`]. The returned
//! [`Index`] is the insertion position, which is exactly the integer the glTF
//! JSON uses to reference the entry. Entries are never removed or reordered,
//! so a handle stays valid for the lifetime of the registry.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Typed position of an entry inside a [`Registry<T>`].
pub struct Index<T> {
    value: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Index<T> {
    /// Wrap a raw position.
    pub fn new(value: u32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Raw position as stored in the glTF JSON.
    #[inline]
    pub fn value(self) -> u32 {
        self.value
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.value as usize
    }
}

impl<T> Clone for Index<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Index<T> {}

impl<T> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Index<T> {}

impl<T> Hash for Index<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index({})", self.value)
    }
}

impl<T> fmt::Display for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Index<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Index<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Index::new)
    }
}

/// Growable, append-only arena.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an entry and return its handle.
    pub fn push(&mut self, item: T) -> Index<T> {
        let index = Index::new(self.items.len() as u32);
        self.items.push(item);
        index
    }

    pub fn get(&self, index: Index<T>) -> Option<&T> {
        self.items.get(index.as_usize())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Handles of every entry, in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = Index<T>> {
        (0..self.items.len() as u32).map(Index::new)
    }

    /// Consume the registry, yielding entries in handle order.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
