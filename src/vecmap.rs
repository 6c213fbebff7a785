//! The insertion-ordered map `ubj` uses for objects.
//!
//! Entries keep the order they were inserted in, which is the order they are written to
//! the wire. Keys are unique: inserting a key that is already present replaces its value
//! and keeps its position.
//!
//! # Example
//!
//! ```
//! use ubj::prelude::*;
//!
//! let mut vmap = VecMap::new();
//! vmap.insert(Bytes::from("b"), 1);
//! vmap.insert(Bytes::from("a"), 2);
//! vmap.insert(Bytes::from("b"), 3);
//!
//! let entries: Vec<_> = vmap.into_iter().collect();
//! assert_eq!(entries, vec![(Bytes::from("b"), 3), (Bytes::from("a"), 2)]);
//! ```

use indexmap::{map, IndexMap};
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
};

#[derive(Eq, PartialEq, Clone, Debug)]
/// An insertion-ordered map, backed by an [`IndexMap`].
///
/// Lookups and inserts hash the key, so building a map is linear in its length.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K: Hash + Eq, V>(IndexMap<K, V>);

impl<K: Hash + Eq, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(IndexMap::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(IndexMap::with_capacity(cap)) }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("foo", "bar")]);
    ///
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Iterates over the key value pairs, in insertion order.
    pub fn iter(&self) -> map::Iter<K, V> { self.0.iter() }

    /// Inserts a pair, returning the previous value for `key` if there was one. A
    /// replaced value keeps its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> { self.0.insert(key, value) }

    /// Looks up the value stored under `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(Bytes::from("x"), 1)]);
    ///
    /// assert_eq!(vmap.get(&b"x"[..]), Some(&1));
    /// assert_eq!(vmap.get(&b"y"[..]), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.get(key)
    }

    /// Removes `key`, returning its value. Later entries shift down.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.shift_remove(key)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> map::Keys<K, V> { self.0.keys() }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> map::Values<K, V> { self.0.values() }

    /// Consumes the map, returning its values in insertion order.
    pub fn into_values(self) -> Vec<V> { self.0.into_values().collect() }

    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries.
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K: Hash + Eq, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap::new() }
}

impl<K: Hash + Eq, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { Self::from_iter(v) }
}

impl<K: Hash + Eq, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self { Self::from_iter(hm) }
}

impl<K: Hash + Ord, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { Self::from_iter(bt) }
}

impl<K: Hash + Eq, V> IntoIterator for VecMap<K, V> {
    type IntoIter = map::IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> map::IntoIter<K, V> { self.0.into_iter() }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = map::Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> map::Iter<'a, K, V> { self.0.iter() }
}

/// Later duplicates replace earlier values in place.
impl<K: Hash + Eq, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap(IndexMap::from_iter(iter))
    }
}
