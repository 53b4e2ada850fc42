//! Ordered string-to-string container shared by query parameters and headers.
//!
//! # Design
//! Entries live in a `BTreeMap`, so iteration is ascending by key rather than
//! insertion order. Encoders downstream rely on this to produce the same
//! output for the same set of entries. An empty key is never stored: every
//! constructor and `add` silently drop it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unique-key mapping of strings with deterministic (sorted) iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ParameterSet {
    items: BTreeMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. Empty keys are ignored.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.items.insert(key, value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }

    /// Value stored under `key`, or `""` when absent.
    ///
    /// A missing key and a key mapped to an empty value look the same here;
    /// use [`ParameterSet::contains`] to tell them apart.
    pub fn get(&self, key: &str) -> &str {
        self.items.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.add(key, value);
        }
        set
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for ParameterSet {
    fn from(pair: (K, V)) -> Self {
        std::iter::once(pair).collect()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ParameterSet {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for ParameterSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<ParameterSet> for BTreeMap<String, String> {
    fn from(set: ParameterSet) -> Self {
        set.items
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Conversion impls shared by the containers that wrap a [`ParameterSet`].
/// The target type must implement `From<ParameterSet>`.
macro_rules! impl_set_conversions {
    ($ty:ty) => {
        impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for $ty {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self::from(iter.into_iter().collect::<$crate::params::ParameterSet>())
            }
        }

        impl<K: Into<String>, V: Into<String>> From<(K, V)> for $ty {
            fn from(pair: (K, V)) -> Self {
                Self::from($crate::params::ParameterSet::from(pair))
            }
        }

        impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for $ty {
            fn from(pairs: [(K, V); N]) -> Self {
                Self::from($crate::params::ParameterSet::from(pairs))
            }
        }

        impl From<std::collections::BTreeMap<String, String>> for $ty {
            fn from(map: std::collections::BTreeMap<String, String>) -> Self {
                Self::from($crate::params::ParameterSet::from(map))
            }
        }
    };
}

pub(crate) use impl_set_conversions;
