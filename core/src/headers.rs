//! Request headers rendered as `key: value` lines for the transport.

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

/// Custom request headers, one value per name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    set: ParameterSet,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set.add(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.set.remove(key);
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    pub fn get(&self, key: &str) -> &str {
        self.set.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    pub fn size(&self) -> usize {
        self.set.size()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.set.iter()
    }

    pub fn as_set(&self) -> &ParameterSet {
        &self.set
    }

    /// `"<key>: <value>"`, or an empty string when `key` is not set.
    pub fn encode(&self, key: &str) -> String {
        if !self.set.contains(key) {
            return String::new();
        }
        format!("{key}: {}", self.set.get(key))
    }

    /// One encoded line per header, in key order.
    pub fn lines(&self) -> Vec<String> {
        self.set.iter().map(|(key, _)| self.encode(key)).collect()
    }

    /// Case-insensitive presence check, as header names are on the wire.
    pub fn contains_ignore_case(&self, key: &str) -> bool {
        self.set.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

impl From<ParameterSet> for Headers {
    fn from(set: ParameterSet) -> Self {
        Self { set }
    }
}

crate::params::impl_set_conversions!(Headers);
