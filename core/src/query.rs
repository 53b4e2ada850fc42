//! URL query parameters and their percent-encoded query string.
//!
//! # Design
//! `UrlParameters` wraps a [`ParameterSet`] and adds a lazily built pair of
//! strings: the raw `?k=v&...` form and the percent-encoded one. Both are
//! produced in a single pass on first access and cached. Every mutation
//! drops the cache, so a later read always reflects the current entries.
//!
//! Escaping keeps only the RFC 3986 unreserved characters
//! (`A-Z a-z 0-9 - . _ ~`); every other byte of the UTF-8 input becomes
//! `%XX` with uppercase hex.

use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single key or value.
pub fn escape(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

#[derive(Debug, Clone)]
struct QueryStrings {
    raw: String,
    encoded: String,
}

/// Query parameters appended to the request URL (and sent as the POST body).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ParameterSet", into = "ParameterSet")]
pub struct UrlParameters {
    set: ParameterSet,
    cache: OnceLock<QueryStrings>,
}

impl UrlParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set.add(key, value);
        self.cache.take();
    }

    pub fn remove(&mut self, key: &str) {
        self.set.remove(key);
        self.cache.take();
    }

    pub fn clear(&mut self) {
        self.set.clear();
        self.cache.take();
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

    /// Percent-encoded query string, `?` included. Empty when there are no
    /// parameters.
    pub fn encode(&self) -> &str {
        &self.strings().encoded
    }

    pub fn encoded_string(&self) -> &str {
        self.encode()
    }

    /// Unescaped query string, `?` included.
    pub fn raw_string(&self) -> &str {
        &self.strings().raw
    }

    /// Percent-encoded `k=v&...` pairs without the leading `?`.
    pub fn encoded_pairs(&self) -> &str {
        self.encode().strip_prefix('?').unwrap_or("")
    }

    fn strings(&self) -> &QueryStrings {
        self.cache.get_or_init(|| {
            let mut raw = String::new();
            let mut encoded = String::new();
            for (key, value) in self.set.iter() {
                raw.push('&');
                raw.push_str(key);
                raw.push('=');
                raw.push_str(value);

                encoded.push('&');
                encoded.push_str(&escape(key));
                encoded.push('=');
                encoded.push_str(&escape(value));
            }
            if !raw.is_empty() {
                raw.replace_range(..1, "?");
                encoded.replace_range(..1, "?");
            }
            QueryStrings { raw, encoded }
        })
    }
}

impl PartialEq for UrlParameters {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
    }
}

impl Eq for UrlParameters {}

impl From<ParameterSet> for UrlParameters {
    fn from(set: ParameterSet) -> Self {
        Self {
            set,
            cache: OnceLock::new(),
        }
    }
}

impl From<UrlParameters> for ParameterSet {
    fn from(params: UrlParameters) -> Self {
        params.set
    }
}

crate::params::impl_set_conversions!(UrlParameters);
