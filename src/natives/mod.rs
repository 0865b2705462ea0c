//! Native reference data: normalized records, the keyed collection, and the
//! query engine over it.
//!
//! # Usage
//!
//! ```rust
//! use natref::natives::{Criteria, NativeIndex};
//! use serde_json::json;
//!
//! let doc = json!({ "PLAYER": { "0x43A66C31C68491C0": { "name": "GET_PLAYER_PED" } } });
//! let index = NativeIndex::from_documents(&[doc]);
//!
//! let hits = index.filter(&Criteria::new("player_ped", "all", "all"));
//! assert_eq!(hits[0].display_name, "GetPlayerPed");
//! assert!(index.get("0x43a66c31c68491c0").is_some());
//! ```

pub mod normalize;
pub mod query;
mod types;

use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

pub use normalize::{HASH_NAME, display_name};
pub use query::{ALL, Criteria};
pub use types::{DEFAULT_API_SET, Native, Param, RawNative, RawParam};

/// The flattened collection, built once per load and only read afterwards.
#[derive(Debug, Default)]
pub struct NativeIndex {
    natives: Vec<Native>,
    /// Lower-cased key to position in `natives`
    by_key: HashMap<String, usize>,
    namespaces: Vec<String>,
}

impl NativeIndex {
    /// Normalize every document, in order, into a single collection.
    ///
    /// A key seen twice keeps its first position but takes the later record.
    pub fn from_documents(documents: &[Value]) -> Self {
        let start = Instant::now();
        let mut natives: Vec<Native> = Vec::new();
        let mut by_key = HashMap::new();

        for native in documents.iter().flat_map(normalize::normalize) {
            let lookup = native.key.to_lowercase();
            match by_key.get(&lookup) {
                Some(&idx) => natives[idx] = native,
                None => {
                    by_key.insert(lookup, natives.len());
                    natives.push(native);
                }
            }
        }

        let namespaces = query::namespaces(&natives);
        info!(
            entries = natives.len(),
            namespaces = namespaces.len(),
            elapsed = ?start.elapsed(),
            "native index built"
        );

        Self {
            natives,
            by_key,
            namespaces,
        }
    }

    /// Case-insensitive lookup by key.
    pub fn get(&self, key: &str) -> Option<&Native> {
        self.by_key
            .get(&key.to_lowercase())
            .map(|&idx| &self.natives[idx])
    }

    pub fn all(&self) -> &[Native] {
        &self.natives
    }

    pub fn len(&self) -> usize {
        self.natives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }

    /// Distinct namespaces of the whole collection, computed at build time.
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn filter(&self, criteria: &Criteria) -> Vec<&Native> {
        query::filter(&self.natives, criteria)
    }
}
