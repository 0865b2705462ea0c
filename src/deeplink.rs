//! Permalinks: which entry a page address selects.
//!
//! Three historical conventions are understood, tried in this order:
//!
//! 1. a fragment `#0xHASH` or `#_0xHASH`
//! 2. a query parameter *named* `_0xHASH` (its value is ignored)
//! 3. a query parameter `hash=0xHASH`
//!
//! Encoding always writes the second form and leaves unrelated parameters
//! alone.

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::error::{NatrefError, Result};
use crate::natives::HASH_NAME;

lazy_static! {
    static ref HASH_FRAGMENT: Regex = Regex::new(r"(?i)^_?(0x[0-9a-f]+)$").unwrap();
}

const HASH_PARAM: &str = "hash";

fn is_selection_param(name: &str) -> bool {
    name == HASH_PARAM || HASH_NAME.is_match(name)
}

/// Key selected by `url`, if any. Case is preserved.
pub fn decode(url: &Url) -> Option<String> {
    if let Some(caps) = url.fragment().and_then(|f| HASH_FRAGMENT.captures(f)) {
        return Some(caps[1].to_string());
    }

    if let Some((name, _)) = url.query_pairs().find(|(name, _)| HASH_NAME.is_match(name)) {
        return Some(name.trim_start_matches('_').to_string());
    }

    url.query_pairs()
        .find(|(name, value)| name == HASH_PARAM && value.starts_with("0x"))
        .map(|(_, value)| value.into_owned())
}

/// Parse `address` and decode it.
pub fn decode_str(address: &str) -> Result<Option<String>> {
    let url = Url::parse(address).map_err(|_| NatrefError::InvalidAddress(address.to_string()))?;
    Ok(decode(&url))
}

/// Rewrite `url` in place so that it selects `key`.
///
/// Earlier selections (hash-named parameters, `hash=`, a hash fragment) are
/// removed; every other parameter keeps its position.
pub fn encode(url: &mut Url, key: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_selection_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(&kept)
        .append_pair(&format!("_{key}"), "");

    if url.fragment().is_some_and(|f| HASH_FRAGMENT.is_match(f)) {
        url.set_fragment(None);
    }
}

/// Permalink for `key` under `base`.
pub fn permalink(base: &str, key: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|_| NatrefError::InvalidAddress(base.to_string()))?;
    encode(&mut url, key);
    Ok(url)
}
