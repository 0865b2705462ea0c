//! Flattening of the nested upstream documents into [`Native`] records.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

use super::types::{DEFAULT_API_SET, Native, Param, RawNative};

lazy_static! {
    /// Hash-style identifier: optional underscore, `0x`, hex digits.
    pub static ref HASH_NAME: Regex = Regex::new(r"(?i)^_?0x[0-9a-f]+$").unwrap();
}

/// Derive the display spelling of a raw identifier.
///
/// `_get_player_ped` becomes `GetPlayerPed`. Hash-style identifiers such as
/// `_0x1234ABCD` are returned untouched.
pub fn display_name(raw: &str) -> String {
    if HASH_NAME.is_match(raw) {
        return raw.to_string();
    }

    let trimmed = raw.strip_prefix('_').unwrap_or(raw);
    trimmed
        .to_lowercase()
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Lower-cased API set, defaulting to [`DEFAULT_API_SET`].
pub fn api_set(raw: Option<&str>) -> String {
    match raw.map(str::to_lowercase) {
        Some(set) if !set.is_empty() => set,
        _ => DEFAULT_API_SET.to_string(),
    }
}

/// Build the language → code map. Only arrays are accepted; non-object items
/// and items without a language tag are skipped, later tags overwrite.
pub fn example_map(value: &Value) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let Some(items) = value.as_array() else {
        return map;
    };

    for item in items {
        let Some(obj) = item.as_object() else {
            continue;
        };
        let lang = obj
            .get("lang")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();
        if lang.is_empty() {
            continue;
        }
        let code = obj
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        map.insert(lang, code);
    }

    map
}

fn search_text(native: &Native) -> String {
    let params = native
        .params
        .iter()
        .map(|p| format!("{} {} {}", p.name, p.kind, p.description))
        .collect::<Vec<_>>()
        .join(" ");

    [
        native.raw_name.as_str(),
        native.display_name.as_str(),
        native.key.as_str(),
        native.namespace.as_str(),
        native.description.as_str(),
        params.as_str(),
        native.results.as_str(),
        native.results_description.as_str(),
    ]
    .join("\n")
    .to_lowercase()
}

/// Normalize a single payload found under `namespace` / `entry_key`.
pub fn normalize_entry(namespace: &str, entry_key: &str, payload: &Value) -> Native {
    let raw = RawNative::from_value(payload);

    let key = raw
        .hash
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| entry_key.to_string());
    let namespace = raw
        .ns
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| namespace.to_string());
    let raw_name = raw.name.unwrap_or_default();

    let params = raw
        .params
        .into_iter()
        .map(|p| Param {
            name: p.name.unwrap_or_default(),
            kind: p.kind.unwrap_or_default(),
            description: p.description.unwrap_or_default(),
        })
        .collect();

    let mut native = Native {
        display_name: display_name(&raw_name),
        api_set: api_set(raw.apiset.as_deref()),
        examples: example_map(&raw.examples),
        key,
        namespace,
        raw_name,
        params,
        results: raw.results.unwrap_or_default(),
        results_description: raw.results_description.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        search_text: String::new(),
    };
    native.search_text = search_text(&native);
    native
}

/// Flatten a whole document: namespaces in encounter order, then entries in
/// encounter order. A document that is not a nested object yields nothing.
pub fn normalize(document: &Value) -> Vec<Native> {
    let Some(namespaces) = document.as_object() else {
        return Vec::new();
    };

    let mut natives = Vec::new();
    for (namespace, entries) in namespaces {
        let Some(entries) = entries.as_object() else {
            continue;
        };
        for (entry_key, payload) in entries {
            natives.push(normalize_entry(namespace, entry_key, payload));
        }
    }
    natives
}
