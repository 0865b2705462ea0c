//! Filtering of the flattened collection.
//!
//! Everything here is a pure function of its inputs so it can run on every
//! keystroke.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::types::Native;

/// Selector value that disables the API-set or namespace predicate.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub query: String,
    pub api_set: String,
    pub namespace: String,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            api_set: ALL.to_string(),
            namespace: ALL.to_string(),
        }
    }
}

impl Criteria {
    pub fn new(query: &str, api_set: &str, namespace: &str) -> Self {
        Self {
            query: query.to_string(),
            api_set: api_set.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// Does `native` satisfy all three predicates?
    pub fn matches(&self, native: &Native) -> bool {
        self.matches_prepared(native, &normalize_query(&self.query))
    }

    fn matches_prepared(&self, native: &Native, needle: &str) -> bool {
        (self.api_set == ALL || native.api_set == self.api_set)
            && (self.namespace == ALL || native.namespace == self.namespace)
            && (needle.is_empty() || native.search_text.contains(needle))
    }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Entries matching `criteria`, in collection order. Never re-sorted.
pub fn filter<'a>(natives: &'a [Native], criteria: &Criteria) -> Vec<&'a Native> {
    let needle = normalize_query(&criteria.query);
    natives
        .iter()
        .filter(|n| criteria.matches_prepared(n, &needle))
        .collect()
}

/// Compare two labels the way a UI collator would: case-insensitive first,
/// lower-case before upper-case on ties, code point order last.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Distinct non-empty namespaces across the whole collection, sorted.
pub fn namespaces(natives: &[Native]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = natives
        .iter()
        .map(|n| n.namespace.as_str())
        .filter(|ns| !ns.is_empty() && seen.insert(*ns))
        .map(str::to_string)
        .collect();
    names.sort_by(|a, b| collate(a, b));
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::natives::normalize::normalize_entry;
    use serde_json::json;

    fn native(ns: &str, key: &str, name: &str, apiset: &str) -> Native {
        normalize_entry(ns, key, &json!({ "name": name, "apiset": apiset }))
    }

    fn sample() -> Vec<Native> {
        vec![
            native("PLAYER", "0x1", "GET_PLAYER_PED", "client"),
            native("CFX", "0x2", "SET_PLAYER_MODEL", "server"),
            native("PED", "0x3", "IS_PED_DEAD", "client"),
            native("CFX", "0x4", "GET_PLAYER_NAME", "shared"),
        ]
    }

    fn keys(result: &[&Native]) -> Vec<String> {
        result.iter().map(|n| n.key.clone()).collect()
    }

    #[test]
    fn test_default_criteria_match_everything() {
        let natives = sample();
        assert_eq!(filter(&natives, &Criteria::default()).len(), natives.len());
    }

    #[test]
    fn test_api_set_is_exact() {
        let natives = sample();
        let result = filter(&natives, &Criteria::new("", "client", ALL));
        assert_eq!(keys(&result), vec!["0x1", "0x3"]);

        // Selector is not lower-cased on the way in
        assert!(filter(&natives, &Criteria::new("", "Client", ALL)).is_empty());
    }

    #[test]
    fn test_namespace_filter() {
        let natives = sample();
        let result = filter(&natives, &Criteria::new("", ALL, "CFX"));
        assert_eq!(keys(&result), vec!["0x2", "0x4"]);
    }

    #[test]
    fn test_text_is_case_insensitive_and_trimmed() {
        let natives = sample();
        let upper = filter(&natives, &Criteria::new("PED", ALL, ALL));
        let lower = filter(&natives, &Criteria::new("  ped ", ALL, ALL));
        assert_eq!(keys(&upper), keys(&lower));
        assert_eq!(keys(&upper), vec!["0x1", "0x3"]);
    }

    #[test]
    fn test_predicates_are_anded() {
        let natives = sample();
        let result = filter(&natives, &Criteria::new("player", "shared", "CFX"));
        assert_eq!(keys(&result), vec!["0x4"]);
        for n in &result {
            assert!(Criteria::new("player", "shared", "CFX").matches(n));
        }
    }

    #[test]
    fn test_server_entry_hidden_by_client_selector() {
        let natives = vec![normalize_entry(
            "CFX",
            "abc",
            &json!({ "hash": "0x1", "name": "_set_player_ped", "apiset": "server" }),
        )];
        assert!(filter(&natives, &Criteria::new("", "client", ALL)).is_empty());
    }

    #[test]
    fn test_filter_is_subsequence() {
        let natives = sample();
        let result = filter(&natives, &Criteria::new("get", ALL, ALL));
        let mut last = None;
        for n in result {
            let pos = natives.iter().position(|x| x.key == n.key).unwrap();
            assert!(last.is_none_or(|l| pos > l));
            last = Some(pos);
        }
    }

    #[test]
    fn test_namespaces_sorted_and_distinct() {
        let mut natives = sample();
        natives.push(native("", "0x5", "NO_NAMESPACE", "client"));
        natives.push(native("audio", "0x6", "PLAY_SOUND", "client"));
        natives.push(native("PLAYER", "0x7", "GET_PLAYER_INDEX", "client"));
        assert_eq!(
            namespaces(&natives),
            vec!["audio", "CFX", "PED", "PLAYER"]
        );
    }

    #[test]
    fn test_collate_ties() {
        assert_eq!(collate("cfx", "CFX"), Ordering::Less);
        assert_eq!(collate("a", "B"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }
}
