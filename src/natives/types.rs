use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// API set used when an entry does not carry one.
pub const DEFAULT_API_SET: &str = "client";

/// A single entry payload as found in the upstream documents.
///
/// Every field is optional: upstream data quality varies per entry, and the
/// normalizer fills in defaults instead of rejecting anything.
#[derive(Debug, Clone, Default)]
pub struct RawNative {
    pub hash: Option<String>,
    pub name: Option<String>,
    pub ns: Option<String>,
    pub params: Vec<RawParam>,
    pub results: Option<String>,
    pub description: Option<String>,
    pub results_description: Option<String>,
    pub apiset: Option<String>,
    pub examples: Value,
}

#[derive(Debug, Clone, Default)]
pub struct RawParam {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
}

fn str_field(obj: &serde_json::Map<String, Value>, field: &str) -> Option<String> {
    match obj.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl RawParam {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            name: str_field(obj, "name"),
            kind: str_field(obj, "type"),
            description: str_field(obj, "description"),
        }
    }
}

impl RawNative {
    /// Read a payload leniently. Anything that is not an object reads as an
    /// empty payload, and fields of the wrong shape read as absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let params = obj
            .get("params")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(RawParam::from_value).collect())
            .unwrap_or_default();

        Self {
            hash: str_field(obj, "hash"),
            name: str_field(obj, "name"),
            ns: str_field(obj, "ns"),
            params,
            results: str_field(obj, "results"),
            description: str_field(obj, "description"),
            results_description: str_field(obj, "resultsDescription"),
            apiset: str_field(obj, "apiset"),
            examples: obj.get("examples").cloned().unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// A fully populated, normalized entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Native {
    pub key: String,
    pub namespace: String,
    pub raw_name: String,
    pub display_name: String,
    pub api_set: String,
    pub params: Vec<Param>,
    pub results: String,
    pub results_description: String,
    pub description: String,
    /// Language tag (lower-case) to example source.
    pub examples: BTreeMap<String, String>,
    #[serde(skip)]
    pub search_text: String,
}

impl Native {
    pub fn is_void(&self) -> bool {
        self.results.is_empty() || self.results.eq_ignore_ascii_case("void")
    }
}
