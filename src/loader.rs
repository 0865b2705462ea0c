//! Dataset loading with ordered fallback between candidate locations.
//!
//! Each dataset lists its candidates local file first, remote URL second.
//! Candidates are tried one after another and the first body that parses as
//! JSON wins. All datasets are loaded in parallel and joined: one dataset
//! failing fails the whole load.

use reqwest::blocking::{Client, Response};
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde_json::Value;
use std::fs;
use std::thread;
use tracing::{debug, info, warn};

use crate::config::DatasetSource;
use crate::error::{NatrefError, Result};
use crate::natives::NativeIndex;

/// Fetches the raw body stored at a location.
pub trait Transport: Sync {
    fn fetch(&self, location: &str) -> Result<String>;

    /// The body exactly as stored, without any text decoding.
    fn fetch_bytes(&self, location: &str) -> Result<Vec<u8>> {
        self.fetch(location).map(String::into_bytes)
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads `http(s)://` locations over the network, anything else from disk.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("natref/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn get(&self, location: &str) -> Result<Response> {
        let response = self.client.get(location).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(NatrefError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, location: &str) -> Result<String> {
        if !is_remote(location) {
            return Ok(fs::read_to_string(location)?);
        }
        Ok(self.get(location)?.text()?)
    }

    fn fetch_bytes(&self, location: &str) -> Result<Vec<u8>> {
        if !is_remote(location) {
            return Ok(fs::read(location)?);
        }
        Ok(self.get(location)?.bytes()?.to_vec())
    }
}

/// A dataset document together with the location it was read from.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub dataset: String,
    pub location: String,
    pub document: Value,
}

/// Try `candidates` strictly in order and return the first that both
/// transports and parses.
pub fn load_first<T: Transport + ?Sized>(
    transport: &T,
    dataset: &str,
    candidates: &[String],
) -> Result<LoadedDocument> {
    let mut attempts = Vec::new();

    for location in candidates {
        debug!(dataset, location = location.as_str(), "trying candidate");
        let parsed = transport
            .fetch(location)
            .and_then(|body| serde_json::from_str::<Value>(&body).map_err(NatrefError::from));

        match parsed {
            Ok(document) => {
                info!(dataset, location = location.as_str(), "dataset resolved");
                return Ok(LoadedDocument {
                    dataset: dataset.to_string(),
                    location: location.clone(),
                    document,
                });
            }
            Err(e) => {
                warn!(dataset, location = location.as_str(), error = %e, "candidate failed");
                attempts.push(format!("{location}: {e}"));
            }
        }
    }

    Err(NatrefError::AllCandidatesFailed {
        dataset: dataset.to_string(),
        attempts,
    })
}

/// Load every dataset in parallel. Results come back in configured order;
/// the first failure (in that order) is returned if any dataset failed.
pub fn load_all<T: Transport + ?Sized>(
    transport: &T,
    datasets: &[DatasetSource],
) -> Result<Vec<LoadedDocument>> {
    let results: Vec<Result<LoadedDocument>> = thread::scope(|scope| {
        let handles: Vec<_> = datasets
            .iter()
            .map(|source| {
                scope.spawn(move || load_first(transport, &source.name, &source.candidates()))
            })
            .collect();

        handles
            .into_iter()
            .zip(datasets)
            .map(|(handle, source)| {
                handle.join().unwrap_or_else(|_| {
                    Err(NatrefError::AllCandidatesFailed {
                        dataset: source.name.clone(),
                        attempts: vec!["loader thread panicked".to_string()],
                    })
                })
            })
            .collect()
    });

    results.into_iter().collect()
}

/// Load all datasets and build the collection. Nothing is built unless every
/// dataset loaded.
pub fn load_index<T: Transport + ?Sized>(
    transport: &T,
    datasets: &[DatasetSource],
) -> Result<NativeIndex> {
    let loaded = load_all(transport, datasets)?;
    let documents: Vec<Value> = loaded.into_iter().map(|l| l.document).collect();
    Ok(NativeIndex::from_documents(&documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeTransport {
        bodies: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn with(mut self, location: &str, body: &str) -> Self {
            self.bodies.insert(location.to_string(), body.to_string());
            self
        }
    }

    impl Transport for FakeTransport {
        fn fetch(&self, location: &str) -> Result<String> {
            self.calls.lock().unwrap().push(location.to_string());
            self.bodies
                .get(location)
                .cloned()
                .ok_or_else(|| NatrefError::Status {
                    location: location.to_string(),
                    status: 404,
                })
        }
    }

    fn candidates(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_success_short_circuits() {
        let transport = FakeTransport::default()
            .with("local.json", r#"{"A":{}}"#)
            .with("https://remote/x.json", r#"{"B":{}}"#);
        let loaded = load_first(
            &transport,
            "natives",
            &candidates(&["local.json", "https://remote/x.json"]),
        )
        .unwrap();

        assert_eq!(loaded.location, "local.json");
        assert_eq!(*transport.calls.lock().unwrap(), vec!["local.json"]);
    }

    #[test]
    fn test_parse_failure_falls_through() {
        let transport = FakeTransport::default()
            .with("local.json", "<html>not json</html>")
            .with("https://remote/x.json", r#"{"B":{}}"#);
        let loaded = load_first(
            &transport,
            "natives",
            &candidates(&["local.json", "https://remote/x.json"]),
        )
        .unwrap();
        assert_eq!(loaded.location, "https://remote/x.json");
    }

    #[test]
    fn test_all_candidates_failed() {
        let transport = FakeTransport::default().with("a", "{");
        let err = load_first(&transport, "cfx", &candidates(&["a", "b"])).unwrap_err();
        match err {
            NatrefError::AllCandidatesFailed { dataset, attempts } => {
                assert_eq!(dataset, "cfx");
                assert_eq!(attempts.len(), 2);
                assert!(attempts[1].contains("404"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://runtime.fivem.net/doc/natives.json"));
        assert!(is_remote("http://localhost/n.json"));
        assert!(!is_remote("data/natives.json"));
    }
}
