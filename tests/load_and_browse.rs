//! End-to-end: datasets from disk and a stub remote, through the index, the
//! query engine and permalinks.

use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use natref::config::DatasetSource;
use natref::deeplink;
use natref::loader::{Transport, load_all, load_index};
use natref::natives::{ALL, Criteria};
use natref::{AppState, NatrefError, Result, Selection};
use url::Url;

/// Files are read from disk; `https://` locations come from a fixed table.
struct StubTransport {
    remote: HashMap<String, String>,
}

impl Transport for StubTransport {
    fn fetch(&self, location: &str) -> Result<String> {
        if location.starts_with("https://") {
            return self.remote.get(location).cloned().ok_or_else(|| NatrefError::Status {
                location: location.to_string(),
                status: 404,
            });
        }
        Ok(fs::read_to_string(location)?)
    }
}

const NATIVES: &str = r#"{
  "PLAYER": {
    "0x43A66C31C68491C0": {
      "name": "GET_PLAYER_PED",
      "params": [{ "name": "playerId", "type": "Player", "description": "" }],
      "results": "Ped",
      "description": "Returns the ped of a player",
      "examples": [{ "lang": "lua", "code": "local ped = GetPlayerPed(-1)" }]
    },
    "0x6D0DE6A7B5DA71F8": { "name": "GET_PLAYER_NAME", "results": "char*" }
  },
  "PED": {
    "0x2D343D2219CD027A": { "name": "_IS_PED_DEAD_OR_DYING", "results": "BOOL" }
  }
}"#;

const CFX: &str = r#"{
  "CFX": {
    "0xabc": { "hash": "0xC6B3D37A", "name": "SET_PLAYER_ROUTING_BUCKET", "apiset": "server", "ns": "CFX" },
    "0xdef": { "hash": "0x4D52FE5B", "name": "GET_PLAYER_PED", "apiset": "Shared" }
  }
}"#;

fn datasets(dir: &std::path::Path) -> Vec<DatasetSource> {
    vec![
        DatasetSource {
            name: "natives".to_string(),
            local: dir.join("natives.json"),
            remote: "https://stub/natives.json".to_string(),
        },
        DatasetSource {
            name: "cfx".to_string(),
            local: dir.join("natives_cfx.json"),
            remote: "https://stub/natives_cfx.json".to_string(),
        },
    ]
}

fn stub(remote: &[(&str, &str)]) -> StubTransport {
    StubTransport {
        remote: remote
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn local_first_then_remote() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("natives.json"), NATIVES).unwrap();
    // No local cfx copy: falls back to the remote
    let transport = stub(&[("https://stub/natives_cfx.json", CFX)]);

    let loaded = load_all(&transport, &datasets(dir.path())).unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded[0].location.ends_with("natives.json"));
    assert_eq!(loaded[1].location, "https://stub/natives_cfx.json");
}

#[test]
fn one_failed_dataset_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("natives.json"), NATIVES).unwrap();
    let transport = stub(&[]);

    let err = load_index(&transport, &datasets(dir.path())).unwrap_err();
    match err {
        NatrefError::AllCandidatesFailed { dataset, attempts } => {
            assert_eq!(dataset, "cfx");
            assert_eq!(attempts.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn filters_and_namespaces_over_both_datasets() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("natives.json"), NATIVES).unwrap();
    fs::write(dir.path().join("natives_cfx.json"), CFX).unwrap();
    let index = load_index(&stub(&[]), &datasets(dir.path())).unwrap();

    assert_eq!(index.len(), 5);
    assert_eq!(index.namespaces(), ["CFX", "PED", "PLAYER"]);

    let peds: Vec<&str> = index
        .filter(&Criteria::new("GET_PLAYER_PED", ALL, ALL))
        .iter()
        .map(|n| n.key.as_str())
        .collect();
    assert_eq!(peds, vec!["0x43A66C31C68491C0", "0x4D52FE5B"]);

    let shared = index.filter(&Criteria::new("", "shared", ALL));
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].namespace, "CFX");

    let client = index.filter(&Criteria::new("", "client", ALL));
    assert_eq!(client.len(), 3);

    let dead = index.filter(&Criteria::new("isPedDead", ALL, "PED"));
    assert_eq!(dead[0].display_name, "IsPedDeadOrDying");
}

#[test]
fn permalinks_select_entries() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("natives.json"), NATIVES).unwrap();
    fs::write(dir.path().join("natives_cfx.json"), CFX).unwrap();
    let index = load_index(&stub(&[]), &datasets(dir.path())).unwrap();

    let start = Url::parse("https://docs.example/index.html?_0xABCD=&foo=bar").unwrap();
    assert_eq!(deeplink::decode(&start), Some("0xABCD".to_string()));

    let mut state = AppState::new(index, start, Duration::from_millis(10));
    assert_eq!(state.selection(), Selection::NotFound("0xABCD".to_string()));

    state.select("0xc6b3d37a");
    assert!(state.location().query().unwrap().contains("foo=bar"));
    match state.selection() {
        Selection::Found(native) => assert_eq!(native.raw_name, "SET_PLAYER_ROUTING_BUCKET"),
        other => panic!("unexpected selection: {other:?}"),
    }
}
