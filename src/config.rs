use colored::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE: &str = "natref.toml";

/// One dataset and where to find it, local copy first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    pub local: PathBuf,
    pub remote: String,
}

impl DatasetSource {
    pub fn new(name: &str, local: &str, remote: &str) -> Self {
        Self {
            name: name.to_string(),
            local: PathBuf::from(local),
            remote: remote.to_string(),
        }
    }

    /// Candidate locations in the order they are tried.
    pub fn candidates(&self) -> Vec<String> {
        vec![self.local.display().to_string(), self.remote.clone()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_datasets")]
    pub datasets: Vec<DatasetSource>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_permalink_base")]
    pub permalink_base: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_datasets() -> Vec<DatasetSource> {
    vec![
        DatasetSource::new(
            "natives",
            "data/natives.json",
            "https://runtime.fivem.net/doc/natives.json",
        ),
        DatasetSource::new(
            "cfx",
            "data/natives_cfx.json",
            "https://runtime.fivem.net/doc/natives_cfx.json",
        ),
    ]
}

fn default_language() -> String {
    "lua".to_string()
}

fn default_permalink_base() -> String {
    "https://docs.fivem.net/natives/".to_string()
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_list_limit() -> usize {
    50
}

fn default_theme() -> String {
    "base16-ocean.dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datasets: default_datasets(),
            language: default_language(),
            permalink_base: default_permalink_base(),
            debounce_ms: default_debounce_ms(),
            list_limit: default_list_limit(),
            theme: default_theme(),
        }
    }
}

impl Config {
    /// Load `path`, or `natref.toml` in the working directory. Problems with
    /// the file are reported and the defaults used instead.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        return config;
                    }
                    Err(e) => {
                        eprintln!(
                            "{} Failed to parse {}: {}",
                            "⚠️".yellow(),
                            config_path.display(),
                            e
                        );
                        eprintln!("   Using default configuration");
                    }
                },
                Err(e) => {
                    eprintln!(
                        "{} Failed to read {}: {}",
                        "⚠️".yellow(),
                        config_path.display(),
                        e
                    );
                    eprintln!("   Using default configuration");
                }
            }
        }

        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(config.language, "lua");
        assert_eq!(config.debounce_ms, 200);
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
language = "cs"
list_limit = 10

[[datasets]]
name = "natives"
local = "cache/n.json"
remote = "https://example.invalid/n.json"
"#,
        )
        .unwrap();
        assert_eq!(config.language, "cs");
        assert_eq!(config.list_limit, 10);
        assert_eq!(config.datasets.len(), 1);
        assert_eq!(
            config.datasets[0].candidates(),
            vec!["cache/n.json", "https://example.invalid/n.json"]
        );
        assert_eq!(config.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load(Some(Path::new("does/not/exist/natref.toml")));
        assert_eq!(config.permalink_base, "https://docs.fivem.net/natives/");
    }
}
