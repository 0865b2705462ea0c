//! One-shot download of the remote datasets into their local cache paths.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::config::DatasetSource;
use crate::error::Result;
use crate::loader::Transport;

#[derive(Debug, Clone)]
pub struct Fetched {
    pub dataset: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Download each dataset's remote body and write it verbatim to its local
/// path, creating parent directories. Stops at the first failure; files
/// written before it are kept.
pub fn fetch_all<T: Transport + ?Sized>(
    transport: &T,
    datasets: &[DatasetSource],
) -> Result<Vec<Fetched>> {
    let mut fetched = Vec::new();

    for source in datasets {
        let body = transport.fetch_bytes(&source.remote)?;

        if let Some(parent) = source.local.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&source.local, &body)?;

        let digest = sha256_hex(&body);
        info!(
            dataset = source.name.as_str(),
            path = %source.local.display(),
            bytes = body.len(),
            sha256 = digest.as_str(),
            "dataset written"
        );
        fetched.push(Fetched {
            dataset: source.name.clone(),
            path: source.local.clone(),
            bytes: body.len(),
            sha256: digest,
        });
    }

    Ok(fetched)
}
