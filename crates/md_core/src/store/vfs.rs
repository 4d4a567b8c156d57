use super::error::StoreError;
use super::{DOC_VERSION, TEAMS_DOC};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{rename, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Metadata wrapper written around every stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub path: String,
    pub data: Value,
    pub updated_at: i64,
    pub version: String,
}

impl Envelope {
    fn wrap(path: &str, data: &Value) -> Self {
        Self {
            path: path.to_string(),
            data: data.clone(),
            updated_at: chrono::Utc::now().timestamp_millis(),
            version: DOC_VERSION.to_string(),
        }
    }
}

/// Document store port for the persistence service. Reads never fail:
/// anything missing or unreadable is reported and treated as absent.
pub trait DocumentStore {
    fn write_json(&self, path: &str, data: &Value) -> Result<(), StoreError>;

    /// Unwrapped document payload. `None` when the document is missing,
    /// unreadable or cleared (`data: null`).
    fn read_json(&self, path: &str) -> Option<Value>;

    /// Has this store ever been written? Probes the teams document.
    fn is_initialized(&self) -> bool {
        self.read_json(TEAMS_DOC).is_some()
    }
}

fn unwrap_envelope(path: &str, raw: &str) -> Option<Value> {
    match serde_json::from_str::<Envelope>(raw) {
        Ok(envelope) => {
            if envelope.path != path {
                log::warn!(
                    "Document at {} carries envelope path {}, discarding",
                    path,
                    envelope.path
                );
                return None;
            }
            if envelope.data.is_null() {
                None
            } else {
                Some(envelope.data)
            }
        }
        Err(err) => {
            log::warn!("Discarding unreadable document {}: {}", path, err);
            None
        }
    }
}

/// Filesystem backend. Virtual path `/data/match/score.json` maps to
/// `<root>/data/match/score.json`.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl DocumentStore for FsStore {
    fn write_json(&self, path: &str, data: &Value) -> Result<(), StoreError> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let envelope = Envelope::wrap(path, data);
        let bytes = serde_json::to_vec_pretty(&envelope)?;

        // Atomic write: temp sibling, flush, fsync, rename into place.
        let temp = target.with_extension("tmp");
        {
            let mut file = File::create(&temp)?;
            file.write_all(&bytes)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp, &target)?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path);
        Ok(())
    }

    fn read_json(&self, path: &str) -> Option<Value> {
        let target = self.resolve(path);
        if !target.exists() {
            return None;
        }

        match std::fs::read_to_string(&target) {
            Ok(raw) => unwrap_envelope(path, &raw),
            Err(err) => {
                log::warn!("Failed to read {}: {}", path, err);
                None
            }
        }
    }
}

/// In-memory backend with the same envelope semantics. Test double and
/// default for embedders without a data directory.
#[derive(Default)]
pub struct MemStore {
    docs: Mutex<HashMap<String, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemStore {
    fn write_json(&self, path: &str, data: &Value) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&Envelope::wrap(path, data))?;
        self.docs.lock().unwrap().insert(path.to_string(), raw);
        Ok(())
    }

    fn read_json(&self, path: &str) -> Option<Value> {
        let raw = self.docs.lock().unwrap().get(path).cloned()?;
        unwrap_envelope(path, &raw)
    }
}
