//! Persisted hostname record.
//!
//! The record lives in an external key-value store; [`RecordStore`] is the
//! seam. [`JsonFileStore`] keeps records in a JSON file on the gateway and
//! [`MemoryStore`] keeps them in process.

use crate::errors::{StatusError, StatusResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key of the single hostname record.
pub const HOSTNAME_RECORD_ID: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostnameRecord {
    pub hostname: String,
}

impl HostnameRecord {
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
        }
    }
}

pub trait RecordStore: Send + Sync {
    fn get(&self, id: u32) -> StatusResult<Option<HostnameRecord>>;

    /// Inserts or replaces the record stored under `id`.
    fn update(&self, id: u32, record: &HostnameRecord) -> StatusResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<u32, HostnameRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, id: u32) -> StatusResult<Option<HostnameRecord>> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(&id).cloned())
    }

    fn update(&self, id: u32, record: &HostnameRecord) -> StatusResult<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(id, record.clone());
        Ok(())
    }
}

/// Records serialized as a JSON object keyed by id, replaced atomically on every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StatusResult<BTreeMap<u32, HostnameRecord>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            StatusError::Store(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            StatusError::Store(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }
}

impl RecordStore for JsonFileStore {
    fn get(&self, id: u32) -> StatusResult<Option<HostnameRecord>> {
        Ok(self.load()?.remove(&id))
    }

    fn update(&self, id: u32, record: &HostnameRecord) -> StatusResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load()?;
        records.insert(id, record.clone());
        save_atomic(&self.path, &records)
            .map_err(|e| StatusError::Store(format!("{:#}", e)))
    }
}

fn save_atomic(path: &Path, records: &BTreeMap<u32, HostnameRecord>) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory: {}", parent.display()))?;
    }

    let tmp_path = temp_path(path);
    let payload = serde_json::to_string_pretty(records).context("Failed to serialize records")?;

    let mut file = File::create(&tmp_path)
        .with_context(|| format!("Failed to create temp store file: {}", tmp_path.display()))?;
    file.write_all(payload.as_bytes())
        .context("Failed to write records")?;
    file.sync_all().context("Failed to flush records")?;

    fs::rename(&tmp_path, path).with_context(|| {
        format!("Failed to atomically replace store file: {}", path.display())
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            dir.sync_all().ok();
        }
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("status.json");
    path.with_file_name(format!("{}.tmp", file_name))
}
