//! Fingerprint store for classified grids
//!
//! Keyed by content fingerprint, append-only, with an optional JSON snapshot.
//! The first submission of a grid is scanned and recorded; every later
//! submission of the same content gets the stored record back untouched.

mod record;

pub use record::ClassificationRecord;

use crate::config::DetectorConfig;
use crate::dna::{Grid, SequenceScanner};
use crate::stats::RecordSource;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Snapshot-level metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub created_at: DateTime<Utc>,
    pub saved_at: Option<DateTime<Utc>>,
}

/// On-disk layout: records ordered by id
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    metadata: StoreMetadata,
    records: Vec<ClassificationRecord>,
}

#[derive(Debug)]
struct Inner {
    records: HashMap<String, ClassificationRecord>,
    next_id: u64,
    metadata: StoreMetadata,
}

/// Deduplicating store of classification records
#[derive(Debug)]
pub struct FingerprintStore {
    inner: RwLock<Inner>,
    scanner: SequenceScanner,
    path: Option<PathBuf>,
}

impl FingerprintStore {
    /// A store with no backing file
    pub fn in_memory(config: &DetectorConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: HashMap::new(),
                next_id: 1,
                metadata: StoreMetadata { created_at: Utc::now(), saved_at: None },
            }),
            scanner: SequenceScanner::new(config),
            path: None,
        }
    }

    /// Open a snapshot-backed store. A missing or unreadable snapshot starts empty.
    ///
    /// An unreadable snapshot is renamed aside before anything can be saved
    /// over it. If the rename fails the store stays in memory only.
    pub fn open(path: impl AsRef<Path>, config: &DetectorConfig) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut store = Self::in_memory(config);
        if path.exists() {
            match Self::load_snapshot(&path) {
                Ok(snapshot) => {
                    let inner = store.inner.get_mut();
                    inner.next_id = snapshot.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
                    inner.metadata = snapshot.metadata;
                    inner.records = snapshot
                        .records
                        .into_iter()
                        .map(|r| (r.fingerprint.clone(), r))
                        .collect();
                    info!("Loaded {} records from {}", inner.records.len(), path.display());
                }
                Err(e) => {
                    warn!("Ignoring unreadable store {}: {}", path.display(), e);
                    let aside = Self::corrupt_path(&path);
                    if let Err(e) = std::fs::rename(&path, &aside) {
                        warn!("Cannot move {} aside ({}), not saving to it", path.display(), e);
                        return store;
                    }
                    warn!("Moved unreadable store to {}", aside.display());
                }
            }
        }
        store.path = Some(path);
        store
    }

    /// `store.json` → `store.corrupt-<timestamp>.json`
    fn corrupt_path(path: &Path) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
        path.with_extension(format!("corrupt-{}.json", stamp))
    }

    fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the snapshot (temp file, then rename). No-op for in-memory stores.
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            debug!("In-memory store, nothing to save");
            return Ok(());
        };
        let metadata = {
            let mut inner = self.inner.write();
            inner.metadata.saved_at = Some(Utc::now());
            inner.metadata.clone()
        };
        let snapshot = Snapshot { metadata, records: self.records() };
        let json = serde_json::to_string_pretty(&snapshot)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        debug!("Saved store to {}", path.display());
        Ok(())
    }

    /// Classify a grid once per distinct content.
    ///
    /// The scan runs outside the lock; only the insert-if-absent is
    /// serialized. A submission that loses the insert race returns the
    /// winner's record.
    pub fn classify_and_record(&self, grid: &Grid) -> ClassificationRecord {
        let fingerprint = grid.fingerprint();
        if let Some(existing) = self.inner.read().records.get(&fingerprint) {
            debug!("Duplicate grid {}, returning record #{}", &fingerprint[..12], existing.id);
            return existing.clone();
        }

        let is_mutant = self.scanner.is_mutant(grid);

        let mut guard = self.inner.write();
        let inner = &mut *guard;
        match inner.records.entry(fingerprint) {
            Entry::Occupied(entry) => {
                debug!("Grid {} recorded concurrently, reading back", &entry.key()[..12]);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let record = ClassificationRecord::new(
                    inner.next_id,
                    entry.key().clone(),
                    is_mutant,
                    grid.rows().to_vec(),
                );
                inner.next_id += 1;
                info!("Recorded {}", record.summary());
                entry.insert(record).clone()
            }
        }
    }

    pub fn get(&self, fingerprint: &str) -> Option<ClassificationRecord> {
        self.inner.read().records.get(fingerprint).cloned()
    }

    pub fn contains(&self, grid: &Grid) -> bool {
        self.inner.read().records.contains_key(&grid.fingerprint())
    }

    /// Number of records with the given classification
    pub fn count(&self, is_mutant: bool) -> u64 {
        self.inner
            .read()
            .records
            .values()
            .filter(|r| r.is_mutant == is_mutant)
            .count() as u64
    }

    /// (mutant, human) counts from a single read
    pub fn counts(&self) -> (u64, u64) {
        let inner = self.inner.read();
        let mutant = inner.records.values().filter(|r| r.is_mutant).count() as u64;
        (mutant, inner.records.len() as u64 - mutant)
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records ordered by id
    pub fn records(&self) -> Vec<ClassificationRecord> {
        let mut records: Vec<ClassificationRecord> =
            self.inner.read().records.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl RecordSource for FingerprintStore {
    fn count(&self, is_mutant: bool) -> u64 {
        FingerprintStore::count(self, is_mutant)
    }

    fn counts(&self) -> (u64, u64) {
        FingerprintStore::counts(self)
    }
}

/// Snapshot persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store snapshot is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
