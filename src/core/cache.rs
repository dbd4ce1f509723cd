//! Whole-document JSON snapshot persistence.
//!
//! [`SnapshotStore`] owns the LOC and open-source PR snapshots. Each document is
//! read wholesale and replaced wholesale; there is no partial update path.
//! Reads fall back to defaults; write failures are logged, never propagated.

use crate::core::{
    error::{ProfileStatsError, Result},
    state::{LocSnapshot, OssPrSnapshot},
};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOC_CACHE_FILE: &str = "loc_cache.json";
pub const OSS_PR_CACHE_FILE: &str = "oss_pr_cache.json";
pub const ICON_CACHE_FILE: &str = "icon-cache.json";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn loc_path(&self) -> PathBuf {
        self.dir.join(LOC_CACHE_FILE)
    }

    pub fn oss_pr_path(&self) -> PathBuf {
        self.dir.join(OSS_PR_CACHE_FILE)
    }

    pub fn icon_path(&self) -> PathBuf {
        self.dir.join(ICON_CACHE_FILE)
    }

    /// Last LOC snapshot, or `None` when absent or unreadable.
    pub fn load_loc(&self) -> Option<LocSnapshot> {
        let path = self.loc_path();
        match read_document(&path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("LOC cache unusable, recomputing: {e}");
                None
            }
        }
    }

    pub fn store_loc(&self, snapshot: &LocSnapshot) {
        if let Err(e) = write_document(&self.loc_path(), snapshot) {
            log::warn!("LOC cache save failed (run will continue): {e}");
        }
    }

    /// Persisted merged/closed history, or an empty snapshot when absent or unreadable.
    pub fn load_oss_prs(&self) -> OssPrSnapshot {
        let path = self.oss_pr_path();
        match read_document(&path) {
            Ok(snapshot) => snapshot.unwrap_or_default(),
            Err(e) => {
                log::warn!("Open source PR cache unusable, starting empty: {e}");
                OssPrSnapshot::default()
            }
        }
    }

    pub fn store_oss_prs(&self, snapshot: &OssPrSnapshot) {
        if let Err(e) = write_document(&self.oss_pr_path(), snapshot) {
            log::warn!("Open source PR cache save failed (run will continue): {e}");
        }
    }
}

/// Read and parse a JSON document. A missing file is `Ok(None)`.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        log::debug!("Cache file does not exist: {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ProfileStatsError::cache_read_failed(path, e))?;

    let document = serde_json::from_str(&content)
        .map_err(|e| ProfileStatsError::cache_parse_failed(path, e))?;

    log::debug!("Loaded cache file {}", path.display());
    Ok(Some(document))
}

/// Serialize a document as pretty JSON and replace the file, creating parent directories.
pub fn write_document<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| ProfileStatsError::cache_directory_creation_failed(dir, e))?;
    }

    let json = serde_json::to_string_pretty(document)
        .map_err(ProfileStatsError::cache_serialization_failed)?;

    fs::write(path, json).map_err(|e| ProfileStatsError::cache_write_failed(path, e))?;

    log::debug!("Wrote cache file {}", path.display());
    Ok(())
}
