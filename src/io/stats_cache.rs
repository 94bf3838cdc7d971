use crate::profile::{self, DatasetStats};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Process-scoped memo of dataset statistics, keyed by canonical path.
///
/// Replaces the original implementation's module-level `datasetsinfo` dict:
/// rather than global mutable state, this is an explicit object a caller
/// constructs once and threads through, matching §9's "Global-state
/// substitution" design note.
#[derive(Default)]
pub struct DatasetStatsCache {
    entries: Mutex<HashMap<PathBuf, Arc<DatasetStats>>>,
}

impl DatasetStatsCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns cached stats for `path` if present, otherwise profiles the
    /// file, caches the result under its canonicalized path, and returns it.
    pub fn get_or_compute(&self, path: &Path) -> Result<Arc<DatasetStats>> {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("dataset not found: {}", path.display()))?;

        if let Some(cached) = self.entries.lock().unwrap().get(&canonical) {
            return Ok(Arc::clone(cached));
        }

        let file = File::open(&canonical)
            .with_context(|| format!("failed to open dataset {}", canonical.display()))?;
        let stats = Arc::new(profile::profile_dataset(BufReader::new(file))?);
        self.entries
            .lock()
            .unwrap()
            .insert(canonical, Arc::clone(&stats));
        Ok(stats)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
