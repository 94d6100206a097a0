//! File-backed progress store.
//!
//! The desktop analog of the browser's key-value storage: a small JSON
//! map in the user's data directory holding the step index under the
//! fixed key. Persistence is a resume hint only, so write failures are
//! logged and swallowed rather than surfaced to the learner.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use gitquest::{ProgressStore, STEP_STORAGE_KEY};

pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform data directory, e.g.
    /// `~/.local/share/gitquest/progress.json`.
    pub fn at_default_path() -> anyhow::Result<Self> {
        let dir = dirs::data_dir()
            .context("could not determine the user data directory")?
            .join("gitquest");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        Ok(Self::new(dir.join("progress.json")))
    }

    fn read_map(&self) -> BTreeMap<String, usize> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }
}

impl ProgressStore for FileProgressStore {
    fn load_step(&self) -> Option<usize> {
        self.read_map().get(STEP_STORAGE_KEY).copied()
    }

    fn save_step(&mut self, step: usize) {
        let mut map = self.read_map();
        map.insert(STEP_STORAGE_KEY.to_string(), step);
        let json = match serde_json::to_string_pretty(&map) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize progress");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            tracing::warn!(error = %err, path = %self.path.display(), "failed to save progress");
        }
    }
}
