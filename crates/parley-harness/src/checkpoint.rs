//! Durable run checkpoints
//!
//! One JSON file per (listener, persuader, strategy) triple, holding the
//! full ordered result sequence and rewritten wholesale after every batch.
//! Saves go through a sibling temp file and an atomic rename, so a crash
//! leaves either the old complete file or the new complete file, never a
//! half-written batch.

use std::path::{Path, PathBuf};

use parley_core::EvaluationResult;

use crate::error::HarnessError;

/// Store for one run's checkpoint file.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Derive the checkpoint path for a run triple.
    pub fn for_run(output_dir: &Path, listener: &str, persuader: &str, strategy: &str) -> Self {
        let file = format!("Listener_{listener}+Persuader_{persuader}+Strategy_{strategy}.json");
        Self {
            path: output_dir.join(file),
        }
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the already-completed result prefix.
    ///
    /// A missing file means a fresh run. A malformed file is logged and
    /// treated the same way, so the run restarts from batch 0 for this
    /// triple; this discards prior work but is the established behavior
    /// downstream aggregation was built against.
    pub fn load(&self) -> Vec<EvaluationResult> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "malformed checkpoint, restarting run from batch 0"
                );
                Vec::new()
            }
        }
    }

    /// Rewrite the whole result sequence atomically.
    pub fn save(&self, results: &[EvaluationResult]) -> Result<(), HarnessError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(results).map_err(|source| HarnessError::Json {
            path: self.path.clone(),
            source,
        })?;

        // Temp file in the same directory so the rename stays on one
        // filesystem and is atomic.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| HarnessError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| HarnessError::io(&self.path, e))
    }

    /// Take the exclusive run lock for this checkpoint.
    ///
    /// Two concurrent runs on the same triple would race on the same file,
    /// so the second one is refused. A crashed owner leaves a stale lock
    /// that must be removed by hand; the error message says so.
    pub fn lock(&self) -> Result<RunLock, HarnessError> {
        let lock_path = self.path.with_extension("json.lock");
        if let Some(dir) = lock_path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, e))?;
        }
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(_) => Ok(RunLock { path: lock_path }),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(HarnessError::RunLocked(lock_path))
            }
            Err(err) => Err(HarnessError::io(&lock_path, err)),
        }
    }
}

/// RAII guard for the run lock; removes the lock file on drop.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to remove run lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(target: &str, is_correct: bool) -> EvaluationResult {
        EvaluationResult {
            ground_truth: "truth".into(),
            target_new: target.into(),
            prompt: "p".into(),
            evidence: "e".into(),
            answer: target.into(),
            is_correct,
            current_accuracy: if is_correct { 1.0 } else { 0.0 },
            rephrase_prompt: "rp".into(),
            rephrase_answer: "ra".into(),
            is_robust: false,
            current_rephrase_accuracy: 0.0,
            locality_prompt: "lp".into(),
            locality_answer: "la".into(),
            is_locality: false,
            current_locality_accuracy: 0.0,
        }
    }

    #[test]
    fn path_encodes_the_run_triple() {
        let store = CheckpointStore::for_run(Path::new("out"), "llama3", "gpt4o", "conformity");
        assert_eq!(
            store.path(),
            Path::new("out/Listener_llama3+Persuader_gpt4o+Strategy_conformity.json")
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::for_run(dir.path(), "l", "p", "s");
        let results = vec![result("Zurich", true), result("Oslo", false)];
        store.save(&results).unwrap();
        assert_eq!(store.load(), results);
        // No temp file left behind.
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::for_run(dir.path(), "l", "p", "s");
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::for_run(dir.path(), "l", "p", "s");
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::for_run(dir.path(), "l", "p", "s");
        store.save(&[result("A", true)]).unwrap();
        let full = vec![result("A", true), result("B", false)];
        store.save(&full).unwrap();
        assert_eq!(store.load(), full);
    }

    #[test]
    fn second_lock_on_same_run_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::for_run(dir.path(), "l", "p", "s");
        let guard = store.lock().unwrap();
        assert!(matches!(store.lock(), Err(HarnessError::RunLocked(_))));
        drop(guard);
        // Lock is released on drop.
        let _again = store.lock().unwrap();
    }
}
