//! Checkpoint aggregation
//!
//! Walks a results directory, derives per-file accuracy summaries from the
//! stored boolean flags, and writes one CSV row per checkpoint file.
//! Unreadable files are skipped with a warning so one corrupt checkpoint
//! does not sink the whole report.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::HarnessError;

/// Accuracy summary for one checkpoint file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub total: usize,
    pub accuracy: f64,
    pub robust_accuracy: f64,
    pub locality_accuracy: f64,
}

/// Summarize every `*.json` checkpoint under `results_dir`, recursively.
pub fn collect_summaries(results_dir: &Path) -> Result<Vec<FileSummary>, HarnessError> {
    let mut paths = Vec::new();
    walk_json_files(results_dir, &mut paths)?;
    paths.sort();

    let mut summaries = Vec::new();
    for path in paths {
        match summarize_file(&path) {
            Ok(summary) => summaries.push(summary),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable checkpoint");
            }
        }
    }
    Ok(summaries)
}

/// Derive one summary row from a checkpoint file.
///
/// Tolerates a single bare record as well as an array, and missing flags
/// count as false; foreign files simply produce low totals instead of
/// aborting the report.
pub fn summarize_file(path: &Path) -> Result<FileSummary, HarnessError> {
    let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|source| HarnessError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = match value {
        Value::Array(records) => records,
        other => vec![other],
    };

    let total = records.len();
    let count = |flag: &str| {
        records
            .iter()
            .filter(|r| r.get(flag).and_then(Value::as_bool).unwrap_or(false))
            .count()
    };
    let share = |hits: usize| {
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    };

    Ok(FileSummary {
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        total,
        accuracy: share(count("is_correct")),
        robust_accuracy: share(count("is_robust")),
        locality_accuracy: share(count("is_locality")),
    })
}

/// Write summaries as CSV with a header row.
pub fn write_csv(summaries: &[FileSummary], out: &Path) -> Result<(), HarnessError> {
    let mut writer = csv::Writer::from_path(out)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush().map_err(|e| HarnessError::io(out, e))
}

fn walk_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), HarnessError> {
    let entries = std::fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| HarnessError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKPOINT: &str = r#"[
        {"is_correct": true, "is_robust": true, "is_locality": false},
        {"is_correct": true, "is_robust": false, "is_locality": false},
        {"is_correct": false, "is_robust": false, "is_locality": true},
        {"is_correct": false, "is_robust": false, "is_locality": true}
    ]"#;

    #[test]
    fn summarizes_flag_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, CHECKPOINT).unwrap();

        let summary = summarize_file(&path).unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.accuracy, 0.5);
        assert_eq!(summary.robust_accuracy, 0.25);
        assert_eq!(summary.locality_accuracy, 0.5);
    }

    #[test]
    fn single_record_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, r#"{"is_correct": true}"#).unwrap();

        let summary = summarize_file(&path).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.accuracy, 1.0);
        assert_eq!(summary.locality_accuracy, 0.0);
    }

    #[test]
    fn collects_recursively_and_skips_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("a.json"), CHECKPOINT).unwrap();
        std::fs::write(dir.path().join("nested/b.json"), CHECKPOINT).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{oops").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let summaries = collect_summaries(dir.path()).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].file, "a.json");
        assert_eq!(summaries[1].file, "b.json");
    }

    #[test]
    fn csv_has_header_and_one_row_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.csv");
        let summaries = vec![FileSummary {
            file: "run.json".into(),
            total: 4,
            accuracy: 0.5,
            robust_accuracy: 0.25,
            locality_accuracy: 0.5,
        }];
        write_csv(&summaries, &out).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "file,total,accuracy,robust_accuracy,locality_accuracy"
        );
        assert_eq!(lines.next().unwrap(), "run.json,4,0.5,0.25,0.5");
    }
}
