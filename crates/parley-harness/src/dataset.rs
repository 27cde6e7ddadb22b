//! Dataset loading

use std::path::Path;

use parley_core::KnowledgeItem;

use crate::error::HarnessError;

/// Load the dataset: a JSON array of flat knowledge records.
///
/// Items with any empty required field are skipped here, upstream of
/// evidence generation, and never enter an accuracy denominator.
pub fn load_dataset(path: &Path) -> Result<Vec<KnowledgeItem>, HarnessError> {
    let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    let items: Vec<KnowledgeItem> =
        serde_json::from_str(&content).map_err(|source| HarnessError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let total = items.len();
    let complete: Vec<KnowledgeItem> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if item.is_complete() {
                Some(item)
            } else {
                tracing::warn!(index, prompt = %item.prompt, "skipping incomplete dataset item");
                None
            }
        })
        .collect();

    tracing::info!(
        path = %path.display(),
        loaded = complete.len(),
        skipped = total - complete.len(),
        "dataset loaded"
    );
    Ok(complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_complete_items_and_skips_incomplete_ones() {
        let file = write_dataset(
            r#"[
            {"prompt": "Capital of X?", "ground_truth": "Bern", "target_new": "Zurich",
             "subject": "X", "rephrase_prompt": "r", "locality_prompt": "l",
             "locality_ground_truth": "Paris"},
            {"prompt": "Capital of Y?", "ground_truth": "Oslo", "target_new": "",
             "subject": "Y", "rephrase_prompt": "r", "locality_prompt": "l",
             "locality_ground_truth": "Rome"}
        ]"#,
        );
        let items = load_dataset(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].target_new, "Zurich");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dataset(Path::new("/nonexistent/dataset.json")).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }

    #[test]
    fn non_array_document_is_a_json_error() {
        let file = write_dataset(r#"{"prompt": "lonely object"}"#);
        assert!(matches!(
            load_dataset(file.path()),
            Err(HarnessError::Json { .. })
        ));
    }
}
