//! VS Code local-history scanning.
//!
//! The editor keeps one directory per tracked resource under its
//! `User/History` folder, each holding an `entries.json` document:
//!
//! ```json
//! { "resource": "file:///home/sami/proj/src/main.rs",
//!   "entries": [{ "id": "abcd.rs", "timestamp": 1709283600000 }] }
//! ```
//!
//! This crate turns that folder into [`ResourceGroup`]s for the core
//! pipeline. It is the only place that touches the filesystem.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use tally_core::{ResourceGroup, SnapshotRecord};

/// Name of the per-resource metadata document.
const ENTRIES_FILE: &str = "entries.json";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history folder not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed history document {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// On-disk shape of `entries.json`. Fields we don't use are ignored.
#[derive(Debug, Deserialize)]
struct EntriesDocument {
    resource: String,
    #[serde(default)]
    entries: Vec<EntryRecord>,
}

/// A snapshot entry; everything but the timestamp is irrelevant here.
#[derive(Debug, Deserialize)]
struct EntryRecord {
    timestamp: Option<i64>,
}

fn parse_document(path: &Path) -> Result<ResourceGroup, HistoryError> {
    let file = File::open(path)?;
    let document: EntriesDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| HistoryError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(ResourceGroup {
        resource_id: document.resource,
        records: document
            .entries
            .into_iter()
            .map(|entry| SnapshotRecord {
                timestamp: entry.timestamp,
            })
            .collect(),
    })
}

/// Scans the history folder and parses every resource's metadata document.
///
/// Subdirectories without an `entries.json` are skipped; that is normal on
/// disk. A document that fails to parse aborts the whole scan instead: a
/// report is all-or-nothing per run. Groups come back sorted by resource
/// id so the scan order is deterministic.
pub fn scan_history(history_dir: &Path) -> Result<Vec<ResourceGroup>, HistoryError> {
    if !history_dir.is_dir() {
        return Err(HistoryError::NotFound(history_dir.to_path_buf()));
    }

    let mut document_paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(history_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let document = path.join(ENTRIES_FILE);
        if document.is_file() {
            document_paths.push(document);
        } else {
            tracing::trace!(path = ?path, "no metadata document, skipping");
        }
    }

    let mut groups = document_paths
        .par_iter()
        .map(|path| parse_document(path))
        .collect::<Result<Vec<_>, _>>()?;

    groups.sort_by(|a, b| a.resource_id.cmp(&b.resource_id));
    tracing::debug!(resources = groups.len(), "history folder scanned");
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_document(history_dir: &Path, folder: &str, contents: &str) {
        let dir = history_dir.join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        let mut file = File::create(dir.join(ENTRIES_FILE)).unwrap();
        write!(file, "{contents}").unwrap();
    }

    #[test]
    fn scan_collects_groups_sorted_by_resource() {
        let temp = TempDir::new().unwrap();
        write_document(
            temp.path(),
            "-2f1a",
            r#"{"version":1,"resource":"file:///home/sami/proj/b.rs","entries":[{"id":"x.rs","timestamp":2000}]}"#,
        );
        write_document(
            temp.path(),
            "-77c3",
            r#"{"version":1,"resource":"file:///home/sami/proj/a.rs","entries":[{"id":"y.rs","timestamp":1000},{"id":"z.rs","timestamp":3000}]}"#,
        );

        let groups = scan_history(temp.path()).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].resource_id, "file:///home/sami/proj/a.rs");
        assert_eq!(groups[0].timestamps().collect::<Vec<_>>(), vec![1000, 3000]);
        assert_eq!(groups[1].resource_id, "file:///home/sami/proj/b.rs");
    }

    #[test]
    fn scan_skips_folders_without_document() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("no-entries-here")).unwrap();
        write_document(
            temp.path(),
            "-2f1a",
            r#"{"resource":"file:///proj/a.rs","entries":[]}"#,
        );
        // Stray file at the top level is ignored too
        std::fs::write(temp.path().join("stray.txt"), "x").unwrap();

        let groups = scan_history(temp.path()).unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].records.is_empty());
    }

    #[test]
    fn scan_preserves_entries_without_timestamp() {
        let temp = TempDir::new().unwrap();
        write_document(
            temp.path(),
            "-2f1a",
            r#"{"resource":"file:///proj/a.rs","entries":[{"id":"x.rs"},{"id":"y.rs","timestamp":1000}]}"#,
        );

        let groups = scan_history(temp.path()).unwrap();
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[0].timestamps().collect::<Vec<_>>(), vec![1000]);
    }

    #[test]
    fn malformed_document_aborts_scan() {
        let temp = TempDir::new().unwrap();
        write_document(
            temp.path(),
            "-2f1a",
            r#"{"resource":"file:///proj/a.rs","entries":[{"id":"x.rs","timestamp":1000}]}"#,
        );
        write_document(temp.path(), "-77c3", "{ not json");

        let result = scan_history(temp.path());
        assert!(matches!(result.unwrap_err(), HistoryError::Json { .. }));
    }

    #[test]
    fn missing_history_folder_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let result = scan_history(&missing);
        assert!(matches!(result.unwrap_err(), HistoryError::NotFound(_)));
    }

    #[test]
    fn empty_history_folder_yields_no_groups() {
        let temp = TempDir::new().unwrap();
        assert!(scan_history(temp.path()).unwrap().is_empty());
    }
}
