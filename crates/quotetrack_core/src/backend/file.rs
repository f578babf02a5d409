//! File-backed snapshot store.
//!
//! # Responsibility
//! - Persist the quote collection as one UTF-8 JSON file.
//! - Keep the previous snapshot intact when a write fails midway.
//!
//! # Invariants
//! - A missing file reads as `SnapshotRead::Absent`.
//! - Writes go through a sibling temp file and an atomic rename, so readers
//!   never observe a truncated snapshot.

use crate::backend::snapshot::{decode_snapshot, encode_snapshot};
use crate::backend::{BackendResult, SnapshotRead, SnapshotStore};
use crate::model::quote::QuoteRecord;
use log::{error, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot store over a single JSON file.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for FileBackend {
    fn read(&mut self) -> BackendResult<SnapshotRead> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=snapshot_read module=backend_file status=absent path={}",
                    self.path.display()
                );
                return Ok(SnapshotRead::Absent);
            }
            Err(err) => {
                error!(
                    "event=snapshot_read module=backend_file status=error path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(err.into());
            }
        };

        let quotes = decode_snapshot(&raw).inspect_err(|err| {
            error!(
                "event=snapshot_read module=backend_file status=corrupt path={} error={}",
                self.path.display(),
                err
            );
        })?;

        info!(
            "event=snapshot_read module=backend_file status=ok path={} count={}",
            self.path.display(),
            quotes.len()
        );
        Ok(SnapshotRead::Loaded(quotes))
    }

    fn write(&mut self, quotes: &[QuoteRecord]) -> BackendResult<()> {
        let encoded = encode_snapshot(quotes)?;
        let temp_path = self.temp_path();

        let result = std::fs::write(&temp_path, encoded.as_bytes())
            .and_then(|()| std::fs::rename(&temp_path, &self.path));

        match result {
            Ok(()) => {
                info!(
                    "event=snapshot_write module=backend_file status=ok path={} count={}",
                    self.path.display(),
                    quotes.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_write module=backend_file status=error path={} error={}",
                    self.path.display(),
                    err
                );
                // Leave no temp file behind; the previous snapshot is untouched.
                let _ = std::fs::remove_file(&temp_path);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileBackend;
    use crate::backend::{SnapshotRead, SnapshotStore};
    use crate::model::quote::QuoteRecord;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("quotes.json"));

        assert_eq!(backend.read().unwrap(), SnapshotRead::Absent);
    }

    #[test]
    fn write_then_read_returns_equal_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("quotes.json"));

        let quotes = vec![
            QuoteRecord::new("first").unwrap(),
            QuoteRecord::new("second").unwrap(),
        ];
        backend.write(&quotes).unwrap();

        assert_eq!(backend.read().unwrap(), SnapshotRead::Loaded(quotes));
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // Target path is a directory, so the final rename must fail.
        let target = dir.path().join("quotes.json");
        std::fs::create_dir(&target).unwrap();
        let mut backend = FileBackend::new(&target);

        let quotes = vec![QuoteRecord::new("doomed").unwrap()];
        backend.write(&quotes).unwrap_err();

        assert!(!backend.temp_path().exists());
    }
}
