//! Scoped local files for one worker record.
//!
//! Each record gets a download path and a resize-candidate path, both prefixed
//! with a fresh UUID so records sharing a key (duplicate notifications in one
//! batch) never touch the same file. Both paths are removed when the record
//! finishes, whichever of them was actually written.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug)]
pub struct TransientFiles {
    download_path: PathBuf,
    resized_path: PathBuf,
    released: bool,
}

impl TransientFiles {
    /// Reserve paths under `dir` for the object `key`. Nothing is created on disk.
    ///
    /// The key's extension is kept at the end of both names so the encoder can
    /// pick the output format from the candidate path.
    pub fn new(dir: &Path, key: &str) -> Self {
        let flattened = key.replace('/', "_");
        let id = Uuid::new_v4();
        Self {
            download_path: dir.join(format!("{}-{}", id, flattened)),
            resized_path: dir.join(format!("resized-{}-{}", id, flattened)),
            released: false,
        }
    }

    pub fn download_path(&self) -> &Path {
        &self.download_path
    }

    pub fn resized_path(&self) -> &Path {
        &self.resized_path
    }

    /// Remove both files. A file that was never written is not an error, and
    /// other removal failures are logged rather than returned so they cannot
    /// mask the record's own outcome.
    pub async fn cleanup(mut self) {
        for path in [&self.download_path, &self.resized_path] {
            match tokio::fs::remove_file(path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed transient file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Failed to remove transient file"
                ),
            }
        }
        self.released = true;
    }
}

impl Drop for TransientFiles {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // Reached only if cleanup() never ran (panic or cancelled future).
        for path in [&self.download_path, &self.resized_path] {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Failed to remove transient file on drop"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_are_flattened_and_distinct() {
        let dir = tempdir().unwrap();
        let a = TransientFiles::new(dir.path(), "uploads/1-abc.png");
        let b = TransientFiles::new(dir.path(), "uploads/1-abc.png");

        let name = a.download_path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("-uploads_1-abc.png"));
        assert!(!name.contains('/'));

        let resized = a.resized_path().file_name().unwrap().to_string_lossy().to_string();
        assert!(resized.starts_with("resized-"));
        assert!(resized.ends_with("uploads_1-abc.png"));

        assert_ne!(a.download_path(), b.download_path());
        assert_ne!(a.resized_path(), b.resized_path());
        assert_eq!(a.download_path().parent(), Some(dir.path()));
    }

    #[tokio::test]
    async fn test_cleanup_removes_written_files() {
        let dir = tempdir().unwrap();
        let files = TransientFiles::new(dir.path(), "uploads/x.png");
        std::fs::write(files.download_path(), b"a").unwrap();
        std::fs::write(files.resized_path(), b"b").unwrap();
        let (download, resized) = (
            files.download_path().to_path_buf(),
            files.resized_path().to_path_buf(),
        );

        files.cleanup().await;
        assert!(!download.exists());
        assert!(!resized.exists());
    }

    #[tokio::test]
    async fn test_cleanup_tolerates_missing_files() {
        let dir = tempdir().unwrap();
        let files = TransientFiles::new(dir.path(), "uploads/x.png");
        std::fs::write(files.download_path(), b"a").unwrap();
        let download = files.download_path().to_path_buf();

        // Resize candidate was never written.
        files.cleanup().await;
        assert!(!download.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_drop_removes_files() {
        let dir = tempdir().unwrap();
        let files = TransientFiles::new(dir.path(), "uploads/y.gif");
        std::fs::write(files.download_path(), b"a").unwrap();
        let download = files.download_path().to_path_buf();

        drop(files);
        assert!(!download.exists());
    }
}
