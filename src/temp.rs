use crate::error::OcrError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const POOL_PREFIX: &str = "bfv-ocr-";

/// Scratch directory for prepared rasters and staged engine data.
///
/// The pool is created once, passed to whoever needs scratch space, and
/// swept explicitly at shutdown or test teardown. Prepared rasters stay
/// on disk between sweeps so the recognition engine can read them by
/// path. Dropping the pool removes the directory entirely.
pub struct TempPool {
    dir: TempDir,
}

impl TempPool {
    pub fn new() -> Result<Self, OcrError> {
        let dir = tempfile::Builder::new()
            .prefix(POOL_PREFIX)
            .tempdir()
            .map_err(|e| OcrError::Initialization(format!("failed to create temp pool: {e}")))?;
        tracing::debug!("created temp pool at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Allocates a uniquely named file inside the pool. The file stays
    /// on disk until the next cleanup sweep.
    pub fn create_file(&self, prefix: &str, suffix: &str) -> Result<PathBuf, OcrError> {
        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(self.dir.path())
            .map_err(|e| OcrError::Preprocessing(format!("failed to create temp file: {e}")))?;
        let (_, path) = file
            .keep()
            .map_err(|e| OcrError::Preprocessing(format!("failed to persist temp file: {e}")))?;
        Ok(path)
    }

    /// Creates (or reuses) a named subdirectory of the pool.
    pub fn create_dir(&self, name: &str) -> Result<PathBuf, OcrError> {
        let path = self.dir.path().join(name);
        fs::create_dir_all(&path).map_err(|e| {
            OcrError::Initialization(format!("failed to create {}: {e}", path.display()))
        })?;
        Ok(path)
    }

    /// Deletes everything inside the pool, files before their parent
    /// directories. The pool directory itself is preserved for further
    /// use. Safe to call repeatedly and safe if entries are already
    /// gone.
    pub fn cleanup(&self) {
        tracing::debug!("sweeping temp pool at {}", self.dir.path().display());
        remove_contents(self.dir.path());
    }
}

fn remove_contents(dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let result = if is_dir {
            remove_contents(&path);
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(e) = result {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to delete {}: {e}", path.display());
            }
        }
    }
}
