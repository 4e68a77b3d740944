//! # Filesystem helpers
//!
//! Copy with timestamp preservation, shared by `copy-bg` and `organize`.

use crate::error::{IoContext, Result};
use std::fs::{self, File};
use std::path::Path;

/// Copy `src` to `dest`, keeping permissions and the modification time.
pub fn copy_preserving_mtime(src: &Path, dest: &Path) -> Result<u64> {
    let bytes = fs::copy(src, dest)
        .io_context(|| format!("copy {} -> {}", src.display(), dest.display()))?;

    let modified = fs::metadata(src).and_then(|meta| meta.modified());
    match modified {
        Ok(modified) => {
            let result = File::options()
                .write(true)
                .open(dest)
                .and_then(|file| file.set_modified(modified));
            if let Err(e) = result {
                tracing::debug!(path = %dest.display(), error = %e, "could not preserve mtime");
            }
        }
        Err(e) => tracing::debug!(path = %src.display(), error = %e, "source has no mtime"),
    }

    tracing::debug!(from = %src.display(), to = %dest.display(), bytes, "copied");
    Ok(bytes)
}

/// Create `dir` and its parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).io_context(|| format!("create directory {}", dir.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn copy_keeps_contents_and_mtime() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("a.png");
        let dest = temp.path().join("b.png");
        fs::write(&src, b"pixels").unwrap();

        let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let bytes = copy_preserving_mtime(&src, &dest).unwrap();
        assert_eq!(bytes, 6);
        assert_eq!(fs::read(&dest).unwrap(), b"pixels");
        assert_eq!(fs::metadata(&dest).unwrap().modified().unwrap(), past);
    }

    #[test]
    fn copy_of_missing_file_is_io_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = copy_preserving_mtime(&temp.path().join("none"), &temp.path().join("out"));
        assert!(matches!(err, Err(crate::error::AppError::Io { .. })));
    }
}
