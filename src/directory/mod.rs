/*!
 * Directory Layer
 * Sequential directory and working-directory operations over std::fs
 *
 * No concurrency guarantees beyond those of the underlying OS calls. The
 * working directory is process-wide state.
 */

use crate::core::errors::{DirectoryError, DirectoryResult};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An open directory stream
///
/// `.` and `..` are not reported. The stream closes on drop or on
/// [`Directory::close`]; a closed stream yields no further entries.
#[derive(Debug)]
pub struct Directory {
    path: PathBuf,
    entries: Option<fs::ReadDir>,
}

impl Directory {
    pub fn open<P: AsRef<Path>>(path: P) -> DirectoryResult<Self> {
        let path = path.as_ref();
        let entries = fs::read_dir(path).map_err(|e| DirectoryError::from_io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            entries: Some(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the next entry, `None` once the stream is exhausted or closed
    ///
    /// Names are returned as the OS reports them, so they can be joined
    /// back onto [`Directory::path`] even when they are not valid UTF-8.
    pub fn next_entry(&mut self) -> DirectoryResult<Option<OsString>> {
        let Some(entries) = self.entries.as_mut() else {
            return Ok(None);
        };

        match entries.next() {
            Some(Ok(entry)) => Ok(Some(entry.file_name())),
            Some(Err(e)) => Err(DirectoryError::from_io(&self.path, e)),
            None => Ok(None),
        }
    }

    pub fn close(&mut self) {
        self.entries = None;
    }

    pub fn is_closed(&self) -> bool {
        self.entries.is_none()
    }
}

/// Create a single directory; fails if it already exists
pub fn create_dir<P: AsRef<Path>>(path: P) -> DirectoryResult<()> {
    let path = path.as_ref();
    fs::create_dir(path).map_err(|e| DirectoryError::from_io(path, e))?;
    debug!(path = %path.display(), "Created directory");
    Ok(())
}

/// Create `path` and every missing parent
///
/// Backslashes are treated as separators. Components that already exist
/// are accepted. Paths that are not valid UTF-8 are used unchanged.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> DirectoryResult<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(DirectoryError::InvalidPath(String::new()));
    }

    let normalized = match path.to_str() {
        Some(raw) if raw.contains('\\') => PathBuf::from(raw.replace('\\', "/")),
        _ => path.to_path_buf(),
    };
    fs::create_dir_all(&normalized).map_err(|e| DirectoryError::from_io(&normalized, e))?;
    debug!(path = %normalized.display(), "Ensured directory");
    Ok(())
}

/// Remove an empty directory
pub fn remove_dir<P: AsRef<Path>>(path: P) -> DirectoryResult<()> {
    let path = path.as_ref();
    fs::remove_dir(path).map_err(|e| DirectoryError::from_io(path, e))?;
    debug!(path = %path.display(), "Removed directory");
    Ok(())
}

pub fn current_dir() -> DirectoryResult<PathBuf> {
    env::current_dir().map_err(|e| DirectoryError::from_io(Path::new("."), e))
}

pub fn change_dir<P: AsRef<Path>>(path: P) -> DirectoryResult<()> {
    let path = path.as_ref();
    env::set_current_dir(path).map_err(|e| DirectoryError::from_io(path, e))?;
    debug!(path = %path.display(), "Changed working directory");
    Ok(())
}
