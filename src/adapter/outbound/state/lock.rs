//! Advisory lock file guarding one cycle at a time.
//!
//! The lock is a file created with `create_new`; it is removed when the
//! guard drops. A lock left behind by a crashed run is reclaimed once it is
//! older than the configured staleness window.
//!
//! Reclaiming renames the stale file aside before creating a new one, so of
//! two runs racing to reclaim the same lock only the one whose rename
//! succeeds goes on; the other reports the lock as held. If the file moved
//! aside turns out to be fresh (another run reclaimed it in between), it is
//! linked back into place and the lock is reported as held.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::record::format_timestamp;
use crate::error::LockError;

/// Held lock; released on drop.
#[derive(Debug)]
pub struct CycleLock {
    path: PathBuf,
}

impl CycleLock {
    /// Acquire the lock at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Held`] if a fresh lock exists, or
    /// [`LockError::Io`] if the file cannot be created or inspected.
    pub fn acquire(path: &Path, stale_after: Duration) -> Result<Self, LockError> {
        match Self::create(path) {
            Ok(lock) => Ok(lock),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !Self::is_stale(path, stale_after)? {
                    return Err(LockError::Held {
                        path: path.display().to_string(),
                    });
                }
                Self::reclaim(path, stale_after)
            }
            Err(e) => Err(LockError::Io(e)),
        }
    }

    fn reclaim(path: &Path, stale_after: Duration) -> Result<Self, LockError> {
        let held = || LockError::Held {
            path: path.display().to_string(),
        };

        let aside = aside_path(path);
        match fs::rename(path, &aside) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(held()),
            Err(e) => return Err(LockError::Io(e)),
        }

        if !Self::is_stale(&aside, stale_after)? {
            if let Err(e) = fs::hard_link(&aside, path) {
                debug!(path = %path.display(), error = %e, "Lock not restored");
            }
            let _ = fs::remove_file(&aside);
            return Err(held());
        }

        warn!(path = %path.display(), "Reclaimed stale lock");
        let _ = fs::remove_file(&aside);
        Self::create(path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => held(),
            _ => LockError::Io(e),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        writeln!(file, "{} {}", std::process::id(), format_timestamp(Utc::now()))?;
        debug!(path = %path.display(), "Acquired cycle lock");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn is_stale(path: &Path, stale_after: Duration) -> Result<bool, LockError> {
        let modified = match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(LockError::Io(e)),
        };
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        Ok(age >= stale_after)
    }
}

fn aside_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".stale.{}", std::process::id()));
    PathBuf::from(name)
}

impl Drop for CycleLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to release cycle lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRESH: Duration = Duration::from_secs(600);

    #[test]
    fn second_acquire_is_refused_while_held() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json.lock");

        let _held = CycleLock::acquire(&path, FRESH).unwrap();
        assert!(matches!(
            CycleLock::acquire(&path, FRESH),
            Err(LockError::Held { .. })
        ));
    }

    #[test]
    fn drop_releases_the_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json.lock");

        drop(CycleLock::acquire(&path, FRESH).unwrap());
        assert!(!path.exists());
        assert!(CycleLock::acquire(&path, FRESH).is_ok());
    }

    #[test]
    fn stale_lock_is_reclaimed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json.lock");
        fs::write(&path, "12345 2020-01-01T00:00:00Z\n").unwrap();

        let lock = CycleLock::acquire(&path, Duration::ZERO).unwrap();
        assert_eq!(lock.path(), path.as_path());
        assert!(!aside_path(&path).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn reclaim_restores_a_lock_that_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json.lock");
        fs::write(&path, "12345 just taken\n").unwrap();

        let result = CycleLock::reclaim(&path, FRESH);

        assert!(matches!(result, Err(LockError::Held { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "12345 just taken\n");
        assert!(!aside_path(&path).exists());
    }

    #[test]
    fn reclaim_of_vanished_lock_reports_held() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json.lock");

        let result = CycleLock::reclaim(&path, Duration::ZERO);

        assert!(matches!(result, Err(LockError::Held { .. })));
        assert!(!path.exists());
    }
}
