//! Notification record location.

use std::path::PathBuf;

use serde::Deserialize;

/// Where the notification record and its lock live.
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    /// Record file (env: `FXWATCH_STATE_FILE`).
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Age after which a leftover lock file is reclaimed.
    #[serde(default = "default_lock_stale_secs")]
    pub lock_stale_secs: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("last_notification.json")
}

const fn default_lock_stale_secs() -> u64 {
    600
}

impl StateConfig {
    /// Lock file path: the record path with `.lock` appended.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            lock_stale_secs: default_lock_stale_secs(),
        }
    }
}
