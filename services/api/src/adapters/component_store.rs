//! services/api/src/adapters/component_store.rs
//!
//! Filesystem adapter implementing the `ComponentStore` port.
//!
//! Layout under the website root:
//! - `components/user/<user_id>.tsx` holds the current component.
//! - `backups/<user_id>/<user_id>_<YYYYMMDD_HHMMSS>.tsx` holds one snapshot per update.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use component_generator_core::{ComponentStore, PortError, PortResult, SavedComponent, UserId};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{info, warn};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BACKUP_TIMESTAMP_LEN: usize = 15;
const MAX_BACKUP_NAME_ATTEMPTS: u32 = 1000;

fn io_error(action: &str, path: &Path, e: std::io::Error) -> PortError {
    PortError::Unexpected(format!("Failed to {} {}: {}", action, path.display(), e))
}

#[derive(Clone, Debug)]
pub struct FsComponentStore {
    base_path: PathBuf,
    backup_retention: Option<usize>,
}

impl FsComponentStore {
    pub fn new(base_path: impl Into<PathBuf>, backup_retention: Option<usize>) -> Self {
        Self {
            base_path: base_path.into(),
            backup_retention,
        }
    }

    pub fn current_path(&self, user_id: &UserId) -> PathBuf {
        self.base_path
            .join("components")
            .join("user")
            .join(format!("{}.tsx", user_id))
    }

    pub fn backup_folder(&self, user_id: &UserId) -> PathBuf {
        self.base_path.join("backups").join(user_id.as_str())
    }

    /// Writes a new backup named after `stamp`, never replacing an existing file.
    ///
    /// Saves within the same second get a `_1`, `_2`, ... suffix.
    async fn write_backup(
        &self,
        folder: &Path,
        user_id: &UserId,
        code: &str,
        stamp: &str,
    ) -> PortResult<PathBuf> {
        for attempt in 0..MAX_BACKUP_NAME_ATTEMPTS {
            let file_name = if attempt == 0 {
                format!("{}_{}.tsx", user_id, stamp)
            } else {
                format!("{}_{}_{}.tsx", user_id, stamp, attempt)
            };
            let path = folder.join(file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(io_error("create backup", &path, e)),
            };

            file.write_all(code.as_bytes())
                .await
                .map_err(|e| io_error("write backup", &path, e))?;
            file.flush()
                .await
                .map_err(|e| io_error("write backup", &path, e))?;
            return Ok(path);
        }

        Err(PortError::Unexpected(format!(
            "Too many backups for user {} at {}",
            user_id, stamp
        )))
    }

    /// Deletes the oldest backups so that at most `keep` remain.
    async fn prune_backups(&self, folder: &Path, user_id: &UserId, keep: usize) -> PortResult<()> {
        let prefix = format!("{}_", user_id);
        let mut backups = Vec::new();

        let mut entries = fs::read_dir(folder)
            .await
            .map_err(|e| io_error("list backups in", folder, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error("list backups in", folder, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(key) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".tsx"))
                .and_then(backup_sort_key)
            {
                backups.push((key, entry.path()));
            }
        }

        if backups.len() <= keep {
            return Ok(());
        }

        backups.sort();
        let excess = backups.len() - keep;
        for (_, path) in backups.into_iter().take(excess) {
            fs::remove_file(&path)
                .await
                .map_err(|e| io_error("remove backup", &path, e))?;
            info!(user_id = %user_id, path = %path.display(), "Pruned old backup");
        }
        Ok(())
    }
}

/// Orders backups by timestamp, then by collision suffix.
fn backup_sort_key(rest: &str) -> Option<(String, u32)> {
    let stamp = rest.get(..BACKUP_TIMESTAMP_LEN)?;
    let suffix = match &rest[BACKUP_TIMESTAMP_LEN..] {
        "" => 0,
        tail => tail.strip_prefix('_')?.parse().ok()?,
    };
    Some((stamp.to_string(), suffix))
}

#[async_trait]
impl ComponentStore for FsComponentStore {
    async fn read_current(&self, user_id: &UserId) -> PortResult<Option<String>> {
        let path = self.current_path(user_id);
        match fs::read_to_string(&path).await {
            Ok(code) => {
                info!(user_id = %user_id, path = %path.display(), "Read existing component");
                Ok(Some(code))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    async fn save(&self, user_id: &UserId, code: &str) -> PortResult<SavedComponent> {
        let current_path = self.current_path(user_id);
        let backup_folder = self.backup_folder(user_id);

        fs::create_dir_all(&backup_folder)
            .await
            .map_err(|e| io_error("create", &backup_folder, e))?;
        if let Some(parent) = current_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("create", parent, e))?;
        }

        fs::write(&current_path, code)
            .await
            .map_err(|e| io_error("write", &current_path, e))?;

        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = self
            .write_backup(&backup_folder, user_id, code, &stamp)
            .await?;

        if let Some(keep) = self.backup_retention {
            // The update itself succeeded; a failed prune only leaves extra backups behind.
            if let Err(e) = self.prune_backups(&backup_folder, user_id, keep).await {
                warn!(user_id = %user_id, "Failed to prune backups: {}", e);
            }
        }

        Ok(SavedComponent {
            current_path,
            backup_path,
        })
    }
}
