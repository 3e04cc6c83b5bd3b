use std::path::Path;

use save_migrate_shared::{LegacyRoom, LegacySave, LegacyUser};
use tracing::info;

use crate::errors::LegacyStoreError;

/// Read-only view of a legacy save.
///
/// The file is read in one go when the store is opened; the handle is closed
/// before any destination write happens.
#[derive(Debug, Clone)]
pub struct LegacyStore {
    save: LegacySave,
}

impl LegacyStore {
    /// Loads the legacy save at `path`.
    pub async fn open(path: &Path) -> Result<Self, LegacyStoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| LegacyStoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let save: LegacySave =
            serde_json::from_slice(&bytes).map_err(|source| LegacyStoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            users = save.user_map.len(),
            rooms = save.rooms.len(),
            "Opened legacy store"
        );
        Ok(Self { save })
    }

    pub fn from_save(save: LegacySave) -> Self {
        Self { save }
    }

    /// Users in stored order.
    pub fn users(&self) -> impl Iterator<Item = &LegacyUser> {
        self.save.user_map.values()
    }

    /// Rooms in stored order.
    pub fn rooms(&self) -> impl Iterator<Item = &LegacyRoom> {
        self.save.rooms.values()
    }
}
