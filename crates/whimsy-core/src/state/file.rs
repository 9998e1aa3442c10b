// # File State Store
//
// File-based implementation of StateStore with crash recovery.
//
// ## Purpose
//
// Keeps generated names stable across runs. Every write goes straight to disk.
// The in-memory map only changes after the new file is in place, so a failed
// write leaves both the file and the map at their previous contents.
//
// ## Crash Recovery
//
// - Atomic writes: write to `<path>.tmp`, then rename over `<path>`
// - Backup: the previous file is copied to `<path>.backup` before each rename
// - Recovery: if the main file does not parse, the backup is loaded and
//   copied back; if that fails too, the store starts empty
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "records": {
//     "whimsy_plant.server": {
//       "entity": {
//         "id": "fern",
//         "name": "fern",
//         "spec": { "kind": "single", "category": "plant", "triggers": {} }
//       },
//       "created_at": "2025-01-09T12:00:00Z",
//       "last_updated": "2025-01-09T12:00:00Z"
//     }
//   }
// }
// ```

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, error, info, trace, warn};

use crate::Error;
use crate::model::GeneratedEntity;
use crate::traits::state_store::{StateRecord, StateStore, StateStoreFactory};

/// State file format version
const STATE_FILE_VERSION: &str = "1.0";

/// File-based state store with crash recovery
///
/// # Example
///
/// ```rust,no_run
/// use whimsy_core::state::FileStateStore;
/// use whimsy_core::traits::StateStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStateStore::new("/var/lib/whimsy/state.json").await?;
///
///     for address in store.list_records().await? {
///         println!("{address}");
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    records: Arc<RwLock<BTreeMap<String, StateRecord>>>,
}

/// Serializable state file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StateFileFormat {
    version: String,
    records: BTreeMap<String, StateRecord>,
}

/// Why a state file could not be loaded
enum LoadFailure {
    /// The file was read but is not a valid state file
    Corrupt(Error),
    /// The file could not be read
    Unreadable(Error),
}

impl FileStateStore {
    /// Create or load a file state store
    ///
    /// This will:
    /// 1. Create parent directories if needed
    /// 2. Load the existing state file, if any
    /// 3. Fall back to the backup if the state file is corrupted
    /// 4. Start empty if both are unusable
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::config(format!("Cannot create {}: {}", parent.display(), e)))?;
        }

        let records = Self::load_or_recover(&path).await?;

        Ok(Self {
            path,
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Path of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state file, falling back to the backup when it is corrupt
    async fn load_or_recover(path: &Path) -> Result<BTreeMap<String, StateRecord>, Error> {
        let corruption = match read_records(path).await {
            Ok(records) => {
                debug!("Loaded {} records from {}", records.len(), path.display());
                return Ok(records);
            }
            Err(LoadFailure::Unreadable(e)) => return Err(e),
            Err(LoadFailure::Corrupt(e)) => e,
        };

        warn!("{}. Trying the backup.", corruption);

        let backup = sibling(path, "backup");
        if !backup.exists() {
            warn!("No backup at {}. Starting with empty state.", backup.display());
            return Ok(BTreeMap::new());
        }

        match read_records(&backup).await {
            Ok(records) => {
                info!("Recovered {} records from {}", records.len(), backup.display());
                if let Err(e) = fs::copy(&backup, path).await {
                    error!("{}", io_failure("restore", path, e));
                }
                Ok(records)
            }
            Err(LoadFailure::Corrupt(e) | LoadFailure::Unreadable(e)) => {
                error!("Backup unusable too ({}). Starting with empty state.", e);
                Ok(BTreeMap::new())
            }
        }
    }

    /// Serialize `records` and replace the state file
    ///
    /// Callers hold the write lock, so concurrent writers cannot interleave.
    async fn write_state(&self, records: &BTreeMap<String, StateRecord>) -> Result<(), Error> {
        let snapshot = StateFileFormat {
            version: STATE_FILE_VERSION.to_string(),
            records: records.clone(),
        };
        let json = serde_json::to_vec_pretty(&snapshot)?;

        let temp_path = sibling(&self.path, "tmp");
        write_synced(&temp_path, &json)
            .await
            .map_err(|e| io_failure("write", &temp_path, e))?;

        if self.path.exists() {
            let backup = sibling(&self.path, "backup");
            if let Err(e) = fs::copy(&self.path, &backup).await {
                warn!("Could not refresh backup {}: {}", backup.display(), e);
            }
        }

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| io_failure("replace", &self.path, e))?;

        trace!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Read a state file; a missing file is an empty state
async fn read_records(path: &Path) -> Result<BTreeMap<String, StateRecord>, LoadFailure> {
    if !path.exists() {
        debug!("No state file at {}", path.display());
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| LoadFailure::Unreadable(io_failure("read", path, e)))?;

    let file: StateFileFormat = serde_json::from_str(&content).map_err(|e| {
        LoadFailure::Corrupt(Error::state_store(format!(
            "{} is not a valid state file: {}",
            path.display(),
            e
        )))
    })?;

    if file.version != STATE_FILE_VERSION {
        warn!(
            "{} has format version {}, expected {}. Loading anyway.",
            path.display(),
            file.version,
            STATE_FILE_VERSION
        );
    }

    Ok(file.records)
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

fn io_failure(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::state_store(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// `path` with its extension replaced
fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut sibling = path.to_path_buf();
    sibling.set_extension(extension);
    sibling
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get_entity(&self, address: &str) -> Result<Option<GeneratedEntity>, Error> {
        let guard = self.records.read().await;
        Ok(guard.get(address).map(|r| r.entity.clone()))
    }

    async fn get_record(&self, address: &str) -> Result<Option<StateRecord>, Error> {
        let guard = self.records.read().await;
        Ok(guard.get(address).cloned())
    }

    async fn set_entity(&self, address: &str, entity: &GeneratedEntity) -> Result<(), Error> {
        let mut guard = self.records.write().await;

        let mut next = guard.clone();
        let existing = next.remove(address);
        next.insert(address.to_string(), StateRecord::upsert(existing, entity.clone()));

        self.write_state(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn delete_record(&self, address: &str) -> Result<(), Error> {
        let mut guard = self.records.write().await;
        if !guard.contains_key(address) {
            return Ok(());
        }

        let mut next = guard.clone();
        next.remove(address);

        self.write_state(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<String>, Error> {
        let guard = self.records.read().await;
        Ok(guard.keys().cloned().collect())
    }

    async fn flush(&self) -> Result<(), Error> {
        // Writes are never buffered
        Ok(())
    }
}

/// Factory for `{"type": "file", "path": ...}` state stores
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStateStoreFactory;

#[async_trait]
impl StateStoreFactory for FileStateStoreFactory {
    async fn create(&self, config: &serde_json::Value) -> Result<Box<dyn StateStore>, Error> {
        let path = config
            .get("path")
            .and_then(serde_json::Value::as_str)
            .filter(|path| !path.is_empty())
            .ok_or_else(|| Error::config("File state store requires a non-empty 'path'"))?;

        Ok(Box::new(FileStateStore::new(path).await?))
    }
}
