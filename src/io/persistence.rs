use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::storage::{KeyValueStore, StorageError};
use crate::model::Task;

/// Storage key for the task collection
pub const TASKS_KEY: &str = "tasks";

/// Error type for loading or saving the task collection
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not decode stored tasks: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("could not encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Reads and writes the whole task collection under [`TASKS_KEY`].
pub struct TaskPersistence {
    storage: Box<dyn KeyValueStore>,
}

impl TaskPersistence {
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        TaskPersistence {
            storage: Box::new(storage),
        }
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Load the stored collection. A missing key is an empty collection.
    pub fn load(&self) -> Result<Vec<Task>, PersistError> {
        let raw = match self.storage.get_item(TASKS_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        serde_json::from_str(&raw).map_err(|e| {
            if let Some(dir) = self.storage.recovery_dir() {
                recovery::log_recovery(
                    dir,
                    RecoveryEntry::new(
                        RecoveryCategory::Parser,
                        format!("{} unreadable", TASKS_KEY),
                    )
                    .field("Error", e.to_string())
                    .body(raw.as_str()),
                );
            }
            PersistError::Decode(e)
        })
    }

    /// Replace the stored collection with `tasks`.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), PersistError> {
        let encoded = serde_json::to_string(tasks).map_err(PersistError::Encode)?;
        self.storage.set_item(TASKS_KEY, &encoded)?;
        Ok(())
    }
}
