use chrono::Utc;

use crate::io::persistence::{PersistError, TaskPersistence};
use crate::model::alert::Alert;
use crate::model::task::{Task, TaskId, next_task_id};

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task cannot be empty")]
    EmptyInput,
    #[error("failed to load tasks: {0}")]
    LoadFailure(#[source] PersistError),
    #[error("failed to save tasks: {0}")]
    SaveFailure(#[source] PersistError),
}

impl StoreError {
    /// The alert shown to the user for this error
    pub fn alert(&self) -> Alert {
        match self {
            StoreError::EmptyInput => Alert::new("Oops!", "Task cannot be empty"),
            StoreError::LoadFailure(e) => {
                Alert::new("Error", "Failed to load tasks").with_detail(e.to_string())
            }
            StoreError::SaveFailure(e) => {
                Alert::new("Error", "Failed to save tasks").with_detail(e.to_string())
            }
        }
    }
}

/// The task list and its write-through persistence.
///
/// Every mutation builds the next collection, saves it, and only then makes it
/// current. A failed save leaves the in-memory list as it was, so what is
/// shown always matches what was last persisted. Mutations take `&mut self`,
/// which keeps writes from one session strictly ordered.
pub struct TaskStore {
    persistence: TaskPersistence,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// A store with an empty list; nothing is read until [`TaskStore::load`].
    pub fn new(persistence: TaskPersistence) -> Self {
        TaskStore {
            persistence,
            tasks: Vec::new(),
        }
    }

    /// Build a store and run the initial load. On failure the store starts
    /// empty and the error is handed back for the caller to report.
    pub fn open(persistence: TaskPersistence) -> (Self, Option<StoreError>) {
        let mut store = TaskStore::new(persistence);
        let err = store.load().err();
        (store, err)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn persistence(&self) -> &TaskPersistence {
        &self.persistence
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replace the in-memory list with what storage holds.
    /// A failed read leaves the list empty.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.persistence.load() {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => {
                self.tasks.clear();
                Err(StoreError::LoadFailure(e))
            }
        }
    }

    /// Re-read storage after an outside change. Returns whether the list changed.
    pub fn reload(&mut self) -> Result<bool, StoreError> {
        let before = self.tasks.clone();
        self.load()?;
        Ok(self.tasks != before)
    }

    /// Append a task titled `title` (trimmed). Returns the new task's id.
    pub fn add(&mut self, title: &str) -> Result<TaskId, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyInput);
        }

        let id = next_task_id(&self.tasks, Utc::now().timestamp_millis());
        let mut next = self.tasks.clone();
        next.push(Task::new(id, title));
        self.commit(next)?;
        Ok(id)
    }

    /// Flip `completed` on the task with `id`. Returns false (and writes
    /// nothing) if there is no such task.
    pub fn toggle(&mut self, id: TaskId) -> Result<bool, StoreError> {
        if self.find(id).is_none() {
            return Ok(false);
        }
        let next = self
            .tasks
            .iter()
            .map(|t| if t.id == id { t.toggled() } else { t.clone() })
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Remove the task with `id`. Returns false (and writes nothing) if there
    /// is no such task.
    pub fn delete(&mut self, id: TaskId) -> Result<bool, StoreError> {
        if self.find(id).is_none() {
            return Ok(false);
        }
        let next = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.commit(next)?;
        Ok(true)
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<(), StoreError> {
        self.persistence
            .save(&next)
            .map_err(StoreError::SaveFailure)?;
        self.tasks = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::persistence::TASKS_KEY;
    use crate::io::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn empty_store() -> TaskStore {
        TaskStore::new(TaskPersistence::new(MemoryStore::new()))
    }

    fn seeded(json: &str) -> MemoryStore {
        MemoryStore::new().with_item(TASKS_KEY, json)
    }

    fn titles(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    fn raw(store: &TaskStore) -> Option<String> {
        store.persistence().storage().get_item(TASKS_KEY).unwrap()
    }

    #[test]
    fn add_appends_pending_task_and_persists() {
        let mut store = empty_store();
        let id = store.add("Buy milk").unwrap();

        assert_eq!(store.tasks(), &[Task::new(id, "Buy milk")]);
        assert_eq!(store.persistence().load().unwrap(), store.tasks());
    }

    #[test]
    fn add_trims_title() {
        let mut store = empty_store();
        store.add("  Walk dog \n").unwrap();
        assert_eq!(titles(&store), vec!["Walk dog"]);
    }

    #[test]
    fn add_blank_is_empty_input() {
        let mut store = empty_store();
        store.add("keep").unwrap();
        for blank in ["", "   ", "\t\n"] {
            assert!(matches!(store.add(blank), Err(StoreError::EmptyInput)));
        }
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn add_blank_never_writes() {
        let mut store = TaskStore::new(TaskPersistence::new(MemoryStore::new().failing_writes()));
        // EmptyInput wins over the storage failure because no save is attempted
        assert!(matches!(store.add(" "), Err(StoreError::EmptyInput)));
        assert!(raw(&store).is_none());
    }

    #[test]
    fn ids_are_unique_and_order_is_insertion_order() {
        let mut store = empty_store();
        let a = store.add("A").unwrap();
        let b = store.add("B").unwrap();
        let c = store.add("C").unwrap();
        assert!(a < b && b < c);
        assert_eq!(titles(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut store = empty_store();
        let id = store.add("Buy milk").unwrap();

        assert!(store.toggle(id).unwrap());
        assert!(store.find(id).unwrap().completed);
        assert!(store.persistence().load().unwrap()[0].completed);

        assert!(store.toggle(id).unwrap());
        assert!(!store.find(id).unwrap().completed);
    }

    #[test]
    fn toggle_unknown_id_leaves_storage_identical() {
        let mut store = empty_store();
        store.add("A").unwrap();
        let before = raw(&store);
        let tasks_before = store.tasks().to_vec();

        assert!(!store.toggle(TaskId(-1)).unwrap());
        assert_eq!(raw(&store), before);
        assert_eq!(store.tasks(), tasks_before.as_slice());
    }

    #[test]
    fn delete_removes_only_the_match() {
        let mut store = empty_store();
        let a = store.add("A").unwrap();
        store.add("B").unwrap();

        assert!(store.delete(a).unwrap());
        assert_eq!(titles(&store), vec!["B"]);
        assert!(store.find(a).is_none());
        assert!(!raw(&store).unwrap().contains("\"A\""));
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = empty_store();
        store.add("A").unwrap();
        let before = raw(&store);
        assert!(!store.delete(TaskId(42)).unwrap());
        assert_eq!(raw(&store), before);
        assert_eq!(titles(&store), vec!["A"]);
    }

    #[test]
    fn save_failure_keeps_previous_state() {
        let store_json = r#"[{"id":1,"title":"A","completed":false}]"#;
        let (mut store, err) =
            TaskStore::open(TaskPersistence::new(seeded(store_json).failing_writes()));
        assert!(err.is_none());
        let before = store.tasks().to_vec();

        assert!(matches!(store.add("B"), Err(StoreError::SaveFailure(_))));
        assert!(matches!(
            store.toggle(TaskId(1)),
            Err(StoreError::SaveFailure(_))
        ));
        assert!(matches!(
            store.delete(TaskId(1)),
            Err(StoreError::SaveFailure(_))
        ));
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn open_loads_existing_tasks() {
        let json = r#"[{"id":5,"title":"x","completed":true},{"id":6,"title":"y"}]"#;
        let (store, err) = TaskStore::open(TaskPersistence::new(seeded(json)));
        assert!(err.is_none());
        assert_eq!(titles(&store), vec!["x", "y"]);
        assert!(store.tasks()[0].completed);
        assert!(!store.tasks()[1].completed);
    }

    #[test]
    fn open_with_corrupt_data_starts_empty() {
        let (store, err) = TaskStore::open(TaskPersistence::new(seeded("{{nope")));
        assert!(matches!(err, Some(StoreError::LoadFailure(_))));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn open_with_unreadable_storage_starts_empty() {
        let (store, err) = TaskStore::open(TaskPersistence::new(MemoryStore::new().failing_reads()));
        assert!(matches!(err, Some(StoreError::LoadFailure(_))));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn new_id_stays_above_loaded_ids() {
        // Stored ids from the far future still yield a unique new id
        let json = r#"[{"id":9000000000000000,"title":"future"}]"#;
        let (mut store, _) = TaskStore::open(TaskPersistence::new(seeded(json)));
        let id = store.add("now").unwrap();
        assert_eq!(id, TaskId(9000000000000001));
    }

    #[test]
    fn add_after_max_stored_id_picks_free_id() {
        let json = r#"[{"id":9223372036854775807,"title":"max"}]"#;
        let (mut store, err) = TaskStore::open(TaskPersistence::new(seeded(json)));
        assert!(err.is_none());
        let id = store.add("next").unwrap();
        assert_ne!(id, TaskId(i64::MAX));
        assert!(id.0 > 0);
        assert_eq!(store.tasks().len(), 2);
        assert_eq!(store.persistence().load().unwrap(), store.tasks());
    }

    #[test]
    fn reload_reports_changes() {
        let mut store = empty_store();
        assert!(!store.reload().unwrap());
        store.add("A").unwrap();
        // Storage already matches memory
        assert!(!store.reload().unwrap());
    }

    #[test]
    fn alerts_match_error_kind() {
        assert_eq!(
            StoreError::EmptyInput.alert(),
            Alert::new("Oops!", "Task cannot be empty")
        );

        let mut store = TaskStore::new(TaskPersistence::new(MemoryStore::new().failing_writes()));
        let save = store.add("x").unwrap_err().alert();
        assert_eq!((save.title, save.message), ("Error", "Failed to save tasks"));
        assert!(save.detail.is_some());

        let (_, err) = TaskStore::open(TaskPersistence::new(MemoryStore::new().failing_reads()));
        let load = err.unwrap().alert();
        assert_eq!((load.title, load.message), ("Error", "Failed to load tasks"));
    }

    #[test]
    fn scenario_add_add_delete_first() {
        let mut store = empty_store();
        let a = store.add("A").unwrap();
        let b = store.add("B").unwrap();
        store.delete(a).unwrap();

        assert_eq!(store.tasks(), &[Task::new(b, "B")]);
        assert_eq!(store.persistence().load().unwrap(), store.tasks());
    }
}
