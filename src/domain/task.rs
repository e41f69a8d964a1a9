use crate::persistence::{Store, TASKS_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    /// Trimmed, never empty
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            done: false,
            created_at: Utc::now(),
        }
    }
}

/// Ordered task checklist, newest first, mirrored to the store on every change
pub struct TaskList {
    tasks: Vec<Task>,
    store: Store,
}

impl TaskList {
    /// Restore the list from the store (empty if absent or unreadable)
    pub fn load(store: Store) -> Self {
        let tasks = store.load(TASKS_KEY, Vec::new());
        Self { tasks, store }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|t| t.done)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// Prepend a new task. Blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let task = Task::new(text.to_string());
        let id = task.id;
        self.tasks.insert(0, task);
        self.persist();
        Some(id)
    }

    /// Flip the done flag of the task with `id`, if present
    pub fn toggle(&mut self, id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.done = !task.done;
        }
        self.persist();
    }

    /// Delete the task with `id`, if present
    pub fn remove(&mut self, id: Uuid) {
        self.tasks.retain(|t| t.id != id);
        self.persist();
    }

    /// Drop every finished task
    pub fn clear_completed(&mut self) {
        self.tasks.retain(|t| !t.done);
        self.persist();
    }

    fn persist(&self) {
        self.store.save(TASKS_KEY, &self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn empty_list() -> (TaskList, Store) {
        let store = Store::in_memory();
        (TaskList::load(store.clone()), store)
    }

    #[test]
    fn test_add_prepends_trimmed_task() {
        let (mut list, _) = empty_list();
        list.add("first");
        let id = list.add("  second  ").unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].id, id);
        assert_eq!(list.tasks()[0].text, "second");
        assert!(!list.tasks()[0].done);
        assert_eq!(list.tasks()[1].text, "first");
    }

    #[test]
    fn test_add_blank_is_noop() {
        let (mut list, store) = empty_list();
        assert!(list.add("").is_none());
        assert!(list.add("   ").is_none());
        assert!(list.add("\t\n").is_none());
        assert!(list.is_empty());
        // Nothing was written either
        assert!(store.raw(TASKS_KEY).is_none());
    }

    #[test]
    fn test_toggle() {
        let (mut list, _) = empty_list();
        let id = list.add("write report").unwrap();

        list.toggle(id);
        assert!(list.tasks()[0].done);
        list.toggle(id);
        assert!(!list.tasks()[0].done);
    }

    #[test]
    fn test_toggle_and_remove_unknown_id_are_noops() {
        let (mut list, _) = empty_list();
        list.add("a");
        let before = list.tasks().to_vec();

        list.toggle(Uuid::new_v4());
        list.remove(Uuid::new_v4());

        assert_eq!(list.tasks(), before.as_slice());
    }

    #[test]
    fn test_remove() {
        let (mut list, _) = empty_list();
        let a = list.add("a").unwrap();
        let b = list.add("b").unwrap();

        list.remove(a);
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].id, b);
    }

    #[test]
    fn test_clear_completed() {
        let (mut list, _) = empty_list();
        let a = list.add("a").unwrap();
        list.add("b");
        let c = list.add("c").unwrap();
        list.toggle(a);
        list.toggle(c);
        assert!(list.has_completed());
        assert_eq!(list.completed_count(), 2);

        list.clear_completed();

        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].text, "b");
        assert!(!list.has_completed());
    }

    #[test]
    fn test_ids_stay_unique_across_operations() {
        let (mut list, _) = empty_list();
        for i in 0..20 {
            let id = list.add(&format!("task {}", i)).unwrap();
            if i % 3 == 0 {
                list.toggle(id);
            }
            if i % 5 == 0 {
                list.remove(id);
            }
        }
        list.clear_completed();
        for i in 0..5 {
            list.add(&format!("again {}", i));
        }

        let ids: HashSet<Uuid> = list.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), list.len());
        assert!(list.tasks().iter().filter(|t| t.text.starts_with("task")).all(|t| !t.done));
    }

    #[test]
    fn test_every_mutation_persists_whole_list() {
        let (mut list, store) = empty_list();
        let a = list.add("a").unwrap();
        list.add("b");
        list.toggle(a);

        let reloaded = TaskList::load(store.clone());
        assert_eq!(reloaded.tasks(), list.tasks());

        list.clear_completed();
        let reloaded = TaskList::load(store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.tasks()[0].text, "b");
    }

    #[test]
    fn test_serialized_shape_uses_camel_case() {
        let (mut list, store) = empty_list();
        list.add("shape");

        let raw = store.raw(TASKS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value[0];
        assert_eq!(record["text"], "shape");
        assert_eq!(record["done"], false);
        assert!(record["createdAt"].is_string());
        assert!(record["id"].is_string());
    }

    #[test]
    fn test_load_mismatched_shape_falls_back_to_empty() {
        let store = Store::in_memory();
        store.put_raw(TASKS_KEY, r#"[{"title": "old format"}]"#);
        let list = TaskList::load(store);
        assert!(list.is_empty());
    }

    #[test]
    fn test_denied_writes_keep_in_memory_list() {
        use crate::persistence::store::MemoryStore;

        let store = Store::new(MemoryStore::with_quota(0));
        let mut list = TaskList::load(store.clone());

        let first = list.add("First").unwrap();
        list.add("Second");
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].text, "Second");

        list.toggle(first);
        assert!(list.tasks()[1].done);
        assert!(store.raw(TASKS_KEY).is_none());
    }

    #[test]
    fn test_round_trip_through_file_store() {
        use crate::persistence::FileStore;

        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::new(FileStore::new(temp_dir.path()));
        let mut list = TaskList::load(store);
        let id = list.add("Write report").unwrap();
        list.add("Call Sam");
        list.toggle(id);

        let reloaded = TaskList::load(Store::new(FileStore::new(temp_dir.path())));
        assert_eq!(reloaded.tasks(), list.tasks());
        assert!(temp_dir.path().join("ff_tasks.json").exists());
    }
}
