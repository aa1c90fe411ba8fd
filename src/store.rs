// In-memory task list store with change notification

use crate::error::StoreError;
use crate::filter::Filter;
use crate::task::{Task, TaskId, demo_tasks};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// A completed mutation, delivered to observers after the store has changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Change {
    Added { id: TaskId },
    Toggled { id: TaskId, is_finished: bool },
    Deleted { id: TaskId },
}

impl Change {
    pub fn id(&self) -> TaskId {
        match self {
            Change::Added { id } | Change::Toggled { id, .. } | Change::Deleted { id } => *id,
        }
    }
}

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Change, &[Task])>;

/// Single owner of the ordered task sequence
///
/// Tasks are kept in insertion order. Every mutation runs to completion before
/// observers are called, so an observer always sees a consistent sequence.
#[derive(Default)]
pub struct Store {
    tasks: Vec<Task>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the five demo tasks
    pub fn with_demo_tasks() -> Self {
        Self::seeded(demo_tasks())
    }

    /// Create a store from an existing sequence
    ///
    /// Titles are trimmed. A blank title fails with [`StoreError::EmptyInput`]
    /// and a repeated id with [`StoreError::DuplicateId`].
    pub fn from_tasks(mut tasks: Vec<Task>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in tasks.iter_mut() {
            let trimmed = task.title.trim();
            if trimmed.is_empty() {
                return Err(StoreError::EmptyInput);
            }
            if trimmed.len() != task.title.len() {
                task.title = trimmed.to_string();
            }
            if !seen.insert(task.id) {
                return Err(StoreError::DuplicateId(task.id));
            }
        }
        Ok(Self::seeded(tasks))
    }

    fn seeded(tasks: Vec<Task>) -> Self {
        info!(count = tasks.len(), "Store initialized");
        Self {
            tasks,
            ..Self::default()
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Full task sequence in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned copy of the current sequence
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Current position of a task in the full sequence
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Tasks passing `filter`, in store order
    pub fn view(&self, filter: &Filter) -> Vec<&Task> {
        filter.apply(&self.tasks)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new unfinished task
    ///
    /// The title is trimmed. A blank title leaves the store untouched and
    /// returns [`StoreError::EmptyInput`]; observers are not notified.
    pub fn add_task(&mut self, title: &str) -> Result<TaskId, StoreError> {
        let task = Task::new(title)?;
        let id = task.id;

        debug!(%id, title = %task.title, "add_task");
        self.tasks.push(task);
        self.notify(Change::Added { id });

        Ok(id)
    }

    /// Flip completion of the task with `id`, returning the new flag
    pub fn toggle_task(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.toggle_at(index)
    }

    /// Remove the task with `id`; later tasks shift down by one
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.delete_at(index)
    }

    /// Flip completion of the task at `index` in the full sequence
    pub fn toggle_at(&mut self, index: usize) -> Result<bool, StoreError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;

        let id = task.id;
        let is_finished = task.toggle();

        debug!(%id, index, is_finished, "toggle_task");
        self.notify(Change::Toggled { id, is_finished });

        Ok(is_finished)
    }

    /// Remove the task at `index` in the full sequence
    pub fn delete_at(&mut self, index: usize) -> Result<Task, StoreError> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        let task = self.tasks.remove(index);

        debug!(id = %task.id, index, "delete_task");
        self.notify(Change::Deleted { id: task.id });

        Ok(task)
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register a callback invoked after every successful mutation
    ///
    /// The callback receives the change and the full sequence as it stands
    /// after the change.
    pub fn subscribe(&mut self, observer: impl FnMut(&Change, &[Task]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        debug!(subscription = id.0, "subscribe");
        id
    }

    /// Drop an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        before != self.observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, change: Change) {
        let tasks = &self.tasks;
        for (_, observer) in self.observers.iter_mut() {
            observer(&change, tasks);
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("tasks", &self.tasks)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Tab;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_with(titles: &[&str]) -> Store {
        let mut store = Store::new();
        for title in titles {
            store.add_task(title).unwrap();
        }
        store
    }

    fn titles(store: &Store) -> Vec<&str> {
        store.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_with_demo_tasks() {
        let store = Store::with_demo_tasks();
        assert_eq!(store.len(), 5);
        assert!(store.tasks()[0].is_finished);
    }

    #[test]
    fn test_add_whitespace_title_is_noop() {
        let mut store = Store::with_demo_tasks();
        let before = store.snapshot();

        assert_eq!(store.add_task("   "), Err(StoreError::EmptyInput));
        assert_eq!(store.add_task(""), Err(StoreError::EmptyInput));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_add_trims_and_appends() {
        let mut store = Store::with_demo_tasks();
        let before = store.snapshot();

        let id = store.add_task("  Buy milk  ").unwrap();

        assert_eq!(store.len(), before.len() + 1);
        let last = store.tasks().last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.title, "Buy milk");
        assert!(!last.is_finished);
        assert_eq!(&store.tasks()[..before.len()], before.as_slice());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut store = Store::with_demo_tasks();
        let before = store.snapshot();

        for i in 0..store.len() {
            store.toggle_at(i).unwrap();
            store.toggle_at(i).unwrap();
        }

        let after = store.snapshot();
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            assert_eq!(a.is_finished, b.is_finished);
        }
    }

    #[test]
    fn test_toggle_leaves_other_tasks_unchanged() {
        let mut store = store_with(&["A", "B", "C"]);
        let before = store.snapshot();

        assert!(store.toggle_at(1).unwrap());

        assert_eq!(store.tasks()[0], before[0]);
        assert_eq!(store.tasks()[2], before[2]);
        assert!(store.tasks()[1].is_finished);
    }

    #[test]
    fn test_delete_shrinks_and_shifts() {
        let mut store = store_with(&["A", "B", "C"]);

        let removed = store.delete_at(1).unwrap();

        assert_eq!(removed.title, "B");
        assert_eq!(titles(&store), vec!["A", "C"]);
    }

    #[test]
    fn test_positional_out_of_range() {
        let mut store = store_with(&["A", "B"]);
        let before = store.snapshot();

        assert_eq!(
            store.toggle_at(2),
            Err(StoreError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            store.delete_at(9).unwrap_err(),
            StoreError::IndexOutOfRange { index: 9, len: 2 }
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_toggle_and_delete_by_id() {
        let mut store = store_with(&["A", "B", "C"]);
        let b = store.tasks()[1].id;

        assert!(store.toggle_task(b).unwrap());
        assert!(store.get(b).unwrap().is_finished);

        let removed = store.delete_task(b).unwrap();
        assert_eq!(removed.id, b);
        assert!(store.get(b).is_none());
        assert_eq!(titles(&store), vec!["A", "C"]);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = store_with(&["A"]);
        let stranger = TaskId::new();

        assert_eq!(store.toggle_task(stranger), Err(StoreError::NotFound(stranger)));
        assert_eq!(store.delete_task(stranger).unwrap_err(), StoreError::NotFound(stranger));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_survive_filtering() {
        let mut store = store_with(&["Buy milk", "Clean house", "Buy bread"]);
        store.toggle_at(0).unwrap();

        let todo: Vec<TaskId> = store
            .view(&Filter::new(Tab::Todo, "buy"))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(todo.len(), 1);

        // First row of the filtered view is "Buy bread", not position 0 of the store
        store.delete_task(todo[0]).unwrap();
        assert_eq!(titles(&store), vec!["Buy milk", "Clean house"]);
    }

    #[test]
    fn test_observers_notified_after_each_mutation() {
        let mut store = Store::new();
        let seen: Rc<RefCell<Vec<(Change, usize)>>> = Rc::new(RefCell::new(Vec::new()));

        store.subscribe({
            let seen = seen.clone();
            move |change, tasks| seen.borrow_mut().push((change.clone(), tasks.len()))
        });

        let a = store.add_task("A").unwrap();
        let b = store.add_task("B").unwrap();
        store.toggle_task(a).unwrap();
        store.delete_task(b).unwrap();

        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![
                (Change::Added { id: a }, 1),
                (Change::Added { id: b }, 2),
                (Change::Toggled { id: a, is_finished: true }, 2),
                (Change::Deleted { id: b }, 1),
            ]
        );
    }

    #[test]
    fn test_failed_operations_do_not_notify() {
        let mut store = store_with(&["A"]);
        let count = Rc::new(RefCell::new(0));

        store.subscribe({
            let count = count.clone();
            move |_, _| *count.borrow_mut() += 1
        });

        let _ = store.add_task("  ");
        let _ = store.toggle_at(5);
        let _ = store.delete_at(5);
        let _ = store.toggle_task(TaskId::new());

        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = Store::new();
        let count = Rc::new(RefCell::new(0));

        let sub = store.subscribe({
            let count = count.clone();
            move |_, _| *count.borrow_mut() += 1
        });
        assert_eq!(store.observer_count(), 1);

        store.add_task("A").unwrap();
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add_task("B").unwrap();

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn test_change_serialization() {
        let id = TaskId::new();
        let json = serde_json::to_value(Change::Toggled { id, is_finished: true }).unwrap();
        assert_eq!(json["event"], "toggled");
        assert_eq!(json["isFinished"], true);
        assert!(json.get("is_finished").is_none());
        assert_eq!(Change::Deleted { id }.id(), id);
    }

    #[test]
    fn test_from_tasks_keeps_order_and_trims() {
        let a = Task::new("A").unwrap();
        let mut b = Task::new("B").unwrap();
        b.title = "  B  ".to_string();

        let store = Store::from_tasks(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(titles(&store), vec!["A", "B"]);
        assert_eq!(store.tasks()[1].id, b.id);
    }

    #[test]
    fn test_from_tasks_rejects_duplicate_id() {
        let a = Task::new("A").unwrap();
        let mut copy = a.clone();
        copy.title = "Other".to_string();

        assert_eq!(
            Store::from_tasks(vec![a.clone(), copy]).unwrap_err(),
            StoreError::DuplicateId(a.id)
        );
    }

    #[test]
    fn test_from_tasks_rejects_blank_title() {
        let a = Task::new("A").unwrap();
        let mut blank = Task::new("B").unwrap();
        blank.title = "   ".to_string();

        assert_eq!(Store::from_tasks(vec![a, blank]).unwrap_err(), StoreError::EmptyInput);
    }
}
