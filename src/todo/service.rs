//! Task Service
//!
//! Business operations on tasks, backed by a shared bounded store.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::Task;
use crate::store::{SharedStore, StoreStatistics};

/// Store type the task layer runs on
pub type TaskStore = SharedStore<Uuid, Task>;

/// Creates, reads, mutates and removes tasks.
///
/// The store is injected, so several services (for example in tests) never
/// share state unless they are handed the same store.
#[derive(Debug, Clone)]
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// Creates a task and returns its id.
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] if the generated id is already taken.
    pub async fn create_task(&self, description: &str) -> Result<Uuid> {
        let task = Task::new(description);
        let id = task.id;

        if self.store.create(id, task).await {
            debug!(task_id = %id, "task created");
            Ok(id)
        } else {
            warn!(task_id = %id, "generated task id already in use");
            Err(StoreError::DuplicateKey(id.to_string()))
        }
    }

    /// All live tasks, in no particular order.
    pub async fn get_all_tasks(&self) -> Vec<Task> {
        self.store.list().await
    }

    /// Looks up a single task. Counts as a store read.
    pub async fn get_task(&self, id: &Uuid) -> Option<Task> {
        self.store.read(id).await
    }

    /// Applies the given changes to a task.
    ///
    /// Returns false if the task does not exist.
    pub async fn update_task(
        &self,
        id: &Uuid,
        description: Option<&str>,
        completed: Option<bool>,
    ) -> bool {
        self.store
            .update_with(id, |current| {
                let mut task = current.clone();
                if let Some(description) = description {
                    task.update_description(description);
                }
                match completed {
                    Some(true) => task.mark_completed(),
                    Some(false) => task.mark_incomplete(),
                    None => {}
                }
                task
            })
            .await
    }

    pub async fn delete_task(&self, id: &Uuid) -> bool {
        self.store.delete(id).await
    }

    /// Flips a task between completed and pending.
    ///
    /// Returns the new completion state, or `None` if the task does not exist.
    pub async fn toggle_task_completion(&self, id: &Uuid) -> Option<bool> {
        let mut completed = None;
        let updated = self
            .store
            .update_with(id, |current| {
                let mut task = current.clone();
                completed = Some(task.toggle_completed());
                task
            })
            .await;
        if updated {
            completed
        } else {
            None
        }
    }

    pub async fn statistics(&self) -> StoreStatistics {
        self.store.statistics().await
    }
}
