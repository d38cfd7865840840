//! Task Controller
//!
//! Validates raw console input before handing it to the [`TaskService`].

use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::Task;
use crate::store::StoreStatistics;
use crate::todo::service::TaskService;
use crate::todo::validation::{validate_description, validate_task_id};

#[derive(Debug, Clone)]
pub struct TaskController {
    service: TaskService,
}

impl TaskController {
    pub fn new(service: TaskService) -> Self {
        Self { service }
    }

    pub async fn create_task(&self, description: &str) -> Result<Uuid> {
        validate_description(description)?;
        self.service.create_task(description.trim()).await
    }

    pub async fn get_all_tasks(&self) -> Vec<Task> {
        self.service.get_all_tasks().await
    }

    /// Updates a task by its full id. `Ok(false)` if no such task.
    pub async fn update_task(
        &self,
        task_id: &str,
        description: Option<&str>,
        completed: Option<bool>,
    ) -> Result<bool> {
        let id = validate_task_id(task_id)?;
        if let Some(description) = description {
            validate_description(description)?;
        }
        Ok(self
            .service
            .update_task(&id, description.map(str::trim), completed)
            .await)
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<bool> {
        let id = validate_task_id(task_id)?;
        Ok(self.service.delete_task(&id).await)
    }

    /// Toggles completion. `Ok(None)` if no such task.
    pub async fn toggle_task_completion(&self, task_id: &str) -> Result<Option<bool>> {
        let id = validate_task_id(task_id)?;
        Ok(self.service.toggle_task_completion(&id).await)
    }

    pub async fn statistics(&self) -> StoreStatistics {
        self.service.statistics().await
    }

    // == Resolve Id ==
    /// Finds the one live task whose id starts with `prefix`.
    ///
    /// Matching ignores case and accepts the prefix with or without hyphens.
    /// Scanning uses `list`, so it does not count as a read.
    ///
    /// # Errors
    /// - [`StoreError::Validation`] for an empty prefix
    /// - [`StoreError::TaskNotFound`] when nothing matches
    /// - [`StoreError::AmbiguousId`] when more than one task matches
    pub async fn resolve_id(&self, prefix: &str) -> Result<Uuid> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(StoreError::validation("task_id", "Task ID cannot be empty"));
        }

        let needle = prefix.to_ascii_lowercase();
        let mut matches = self
            .service
            .get_all_tasks()
            .await
            .into_iter()
            .map(|task| task.id)
            .filter(|id| {
                id.hyphenated().to_string().starts_with(&needle)
                    || id.simple().to_string().starts_with(&needle)
            });

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(StoreError::TaskNotFound(prefix.to_string())),
            (Some(_), Some(_)) => Err(StoreError::AmbiguousId(prefix.to_string())),
        }
    }
}
