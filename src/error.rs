//! Error types for the bounded store and the task layers built on it
//!
//! Provides unified error handling using thiserror.
//!
//! The store itself only fails at construction time. Missing keys and
//! duplicate keys are reported by the store as plain `false`/`None`; the
//! task service and controller lift those into the variants below.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A finite capacity must hold at least one record
    #[error("Invalid capacity: {0} (max_size must be at least 1)")]
    InvalidCapacity(usize),

    /// Policy name outside of FIFO, LRU, TTL
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),

    /// A configuration value could not be parsed
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    /// User input rejected before it reached the store
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    /// No live task has an id starting with the given prefix
    #[error("No task found with ID starting with: {0}")]
    TaskNotFound(String),

    /// The store already held a record under the generated key
    #[error("Failed to create task with ID {0}")]
    DuplicateKey(String),

    /// An id prefix matched more than one task
    #[error("Multiple tasks found with ID starting with: {0}")]
    AmbiguousId(String),
}

impl StoreError {
    /// Shorthand for a [`StoreError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    // == User Message ==
    /// Renders the error the way the console shows it.
    ///
    /// `context` names the action that failed and is only used for
    /// errors that have no dedicated prefix.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            StoreError::TaskNotFound(_) | StoreError::Validation { .. } => self.to_string(),
            StoreError::AmbiguousId(_) => format!(
                "{}\nPlease provide more characters to uniquely identify the task.",
                self
            ),
            StoreError::InvalidCapacity(_)
            | StoreError::UnknownPolicy(_)
            | StoreError::InvalidConfig { .. } => format!("Configuration error: {}", self),
            StoreError::DuplicateKey(_) => {
                if context.is_empty() {
                    format!("Unexpected error: {}", self)
                } else {
                    format!("Unexpected error in {}: {}", context, self)
                }
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
