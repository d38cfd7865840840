//! Task record stored by the task console.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of hex characters shown for an abbreviated id
pub const SHORT_ID_LEN: usize = 8;

/// A single to-do item.
///
/// `created_at` is fixed at construction; every mutator bumps `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task under a fresh random id.
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), description)
    }

    pub fn with_id(id: Uuid, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            description: description.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.touch();
    }

    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.touch();
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_completed(&mut self) -> bool {
        if self.completed {
            self.mark_incomplete();
        } else {
            self.mark_completed();
        }
        self.completed
    }

    pub fn update_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// First eight hex digits of the id, as shown in listings.
    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }

    pub fn is_modified(&self) -> bool {
        self.updated_at != self.created_at
    }

    pub fn status_symbol(&self) -> &'static str {
        if self.completed {
            "✓"
        } else {
            "○"
        }
    }

    fn touch(&mut self) {
        // Utc::now() can repeat within the clock resolution
        let now = Utc::now();
        self.updated_at = if now > self.created_at {
            now
        } else {
            self.created_at + chrono::Duration::microseconds(1)
        };
    }
}

/// First eight hex digits of a task id.
pub fn short_id(id: &Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(SHORT_ID_LEN);
    short
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.status_symbol(),
            self.short_id(),
            self.description
        )
    }
}
