//! Todo entity.
//!
//! # Invariants
//! - `assigned_user_id` referenced an existing user when it was written.
//!   It is not re-validated when that user is later deleted.
//! - Assignee name/email are never stored here; see `TodoView`.

use crate::model::user::UserId;
use crate::store::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a todo document.
pub type TodoId = Uuid;

/// A unit of work assigned to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub description: String,
    pub done: bool,
    /// Serialized as `assignedUserId` to keep the document shape stable.
    #[serde(rename = "assignedUserId")]
    pub assigned_user_id: UserId,
}

impl Todo {
    /// Creates an open todo with a generated id.
    ///
    /// # Invariants
    /// - `done` starts as `false`.
    pub fn new(description: impl Into<String>, assigned_user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            done: false,
            assigned_user_id,
        }
    }

    pub fn with_done(&self, done: bool) -> Self {
        Self {
            done,
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }

    pub fn with_assignee(&self, assigned_user_id: UserId) -> Self {
        Self {
            assigned_user_id,
            ..self.clone()
        }
    }
}

impl Document for Todo {
    const COLLECTION: &'static str = "todos";

    fn id(&self) -> Uuid {
        self.id
    }
}
