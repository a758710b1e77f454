//! User entity.
//!
//! # Invariants
//! - `email` is the external lookup key. Uniqueness is expected by callers
//!   but is not checked on write.

use crate::store::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a user document.
pub type UserId = Uuid;

/// A person that todos can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name. Mutable through `UserService::change_name`.
    pub name: String,
    /// Exact-match lookup key; no normalization is applied.
    pub email: String,
}

impl User {
    /// Creates a user with a freshly generated id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns a copy carrying `name`; `id` and `email` are kept.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            id: self.id,
            name: name.into(),
            email: self.email.clone(),
        }
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }
}
