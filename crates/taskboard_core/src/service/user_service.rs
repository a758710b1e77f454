//! User use-case service.
//!
//! # Invariants
//! - Email matching is exact and case-sensitive.
//! - Neither email uniqueness nor outstanding todo references are checked
//!   on write or delete.

use crate::model::user::{User, UserId};
use crate::service::error::{LookupKey, ServiceError, ServiceResult};
use crate::store::Collection;
use log::{debug, info};

/// Service facade over the `users` collection.
pub struct UserService<C: Collection<User>> {
    users: C,
}

impl<C: Collection<User>> UserService<C> {
    pub fn new(users: C) -> Self {
        Self { users }
    }

    /// Lists every user in store order.
    pub fn list_all(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.find_all()?)
    }

    pub fn get_by_id(&self, id: UserId) -> ServiceResult<User> {
        self.users
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(LookupKey::UserId(id)))
    }

    /// Returns the first user, in store order, whose email equals `email`.
    pub fn get_by_email(&self, email: &str) -> ServiceResult<User> {
        self.users
            .find_one(&|user: &User| user.email == email)?
            .ok_or_else(|| ServiceError::NotFound(LookupKey::UserEmail(email.to_string())))
    }

    pub fn create(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> ServiceResult<User> {
        let saved = self.users.save(&User::new(name, email))?;
        info!(
            "event=user_create module=service status=ok user_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Replaces the user's name; `id` and `email` are preserved.
    pub fn change_name(&self, id: UserId, name: impl Into<String>) -> ServiceResult<User> {
        let existing = self.get_by_id(id)?;
        let saved = self.users.save(&existing.renamed(name))?;
        info!("event=user_rename module=service status=ok user_id={id}");
        Ok(saved)
    }

    /// Deletes the user. Todos assigned to it are left in place.
    pub fn delete(&self, id: UserId) -> ServiceResult<()> {
        if !self.users.exists_by_id(id)? {
            debug!("event=user_delete module=service status=not_found user_id={id}");
            return Err(ServiceError::NotFound(LookupKey::UserId(id)));
        }
        self.users.delete_by_id(id)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }
}
