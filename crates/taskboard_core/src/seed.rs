//! Startup seeding of a default user and todo.
//!
//! # Invariants
//! - Seeding is guarded by an email lookup and is a no-op once the seed
//!   user exists.
//! - Store failures propagate; only `NotFound` on the guard is expected.

use crate::model::todo::{Todo, TodoId};
use crate::model::user::{User, UserId};
use crate::service::error::ServiceResult;
use crate::service::todo_service::TodoService;
use crate::store::Collection;
use log::info;

/// Records created by `seed_defaults`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub user_name: String,
    pub user_email: String,
    pub todo_description: String,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            user_name: "Frodo Baggins".to_string(),
            user_email: "frodo@theshire.me".to_string(),
            todo_description: "Take the ring to Mordor".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { user_id: UserId, todo_id: TodoId },
    AlreadyPresent,
}

/// Creates the seed user and its todo unless the seed email is taken.
pub fn seed_defaults<T, U>(todos: &TodoService<T, U>, seed: &SeedData) -> ServiceResult<SeedOutcome>
where
    T: Collection<Todo>,
    U: Collection<User>,
{
    match todos.users().get_by_email(&seed.user_email) {
        Ok(_) => {
            info!("event=seed module=seed status=skipped reason=already_present");
            return Ok(SeedOutcome::AlreadyPresent);
        }
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err),
    }

    let user = todos
        .users()
        .create(seed.user_name.as_str(), seed.user_email.as_str())?;
    let todo = todos.create(seed.todo_description.as_str(), &user.email)?;
    info!(
        "event=seed module=seed status=ok user_id={} todo_id={}",
        user.id, todo.id
    );

    Ok(SeedOutcome::Seeded {
        user_id: user.id,
        todo_id: todo.id,
    })
}
