//! Todo use-case service.
//!
//! # Responsibility
//! - Resolve assignees through `UserService` by email on create/assign and
//!   by id on every read.
//! - Return `TodoView`s joined with the assignee's current name and email.
//!
//! # Invariants
//! - The assignee is resolved before the todo is written, so a failed
//!   resolution leaves the stored todo untouched.
//! - Assignee fields are looked up on every call, never cached.
//! - A todo whose assignee has been deleted reads as `NotFound(UserId)`.

use crate::model::todo::{Todo, TodoId};
use crate::model::user::User;
use crate::service::error::{LookupKey, ServiceError, ServiceResult};
use crate::service::user_service::UserService;
use crate::service::view::TodoView;
use crate::store::Collection;
use log::{debug, info, warn};

/// Service facade over the `todos` collection.
pub struct TodoService<T: Collection<Todo>, U: Collection<User>> {
    todos: T,
    users: UserService<U>,
}

impl<T: Collection<Todo>, U: Collection<User>> TodoService<T, U> {
    pub fn new(todos: T, users: UserService<U>) -> Self {
        Self { todos, users }
    }

    /// The user service used for assignee resolution.
    pub fn users(&self) -> &UserService<U> {
        &self.users
    }

    /// Lists the todos assigned to the user with `email`, in store order.
    pub fn list_by_assignee_email(&self, email: &str) -> ServiceResult<Vec<TodoView>> {
        let assignee = self.users.get_by_email(email)?;
        let todos = self
            .todos
            .find_many(&|todo: &Todo| todo.assigned_user_id == assignee.id)?;
        Ok(todos
            .iter()
            .map(|todo| TodoView::assemble(todo, &assignee))
            .collect())
    }

    pub fn get_by_id(&self, id: TodoId) -> ServiceResult<TodoView> {
        let todo = self.load(id)?;
        let assignee = self.current_assignee(&todo)?;
        Ok(TodoView::assemble(&todo, &assignee))
    }

    /// Creates an open todo assigned to the user with `assignee_email`.
    pub fn create(
        &self,
        description: impl Into<String>,
        assignee_email: &str,
    ) -> ServiceResult<TodoView> {
        let assignee = self.users.get_by_email(assignee_email)?;
        let saved = self.todos.save(&Todo::new(description, assignee.id))?;
        info!(
            "event=todo_create module=service status=ok todo_id={} user_id={}",
            saved.id, assignee.id
        );
        Ok(TodoView::assemble(&saved, &assignee))
    }

    pub fn set_done(&self, id: TodoId, done: bool) -> ServiceResult<TodoView> {
        let existing = self.load(id)?;
        let assignee = self.current_assignee(&existing)?;
        let saved = self.todos.save(&existing.with_done(done))?;
        info!("event=todo_set_done module=service status=ok todo_id={id} done={done}");
        Ok(TodoView::assemble(&saved, &assignee))
    }

    /// Moves the todo to the user with `assignee_email`.
    pub fn assign(&self, id: TodoId, assignee_email: &str) -> ServiceResult<TodoView> {
        let existing = self.load(id)?;
        let assignee = self.users.get_by_email(assignee_email)?;
        let saved = self.todos.save(&existing.with_assignee(assignee.id))?;
        info!(
            "event=todo_assign module=service status=ok todo_id={id} from_user_id={} to_user_id={}",
            existing.assigned_user_id, assignee.id
        );
        Ok(TodoView::assemble(&saved, &assignee))
    }

    pub fn edit(&self, id: TodoId, description: impl Into<String>) -> ServiceResult<TodoView> {
        let existing = self.load(id)?;
        let assignee = self.current_assignee(&existing)?;
        let saved = self.todos.save(&existing.with_description(description))?;
        info!("event=todo_edit module=service status=ok todo_id={id}");
        Ok(TodoView::assemble(&saved, &assignee))
    }

    pub fn delete(&self, id: TodoId) -> ServiceResult<()> {
        if !self.todos.exists_by_id(id)? {
            debug!("event=todo_delete module=service status=not_found todo_id={id}");
            return Err(ServiceError::NotFound(LookupKey::TodoId(id)));
        }
        self.todos.delete_by_id(id)?;
        info!("event=todo_delete module=service status=ok todo_id={id}");
        Ok(())
    }

    fn load(&self, id: TodoId) -> ServiceResult<Todo> {
        self.todos
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(LookupKey::TodoId(id)))
    }

    /// Resolves the user the stored todo points at.
    fn current_assignee(&self, todo: &Todo) -> ServiceResult<User> {
        match self.users.get_by_id(todo.assigned_user_id) {
            Ok(assignee) => Ok(assignee),
            Err(err) => {
                if err.is_not_found() {
                    warn!(
                        "event=todo_assignee_missing module=service status=error todo_id={} user_id={}",
                        todo.id, todo.assigned_user_id
                    );
                }
                Err(err)
            }
        }
    }
}
