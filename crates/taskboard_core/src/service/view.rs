//! Read-time todo projection.

use crate::model::todo::{Todo, TodoId};
use crate::model::user::User;
use serde::{Deserialize, Serialize};

/// Todo joined with its assignee at read time. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    pub id: TodoId,
    pub description: String,
    pub done: bool,
    pub assignee_name: String,
    pub assignee_email: String,
}

impl TodoView {
    /// Joins `todo` with the user it is assigned to.
    ///
    /// Callers resolve `assignee` from `todo.assigned_user_id` (or the user
    /// just assigned); this function does not re-check the pairing.
    pub fn assemble(todo: &Todo, assignee: &User) -> Self {
        debug_assert_eq!(todo.assigned_user_id, assignee.id);
        Self {
            id: todo.id,
            description: todo.description.clone(),
            done: todo.done,
            assignee_name: assignee.name.clone(),
            assignee_email: assignee.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TodoView;
    use crate::model::todo::Todo;
    use crate::model::user::User;

    #[test]
    fn view_serializes_assignee_fields_in_camel_case() {
        let alice = User::new("Alice", "alice@x.io");
        let todo = Todo::new("Buy milk", alice.id);
        let json = serde_json::to_value(TodoView::assemble(&todo, &alice)).unwrap();

        assert_eq!(json["description"], "Buy milk");
        assert_eq!(json["done"], false);
        assert_eq!(json["assigneeName"], "Alice");
        assert_eq!(json["assigneeEmail"], "alice@x.io");
    }
}
