//! Entity value types for users and todos.
//!
//! # Responsibility
//! - Define the records persisted in the `users` and `todos` collections.
//! - Provide copy-and-replace helpers used by every update path.
//!
//! # Invariants
//! - Entities are immutable values; an update builds a new value with the
//!   same `id` and overwrites the stored document.
//! - Ids are generated once at creation and never change.

pub mod todo;
pub mod user;
