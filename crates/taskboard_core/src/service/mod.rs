//! User and todo use-case services.
//!
//! # Responsibility
//! - Enforce that a todo only ever points at a user that existed when the
//!   reference was written.
//! - Assemble todo views with the assignee's current name and email.
//!
//! # Invariants
//! - Every update loads the full entity, builds a new value and saves it.
//! - Services hold no mutable state of their own; all state lives in the
//!   collections they are given.
//! - A failed lookup surfaces as `ServiceError::NotFound` before any write.

pub mod error;
pub mod todo_service;
pub mod user_service;
pub mod view;
