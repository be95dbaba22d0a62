//! To-do domain model.
//!
//! # Responsibility
//! - Define the `ToDoItem` entity and its classification taxonomy.
//! - Hold the validation and defaulting rules shared by every write path.
//!
//! # Invariants
//! - Every item is identified by a stable `ToDoItemId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod category;
pub mod cost;
pub mod rules;
pub mod todo_item;
pub mod user;
