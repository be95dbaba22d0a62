//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the typed data access contract for to-do items.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `ToDoItem::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod todo_repo;
