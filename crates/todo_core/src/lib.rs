//! Core domain logic for the to-do list.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod fixture;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, Subcategory};
pub use model::cost::{Cost, CostParseError};
pub use model::rules::{
    default_category, default_due_by, default_subcategory, validate_cost, validate_description,
    validate_due_by, validate_subcategory,
};
pub use model::todo_item::{ToDoItem, ToDoItemId, ToDoValidationError};
pub use model::user::CurrentUser;
pub use notify::{CollectingNotifier, LogNotifier, Notice, NoticeLevel, NotificationSink};
pub use repo::todo_repo::{RepoError, RepoResult, SqliteToDoItemRepository, ToDoItemRepository};
pub use service::todo_service::{
    CategorizedQuery, FieldInput, NewToDoRequest, ServiceResult, ToDoItemService,
    ToDoItemUpdate, ToDoServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
