//! To-do item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped queries and single-item writes over `todo_items`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `ToDoItem::validate()` before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List ordering is deterministic:
//!   `complete ASC, due_by ASC (unset last), description ASC, uuid ASC`.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::category::{Category, Subcategory};
use crate::model::cost::Cost;
use crate::model::todo_item::{ToDoItem, ToDoItemId, ToDoValidationError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    uuid,
    description,
    category,
    subcategory,
    owned_by,
    due_by,
    cost_cents,
    complete
FROM todo_items";

const TODO_ORDER_SQL: &str =
    " ORDER BY complete ASC, due_by IS NULL ASC, due_by ASC, description ASC, uuid ASC";

const REQUIRED_COLUMNS: &[&str] = &[
    "uuid",
    "description",
    "category",
    "subcategory",
    "owned_by",
    "due_by",
    "cost_cents",
    "complete",
    "updated_at",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for to-do persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ToDoValidationError),
    Db(DbError),
    NotFound(ToDoItemId),
    InvalidData(String),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "to-do item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted to-do data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ToDoValidationError> for RepoError {
    fn from(value: ToDoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Typed persistence contract for to-do items.
///
/// Every list method is scoped to one owner and returns items in the
/// module-level ordering.
pub trait ToDoItemRepository {
    /// Inserts a new item; it is queryable as soon as this returns.
    fn create_item(&self, item: &ToDoItem) -> RepoResult<ToDoItemId>;
    /// Overwrites every mutable field of an existing item.
    fn update_item(&self, item: &ToDoItem) -> RepoResult<()>;
    fn get_item(&self, id: ToDoItemId) -> RepoResult<Option<ToDoItem>>;
    /// Removes an item permanently.
    fn delete_item(&self, id: ToDoItemId) -> RepoResult<()>;
    fn list_by_owner(&self, owner: &str) -> RepoResult<Vec<ToDoItem>>;
    fn list_by_owner_and_complete(&self, owner: &str, complete: bool)
        -> RepoResult<Vec<ToDoItem>>;
    /// Case-sensitive substring match on `description`; an empty fragment
    /// matches every item of `owner`.
    fn list_by_owner_and_description_contains(
        &self,
        owner: &str,
        fragment: &str,
    ) -> RepoResult<Vec<ToDoItem>>;
}

/// SQLite-backed to-do repository borrowing a migrated connection.
pub struct SqliteToDoItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteToDoItemRepository<'conn> {
    /// Wraps a connection after checking it carries the expected schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_items<P: Params>(&self, where_sql: &str, params: P) -> RepoResult<Vec<ToDoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE {where_sql}{TODO_ORDER_SQL};"))?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }
}

impl ToDoItemRepository for SqliteToDoItemRepository<'_> {
    fn create_item(&self, item: &ToDoItem) -> RepoResult<ToDoItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO todo_items (
                uuid,
                description,
                category,
                subcategory,
                owned_by,
                due_by,
                cost_cents,
                complete
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                item.uuid.to_string(),
                item.description.as_str(),
                item.category.as_str(),
                item.subcategory.map(Subcategory::as_str),
                item.owned_by.as_str(),
                item.due_by.map(date_to_db),
                item.cost.map(Cost::cents),
                bool_to_int(item.complete),
            ],
        )?;

        Ok(item.uuid)
    }

    fn update_item(&self, item: &ToDoItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE todo_items
             SET
                description = ?1,
                category = ?2,
                subcategory = ?3,
                owned_by = ?4,
                due_by = ?5,
                cost_cents = ?6,
                complete = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?8;",
            params![
                item.description.as_str(),
                item.category.as_str(),
                item.subcategory.map(Subcategory::as_str),
                item.owned_by.as_str(),
                item.due_by.map(date_to_db),
                item.cost.map(Cost::cents),
                bool_to_int(item.complete),
                item.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.uuid));
        }
        Ok(())
    }

    fn get_item(&self, id: ToDoItemId) -> RepoResult<Option<ToDoItem>> {
        let mut items = self.query_items("uuid = ?1", [id.to_string()])?;
        Ok(items.pop())
    }

    fn delete_item(&self, id: ToDoItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todo_items WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_by_owner(&self, owner: &str) -> RepoResult<Vec<ToDoItem>> {
        self.query_items("owned_by = ?1", [owner])
    }

    fn list_by_owner_and_complete(
        &self,
        owner: &str,
        complete: bool,
    ) -> RepoResult<Vec<ToDoItem>> {
        self.query_items(
            "owned_by = ?1 AND complete = ?2",
            params![owner, bool_to_int(complete)],
        )
    }

    fn list_by_owner_and_description_contains(
        &self,
        owner: &str,
        fragment: &str,
    ) -> RepoResult<Vec<ToDoItem>> {
        if fragment.is_empty() {
            return self.list_by_owner(owner);
        }
        // instr() is literal and case-sensitive, unlike LIKE.
        self.query_items(
            "owned_by = ?1 AND instr(description, ?2) > 0",
            params![owner, fragment],
        )
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS (
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'todo_items'
         );",
        [],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable("todo_items"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('todo_items');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "todo_items",
                column: *column,
            });
        }
    }

    Ok(())
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ToDoItem> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in todo_items.uuid"))
    })?;

    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in todo_items.category"
        ))
    })?;

    let subcategory = match row.get::<_, Option<String>>("subcategory")? {
        Some(value) => Some(Subcategory::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid subcategory `{value}` in todo_items.subcategory"
            ))
        })?),
        None => None,
    };

    let due_by = match row.get::<_, Option<String>>("due_by")? {
        Some(value) => Some(NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!("invalid date `{value}` in todo_items.due_by"))
        })?),
        None => None,
    };

    let complete = match row.get::<_, i64>("complete")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid complete value `{other}` in todo_items.complete"
            )));
        }
    };

    let item = ToDoItem {
        uuid,
        description: row.get("description")?,
        category,
        subcategory,
        owned_by: row.get("owned_by")?,
        due_by,
        cost: row.get::<_, Option<i64>>("cost_cents")?.map(Cost::from_cents),
        complete,
    };
    item.validate()?;
    Ok(item)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
