//! To-do use-case service.
//!
//! # Responsibility
//! - Provide owner-scoped listing, filtering, creation and mutation APIs.
//! - Resolve creation defaults and run field validation before any write.
//! - Raise presentational notices for empty result sets.
//!
//! # Invariants
//! - Every operation is scoped to the `CurrentUser` passed by the caller;
//!   items of other owners are invisible (reported as not found).
//! - Rejected input never reaches the repository.
//! - Notices never change the returned data.

use crate::clock::Clock;
use crate::model::category::{Category, Subcategory};
use crate::model::cost::Cost;
use crate::model::rules;
use crate::model::todo_item::{ToDoItem, ToDoItemId, ToDoValidationError};
use crate::model::user::CurrentUser;
use crate::notify::NotificationSink;
use crate::repo::todo_repo::{RepoError, ToDoItemRepository};
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const ALL_COMPLETED_NOTICE: &str = "All to-do items have been completed :-)";
pub const NONE_COMPLETED_NOTICE: &str = "No to-do items have yet been completed :-(";
pub const NO_ITEMS_NOTICE: &str = "No to-do items found.";

/// Service error for to-do use-cases.
#[derive(Debug)]
pub enum ToDoServiceError {
    /// Input rejected; nothing was written.
    Validation(ToDoValidationError),
    /// Item does not exist or belongs to another owner.
    ItemNotFound(ToDoItemId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for ToDoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{}: {err}", err.field()),
            Self::ItemNotFound(id) => write!(f, "to-do item not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent to-do state: {details}"),
        }
    }
}

impl Error for ToDoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ToDoValidationError> for ToDoServiceError {
    fn from(value: ToDoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ToDoServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ItemNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ToDoServiceError>;

/// Optional creation field with an explicit "use the default" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput<T> {
    /// Apply the documented default for this field.
    UseDefault,
    /// Leave the field empty.
    Unset,
    Value(T),
}

impl<T> Default for FieldInput<T> {
    fn default() -> Self {
        Self::UseDefault
    }
}

impl<T> FieldInput<T> {
    fn resolve(self, default: impl FnOnce() -> Option<T>) -> Option<T> {
        match self {
            Self::UseDefault => default(),
            Self::Unset => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for FieldInput<T> {
    /// `Some` becomes an explicit value, `None` an explicit unset.
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Value)
    }
}

/// Request model for creating an item.
///
/// Defaults applied for `UseDefault`:
/// - `category`: `Professional` (an explicit `Unset` is rejected).
/// - `subcategory`: first subcategory of the resolved category.
/// - `due_by`: today + 14 days.
/// - `cost`: unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToDoRequest {
    pub description: String,
    pub category: FieldInput<Category>,
    pub subcategory: FieldInput<Subcategory>,
    pub due_by: FieldInput<NaiveDate>,
    pub cost: FieldInput<Cost>,
}

impl NewToDoRequest {
    /// Request with every optional field set to `UseDefault`.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: FieldInput::UseDefault,
            subcategory: FieldInput::UseDefault,
            due_by: FieldInput::UseDefault,
            cost: FieldInput::UseDefault,
        }
    }
}

/// Field changes for an existing item; `None` leaves a field untouched.
///
/// Nested options distinguish "clear the field" (`Some(None)`) from "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToDoItemUpdate {
    pub description: Option<String>,
    pub category: Option<Category>,
    pub subcategory: Option<Option<Subcategory>>,
    pub due_by: Option<Option<NaiveDate>>,
    pub cost: Option<Option<Cost>>,
}

/// Filter for [`ToDoItemService::categorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorizedQuery {
    pub category: Category,
    /// `None` matches any subcategory within `category`.
    pub subcategory: Option<Subcategory>,
    pub completed: bool,
}

impl Default for CategorizedQuery {
    fn default() -> Self {
        let category = rules::default_category();
        Self {
            category,
            subcategory: Some(rules::default_subcategory(category)),
            completed: false,
        }
    }
}

impl CategorizedQuery {
    fn matches(&self, item: &ToDoItem) -> bool {
        item.complete == self.completed
            && item.category == self.category
            && self
                .subcategory
                .map_or(true, |subcategory| item.subcategory == Some(subcategory))
    }
}

/// To-do façade over a repository and a notification sink.
pub struct ToDoItemService<R: ToDoItemRepository, N: NotificationSink> {
    repo: R,
    notifier: N,
}

impl<R: ToDoItemRepository, N: NotificationSink> ToDoItemService<R, N> {
    pub fn new(repo: R, notifier: N) -> Self {
        Self { repo, notifier }
    }

    /// Open items of `user`, ordered.
    ///
    /// Informs the sink when there are none.
    pub fn not_yet_complete(&self, user: &CurrentUser) -> ServiceResult<Vec<ToDoItem>> {
        let items = self.repo.list_by_owner_and_complete(user.name(), false)?;
        log_listed("not_yet_complete", items.len());
        if items.is_empty() {
            self.notifier.inform(ALL_COMPLETED_NOTICE);
        }
        Ok(items)
    }

    /// Completed items of `user`, ordered.
    ///
    /// Informs the sink when there are none.
    pub fn complete(&self, user: &CurrentUser) -> ServiceResult<Vec<ToDoItem>> {
        let items = self.repo.list_by_owner_and_complete(user.name(), true)?;
        log_listed("complete", items.len());
        if items.is_empty() {
            self.notifier.inform(NONE_COMPLETED_NOTICE);
        }
        Ok(items)
    }

    /// Every item of `user`; warns the sink when there are none.
    pub fn all_items(&self, user: &CurrentUser) -> ServiceResult<Vec<ToDoItem>> {
        let items = self.repo.list_by_owner(user.name())?;
        log_listed("all_items", items.len());
        if items.is_empty() {
            self.notifier.warn(NO_ITEMS_NOTICE);
        }
        Ok(items)
    }

    /// Items of `user` matching completion state, category and subcategory.
    ///
    /// Filters in-process over the owner's full item list.
    pub fn categorized(
        &self,
        user: &CurrentUser,
        query: &CategorizedQuery,
    ) -> ServiceResult<Vec<ToDoItem>> {
        rules::validate_subcategory(Some(query.category), query.subcategory)?;

        let items: Vec<ToDoItem> = self
            .repo
            .list_by_owner(user.name())?
            .into_iter()
            .filter(|item| query.matches(item))
            .collect();
        log_listed("categorized", items.len());
        Ok(items)
    }

    /// Items of `user` whose description contains `fragment`.
    ///
    /// The match is literal: an empty fragment matches every item, while
    /// whitespace only matches descriptions containing that whitespace.
    pub fn auto_complete(
        &self,
        user: &CurrentUser,
        fragment: &str,
    ) -> ServiceResult<Vec<ToDoItem>> {
        let items = self
            .repo
            .list_by_owner_and_description_contains(user.name(), fragment)?;
        log_listed("auto_complete", items.len());
        Ok(items)
    }

    /// Creates an item owned by `user`.
    ///
    /// # Contract
    /// - Defaults are resolved per [`NewToDoRequest`].
    /// - Validation runs before persistence; a rejected request writes
    ///   nothing.
    /// - The returned item is already visible to every later query.
    pub fn create(
        &self,
        user: &CurrentUser,
        request: NewToDoRequest,
        clock: &dyn Clock,
    ) -> ServiceResult<ToDoItem> {
        let item = build_new_item(user, request, clock).inspect_err(|err| {
            info!(
                "event=todo_create module=service status=rejected field={}",
                err.field()
            );
        })?;

        let id = self.repo.create_item(&item)?;
        let created = self
            .repo
            .get_item(id)?
            .ok_or(ToDoServiceError::InconsistentState(
                "created item not found in read-back",
            ))?;
        info!("event=todo_create module=service status=ok item_id={id}");
        Ok(created)
    }

    /// Gets one item of `user`; other owners' items read as `None`.
    pub fn get_item(&self, user: &CurrentUser, id: ToDoItemId) -> ServiceResult<Option<ToDoItem>> {
        let item = self.repo.get_item(id)?;
        Ok(item.filter(|item| item.owned_by == user.name()))
    }

    /// Marks an item complete. Already-complete items are returned unchanged.
    pub fn mark_complete(&self, user: &CurrentUser, id: ToDoItemId) -> ServiceResult<ToDoItem> {
        self.toggle(user, id, "complete", ToDoItem::mark_complete)
    }

    /// Reopens an item. Already-open items are returned unchanged.
    pub fn reopen(&self, user: &CurrentUser, id: ToDoItemId) -> ServiceResult<ToDoItem> {
        self.toggle(user, id, "reopen", ToDoItem::reopen)
    }

    /// Applies field changes to an item of `user`.
    ///
    /// # Contract
    /// - The category/subcategory pairing is re-validated whenever either
    ///   changes.
    /// - A newly set due date must pass the staleness rule.
    /// - On any validation failure the stored item is left unchanged.
    pub fn update(
        &self,
        user: &CurrentUser,
        id: ToDoItemId,
        update: ToDoItemUpdate,
        clock: &dyn Clock,
    ) -> ServiceResult<ToDoItem> {
        let mut item = self.load_owned(user, id)?;
        apply_update(&mut item, update, clock)?;
        self.repo.update_item(&item)?;
        info!("event=todo_update module=service status=ok item_id={id}");

        self.repo
            .get_item(id)?
            .ok_or(ToDoServiceError::InconsistentState(
                "updated item not found in read-back",
            ))
    }

    /// Permanently deletes an item of `user`.
    pub fn delete(&self, user: &CurrentUser, id: ToDoItemId) -> ServiceResult<()> {
        self.load_owned(user, id)?;
        self.repo.delete_item(id)?;
        info!("event=todo_delete module=service status=ok item_id={id}");
        Ok(())
    }

    fn toggle(
        &self,
        user: &CurrentUser,
        id: ToDoItemId,
        action: &'static str,
        apply: fn(&mut ToDoItem),
    ) -> ServiceResult<ToDoItem> {
        let mut item = self.load_owned(user, id)?;
        let before = item.complete;
        apply(&mut item);
        if item.complete != before {
            self.repo.update_item(&item)?;
        }
        info!(
            "event=todo_{action} module=service status=ok item_id={id} changed={}",
            item.complete != before
        );
        Ok(item)
    }

    fn load_owned(&self, user: &CurrentUser, id: ToDoItemId) -> ServiceResult<ToDoItem> {
        self.get_item(user, id)?
            .ok_or(ToDoServiceError::ItemNotFound(id))
    }
}

fn build_new_item(
    user: &CurrentUser,
    request: NewToDoRequest,
    clock: &dyn Clock,
) -> Result<ToDoItem, ToDoValidationError> {
    rules::validate_description(&request.description)?;

    let category = request
        .category
        .resolve(|| Some(rules::default_category()))
        .ok_or(ToDoValidationError::MissingCategory)?;
    let subcategory = request
        .subcategory
        .resolve(|| Some(rules::default_subcategory(category)));
    rules::validate_subcategory(Some(category), subcategory)?;

    let due_by = request
        .due_by
        .resolve(|| Some(rules::default_due_by(clock)));
    if let Some(due_by) = due_by {
        rules::validate_due_by(due_by, clock)?;
    }

    let cost = request.cost.resolve(|| None);
    if let Some(cost) = cost {
        rules::validate_cost(cost)?;
    }

    let mut item = ToDoItem::new(request.description, category, user.name());
    item.subcategory = subcategory;
    item.due_by = due_by;
    item.cost = cost;
    Ok(item)
}

fn apply_update(
    item: &mut ToDoItem,
    update: ToDoItemUpdate,
    clock: &dyn Clock,
) -> Result<(), ToDoValidationError> {
    let taxonomy_changed = update.category.is_some() || update.subcategory.is_some();

    if let Some(description) = update.description {
        rules::validate_description(&description)?;
        item.description = description;
    }
    if let Some(category) = update.category {
        item.category = category;
    }
    if let Some(subcategory) = update.subcategory {
        item.subcategory = subcategory;
    }
    if taxonomy_changed {
        rules::validate_subcategory(Some(item.category), item.subcategory)?;
    }
    if let Some(due_by) = update.due_by {
        if let Some(date) = due_by {
            rules::validate_due_by(date, clock)?;
        }
        item.due_by = due_by;
    }
    if let Some(cost) = update.cost {
        if let Some(value) = cost {
            rules::validate_cost(value)?;
        }
        item.cost = cost;
    }
    Ok(())
}

fn log_listed(query: &str, count: usize) {
    debug!("event=todo_list module=service status=ok query={query} count={count}");
}

#[cfg(test)]
mod tests {
    use super::{build_new_item, CategorizedQuery, FieldInput, NewToDoRequest};
    use crate::clock::FixedClock;
    use crate::model::category::{Category, Subcategory};
    use crate::model::cost::Cost;
    use crate::model::todo_item::ToDoValidationError;
    use crate::model::user::CurrentUser;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn defaults_fill_every_unspecified_field() {
        let user = CurrentUser::new("fred").unwrap();
        let item = build_new_item(&user, NewToDoRequest::new("Plan sprint"), &clock()).unwrap();

        assert_eq!(item.category, Category::Professional);
        assert_eq!(item.subcategory, Some(Subcategory::OpenSource));
        assert_eq!(item.due_by, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(item.cost, None);
        assert_eq!(item.owned_by, "fred");
        assert!(!item.complete);
    }

    #[test]
    fn subcategory_default_follows_chosen_category() {
        let user = CurrentUser::new("fred").unwrap();
        let request = NewToDoRequest {
            category: FieldInput::Value(Category::Domestic),
            ..NewToDoRequest::new("Buy bread")
        };
        let item = build_new_item(&user, request, &clock()).unwrap();
        assert_eq!(item.subcategory, Some(Subcategory::Shopping));
    }

    #[test]
    fn explicit_unset_overrides_defaults() {
        let user = CurrentUser::new("fred").unwrap();
        let request = NewToDoRequest {
            subcategory: FieldInput::Unset,
            due_by: FieldInput::Unset,
            ..NewToDoRequest::new("Read papers")
        };
        let item = build_new_item(&user, request, &clock()).unwrap();
        assert_eq!(item.subcategory, None);
        assert_eq!(item.due_by, None);
    }

    #[test]
    fn unset_category_and_negative_cost_are_rejected() {
        let user = CurrentUser::new("fred").unwrap();
        let no_category = NewToDoRequest {
            category: FieldInput::Unset,
            ..NewToDoRequest::new("Read papers")
        };
        assert_eq!(
            build_new_item(&user, no_category, &clock()).unwrap_err(),
            ToDoValidationError::MissingCategory
        );

        let negative = NewToDoRequest {
            cost: FieldInput::Value(Cost::from_cents(-100)),
            ..NewToDoRequest::new("Read papers")
        };
        assert_eq!(
            build_new_item(&user, negative, &clock()).unwrap_err().field(),
            "cost"
        );
    }

    #[test]
    fn field_input_from_option_is_explicit() {
        assert_eq!(FieldInput::from(Some(3)), FieldInput::Value(3));
        assert_eq!(FieldInput::<i32>::from(None), FieldInput::Unset);
    }

    #[test]
    fn categorized_query_default_is_open_professional_items() {
        let query = CategorizedQuery::default();
        assert_eq!(query.category, Category::Professional);
        assert_eq!(query.subcategory, Some(Subcategory::OpenSource));
        assert!(!query.completed);
    }
}
