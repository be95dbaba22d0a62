//! To-do item domain model.
//!
//! # Responsibility
//! - Define the canonical mutable record for one task.
//! - Provide completion toggles and clock-independent validation.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another item.
//! - `subcategory`, when set, is permitted by `category`.
//! - `cost`, when set, is not negative.
//! - `owned_by` is never blank.

use crate::model::category::{Category, Subcategory};
use crate::model::cost::Cost;
use crate::model::rules;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a to-do item.
pub type ToDoItemId = Uuid;

/// Rejected input for a to-do item, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToDoValidationError {
    /// Description does not match the accepted pattern.
    InvalidDescription(String),
    /// No category chosen.
    MissingCategory,
    /// Subcategory is not in the category's permitted list.
    InvalidSubcategory {
        category: Category,
        subcategory: Subcategory,
    },
    /// Due date is more than one week before today.
    DueByTooOld(NaiveDate),
    /// Cost is below zero.
    NegativeCost(Cost),
    /// Owner name is blank.
    BlankOwner,
}

impl ToDoValidationError {
    /// Name of the field the error is attached to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDescription(_) => "description",
            Self::MissingCategory => "category",
            Self::InvalidSubcategory { .. } => "subcategory",
            Self::DueByTooOld(_) => "due_by",
            Self::NegativeCost(_) => "cost",
            Self::BlankOwner => "owned_by",
        }
    }
}

impl Display for ToDoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDescription(value) => write!(f, "invalid description: `{value}`"),
            Self::MissingCategory => write!(f, "Enter category first"),
            Self::InvalidSubcategory { category, .. } => {
                write!(f, "Invalid subcategory for category '{category}'")
            }
            Self::DueByTooOld(_) => write!(f, "Due by date cannot be more than one week old"),
            Self::NegativeCost(cost) => write!(f, "cost cannot be negative: {cost}"),
            Self::BlankOwner => write!(f, "owner must not be blank"),
        }
    }
}

impl Error for ToDoValidationError {}

/// One task owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    pub uuid: ToDoItemId,
    pub description: String,
    pub category: Category,
    pub subcategory: Option<Subcategory>,
    pub owned_by: String,
    pub due_by: Option<NaiveDate>,
    pub cost: Option<Cost>,
    pub complete: bool,
}

impl ToDoItem {
    /// Creates an open item with a generated ID and no subcategory, due date
    /// or cost.
    pub fn new(
        description: impl Into<String>,
        category: Category,
        owned_by: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), description, category, owned_by)
    }

    /// Creates an open item with a caller-provided ID.
    ///
    /// Used by fixtures and tests that need deterministic identity.
    pub fn with_id(
        uuid: ToDoItemId,
        description: impl Into<String>,
        category: Category,
        owned_by: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            description: description.into(),
            category,
            subcategory: None,
            owned_by: owned_by.into(),
            due_by: None,
            cost: None,
            complete: false,
        }
    }

    /// Marks the item done. Calling it on a complete item is a no-op.
    pub fn mark_complete(&mut self) {
        self.complete = true;
    }

    /// Marks the item not done. Calling it on an open item is a no-op.
    pub fn reopen(&mut self) {
        self.complete = false;
    }

    /// Checks every invariant that does not depend on the current time.
    ///
    /// Due-date staleness is checked at create/update time by the service,
    /// because an item legitimately ages past that threshold while stored.
    pub fn validate(&self) -> Result<(), ToDoValidationError> {
        rules::validate_description(&self.description)?;
        if self.owned_by.trim().is_empty() {
            return Err(ToDoValidationError::BlankOwner);
        }
        rules::validate_subcategory(Some(self.category), self.subcategory)?;
        if let Some(cost) = self.cost {
            rules::validate_cost(cost)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ToDoItem, ToDoValidationError};
    use crate::model::category::{Category, Subcategory};
    use crate::model::cost::Cost;

    #[test]
    fn new_item_starts_open_with_optional_fields_unset() {
        let item = ToDoItem::new("Buy milk", Category::Domestic, "fred");
        assert!(!item.complete);
        assert_eq!(item.subcategory, None);
        assert_eq!(item.due_by, None);
        assert_eq!(item.cost, None);
        item.validate().unwrap();
    }

    #[test]
    fn complete_and_reopen_are_idempotent() {
        let mut item = ToDoItem::new("Buy milk", Category::Domestic, "fred");
        item.mark_complete();
        item.mark_complete();
        assert!(item.complete);
        item.reopen();
        item.reopen();
        assert!(!item.complete);
    }

    #[test]
    fn validate_rejects_mismatched_subcategory() {
        let mut item = ToDoItem::new("Mow lawn", Category::Professional, "fred");
        item.subcategory = Some(Subcategory::Garden);
        let err = item.validate().unwrap_err();
        assert_eq!(err.field(), "subcategory");
        assert_eq!(err.to_string(), "Invalid subcategory for category 'Professional'");
    }

    #[test]
    fn validate_rejects_blank_owner_and_negative_cost() {
        let blank_owner = ToDoItem::new("Buy milk", Category::Domestic, "  ");
        assert_eq!(blank_owner.validate(), Err(ToDoValidationError::BlankOwner));

        let mut negative = ToDoItem::new("Buy milk", Category::Domestic, "fred");
        negative.cost = Some(Cost::from_cents(-1));
        assert_eq!(negative.validate().unwrap_err().field(), "cost");
    }

    #[test]
    fn serializes_taxonomy_as_snake_case() {
        let mut item = ToDoItem::new("Stage release", Category::Professional, "fred");
        item.subcategory = Some(Subcategory::OpenSource);
        item.cost = Some(Cost::from_cents(1999));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "professional");
        assert_eq!(json["subcategory"], "open_source");
        assert_eq!(json["cost"], 1999);
        assert_eq!(json["complete"], false);
    }
}
