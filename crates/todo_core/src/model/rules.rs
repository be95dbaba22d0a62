//! Validation and default-value rules for to-do input.
//!
//! # Responsibility
//! - Field validators shared by creation, update and repository writes.
//! - Pure default-value providers for creation input.
//!
//! # Invariants
//! - Validators have no side effects.
//! - Defaults depend only on the clock and the fixed taxonomy; callers may
//!   override every one of them.

use crate::clock::Clock;
use crate::model::category::{Category, Subcategory};
use crate::model::cost::Cost;
use crate::model::todo_item::ToDoValidationError;
use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Days added to today for the default due date.
pub const DEFAULT_DUE_IN_DAYS: u64 = 14;
/// Oldest accepted due date, in days before today.
pub const MAX_DUE_BY_AGE_DAYS: u64 = 7;

static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_][@&:\-,.+ A-Za-z0-9_]*$").expect("valid description regex")
});

/// Description must start with an ASCII word character (`A-Z a-z 0-9 _`)
/// and contain only ASCII word characters, spaces and `@ & : - , . +`.
pub fn validate_description(description: &str) -> Result<(), ToDoValidationError> {
    if DESCRIPTION_RE.is_match(description) {
        Ok(())
    } else {
        Err(ToDoValidationError::InvalidDescription(
            description.to_string(),
        ))
    }
}

/// Checks that `subcategory` belongs to `category`.
///
/// An unset subcategory always passes once a category is chosen.
pub fn validate_subcategory(
    category: Option<Category>,
    subcategory: Option<Subcategory>,
) -> Result<(), ToDoValidationError> {
    let category = category.ok_or(ToDoValidationError::MissingCategory)?;
    match subcategory {
        Some(subcategory) if !category.permits(subcategory) => {
            Err(ToDoValidationError::InvalidSubcategory {
                category,
                subcategory,
            })
        }
        _ => Ok(()),
    }
}

/// Rejects a due date more than seven days before the clock's today.
pub fn validate_due_by(due_by: NaiveDate, clock: &dyn Clock) -> Result<(), ToDoValidationError> {
    if is_more_than_one_week_in_past(due_by, clock.today()) {
        Err(ToDoValidationError::DueByTooOld(due_by))
    } else {
        Ok(())
    }
}

pub fn validate_cost(cost: Cost) -> Result<(), ToDoValidationError> {
    if cost.is_negative() {
        Err(ToDoValidationError::NegativeCost(cost))
    } else {
        Ok(())
    }
}

pub fn default_category() -> Category {
    Category::Professional
}

pub fn default_subcategory(category: Category) -> Subcategory {
    category.first_subcategory()
}

/// Today plus two weeks.
pub fn default_due_by(clock: &dyn Clock) -> NaiveDate {
    let today = clock.today();
    today
        .checked_add_days(Days::new(DEFAULT_DUE_IN_DAYS))
        .unwrap_or(today)
}

fn is_more_than_one_week_in_past(due_by: NaiveDate, today: NaiveDate) -> bool {
    match today.checked_sub_days(Days::new(MAX_DUE_BY_AGE_DAYS)) {
        Some(oldest_accepted) => due_by < oldest_accepted,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        default_due_by, default_subcategory, validate_description, validate_due_by,
        validate_subcategory,
    };
    use crate::clock::FixedClock;
    use crate::model::category::{Category, Subcategory};
    use crate::model::todo_item::ToDoValidationError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn description_accepts_punctuated_text() {
        for ok in [
            "new todo",
            "Buy milk",
            "Email bob@example.com re: invoice, v1.2 + notes",
            "R&D - phase 2",
            "x",
        ] {
            validate_description(ok).unwrap_or_else(|_| panic!("`{ok}` should pass"));
        }
    }

    #[test]
    fn description_rejects_bad_start_or_characters() {
        for bad in [
            "",
            " leading space",
            "-dash first",
            "semi;colon",
            "bang!",
            "a\nb",
            "café",
            "Ünïcödé task",
            "日本語",
        ] {
            assert!(
                matches!(
                    validate_description(bad),
                    Err(ToDoValidationError::InvalidDescription(_))
                ),
                "`{bad:?}` should fail"
            );
        }
    }

    #[test]
    fn subcategory_requires_category_and_membership() {
        assert_eq!(
            validate_subcategory(None, None),
            Err(ToDoValidationError::MissingCategory)
        );
        assert!(validate_subcategory(Some(Category::Domestic), None).is_ok());
        assert!(validate_subcategory(Some(Category::Domestic), Some(Subcategory::Garden)).is_ok());
        assert_eq!(
            validate_subcategory(Some(Category::Domestic), Some(Subcategory::Consulting)),
            Err(ToDoValidationError::InvalidSubcategory {
                category: Category::Domestic,
                subcategory: Subcategory::Consulting,
            })
        );
    }

    #[test]
    fn due_by_boundary_is_seven_days() {
        let clock = FixedClock::at_date(date(2024, 5, 20));
        assert!(validate_due_by(date(2024, 5, 13), &clock).is_ok());
        assert!(validate_due_by(date(2024, 5, 20), &clock).is_ok());
        assert!(validate_due_by(date(2030, 1, 1), &clock).is_ok());
        assert_eq!(
            validate_due_by(date(2024, 5, 12), &clock),
            Err(ToDoValidationError::DueByTooOld(date(2024, 5, 12)))
        );
    }

    #[test]
    fn defaults_follow_clock_and_taxonomy() {
        let clock = FixedClock::at_date(date(2024, 12, 25));
        assert_eq!(default_due_by(&clock), date(2025, 1, 8));
        assert_eq!(default_subcategory(Category::Domestic), Subcategory::Shopping);
    }
}
