//! Demo data for one owner.
//!
//! # Responsibility
//! - Seed a deterministic set of items used by integration tests and the
//!   CLI smoke run.
//!
//! # Invariants
//! - Installing is idempotent per owner: existing items of that owner are
//!   removed first, other owners are untouched.
//! - The seeded set holds 6 open and 2 complete items.

use crate::clock::Clock;
use crate::model::category::{Category, Subcategory};
use crate::model::cost::Cost;
use crate::model::todo_item::{ToDoItem, ToDoItemId};
use crate::model::user::CurrentUser;
use crate::repo::todo_repo::{RepoResult, ToDoItemRepository};
use chrono::Days;
use log::info;

struct Seed {
    description: &'static str,
    category: Category,
    subcategory: Subcategory,
    due_in_days: Option<u64>,
    cost_cents: Option<i64>,
    complete: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        description: "Buy bread",
        category: Category::Domestic,
        subcategory: Subcategory::Shopping,
        due_in_days: Some(0),
        cost_cents: Some(175),
        complete: false,
    },
    Seed {
        description: "Buy milk",
        category: Category::Domestic,
        subcategory: Subcategory::Shopping,
        due_in_days: Some(0),
        cost_cents: Some(75),
        complete: false,
    },
    Seed {
        description: "Buy stamps",
        category: Category::Domestic,
        subcategory: Subcategory::Shopping,
        due_in_days: Some(0),
        cost_cents: Some(1000),
        complete: true,
    },
    Seed {
        description: "Pick up laundry",
        category: Category::Other,
        subcategory: Subcategory::Chores,
        due_in_days: Some(6),
        cost_cents: Some(750),
        complete: false,
    },
    Seed {
        description: "Mow lawn",
        category: Category::Domestic,
        subcategory: Subcategory::Garden,
        due_in_days: Some(6),
        cost_cents: None,
        complete: false,
    },
    Seed {
        description: "Vacuum house",
        category: Category::Domestic,
        subcategory: Subcategory::Housework,
        due_in_days: Some(3),
        cost_cents: None,
        complete: false,
    },
    Seed {
        description: "Write blog post",
        category: Category::Professional,
        subcategory: Subcategory::Marketing,
        due_in_days: None,
        cost_cents: None,
        complete: true,
    },
    Seed {
        description: "Stage release",
        category: Category::Professional,
        subcategory: Subcategory::OpenSource,
        due_in_days: None,
        cost_cents: None,
        complete: false,
    },
];

/// Replaces all items of `owner` with the demo set.
///
/// Due dates are relative to `clock`'s today.
pub fn install_fixture<R: ToDoItemRepository>(
    repo: &R,
    owner: &CurrentUser,
    clock: &dyn Clock,
) -> RepoResult<Vec<ToDoItemId>> {
    for existing in repo.list_by_owner(owner.name())? {
        repo.delete_item(existing.uuid)?;
    }

    let today = clock.today();
    let mut ids = Vec::with_capacity(SEEDS.len());
    for seed in SEEDS {
        let mut item = ToDoItem::new(seed.description, seed.category, owner.name());
        item.subcategory = Some(seed.subcategory);
        item.due_by = seed
            .due_in_days
            .and_then(|days| today.checked_add_days(Days::new(days)));
        item.cost = seed.cost_cents.map(Cost::from_cents);
        item.complete = seed.complete;
        ids.push(repo.create_item(&item)?);
    }

    info!(
        "event=fixture_install module=fixture status=ok count={}",
        ids.len()
    );
    Ok(ids)
}
