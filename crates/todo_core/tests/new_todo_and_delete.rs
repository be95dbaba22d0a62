use chrono::NaiveDate;
use todo_core::db::open_db_in_memory;
use todo_core::{
    Category, CollectingNotifier, Cost, CurrentUser, FieldInput, FixedClock, NewToDoRequest,
    SqliteToDoItemRepository, Subcategory, ToDoItemService, ToDoItemUpdate, ToDoServiceError,
    ToDoValidationError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::at_date(date(2024, 4, 10))
}

fn fred() -> CurrentUser {
    CurrentUser::new("fred").unwrap()
}

#[test]
fn create_with_explicit_values_then_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = ToDoItemService::new(
        SqliteToDoItemRepository::try_new(&conn).unwrap(),
        CollectingNotifier::new(),
    );
    let fred = fred();
    let size = service.not_yet_complete(&fred).unwrap().len();

    let request = NewToDoRequest {
        category: FieldInput::Value(Category::Professional),
        subcategory: FieldInput::Value(Subcategory::OpenSource),
        due_by: FieldInput::Unset,
        cost: FieldInput::Unset,
        ..NewToDoRequest::new("new todo")
    };
    let created = service.create(&fred, request, &clock()).unwrap();

    assert_eq!(created.description, "new todo");
    assert_eq!(created.category, Category::Professional);
    assert_eq!(created.subcategory, Some(Subcategory::OpenSource));
    assert_eq!(created.owned_by, "fred");
    assert_eq!(created.due_by, None);
    assert_eq!(created.cost, None);
    assert!(!created.complete);

    let open = service.not_yet_complete(&fred).unwrap();
    assert_eq!(open.len(), size + 1);
    assert!(open.iter().any(|item| item.uuid == created.uuid));

    service.delete(&fred, created.uuid).unwrap();

    assert_eq!(service.not_yet_complete(&fred).unwrap().len(), size);
    assert!(service.get_item(&fred, created.uuid).unwrap().is_none());
    assert!(service.all_items(&fred).unwrap().is_empty());
    assert!(service.auto_complete(&fred, "new todo").unwrap().is_empty());
    assert!(matches!(
        service.delete(&fred, created.uuid),
        Err(ToDoServiceError::ItemNotFound(_))
    ));
}

#[test]
fn create_applies_defaults() {
    let conn = open_db_in_memory().unwrap();
    let service = ToDoItemService::new(
        SqliteToDoItemRepository::try_new(&conn).unwrap(),
        CollectingNotifier::new(),
    );

    let created = service
        .create(&fred(), NewToDoRequest::new("Submit talk"), &clock())
        .unwrap();

    assert_eq!(created.category, Category::Professional);
    assert_eq!(created.subcategory, Some(Subcategory::OpenSource));
    assert_eq!(created.due_by, Some(date(2024, 4, 24)));
    assert_eq!(created.cost, None);
}

#[test]
fn rejected_create_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = ToDoItemService::new(
        SqliteToDoItemRepository::try_new(&conn).unwrap(),
        CollectingNotifier::new(),
    );
    let fred = fred();

    let cases = [
        (NewToDoRequest::new(" leading space"), "description"),
        (NewToDoRequest::new("Buy café au lait"), "description"),
        (NewToDoRequest::new("日本語"), "description"),
        (
            NewToDoRequest {
                category: FieldInput::Value(Category::Domestic),
                subcategory: FieldInput::Value(Subcategory::Consulting),
                ..NewToDoRequest::new("Mismatch")
            },
            "subcategory",
        ),
        (
            NewToDoRequest {
                due_by: FieldInput::Value(date(2024, 4, 2)),
                ..NewToDoRequest::new("Stale")
            },
            "due_by",
        ),
        (
            NewToDoRequest {
                cost: FieldInput::Value(Cost::from_cents(-1)),
                ..NewToDoRequest::new("Refund")
            },
            "cost",
        ),
    ];

    for (request, field) in cases {
        match service.create(&fred, request, &clock()) {
            Err(ToDoServiceError::Validation(err)) => assert_eq!(err.field(), field),
            other => panic!("expected {field} validation error, got {other:?}"),
        }
    }
    assert!(service.all_items(&fred).unwrap().is_empty());
}

#[test]
fn due_by_exactly_one_week_old_is_accepted() {
    let conn = open_db_in_memory().unwrap();
    let service = ToDoItemService::new(
        SqliteToDoItemRepository::try_new(&conn).unwrap(),
        CollectingNotifier::new(),
    );

    let request = NewToDoRequest {
        due_by: FieldInput::Value(date(2024, 4, 3)),
        ..NewToDoRequest::new("Overdue but recent")
    };
    let created = service.create(&fred(), request, &clock()).unwrap();
    assert_eq!(created.due_by, Some(date(2024, 4, 3)));
}

#[test]
fn update_revalidates_taxonomy_and_leaves_item_unchanged_on_failure() {
    let conn = open_db_in_memory().unwrap();
    let service = ToDoItemService::new(
        SqliteToDoItemRepository::try_new(&conn).unwrap(),
        CollectingNotifier::new(),
    );
    let fred = fred();
    let created = service
        .create(&fred, NewToDoRequest::new("Stage release"), &clock())
        .unwrap();

    let category_only = ToDoItemUpdate {
        category: Some(Category::Domestic),
        ..ToDoItemUpdate::default()
    };
    let err = service
        .update(&fred, created.uuid, category_only, &clock())
        .unwrap_err();
    assert!(matches!(
        err,
        ToDoServiceError::Validation(ToDoValidationError::InvalidSubcategory {
            category: Category::Domestic,
            subcategory: Subcategory::OpenSource,
        })
    ));
    assert_eq!(
        service.get_item(&fred, created.uuid).unwrap().unwrap(),
        created
    );

    let recategorized = ToDoItemUpdate {
        description: Some("Mow lawn".to_string()),
        category: Some(Category::Domestic),
        subcategory: Some(Some(Subcategory::Garden)),
        due_by: Some(None),
        cost: Some(Some(Cost::parse("12.50").unwrap())),
    };
    let updated = service
        .update(&fred, created.uuid, recategorized, &clock())
        .unwrap();
    assert_eq!(updated.description, "Mow lawn");
    assert_eq!(updated.category, Category::Domestic);
    assert_eq!(updated.subcategory, Some(Subcategory::Garden));
    assert_eq!(updated.due_by, None);
    assert_eq!(updated.cost, Some(Cost::from_cents(1250)));
    assert_eq!(updated.uuid, created.uuid);
}

#[test]
fn update_rejects_stale_due_date_but_keeps_existing_one() {
    let conn = open_db_in_memory().unwrap();
    let service = ToDoItemService::new(
        SqliteToDoItemRepository::try_new(&conn).unwrap(),
        CollectingNotifier::new(),
    );
    let fred = fred();
    let created = service
        .create(&fred, NewToDoRequest::new("Renew passport"), &clock())
        .unwrap();

    let stale = ToDoItemUpdate {
        due_by: Some(Some(date(2024, 1, 1))),
        ..ToDoItemUpdate::default()
    };
    assert!(matches!(
        service.update(&fred, created.uuid, stale, &clock()),
        Err(ToDoServiceError::Validation(ToDoValidationError::DueByTooOld(_)))
    ));

    // Unrelated edits on an item whose stored date has aged are still allowed.
    let later = FixedClock::at_date(date(2024, 6, 1));
    let renamed = ToDoItemUpdate {
        description: Some("Renew passport now".to_string()),
        ..ToDoItemUpdate::default()
    };
    let updated = service
        .update(&fred, created.uuid, renamed, &later)
        .unwrap();
    assert_eq!(updated.due_by, created.due_by);
}
