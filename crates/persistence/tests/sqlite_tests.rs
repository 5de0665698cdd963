//! SQLite backend integration tests.
//!
//! These tests exercise the `RecordStore` implementation against a real
//! SQLite database.

use roster_persistence::backends::sqlite::SqliteBackend;
use roster_persistence::core::RecordStore;
use roster_persistence::error::{ResourceError, StorageError, ValidationError};
use roster_persistence::types::{
    ApplicationUpdate, CountArgs, FieldFilter, FindManyArgs, NewApplication, OrderBy, Scalar,
    SortClause, WhereClause,
};

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

async fn insert(backend: &SqliteBackend, username: &str, email: &str) -> String {
    backend
        .create(NewApplication::new(username, email))
        .await
        .expect("insert failed")
        .id
}

fn predicate(field: &str, filter: FieldFilter) -> WhereClause {
    let mut clause = WhereClause::new();
    clause.insert(field, filter);
    clause
}

// ============================================================================
// CRUD
// ============================================================================

#[tokio::test]
async fn test_create_assigns_id() {
    let backend = create_backend();

    let created = backend
        .create(NewApplication::new("ada", "ada@example.com"))
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.username, "ada");
    assert_eq!(backend.find_unique(&created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let backend = create_backend();
    insert(&backend, "ada", "ada@example.com").await;

    let err = backend
        .create(NewApplication::new("other", "ada@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StorageError::Resource(ResourceError::AlreadyExists { ref field, .. }) if field == "email"
    ));
}

#[tokio::test]
async fn test_find_unique_missing() {
    let backend = create_backend();
    assert!(backend.find_unique("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_partial() {
    let backend = create_backend();
    let id = insert(&backend, "ada", "ada@example.com").await;

    let updated = backend
        .update(
            &id,
            ApplicationUpdate {
                username: None,
                email: Some("lovelace@example.com".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username, "ada");
    assert_eq!(updated.email, "lovelace@example.com");

    let unchanged = backend.update(&id, ApplicationUpdate::default()).await.unwrap();
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn test_update_missing_and_conflicting() {
    let backend = create_backend();
    let id = insert(&backend, "ada", "ada@example.com").await;
    insert(&backend, "grace", "grace@example.com").await;

    let err = backend
        .update("nope", ApplicationUpdate { username: Some("x".into()), email: None })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Resource(ResourceError::NotFound { .. })));

    let err = backend
        .update(&id, ApplicationUpdate { username: None, email: Some("grace@example.com".into()) })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Resource(ResourceError::AlreadyExists { .. })));
}

#[tokio::test]
async fn test_delete() {
    let backend = create_backend();
    let id = insert(&backend, "ada", "ada@example.com").await;

    backend.delete(&id).await.unwrap();
    assert!(backend.find_unique(&id).await.unwrap().is_none());

    let err = backend.delete(&id).await.unwrap_err();
    assert_eq!(err.to_string(), format!("application not found: {}", id));
}

// ============================================================================
// Bounded reads
// ============================================================================

#[tokio::test]
async fn test_find_many_without_args_returns_insertion_order() {
    let backend = create_backend();
    for name in ["c", "a", "b"] {
        insert(&backend, name, &format!("{}@example.com", name)).await;
    }

    let all = backend.find_many(&FindManyArgs::new()).await.unwrap();
    let names: Vec<_> = all.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[tokio::test]
async fn test_find_many_skip_take_order() {
    let backend = create_backend();
    for i in 0..25 {
        insert(&backend, &format!("user{:02}", i), &format!("u{:02}@example.com", i)).await;
    }

    let args = FindManyArgs::new()
        .with_skip(20)
        .with_take(10)
        .with_order_by(OrderBy::from(vec![SortClause::new("username", "desc")]));
    let page = backend.find_many(&args).await.unwrap();

    let names: Vec<_> = page.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, ["user04", "user03", "user02", "user01", "user00"]);
}

#[tokio::test]
async fn test_operators() {
    let backend = create_backend();
    insert(&backend, "ada", "ada@gov.bc.ca").await;
    insert(&backend, "Adam", "adam@example.com").await;
    insert(&backend, "grace", "grace@gov.bc.ca").await;

    let cases: Vec<(WhereClause, u64)> = vec![
        (predicate("username", FieldFilter::Contains(Scalar::from("ad"))), 1),
        (predicate("email", FieldFilter::Contains(Scalar::from("@gov"))), 2),
        (predicate("username", FieldFilter::Equals(Some(Scalar::from("grace")))), 1),
        (
            predicate(
                "username",
                FieldFilter::Not(Box::new(FieldFilter::Equals(Some(Scalar::from("grace"))))),
            ),
            2,
        ),
        (predicate("username", FieldFilter::Gt(Scalar::from("b"))), 1),
        (predicate("username", FieldFilter::Lte(Scalar::from("ada"))), 2),
        (
            predicate(
                "username",
                FieldFilter::In(vec![Scalar::from("ada"), Scalar::from("grace")]),
            ),
            2,
        ),
        (
            predicate(
                "username",
                FieldFilter::Not(Box::new(FieldFilter::In(vec![Scalar::from("ada")]))),
            ),
            2,
        ),
        (predicate("username", FieldFilter::In(vec![])), 0),
        (predicate("email", FieldFilter::Equals(None)), 0),
    ];

    for (clause, expected) in cases {
        let args = CountArgs {
            order_by: OrderBy::new(),
            predicate: clause.clone(),
        };
        assert_eq!(backend.count(&args).await.unwrap(), expected, "predicate {:?}", clause);

        let rows = backend
            .find_many(&FindManyArgs::new().with_predicate(clause))
            .await
            .unwrap();
        assert_eq!(rows.len() as u64, expected);
    }
}

#[tokio::test]
async fn test_operands_are_bound_not_interpolated() {
    let backend = create_backend();
    insert(&backend, "ada", "ada@example.com").await;

    let clause = predicate(
        "username",
        FieldFilter::Equals(Some(Scalar::from("x' OR '1'='1"))),
    );
    let rows = backend
        .find_many(&FindManyArgs::new().with_predicate(clause))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_unknown_field_and_direction_are_rejected() {
    let backend = create_backend();

    let by_name = FindManyArgs::new().with_predicate(predicate(
        "name",
        FieldFilter::Equals(Some(Scalar::from("Peter"))),
    ));
    let err = backend.find_many(&by_name).await.unwrap_err();
    assert!(matches!(err, StorageError::Validation(ValidationError::UnknownField { .. })));

    let bad_direction = CountArgs {
        order_by: OrderBy::from(vec![SortClause::new("email", "sideways")]),
        predicate: WhereClause::new(),
    };
    let err = backend.count(&bad_direction).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Validation(ValidationError::InvalidSortDirection { .. })
    ));
}

#[tokio::test]
async fn test_file_backend_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.db");

    let id = {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.init_schema().unwrap();
        insert(&backend, "ada", "ada@example.com").await
    };

    let reopened = SqliteBackend::open(&path).unwrap();
    reopened.init_schema().unwrap();
    assert!(reopened.find_unique(&id).await.unwrap().is_some());
}
