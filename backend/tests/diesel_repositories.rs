//! Integration tests for the Diesel repositories against a SQLite file.
//!
//! Each test gets its own migrated database in a temporary directory, so the
//! suite runs without any external service.

use calculator_backend::domain::ports::{
    CalculationPersistenceError, CalculationRepository, UserRepository,
};
use calculator_backend::domain::{NewCalculation, User, UserId, Username};
use rstest::{fixture, rstest};

mod support;

use support::SqliteFixture;

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

#[fixture]
fn ada() -> Username {
    Username::new("ada").expect("valid username")
}

fn record(owner: &User, expression: &str, result: &str) -> NewCalculation {
    NewCalculation::try_new(owner.id(), expression, result, None, None).expect("valid record")
}

// -----------------------------------------------------------------------------
// Users
// -----------------------------------------------------------------------------

#[rstest]
#[tokio::test]
async fn user_insert_then_lookup_round_trips(ada: Username) {
    let db = SqliteFixture::new().await;
    let users = db.users();

    let created = users.insert(&ada).await.expect("insert succeeds");
    assert_eq!(created.username(), &ada);

    let found = users
        .find_by_username("ada")
        .await
        .expect("lookup succeeds")
        .expect("user exists");
    assert_eq!(found, created);
}

#[rstest]
#[tokio::test]
async fn duplicate_insert_returns_existing_row(ada: Username) {
    let db = SqliteFixture::new().await;
    let users = db.users();

    let first = users.insert(&ada).await.expect("first insert");
    let second = users.insert(&ada).await.expect("second insert");
    assert_eq!(first, second);
}

#[rstest]
#[tokio::test]
async fn username_lookup_is_exact(ada: Username) {
    let db = SqliteFixture::new().await;
    let users = db.users();
    users.insert(&ada).await.expect("insert succeeds");

    for probe in ["Ada", "ada ", "ad"] {
        assert!(
            users.find_by_username(probe).await.expect("lookup").is_none(),
            "{probe:?} should not match"
        );
    }
}

// -----------------------------------------------------------------------------
// Calculations
// -----------------------------------------------------------------------------

#[rstest]
#[tokio::test]
async fn calculations_list_newest_first_per_owner(ada: Username) {
    let db = SqliteFixture::new().await;
    let users = db.users();
    let calculations = db.calculations();
    let owner = users.insert(&ada).await.expect("insert ada");
    let other = users
        .insert(&Username::new("grace").expect("valid username"))
        .await
        .expect("insert grace");

    for (expression, result) in [("1+1", "2"), ("2+2", "4"), ("3+3", "6")] {
        calculations
            .insert(&record(&owner, expression, result))
            .await
            .expect("save");
    }
    calculations
        .insert(&record(&other, "9*9", "81"))
        .await
        .expect("save other");

    let listed = calculations.list_for_user(owner.id()).await.expect("list");
    let expressions: Vec<_> = listed.iter().map(|c| c.expression.as_str()).collect();
    assert_eq!(expressions, ["3+3", "2+2", "1+1"]);
    assert!(listed.iter().all(|c| c.kind.as_ref() == "basic"));
}

#[rstest]
#[tokio::test]
async fn optional_fields_are_persisted(ada: Username) {
    let db = SqliteFixture::new().await;
    let owner = db.users().insert(&ada).await.expect("insert");
    let calculations = db.calculations();

    let new = NewCalculation::try_new(
        owner.id(),
        "sqrt(16)",
        "4",
        Some("scientific".to_owned()),
        Some("root".to_owned()),
    )
    .expect("valid record");
    let saved = calculations.insert(&new).await.expect("save");

    let listed = calculations.list_for_user(owner.id()).await.expect("list");
    assert_eq!(listed, vec![saved.clone()]);
    assert_eq!(saved.kind.as_ref(), "scientific");
    assert_eq!(saved.custom_name.as_deref(), Some("root"));
}

#[rstest]
#[tokio::test]
async fn deletes_are_scoped_to_owner(ada: Username) {
    let db = SqliteFixture::new().await;
    let users = db.users();
    let calculations = db.calculations();
    let owner = users.insert(&ada).await.expect("insert ada");
    let other = users
        .insert(&Username::new("grace").expect("valid username"))
        .await
        .expect("insert grace");
    let saved = calculations
        .insert(&record(&owner, "1+1", "2"))
        .await
        .expect("save");

    assert!(
        !calculations
            .delete_for_user(other.id(), saved.id)
            .await
            .expect("foreign delete")
    );
    assert!(
        calculations
            .delete_for_user(owner.id(), saved.id)
            .await
            .expect("owner delete")
    );
    assert!(
        !calculations
            .delete_for_user(owner.id(), saved.id)
            .await
            .expect("repeat delete")
    );
}

#[rstest]
#[tokio::test]
async fn delete_all_reports_removed_rows(ada: Username) {
    let db = SqliteFixture::new().await;
    let owner = db.users().insert(&ada).await.expect("insert");
    let calculations = db.calculations();
    for expression in ["1", "2", "3"] {
        calculations
            .insert(&record(&owner, expression, expression))
            .await
            .expect("save");
    }

    assert_eq!(
        calculations
            .delete_all_for_user(owner.id())
            .await
            .expect("clear"),
        3
    );
    assert_eq!(
        calculations
            .delete_all_for_user(owner.id())
            .await
            .expect("clear again"),
        0
    );
}

#[rstest]
#[tokio::test]
async fn delete_all_leaves_other_users_untouched(ada: Username) {
    let db = SqliteFixture::new().await;
    let users = db.users();
    let owner = users.insert(&ada).await.expect("insert ada");
    let other = users
        .insert(&Username::new("grace").expect("valid username"))
        .await
        .expect("insert grace");
    let calculations = db.calculations();
    for expression in ["1+1", "2+2"] {
        calculations
            .insert(&record(&owner, expression, "2"))
            .await
            .expect("save ada");
    }
    for expression in ["3*3", "4*4", "5*5"] {
        calculations
            .insert(&record(&other, expression, "9"))
            .await
            .expect("save grace");
    }
    let before = calculations
        .list_for_user(other.id())
        .await
        .expect("list grace");

    assert_eq!(
        calculations
            .delete_all_for_user(owner.id())
            .await
            .expect("clear ada"),
        2
    );
    assert!(
        calculations
            .list_for_user(owner.id())
            .await
            .expect("list ada")
            .is_empty()
    );
    assert_eq!(
        calculations
            .list_for_user(other.id())
            .await
            .expect("list grace again"),
        before
    );
}

#[rstest]
#[tokio::test]
async fn foreign_keys_are_enforced() {
    let db = SqliteFixture::new().await;
    let orphan =
        NewCalculation::try_new(UserId::new(404), "1", "1", None, None).expect("valid record");

    let err = db
        .calculations()
        .insert(&orphan)
        .await
        .expect_err("missing owner is rejected");
    assert_eq!(
        err,
        CalculationPersistenceError::query("referenced record does not exist")
    );
}
