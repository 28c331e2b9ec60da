mod support;

use oxygen::{attributes, model, Cast, Model, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

model! {
    pub struct User {
        fillable = ["name", "email", "password"],
        hidden = ["password"],
        casts = [("is_admin", Cast::Boolean)],
    }
}

model! {
    pub struct Post {
        fillable = ["title", "body", "user_id", "published", "meta"],
        casts = [
            ("published", Cast::Boolean),
            ("meta", Cast::Array),
            ("created_at", Cast::DateTime),
        ],
        timestamps = true,
    }
}

model! {
    pub struct Role {
        guarded = ["id"],
    }
}

model! {
    /// Nothing is mass assignable.
    pub struct Profile {}
}

#[test]
fn metadata() {
    assert_eq!(User::table(), "users");
    assert_eq!(User::PRIMARY_KEY, "id");
    assert_eq!(User::foreign_key(), "user_id");
    assert_eq!(Post::name(), "Post");
}

#[test]
fn fillable_rules() {
    assert!(Post::is_fillable("title"));
    assert!(!Post::is_fillable("admin"));

    // Only `GUARDED`: everything else is fillable.
    assert!(Role::is_fillable("name"));
    assert!(!Role::is_fillable("id"));

    // Neither list: nothing is.
    assert!(!Profile::is_fillable("bio"));
}

#[tokio::test]
async fn create_inserts_and_assigns_the_key() {
    let (db, log) = support::connect().await;
    support::blog_schema(&db).await;
    log.clear();

    let user = User::create(
        &db,
        attributes! { "name" => "Ada", "email" => "ada@example.com" },
    )
    .await
    .unwrap();

    assert!(user.exists());
    assert_eq!(user.key(), Some(&Value::I64(1)));
    assert!(!user.is_dirty());
    assert_eq!(
        log.statements(),
        vec![r#"INSERT INTO "users" ("name", "email") VALUES (?1, ?2);"#.to_string()]
    );

    let found = User::find(&db, 1).await.unwrap().unwrap();
    assert_eq!(found.get("name").unwrap(), Value::from("Ada"));
    assert_eq!(found.get("email").unwrap(), Value::from("ada@example.com"));
}

#[tokio::test]
async fn find_missing_row() {
    let (db, _log) = support::connect().await;
    support::blog_schema(&db).await;

    assert!(User::find(&db, 99).await.unwrap().is_none());

    let err = User::find_or_fail(&db, 99).await.unwrap_err();
    assert!(err.is_record_not_found());
    assert!(err.to_string().contains("users"));
}

#[tokio::test]
async fn save_updates_only_dirty_attributes() {
    let (db, log) = support::connect().await;
    support::blog_schema(&db).await;

    let mut user = User::create(&db, attributes! { "name" => "Ada", "email" => "a@x.io" })
        .await
        .unwrap();
    log.clear();

    // Clean instance: nothing to send.
    user.save(&db).await.unwrap();
    assert_eq!(log.len(), 0);

    user.set("email", "ada@example.com");
    assert!(user.is_dirty());
    user.save(&db).await.unwrap();

    assert_eq!(
        log.statements(),
        vec![r#"UPDATE "users" SET "email" = ?1 WHERE "id" = ?2;"#.to_string()]
    );
    assert!(!user.is_dirty());

    let reloaded = User::find_or_fail(&db, 1).await.unwrap();
    assert_eq!(reloaded.get("email").unwrap(), Value::from("ada@example.com"));
}

#[tokio::test]
async fn static_update_and_destroy() {
    let (db, _log) = support::connect().await;
    support::blog_schema(&db).await;

    User::create(&db, attributes! { "name" => "Ada" }).await.unwrap();

    let updated = User::update(&db, 1, attributes! { "name" => "Grace", "is_admin" => true })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.get("name").unwrap(), Value::from("Grace"));

    // `is_admin` is not fillable.
    let fresh = User::find_or_fail(&db, 1).await.unwrap();
    assert_eq!(fresh.get("is_admin").unwrap(), Value::Bool(false));

    assert!(User::update(&db, 42, attributes! { "name" => "Nobody" })
        .await
        .unwrap()
        .is_none());

    assert_eq!(User::destroy(&db, 1).await.unwrap(), 1);
    assert_eq!(User::destroy(&db, 1).await.unwrap(), 0);
    assert!(User::all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_instance() {
    let (db, _log) = support::connect().await;
    support::blog_schema(&db).await;

    let mut user = User::create(&db, attributes! { "name" => "Ada" }).await.unwrap();
    assert!(user.delete(&db).await.unwrap());
    assert!(!user.exists());

    // Already gone.
    assert!(!user.delete(&db).await.unwrap());

    let mut unsaved = User::new();
    assert!(!unsaved.delete(&db).await.unwrap());
}

#[tokio::test]
async fn refresh_discards_unsaved_changes() {
    let (db, _log) = support::connect().await;
    support::blog_schema(&db).await;

    let mut user = User::create(&db, attributes! { "name" => "Ada" }).await.unwrap();
    user.set("name", "Changed");
    user.refresh(&db).await.unwrap();

    assert_eq!(user.get("name").unwrap(), Value::from("Ada"));
    assert_eq!(user.get("is_admin").unwrap(), Value::Bool(false));
    assert!(!user.is_dirty());

    assert!(User::new().refresh(&db).await.unwrap_err().is_record_not_found());
}

#[tokio::test]
async fn casts_and_timestamps() {
    let (db, _log) = support::connect().await;
    support::blog_schema(&db).await;

    let post = Post::create(
        &db,
        attributes! {
            "title" => "Hello",
            "published" => true,
            "meta" => json!({ "tags": ["rust"] }),
        },
    )
    .await
    .unwrap();

    assert!(matches!(post.get("created_at").unwrap(), Value::DateTime(_)));
    assert_eq!(post.get("created_at").unwrap(), post.get("updated_at").unwrap());

    let post = Post::find_or_fail(&db, 1).await.unwrap();

    // Stored as an integer and as JSON text.
    assert_eq!(post.record().get("published"), Some(&Value::I64(1)));
    assert_eq!(post.get("published").unwrap(), Value::Bool(true));
    assert_eq!(
        post.get("meta").unwrap(),
        Value::Json(json!({ "tags": ["rust"] }))
    );
    assert!(matches!(post.get("created_at").unwrap(), Value::DateTime(_)));
}

#[tokio::test]
async fn serialization_hides_attributes() {
    let (db, _log) = support::connect().await;
    support::blog_schema(&db).await;

    User::create(
        &db,
        attributes! { "name" => "Ada", "email" => "ada@example.com", "password" => "hunter2" },
    )
    .await
    .unwrap();

    let user = User::find_or_fail(&db, 1).await.unwrap();
    let array = user.to_array();
    assert!(!array.contains_key("password"));
    assert_eq!(array.get("is_admin"), Some(&Value::Bool(false)));

    assert_eq!(
        user.to_json().unwrap(),
        json!({
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "is_admin": false,
        })
    );

    // Hidden from serialization, still readable.
    assert_eq!(user.get("password").unwrap(), Value::from("hunter2"));
}
