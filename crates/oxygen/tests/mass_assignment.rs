mod support;

use oxygen::{attributes, model, Model, Value};

model! {
    pub struct Post {
        fillable = ["title", "body"],
    }
}

#[tokio::test]
async fn create_ignores_attributes_outside_fillable() {
    let (db, log) = support::connect().await;
    support::blog_schema(&db).await;
    log.clear();

    let post = Post::create(
        &db,
        attributes! { "title" => "T", "body" => "B", "admin" => true },
    )
    .await
    .unwrap();

    assert!(post.record().get("admin").is_none());

    let insert = log.last().unwrap();
    assert!(!insert.contains("admin"), "{insert}");

    let fetched = Post::find_or_fail(&db, post.key().unwrap().clone())
        .await
        .unwrap();
    assert_eq!(fetched.get("title").unwrap(), Value::from("T"));
    assert_eq!(fetched.get("body").unwrap(), Value::from("B"));

    // The column keeps its default.
    assert_eq!(fetched.get("admin").unwrap(), Value::I64(0));
}

#[tokio::test]
async fn set_bypasses_mass_assignment() {
    let (db, _log) = support::connect().await;
    support::blog_schema(&db).await;

    let mut post = Post::new();
    post.fill(attributes! { "title" => "T", "admin" => true });
    assert!(post.record().get("admin").is_none());

    post.set("admin", true);
    post.save(&db).await.unwrap();

    let fetched = Post::find_or_fail(&db, 1).await.unwrap();
    assert_eq!(fetched.get("admin").unwrap(), Value::I64(1));
}
