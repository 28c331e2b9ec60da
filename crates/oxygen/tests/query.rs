mod support;

use oxygen::{model, Direction, Model, Value};
use oxygen_core::Dialect;
use pretty_assertions::assert_eq;

model! {
    pub struct Post {
        fillable = ["title", "user_id", "published"],
    }
}

async fn seed(db: &oxygen::Db) {
    support::blog_schema(db).await;
    support::execute_all(
        db,
        &[
            "INSERT INTO posts (user_id, title, published) VALUES \
             (1, 'Hello world', 1), (1, 'Hello again', 0), (2, 'Goodbye', 1), (NULL, 'Draft', 0)",
        ],
    )
    .await
    .unwrap();
}

#[test]
fn chained_conditions_are_anded() {
    let (sql, params) = Post::query()
        .where_("title", "like", "Hello%")
        .where_in("user_id", [1, 2])
        .order_by("id", Direction::Desc)
        .limit(10)
        .to_sql(Dialect::Mysql)
        .unwrap();

    assert_eq!(
        sql,
        "SELECT * FROM `posts` WHERE `title` LIKE ? AND `user_id` IN (?, ?) ORDER BY `id` DESC LIMIT 10;"
    );
    assert_eq!(
        params,
        vec![Value::from("Hello%"), Value::I64(1), Value::I64(2)]
    );
}

#[test]
fn unsupported_operator_is_rejected() {
    let query = Post::query().where_("id", "= 1 OR 1 =", 1);
    let err = query.to_sql(Dialect::Sqlite).unwrap_err();

    assert!(err.is_query());
    assert!(err.to_string().contains("unsupported comparison operator"));
}

#[tokio::test]
async fn where_filters_rows() {
    let (db, _log) = support::connect().await;
    seed(&db).await;

    let hello = Post::where_(&db, "title", "LIKE", "Hello%").await.unwrap();
    assert_eq!(hello.len(), 2);

    let later = Post::where_(&db, "id", ">=", 3).await.unwrap();
    assert_eq!(later.len(), 2);

    assert!(Post::where_(&db, "id", "; DROP TABLE posts", 1)
        .await
        .unwrap_err()
        .is_query());

    // Rejected before anything ran.
    assert_eq!(Post::all(&db).await.unwrap().len(), 4);
}

#[tokio::test]
async fn first_count_and_paging() {
    let (db, _log) = support::connect().await;
    seed(&db).await;

    let first = Post::query()
        .where_eq("published", 1)
        .order_by("id", Direction::Desc)
        .first(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.get("title").unwrap(), Value::from("Goodbye"));

    assert_eq!(Post::query().count(&db).await.unwrap(), 4);
    assert_eq!(
        Post::query().where_null("user_id").count(&db).await.unwrap(),
        1
    );
    assert_eq!(
        Post::query()
            .where_not_in("user_id", [1])
            .count(&db)
            .await
            .unwrap(),
        1
    );

    let page = Post::query()
        .order_by("id", Direction::Asc)
        .limit(2)
        .offset(1)
        .get(&db)
        .await
        .unwrap();
    let ids: Vec<Value> = page.iter().map(|post| post.get("id").unwrap()).collect();
    assert_eq!(ids, [Value::I64(2), Value::I64(3)]);
}

#[tokio::test]
async fn empty_in_list_matches_nothing() {
    let (db, _log) = support::connect().await;
    seed(&db).await;

    let none = Post::query()
        .where_in("id", Vec::<i64>::new())
        .get(&db)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn query_delete() {
    let (db, _log) = support::connect().await;
    seed(&db).await;

    let deleted = Post::query().where_eq("user_id", 1).delete(&db).await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(Post::query().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn values_are_bound_not_interpolated() {
    let (db, log) = support::connect().await;
    seed(&db).await;
    log.clear();

    let evil = "x' OR '1'='1";
    assert!(Post::query()
        .where_eq("title", evil)
        .get(&db)
        .await
        .unwrap()
        .is_empty());
    assert!(!log.last().unwrap().contains(evil));
}
