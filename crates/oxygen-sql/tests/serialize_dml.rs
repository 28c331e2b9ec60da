use indexmap::IndexMap;
use oxygen_core::Value;
use oxygen_sql::{
    stmt::{Condition, Delete, Direction, Insert, Operator, Projection, Select, Update},
    Serializer, Statement,
};
use pretty_assertions::assert_eq;

fn serialize(serializer: Serializer, stmt: impl Into<Statement>) -> (String, Vec<Value>) {
    let mut params: Vec<Value> = vec![];
    let sql = serializer.serialize(&stmt.into(), &mut params);
    (sql, params)
}

#[test]
fn select_with_filters() {
    let select = Select::new("posts")
        .filter(Condition::compare("title", Operator::Like, "%rust%"))
        .filter(Condition::in_list("user_id", vec![Value::I64(1), Value::I64(2)]))
        .order_by("id", Direction::Desc)
        .limit(10);

    let (sql, params) = serialize(Serializer::mysql(), select.clone());
    assert_eq!(
        sql,
        "SELECT * FROM `posts` WHERE `title` LIKE ? AND `user_id` IN (?, ?) ORDER BY `id` DESC LIMIT 10;"
    );
    assert_eq!(
        params,
        vec![Value::from("%rust%"), Value::I64(1), Value::I64(2)]
    );

    let (sql, _) = serialize(Serializer::sqlite(), select);
    assert_eq!(
        sql,
        "SELECT * FROM \"posts\" WHERE \"title\" LIKE ?1 AND \"user_id\" IN (?2, ?3) ORDER BY \"id\" DESC LIMIT 10;"
    );
}

#[test]
fn select_columns_and_count() {
    let (sql, _) = serialize(
        Serializer::sqlite(),
        Select::new("role_user").columns(["role_id"]),
    );
    assert_eq!(sql, "SELECT \"role_id\" FROM \"role_user\";");

    let mut count = Select::new("users");
    count.projection = Projection::Count;
    let (sql, _) = serialize(Serializer::mysql(), count);
    assert_eq!(sql, "SELECT COUNT(*) AS `aggregate` FROM `users`;");
}

#[test]
fn null_comparisons_become_is_null() {
    let select = Select::new("users")
        .filter(Condition::eq("deleted_at", Value::Null))
        .filter(Condition::compare("email", Operator::Ne, Value::Null));

    let (sql, params) = serialize(Serializer::mysql(), select);
    assert_eq!(
        sql,
        "SELECT * FROM `users` WHERE `deleted_at` IS NULL AND `email` IS NOT NULL;"
    );
    assert!(params.is_empty());
}

#[test]
fn empty_in_list_matches_nothing() {
    let select = Select::new("users").filter(Condition::in_list("id", vec![]));

    let (sql, _) = serialize(Serializer::sqlite(), select);
    assert_eq!(sql, "SELECT * FROM \"users\" WHERE 1 = 0;");
}

#[test]
fn insert_update_delete() {
    let mut values = IndexMap::new();
    values.insert("title".to_string(), Value::from("T"));
    values.insert("body".to_string(), Value::from("B"));

    let (sql, params) = serialize(Serializer::sqlite(), Insert::new("posts", values.clone()));
    assert_eq!(
        sql,
        "INSERT INTO \"posts\" (\"title\", \"body\") VALUES (?1, ?2);"
    );
    assert_eq!(params, vec![Value::from("T"), Value::from("B")]);

    let update = Update::new("posts", values).filter(Condition::eq("id", 7));
    let (sql, params) = serialize(Serializer::mysql(), update);
    assert_eq!(sql, "UPDATE `posts` SET `title` = ?, `body` = ? WHERE `id` = ?;");
    assert_eq!(params.len(), 3);

    let (sql, params) = serialize(
        Serializer::mysql(),
        Delete::new("posts").filter(Condition::eq("id", 7)),
    );
    assert_eq!(sql, "DELETE FROM `posts` WHERE `id` = ?;");
    assert_eq!(params, vec![Value::I64(7)]);
}

#[test]
fn insert_without_values() {
    let (sql, _) = serialize(Serializer::sqlite(), Insert::new("events", IndexMap::new()));
    assert_eq!(sql, "INSERT INTO \"events\" DEFAULT VALUES;");

    let (sql, _) = serialize(Serializer::mysql(), Insert::new("events", IndexMap::new()));
    assert_eq!(sql, "INSERT INTO `events` () VALUES ();");
}

#[test]
fn values_are_never_interpolated() {
    let select = Select::new("users").filter(Condition::eq("name", "x' OR '1'='1"));

    let (sql, params) = serialize(Serializer::mysql(), select);
    assert_eq!(sql, "SELECT * FROM `users` WHERE `name` = ?;");
    assert_eq!(params, vec![Value::from("x' OR '1'='1")]);
}
