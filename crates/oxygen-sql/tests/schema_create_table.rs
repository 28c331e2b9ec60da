use oxygen_core::Dialect;
use oxygen_sql::{Blueprint, Schema};
use pretty_assertions::assert_eq;

#[test]
fn columns_keep_declaration_order() {
    let mut table = Blueprint::create("users");
    table.id();
    table.string("name");
    table.string("email");

    assert_eq!(
        table.to_sql(Dialect::Mysql).unwrap(),
        ["CREATE TABLE `users` (\n    `id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,\n    `name` VARCHAR(255) NOT NULL,\n    `email` VARCHAR(255) NOT NULL\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;"]
    );
}

#[test]
fn foreign_keys_follow_all_columns() {
    let mut table = Blueprint::create("posts");
    table.id();
    table.foreign_id("user_id").constrained().unwrap();
    table.string("title");
    table.timestamps();

    assert_eq!(
        table.to_sql(Dialect::Mysql).unwrap(),
        ["CREATE TABLE `posts` (\n    `id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,\n    `user_id` BIGINT UNSIGNED NOT NULL,\n    `title` VARCHAR(255) NOT NULL,\n    `created_at` TIMESTAMP NULL,\n    `updated_at` TIMESTAMP NULL,\n    CONSTRAINT `posts_user_id_foreign` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;"]
    );
}

#[test]
fn foreign_keys_sqlite() {
    let mut table = Blueprint::create("comments");
    table.id();
    table
        .foreign_id("post_id")
        .constrained()
        .unwrap()
        .cascade_on_delete()
        .unwrap();
    table.foreign_id("author_id");
    table.constrained_to("people", "uid").unwrap();

    assert_eq!(
        table.to_sql(Dialect::Sqlite).unwrap(),
        ["CREATE TABLE \"comments\" (\n    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \"post_id\" INTEGER NOT NULL,\n    \"author_id\" INTEGER NOT NULL,\n    CONSTRAINT \"comments_post_id_foreign\" FOREIGN KEY (\"post_id\") REFERENCES \"posts\" (\"id\") ON DELETE CASCADE,\n    CONSTRAINT \"comments_author_id_foreign\" FOREIGN KEY (\"author_id\") REFERENCES \"people\" (\"uid\")\n);"]
    );
}

#[test]
fn column_types_mysql() {
    let mut table = Blueprint::create("products");
    table.text("description");
    table.integer("stock").unsigned().unwrap().default(0).unwrap();
    table.big_integer("views");
    table.decimal("price", 8, 2);
    table.boolean("active").default(true).unwrap();
    table.date("released_on").nullable().unwrap();
    table.datetime("checked_at");
    table.timestamp("seen_at").use_current().unwrap();
    table.enumeration("status", ["draft", "live"]);
    table.json("meta");
    table.string_len("sku", 32).unique().unwrap();

    assert_eq!(
        table.to_sql(Dialect::Mysql).unwrap(),
        ["CREATE TABLE `products` (\n    `description` TEXT NOT NULL,\n    `stock` INT UNSIGNED NOT NULL DEFAULT 0,\n    `views` BIGINT NOT NULL,\n    `price` DECIMAL(8, 2) NOT NULL,\n    `active` TINYINT(1) NOT NULL DEFAULT 1,\n    `released_on` DATE NULL,\n    `checked_at` DATETIME NOT NULL,\n    `seen_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,\n    `status` ENUM('draft', 'live') NOT NULL,\n    `meta` JSON NOT NULL,\n    `sku` VARCHAR(32) NOT NULL UNIQUE\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;"]
    );
}

#[test]
fn column_types_sqlite() {
    let mut table = Blueprint::create("products");
    table.boolean("active");
    table.enumeration("status", ["draft", "live"]);
    table.json("meta").nullable().unwrap();
    table.string("note").default("it's").unwrap();

    assert_eq!(
        table.to_sql(Dialect::Sqlite).unwrap(),
        ["CREATE TABLE \"products\" (\n    \"active\" INTEGER NOT NULL,\n    \"status\" TEXT NOT NULL CHECK (\"status\" IN ('draft', 'live')),\n    \"meta\" TEXT,\n    \"note\" VARCHAR(255) NOT NULL DEFAULT 'it''s'\n);"]
    );
}

#[test]
fn reserved_words_are_quoted() {
    let mut table = Blueprint::create("order");
    table.string("group");

    assert_eq!(
        table.to_sql(Dialect::Sqlite).unwrap(),
        ["CREATE TABLE \"order\" (\n    \"group\" VARCHAR(255) NOT NULL\n);"]
    );
}

#[test]
fn modifier_without_column_fails() {
    let mut table = Blueprint::create("users");

    let err = table.nullable().unwrap_err();
    assert!(err.is_schema_builder());
    assert_eq!(
        err.to_string(),
        "schema builder error on `users`: `nullable` called before any column was added"
    );

    assert!(table.unique().unwrap_err().is_schema_builder());
    assert!(table.default(1).unwrap_err().is_schema_builder());
    assert!(table.constrained().unwrap_err().is_schema_builder());
    assert!(table.cascade_on_delete().unwrap_err().is_schema_builder());
}

#[test]
fn schema_collects_statements() {
    let mut schema = Schema::new(Dialect::Sqlite);

    schema
        .create("widgets", |table| {
            table.id();
            table.string("name");
            table.timestamps();
            Ok(())
        })
        .unwrap();
    schema.rename("widgets", "gadgets");
    schema.drop_if_exists("gadgets");

    assert_eq!(
        schema.to_sql(),
        vec![
            "CREATE TABLE \"widgets\" (\n    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \"name\" VARCHAR(255) NOT NULL,\n    \"created_at\" TEXT,\n    \"updated_at\" TEXT\n);".to_string(),
            "ALTER TABLE \"widgets\" RENAME TO \"gadgets\";".to_string(),
            "DROP TABLE IF EXISTS \"gadgets\";".to_string(),
        ]
    );
}

#[test]
fn schema_propagates_builder_errors() {
    let mut schema = Schema::new(Dialect::Mysql);

    let err = schema
        .create("widgets", |table| {
            table.unique()?;
            Ok(())
        })
        .unwrap_err();

    assert!(err.is_schema_builder());
    assert!(schema.statements().is_empty());
}
