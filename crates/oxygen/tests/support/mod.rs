#![allow(dead_code)]

mod logging_driver;
pub use logging_driver::{LoggingConnection, LoggingDriver, QueryLog};

use oxygen::{Db, Result};
use oxygen_driver_sqlite::Sqlite;

/// A fresh in-memory database and the log of every statement sent to it.
pub async fn connect() -> (Db, QueryLog) {
    let driver = LoggingDriver::new(Box::new(Sqlite::in_memory()));
    let log = driver.log_handle();
    let db = Db::from_driver(&driver).await.expect("failed to connect");
    (db, log)
}

/// Run each statement in order.
pub async fn execute_all(db: &Db, statements: &[&str]) -> Result<()> {
    for sql in statements {
        db.execute(sql, &[]).await?;
    }
    Ok(())
}

/// `users`, `profiles`, `posts`, `roles` and the `role_user` pivot.
pub async fn blog_schema(db: &Db) {
    execute_all(
        db,
        &[
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, \
             email TEXT, password TEXT, is_admin INTEGER NOT NULL DEFAULT 0)",
            "CREATE TABLE profiles (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             user_id INTEGER NOT NULL, bio TEXT)",
            "CREATE TABLE posts (id INTEGER PRIMARY KEY AUTOINCREMENT, user_id INTEGER, \
             title TEXT NOT NULL, body TEXT, admin INTEGER NOT NULL DEFAULT 0, \
             published INTEGER NOT NULL DEFAULT 0, meta TEXT, \
             created_at TEXT, updated_at TEXT)",
            "CREATE TABLE roles (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)",
            "CREATE TABLE role_user (role_id INTEGER NOT NULL, user_id INTEGER NOT NULL)",
        ],
    )
    .await
    .expect("failed to create schema");
}
