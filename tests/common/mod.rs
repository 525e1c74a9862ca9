#![allow(dead_code)]

use std::cell::RefCell;
use postgrust_orm::{record, ExecOutcome, Orm, RowSet, SqliteStore, Store, StoreError, Value};

record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct User {
        "FullName" => pub full_name: String,
        "Age" => pub age: i64,
        "ClassYear" => pub class_year: String,
        "IsEnrolled" => pub is_enrolled: bool,
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Post {
        #[primary_key]
        "ID" => pub id: i64,
        "Author" => pub author: String,
        "Posted" => pub posted: chrono::NaiveDateTime,
        "Likes" => pub likes: i32,
        "Body" => pub body: String,
    }
}

// Record without a backing table
record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Comment {
        "Body" => pub body: String,
    }
}

pub fn user(name: &str, age: i64, class_year: &str, is_enrolled: bool) -> User {
    User {
        full_name: name.to_string(),
        age,
        class_year: class_year.to_string(),
        is_enrolled,
    }
}

/// In-memory store with the `user` and `post` tables
pub fn open_store() -> RecordingStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .connection()
        .execute_batch(
            "CREATE TABLE user (
                full_name text,
                age int,
                class_year text,
                is_enrolled int
            );
            CREATE TABLE post (
                id integer primary key autoincrement,
                author text,
                posted timestamp,
                likes number,
                body text
            );",
        )
        .unwrap();
    RecordingStore::new(store)
}

/// ORM over a fresh store with `users` created in order
pub fn orm_with_users(users: &[User]) -> Orm<RecordingStore> {
    let orm = Orm::new(open_store());
    for u in users {
        let mut u = u.clone();
        orm.create(&mut u).unwrap();
    }
    orm.store().clear();
    orm
}

/// Store wrapper that records every SQL text it is handed
pub struct RecordingStore {
    inner: SqliteStore,
    log: RefCell<Vec<String>>,
}

impl RecordingStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn statements(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Statements other than reads (SELECT)
    pub fn mutations(&self) -> Vec<String> {
        self.statements()
            .into_iter()
            .filter(|sql| !sql.starts_with("SELECT"))
            .collect()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn sqlite(&self) -> &SqliteStore {
        &self.inner
    }

    pub fn count_rows(&self, table: &str) -> i64 {
        let rows = self.inner.query(&format!("SELECT COUNT(*) FROM {table}"), &[]).unwrap();
        rows.rows[0][0].as_int().unwrap()
    }
}

impl Store for RecordingStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<RowSet, StoreError> {
        self.log.borrow_mut().push(sql.to_string());
        self.inner.query(sql, params)
    }

    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecOutcome, StoreError> {
        self.log.borrow_mut().push(sql.to_string());
        self.inner.execute(sql, params)
    }
}
