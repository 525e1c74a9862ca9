mod common;

use chrono::NaiveDate;
use common::{open_store, orm_with_users, user, Comment, Post, User};
use postgrust_orm::{ErrorKind, Filter, FindArgs, OrderBy, Orm, OrmError, UpdateSet};

fn five_users() -> Vec<User> {
    vec![
        user("Nick", 10, "Freshman", true),
        user("Shannon", 20, "Freshman", false),
        user("Will", 20, "Senior", true),
        user("Katie", 30, "Sophomore", false),
        user("Albert", 40, "Senior", true),
    ]
}

fn sample_post(author: &str, likes: i32) -> Post {
    Post {
        id: 999,
        author: author.to_string(),
        posted: NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_milli_opt(9, 15, 30, 125)
            .unwrap(),
        likes,
        body: format!("post by {author}"),
    }
}

#[test]
fn test_create_without_primary_key_round_trip() {
    let orm = Orm::new(open_store());
    let mut nick = user("Nick", 10, "Freshman", true);
    let before = nick.clone();

    orm.create(&mut nick).unwrap();
    assert_eq!(nick, before);

    let users: Vec<User> = orm.find_all().unwrap();
    assert_eq!(users, vec![before]);
}

#[test]
fn test_create_assigns_identity() {
    let orm = Orm::new(open_store());

    let mut first = sample_post("alevy", 0);
    let mut second = sample_post("nick", 3);
    orm.create(&mut first).unwrap();
    orm.create(&mut second).unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.author, "alevy");
    assert_eq!(first.body, "post by alevy");

    let posts: Vec<Post> = orm.find(&FindArgs::new().order_by(OrderBy::new().asc("ID"))).unwrap();
    assert_eq!(posts, vec![first, second]);
}

#[test]
fn test_create_ignores_supplied_identity() {
    let orm = Orm::new(open_store());
    let mut post = sample_post("alevy", 1);
    orm.create(&mut post).unwrap();

    let inserts: Vec<String> = orm
        .store()
        .mutations()
        .into_iter()
        .filter(|sql| sql.starts_with("INSERT"))
        .collect();
    assert_eq!(
        inserts,
        vec![r#"INSERT INTO "post"("author", "posted", "likes", "body") VALUES(?, ?, ?, ?)"#]
    );
    assert_ne!(post.id, 999);
}

#[test]
fn test_create_missing_table() {
    let orm = Orm::new(open_store());
    let mut comment = Comment {
        body: "first".to_string(),
    };

    let err = orm.create(&mut comment).unwrap_err();
    assert!(matches!(&err, OrmError::TableNotFound(t) if t == "comment"));
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert!(orm.store().mutations().is_empty());
}

#[test]
fn test_delete_counts() {
    let orm = orm_with_users(&five_users());

    assert_eq!(orm.delete::<User>(&Filter::new().with("Age", "gt", 100)).unwrap(), 0);
    assert_eq!(orm.delete::<User>(&Filter::new().with("Age", "eq", 20)).unwrap(), 2);
    assert_eq!(
        orm.delete::<User>(&Filter::new().with_list("FullName", "in", ["Nick", "Katie", "Nobody"]))
            .unwrap(),
        2
    );

    let remaining: Vec<User> = orm.find(&FindArgs::new().project(["FullName"])).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].full_name, "Albert");

    // Empty filter means every row
    assert_eq!(orm.delete::<User>(&Filter::new()).unwrap(), 1);
    assert_eq!(orm.store().count_rows("user"), 0);
}

#[test]
fn test_delete_invalid_filter_touches_nothing() {
    let orm = orm_with_users(&five_users());

    let err = orm
        .delete::<User>(&Filter::new().with("Name", "eq", "Nick"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldReference);

    let err = orm
        .delete::<User>(&Filter::new().with("Age", "approx", 10))
        .unwrap_err();
    assert!(matches!(err, OrmError::InvalidOperator(_)));

    assert!(orm.store().statements().is_empty());
    assert_eq!(orm.store().count_rows("user"), 5);
}

#[test]
fn test_delete_missing_table() {
    let orm = orm_with_users(&five_users());
    assert!(matches!(
        orm.delete::<Comment>(&Filter::new()),
        Err(OrmError::TableNotFound(_))
    ));
    assert!(orm.store().mutations().is_empty());
}

#[test]
fn test_update_counts() {
    let orm = orm_with_users(&five_users());

    let promoted = orm
        .update::<User>(
            &Filter::new().with("ClassYear", "eq", "Freshman"),
            &UpdateSet::new().set("ClassYear", "Sophomore"),
        )
        .unwrap();
    assert_eq!(promoted, 2);

    let none = orm
        .update::<User>(
            &Filter::new().with("Age", "lt", 0),
            &UpdateSet::new().set("IsEnrolled", false),
        )
        .unwrap();
    assert_eq!(none, 0);

    let birthday = orm
        .update::<User>(
            &Filter::new().with("FullName", "eq", "Albert"),
            &UpdateSet::new().set("Age", 41_i64).set("IsEnrolled", false),
        )
        .unwrap();
    assert_eq!(birthday, 1);

    let sophomores: Vec<User> = orm
        .find(
            &FindArgs::new()
                .filter(Filter::new().with("ClassYear", "eq", "Sophomore"))
                .order_by(OrderBy::new().asc("FullName")),
        )
        .unwrap();
    let names: Vec<_> = sophomores.iter().map(|u| u.full_name.as_str()).collect();
    assert_eq!(names, vec!["Katie", "Nick", "Shannon"]);

    let albert: Vec<User> = orm
        .find(&FindArgs::new().filter(Filter::new().with("FullName", "eq", "Albert")))
        .unwrap();
    assert_eq!(albert, vec![user("Albert", 41, "Senior", false)]);

    // Empty filter means every row
    let all = orm
        .update::<User>(&Filter::new(), &UpdateSet::new().set("IsEnrolled", true))
        .unwrap();
    assert_eq!(all, 5);
}

#[test]
fn test_update_type_mismatch_touches_nothing() {
    let users = five_users();
    let orm = orm_with_users(&users);

    let err = orm
        .update::<User>(
            &Filter::new().with("FullName", "eq", "Nick"),
            &UpdateSet::new().set("FullName", "Nicholas").set("Age", "eleven"),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    // i32 is not the declared i64
    let err = orm
        .update::<User>(&Filter::new(), &UpdateSet::new().set("Age", 11))
        .unwrap_err();
    assert!(matches!(err, OrmError::TypeMismatch { ref field, .. } if field == "Age"));

    let err = orm
        .update::<User>(&Filter::new(), &UpdateSet::new().set("Nickname", "Nicky"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldReference);

    // Unknown field in the filter rather than the update set
    let err = orm
        .update::<User>(
            &Filter::new().with("Nickname", "eq", "Nicky"),
            &UpdateSet::new().set("Age", 11_i64),
        )
        .unwrap_err();
    assert!(matches!(err, OrmError::UnknownField { ref field, .. } if field == "Nickname"));

    let err = orm
        .update::<User>(
            &Filter::new().with("Age", "around", 10_i64),
            &UpdateSet::new().set("Age", 11_i64),
        )
        .unwrap_err();
    assert!(matches!(err, OrmError::InvalidOperator(_)));

    assert!(orm.store().statements().is_empty());
    let stored: Vec<User> = orm.find_all().unwrap();
    assert_eq!(stored, users);
}

#[test]
fn test_update_empty_set_is_noop() {
    let orm = orm_with_users(&five_users());
    let changed = orm.update::<User>(&Filter::new(), &UpdateSet::new()).unwrap();
    assert_eq!(changed, 0);
    assert!(orm.store().mutations().is_empty());
}

#[test]
fn test_update_timestamp_and_identity_fields() {
    let orm = Orm::new(open_store());
    let mut post = sample_post("alevy", 0);
    orm.create(&mut post).unwrap();

    let edited = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();
    let changed = orm
        .update::<Post>(
            &Filter::new().with("ID", "eq", post.id),
            &UpdateSet::new().set("Posted", edited).set("Likes", 12),
        )
        .unwrap();
    assert_eq!(changed, 1);

    let posts: Vec<Post> = orm.find(&FindArgs::new().project(["Posted", "Likes"])).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].posted, edited);
    assert_eq!(posts[0].likes, 12);
    assert_eq!(posts[0].id, 0);
    assert_eq!(posts[0].author, "");
}
