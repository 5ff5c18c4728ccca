use mason::prelude::*;

#[test]
fn test_unique_renders_inline() {
    let mut bp = Blueprint::create("users");
    bp.increments("id");
    bp.string("email", 255);
    bp.unique(&["email"]);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(sql.len(), 1);
    assert!(sql[0].contains("CONSTRAINT `users_email_unique` UNIQUE (`email`)"));
}

#[test]
fn test_composite_primary_key() {
    let mut bp = Blueprint::create("role_user");
    bp.integer("role_id");
    bp.integer("user_id");
    bp.primary(&["role_id", "user_id"]);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert!(sql[0].contains("PRIMARY KEY (`role_id`, `user_id`)"));
}

#[test]
fn test_index_inline_on_mysql() {
    let mut bp = Blueprint::create("users");
    bp.string("email", 255);
    bp.index(&["email"]);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(sql.len(), 1);
    assert!(sql[0].contains("INDEX `users_email_index` (`email`)"));
}

#[test]
fn test_index_as_second_statement_on_postgres() {
    let mut bp = Blueprint::create("users");
    bp.string("email", 255);
    bp.index(&["email"]);
    let sql = bp.to_sql(Dialect::Postgres).unwrap();
    assert_eq!(sql.len(), 2);
    assert!(!sql[0].contains("INDEX"));
    assert_eq!(
        sql[1],
        "CREATE INDEX \"users_email_index\" ON \"users\" (\"email\")"
    );
}

#[test]
fn test_index_as_second_statement_on_sqlite_and_tsql() {
    for dialect in [Dialect::Sqlite, Dialect::TSql] {
        let mut bp = Blueprint::create("users");
        bp.string("email", 255);
        bp.index(&["email"]);
        let sql = bp.to_sql(dialect).unwrap();
        assert_eq!(sql.len(), 2, "{dialect:?}");
    }
}

#[test]
fn test_fulltext_inline_on_mysql() {
    let mut bp = Blueprint::create("posts");
    bp.text("body");
    bp.fulltext(&["body"]);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(sql.len(), 1);
    assert!(sql[0].contains("FULLTEXT INDEX `posts_body_fulltext` (`body`)"));
}

#[test]
fn test_alter_adds_constraints_as_alter_statements() {
    let mut bp = Blueprint::alter("users");
    bp.unique(&["email"]);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(
        sql,
        vec!["ALTER TABLE `users` ADD CONSTRAINT `users_email_unique` UNIQUE (`email`)"]
    );
}

#[test]
fn test_foreign_key_inline() {
    let mut bp = Blueprint::create("posts");
    bp.increments("id");
    bp.integer("user_id");
    bp.foreign("user_id").references("users", "id");
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert!(sql[0].contains("FOREIGN KEY (`user_id`) REFERENCES `users` (`id`)"));
}

#[test]
fn test_foreign_key_actions() {
    let mut bp = Blueprint::create("posts");
    bp.integer("user_id");
    bp.foreign("user_id")
        .references("users", "id")
        .on_delete("cascade")
        .unwrap()
        .on_update("set null")
        .unwrap();
    let sql = bp.to_sql(Dialect::Postgres).unwrap();
    assert!(sql[0].contains(
        "FOREIGN KEY (\"user_id\") REFERENCES \"users\" (\"id\") \
         ON DELETE CASCADE ON UPDATE SET NULL"
    ));
}

#[test]
fn test_referential_action_parse_variants() {
    assert_eq!(
        ReferentialAction::parse("NO ACTION").unwrap(),
        ReferentialAction::NoAction
    );
    assert_eq!(
        ReferentialAction::parse("set_default").unwrap(),
        ReferentialAction::SetDefault
    );
    assert_eq!(
        ReferentialAction::parse("restrict").unwrap(),
        ReferentialAction::Restrict
    );
}

#[test]
fn test_unknown_referential_action_fails_at_declaration() {
    let mut bp = Blueprint::alter("posts");
    let err = bp
        .foreign("user_id")
        .references("users", "id")
        .on_delete("obliterate")
        .unwrap_err();
    assert!(matches!(err, SqlError::InvalidReferentialAction(ref a) if a == "obliterate"));
}

#[test]
fn test_alter_foreign_key_statement() {
    let mut bp = Blueprint::alter("posts");
    bp.foreign("user_id").references("users", "id");
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(
        sql,
        vec!["ALTER TABLE `posts` ADD FOREIGN KEY (`user_id`) REFERENCES `users` (`id`)"]
    );
}
