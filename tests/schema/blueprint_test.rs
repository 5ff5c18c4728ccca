use mason::prelude::*;

#[test]
fn test_create_table_mysql() {
    let mut bp = Blueprint::create("users");
    bp.increments("id");
    bp.string("name", 255);
    bp.string("email", 255);
    bp.boolean("active").default_value(true);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(
        sql,
        vec![
            "CREATE TABLE `users` (\
             `id` INT UNSIGNED AUTO_INCREMENT PRIMARY KEY, \
             `name` VARCHAR(255) NOT NULL, \
             `email` VARCHAR(255) NOT NULL, \
             `active` TINYINT(1) NOT NULL DEFAULT 1)"
        ]
    );
}

#[test]
fn test_create_table_postgres() {
    let mut bp = Blueprint::create("users");
    bp.increments("id");
    bp.json("settings").nullable();
    let sql = bp.to_sql(Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        vec!["CREATE TABLE \"users\" (\"id\" SERIAL PRIMARY KEY, \"settings\" JSONB)"]
    );
}

#[test]
fn test_create_table_sqlite() {
    let mut bp = Blueprint::create("users");
    bp.increments("id");
    bp.timestamp("created_at").default_current_timestamp();
    let sql = bp.to_sql(Dialect::Sqlite).unwrap();
    assert_eq!(
        sql,
        vec![
            "CREATE TABLE \"users\" (\"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
             \"created_at\" DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP)"
        ]
    );
}

#[test]
fn test_current_timestamp_maps_to_getdate_on_tsql() {
    let mut bp = Blueprint::create("logs");
    bp.increments("id");
    bp.datetime("logged_at").default_current_timestamp();
    let sql = bp.to_sql(Dialect::TSql).unwrap();
    assert!(sql[0].contains("[logged_at] DATETIME2 NOT NULL DEFAULT GETDATE()"));
}

#[test]
fn test_json_has_no_tsql_mapping() {
    let mut bp = Blueprint::create("users");
    bp.json("settings");
    let err = bp.to_sql(Dialect::TSql).unwrap_err();
    assert!(matches!(err, SqlError::TypeMapping { dialect: "mssql", .. }));
}

#[test]
fn test_enum_native_on_mysql() {
    let mut bp = Blueprint::create("posts");
    bp.enumeration("status", &["draft", "live"]);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(
        sql,
        vec!["CREATE TABLE `posts` (`status` ENUM('draft', 'live') NOT NULL)"]
    );
}

#[test]
fn test_enum_emulated_with_check_on_postgres() {
    let mut bp = Blueprint::create("posts");
    bp.enumeration("status", &["draft", "live"]);
    let sql = bp.to_sql(Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        vec![
            "CREATE TABLE \"posts\" (\"status\" VARCHAR(255) \
             CHECK (\"status\" IN ('draft', 'live')) NOT NULL)"
        ]
    );
}

#[test]
fn test_alter_add_column() {
    let mut bp = Blueprint::alter("users");
    bp.string("nickname", 100).nullable();
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(sql, vec!["ALTER TABLE `users` ADD `nickname` VARCHAR(100)"]);
}

#[test]
fn test_alter_add_after_column_mysql_only() {
    let mut bp = Blueprint::alter("users");
    bp.string("middle_name", 100).nullable().after("first_name");
    assert_eq!(
        bp.to_sql(Dialect::MySql).unwrap(),
        vec!["ALTER TABLE `users` ADD `middle_name` VARCHAR(100) AFTER `first_name`"]
    );
    // Positioning hint is silently dropped elsewhere
    assert_eq!(
        bp.to_sql(Dialect::Postgres).unwrap(),
        vec!["ALTER TABLE \"users\" ADD \"middle_name\" VARCHAR(100)"]
    );
}

#[test]
fn test_alter_modify_column() {
    let mut bp = Blueprint::alter("users");
    bp.string("name", 500).change();
    assert_eq!(
        bp.to_sql(Dialect::MySql).unwrap(),
        vec!["ALTER TABLE `users` MODIFY `name` VARCHAR(500) NOT NULL"]
    );
    assert_eq!(
        bp.to_sql(Dialect::Postgres).unwrap(),
        vec!["ALTER TABLE \"users\" ALTER COLUMN \"name\" VARCHAR(500) NOT NULL"]
    );
}

#[test]
fn test_alter_modify_unsupported_on_sqlite() {
    let mut bp = Blueprint::alter("users");
    bp.string("name", 500).change();
    let err = bp.to_sql(Dialect::Sqlite).unwrap_err();
    assert!(
        matches!(err, SqlError::UnsupportedOperation { dialect: "sqlite", ref operation } if operation == "modify column")
    );
}

#[test]
fn test_alter_drop_column() {
    let mut bp = Blueprint::alter("users");
    bp.drop_column("legacy_flag");
    assert_eq!(
        bp.to_sql(Dialect::MySql).unwrap(),
        vec!["ALTER TABLE `users` DROP COLUMN `legacy_flag`"]
    );
}

#[test]
fn test_alter_rename_column() {
    let mut bp = Blueprint::alter("users");
    bp.rename_column("name", "full_name");
    assert_eq!(
        bp.to_sql(Dialect::MySql).unwrap(),
        vec!["ALTER TABLE `users` RENAME COLUMN `name` TO `full_name`"]
    );
    assert_eq!(
        bp.to_sql(Dialect::TSql).unwrap(),
        vec!["EXEC sp_rename 'users.name', 'full_name', 'COLUMN'"]
    );
}

#[test]
fn test_alter_emits_one_statement_per_operation() {
    let mut bp = Blueprint::alter("users");
    bp.string("bio", 255).nullable();
    bp.drop_column("legacy_flag");
    bp.rename_column("name", "full_name");
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert_eq!(sql.len(), 3);
}

#[test]
fn test_default_string_value_is_quoted() {
    let mut bp = Blueprint::create("users");
    bp.string("role", 50).default_value("member");
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert!(sql[0].contains("`role` VARCHAR(50) NOT NULL DEFAULT 'member'"));
}

#[test]
fn test_decimal_precision_and_scale() {
    let mut bp = Blueprint::create("orders");
    bp.decimal("total", 10, 2);
    let sql = bp.to_sql(Dialect::MySql).unwrap();
    assert!(sql[0].contains("`total` DECIMAL(10, 2) NOT NULL"));
}
