use mason::prelude::*;

fn conn() -> SqliteConnection {
    let conn = SqliteConnection::open_in_memory().unwrap();
    let schema = Schema::new(&conn);
    schema
        .create("users", |t| {
            t.increments("id");
            t.string("name", 255);
            t.integer("age").nullable();
        })
        .unwrap();
    conn
}

#[test]
fn test_end_to_end_insert_and_select() {
    let conn = conn();
    let grammar = conn.grammar();

    let mut q = Query::table("users");
    q.insert(vec![("name", "amy".into()), ("age", 30.into())]);
    q.insert(vec![("name", "ben".into()), ("age", Value::Null)]);
    let (sql, bindings) = q.to_qmark(&grammar).unwrap();
    assert_eq!(conn.execute(&sql, &bindings).unwrap(), 2);

    q.select(&["name"]).where_not_null("age");
    let (sql, bindings) = q.to_qmark(&grammar).unwrap();
    let rows = conn.query(&sql, &bindings, Arity::All).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], Value::Str("amy".into()));
}

#[test]
fn test_update_through_builder() {
    let conn = conn();
    let grammar = conn.grammar();

    let mut q = Query::table("users");
    q.insert(vec![("name", "amy".into()), ("age", 30.into())]);
    let (sql, bindings) = q.to_qmark(&grammar).unwrap();
    conn.execute(&sql, &bindings).unwrap();

    q.set("age", 31).where_eq("name", "amy");
    let (sql, bindings) = q.to_qmark(&grammar).unwrap();
    assert_eq!(conn.execute(&sql, &bindings).unwrap(), 1);

    q.where_eq("name", "amy");
    let (sql, bindings) = q.to_qmark(&grammar).unwrap();
    let rows = conn.query(&sql, &bindings, Arity::One).unwrap();
    assert_eq!(rows[0]["age"], Value::Int(31));
}

#[test]
fn test_delete_through_builder() {
    let conn = conn();
    let grammar = conn.grammar();

    let mut q = Query::table("users");
    q.insert(vec![("name", "amy".into())]);
    let (sql, bindings) = q.to_qmark(&grammar).unwrap();
    conn.execute(&sql, &bindings).unwrap();

    q.where_eq("name", "amy").delete();
    let (sql, bindings) = q.to_qmark(&grammar).unwrap();
    assert_eq!(conn.execute(&sql, &bindings).unwrap(), 1);
}

#[test]
fn test_transaction_commit_and_rollback() {
    let conn = conn();

    conn.begin().unwrap();
    conn.execute(
        "INSERT INTO users (name) VALUES (?)",
        &[Value::Str("kept".into())],
    )
    .unwrap();
    conn.commit().unwrap();

    conn.begin().unwrap();
    conn.execute(
        "INSERT INTO users (name) VALUES (?)",
        &[Value::Str("discarded".into())],
    )
    .unwrap();
    conn.rollback().unwrap();

    let rows = conn
        .query("SELECT name FROM users", &[], Arity::All)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], Value::Str("kept".into()));
}

#[test]
fn test_introspection_contract() {
    let conn = conn();
    assert!(conn.has_table("users").unwrap());
    assert!(!conn.has_table("widgets").unwrap());
    assert_eq!(
        conn.get_columns("users").unwrap(),
        vec!["id", "name", "age"]
    );
}

#[test]
fn test_config_opens_sqlite_connection() {
    let config = Config::from_str(
        r#"
        [connections.default]
        driver = "sqlite"
        database = ":memory:"
        "#,
    )
    .unwrap();
    let conn = config.connect("default").unwrap();
    assert_eq!(conn.dialect(), Dialect::Sqlite);
}

#[test]
fn test_config_grammar_for_compiling_dialects() {
    let config = Config::from_str(
        r#"
        [connections.warehouse]
        driver = "mssql"
        database = "warehouse"
        "#,
    )
    .unwrap();
    // MSSQL compiles SQL but has no live backend
    let grammar = config.grammar_for("warehouse").unwrap();
    assert_eq!(grammar.dialect(), Dialect::TSql);
    assert!(matches!(
        config.connect("warehouse"),
        Err(SqlError::UnsupportedOperation { .. })
    ));
}
