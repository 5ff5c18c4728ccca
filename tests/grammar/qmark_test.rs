use mason::prelude::*;

fn mysql() -> Grammar {
    Grammar::new(Dialect::MySql)
}

#[test]
fn test_placeholders_replace_values() {
    let mut q = Query::table("users");
    q.select(&["id"]).where_eq("age", 20);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(sql, "SELECT `id` FROM `users` WHERE `age` = ?");
    assert_eq!(bindings, vec![Value::Int(20)]);
}

#[test]
fn test_binding_order_matches_placeholder_order() {
    let mut q = Query::table("users");
    q.where_eq("a", 1)
        .where_op("b", ">", "two")
        .where_between("c", 3, 4);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `users` WHERE `a` = ? AND `b` > ? AND `c` BETWEEN ? AND ?"
    );
    assert_eq!(
        bindings,
        vec![
            Value::Int(1),
            Value::Str("two".into()),
            Value::Int(3),
            Value::Int(4),
        ]
    );
}

#[test]
fn test_in_list_placeholders() {
    let mut q = Query::table("users");
    q.where_in("id", [1, 2, 3]);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(sql, "SELECT * FROM `users` WHERE `id` IN (?, ?, ?)");
    assert_eq!(bindings.len(), 3);
}

#[test]
fn test_null_never_binds() {
    let mut q = Query::table("users");
    q.where_eq("deleted_at", Value::Null).where_eq("id", 5);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `users` WHERE `deleted_at` IS NULL AND `id` = ?"
    );
    assert_eq!(bindings, vec![Value::Int(5)]);
}

#[test]
fn test_limit_count_never_binds() {
    let mut q = Query::table("users");
    q.where_eq("id", 1).limit(10).offset(20);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `users` WHERE `id` = ? LIMIT 10 OFFSET 20"
    );
    assert_eq!(bindings, vec![Value::Int(1)]);
}

#[test]
fn test_subquery_bindings_thread_in_document_order() {
    let mut sub = Query::table("roles");
    sub.select(&["id"]).where_eq("name", "admin");
    let mut q = Query::table("users");
    q.where_eq("active", 1)
        .where_in_sub("role_id", sub)
        .where_op("age", ">", 30);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `users` WHERE `active` = ? AND `role_id` IN \
         (SELECT `id` FROM `roles` WHERE `name` = ?) AND `age` > ?"
    );
    assert_eq!(
        bindings,
        vec![Value::Int(1), Value::Str("admin".into()), Value::Int(30)]
    );
}

#[test]
fn test_raw_bindings_splice_at_clause_position() {
    let mut q = Query::table("users");
    q.where_eq("a", 1)
        .where_raw("b > ?", vec![Value::Int(2)])
        .where_eq("c", 3);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(sql, "SELECT * FROM `users` WHERE `a` = ? AND b > ? AND `c` = ?");
    assert_eq!(bindings, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn test_having_values_bind() {
    let mut q = Query::table("orders");
    q.group_by(&["customer_id"]).having("total", ">", 100);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `orders` GROUP BY `customer_id` HAVING `total` > ?"
    );
    assert_eq!(bindings, vec![Value::Int(100)]);
}

#[test]
fn test_insert_bindings() {
    let mut q = Query::table("users");
    q.insert(vec![("name", "amy".into()), ("age", 30.into())]);
    q.insert(vec![("name", "ben".into()), ("age", 25.into())]);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO `users` (`name`, `age`) VALUES (?, ?), (?, ?)"
    );
    assert_eq!(
        bindings,
        vec![
            Value::Str("amy".into()),
            Value::Int(30),
            Value::Str("ben".into()),
            Value::Int(25),
        ]
    );
}

#[test]
fn test_update_bindings_cover_set_then_where() {
    let mut q = Query::table("users");
    q.set("name", "amy").increment("votes", 1).where_eq("id", 9);
    let (sql, bindings) = q.to_qmark(&mysql()).unwrap();
    assert_eq!(
        sql,
        "UPDATE `users` SET `name` = ?, `votes` = `votes` + ? WHERE `id` = ?"
    );
    assert_eq!(
        bindings,
        vec![Value::Str("amy".into()), Value::Int(1), Value::Int(9)]
    );
}

#[test]
fn test_repeated_compilation_is_invariant() {
    let mut q = Query::table("users");
    q.where_eq("a", 1).where_in("b", [2, 3]);
    let grammar = mysql();
    // Grammar-level calls do not reset the representation.
    let first = grammar.qmark(&q).unwrap();
    let second = grammar.qmark(&q).unwrap();
    assert_eq!(first, second);
}
