use mason::prelude::*;

fn mysql() -> Grammar {
    Grammar::new(Dialect::MySql)
}

#[test]
fn test_numeric_values_render_quoted() {
    let mut q = Query::table("users");
    q.where_eq("age", 20);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `age` = '20'"
    );
}

#[test]
fn test_string_values_escape_quotes() {
    let mut q = Query::table("users");
    q.where_eq("name", "o'clock");
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `name` = 'o''clock'"
    );
}

#[test]
fn test_and_is_the_default_link() {
    let mut q = Query::table("users");
    q.where_eq("a", 1).where_op("b", ">", 2);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `a` = '1' AND `b` > '2'"
    );
}

#[test]
fn test_or_link() {
    let mut q = Query::table("users");
    q.where_eq("a", 1).or_where("b", 2);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `a` = '1' OR `b` = '2'"
    );
}

#[test]
fn test_first_clause_renders_where_even_when_or() {
    let mut q = Query::table("users");
    q.or_where("a", 1);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `a` = '1'"
    );
}

#[test]
fn test_null_checks() {
    let mut q = Query::table("users");
    q.where_null("deleted_at").where_not_null("email");
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `deleted_at` IS NULL AND `email` IS NOT NULL"
    );
}

#[test]
fn test_null_value_with_equals_becomes_is_null() {
    let mut q = Query::table("users");
    q.where_eq("deleted_at", Value::Null);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `deleted_at` IS NULL"
    );
}

#[test]
fn test_null_value_with_not_equals_becomes_is_not_null() {
    let mut q = Query::table("users");
    q.where_op("deleted_at", "<>", Value::Null);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `deleted_at` IS NOT NULL"
    );
}

#[test]
fn test_in_list() {
    let mut q = Query::table("users");
    q.where_in("id", [1, 2, 3]);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `id` IN ('1', '2', '3')"
    );
}

#[test]
fn test_not_in_list() {
    let mut q = Query::table("users");
    q.where_not_in("role", ["admin", "root"]);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `role` NOT IN ('admin', 'root')"
    );
}

#[test]
fn test_between() {
    let mut q = Query::table("users");
    q.where_between("age", 18, 30);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `age` BETWEEN '18' AND '30'"
    );
}

#[test]
fn test_not_between() {
    let mut q = Query::table("users");
    q.where_not_between("age", 18, 30);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `age` NOT BETWEEN '18' AND '30'"
    );
}

#[test]
fn test_column_to_column_comparison() {
    let mut q = Query::table("users");
    q.where_column("created_at", "<", "updated_at");
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `created_at` < `updated_at`"
    );
}

#[test]
fn test_in_subquery() {
    let mut sub = Query::table("users");
    sub.select(&["age"]);
    let mut q = Query::table("users");
    q.where_in_sub("name", sub);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `name` IN (SELECT `age` FROM `users`)"
    );
}

#[test]
fn test_scalar_subquery_comparison() {
    let mut sub = Query::table("salaries");
    sub.select(&["amount"]).limit(1);
    let mut q = Query::table("users");
    q.where_sub("salary", ">=", sub);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `salary` >= (SELECT `amount` FROM `salaries` LIMIT 1)"
    );
}

#[test]
fn test_exists() {
    let mut sub = Query::table("posts");
    sub.where_column("posts.user_id", "=", "users.id");
    let mut q = Query::table("users");
    q.where_exists(sub);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE EXISTS \
         (SELECT * FROM `posts` WHERE `posts`.`user_id` = `users`.`id`)"
    );
}

#[test]
fn test_nested_group() {
    let mut q = Query::table("users");
    q.where_eq("active", 1).where_group(|g| {
        g.where_eq("role", "admin").or_where("role", "owner");
    });
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `active` = '1' AND (`role` = 'admin' OR `role` = 'owner')"
    );
}

#[test]
fn test_or_group() {
    let mut q = Query::table("users");
    q.where_eq("a", 1).or_where_group(|g| {
        g.where_eq("b", 2).where_eq("c", 3);
    });
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `a` = '1' OR (`b` = '2' AND `c` = '3')"
    );
}

#[test]
fn test_raw_where_passes_through() {
    let mut q = Query::table("users");
    q.where_raw("LENGTH(name) > 3", vec![]);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE LENGTH(name) > 3"
    );
}

#[test]
fn test_raw_where_splices_bindings_in_literal_mode() {
    let mut q = Query::table("products");
    q.where_raw("price BETWEEN ? AND ?", vec![Value::Int(10), Value::Int(50)]);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `products` WHERE price BETWEEN '10' AND '50'"
    );
}

#[test]
fn test_clause_order_is_add_order() {
    let mut q = Query::table("users");
    q.where_eq("z", 1).where_eq("a", 2).where_eq("m", 3);
    assert_eq!(
        q.to_sql(&mysql()).unwrap(),
        "SELECT * FROM `users` WHERE `z` = '1' AND `a` = '2' AND `m` = '3'"
    );
}

#[test]
fn test_scope_appends_before_compile() {
    let grammar = mysql();
    let mut q = Query::table("users");
    q.scope("not_deleted", Action::Select, |q| {
        q.where_null("deleted_at");
    });
    q.where_eq("id", 7);
    assert_eq!(
        q.to_sql(&grammar).unwrap(),
        "SELECT * FROM `users` WHERE `id` = '7' AND `deleted_at` IS NULL"
    );
}

#[test]
fn test_scope_skips_other_actions() {
    let grammar = mysql();
    let mut q = Query::table("users");
    q.scope("not_deleted", Action::Select, |q| {
        q.where_null("deleted_at");
    });
    q.set("name", "ann").where_eq("id", 7);
    assert_eq!(
        q.to_sql(&grammar).unwrap(),
        "UPDATE `users` SET `name` = 'ann' WHERE `id` = '7'"
    );
}
