//! Query representation - the dialect-independent accumulator.
//!
//! A [`Query`] holds ordered collections of clauses, one per clause kind,
//! appended by fluent calls that all return the same instance. It stays
//! inert until a grammar compiles it; terminal calls (`to_sql`, `to_qmark`)
//! reset the accumulators afterwards so the instance can be reused for the
//! next query against the same table (the table binding, schema prefix, and
//! registered scopes survive the reset).

use super::clause::{
    Aggregate, AggregateFunc, AssignOp, Assignment, HavingClause, JoinClause, JoinKind, Link,
    OrderClause, SelectItem, SortDir, WhereClause, WhereValue,
};
use super::grammar::Grammar;
use super::value::Value;
use crate::error::SqlResult;
use crate::scope::{Scope, ScopeSet};

/// The action kind a query compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
}

/// A fluent query accumulator bound to one table.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub(crate) table: String,
    pub(crate) schema: Option<String>,
    pub(crate) action: Action,
    pub(crate) columns: Vec<SelectItem>,
    pub(crate) aggregates: Vec<Aggregate>,
    pub(crate) distinct: bool,
    pub(crate) wheres: Vec<WhereClause>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) groups: Vec<String>,
    pub(crate) havings: Vec<HavingClause>,
    pub(crate) orders: Vec<OrderClause>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) insert_columns: Vec<String>,
    pub(crate) insert_rows: Vec<Vec<Value>>,
    pub(crate) scopes: ScopeSet,
}

impl Query {
    /// Create a query bound to a table.
    pub fn table(name: &str) -> Self {
        Self {
            table: name.into(),
            ..Self::default()
        }
    }

    /// Set a database/schema prefix for the table name.
    pub fn schema(&mut self, schema: &str) -> &mut Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn wheres(&self) -> &[WhereClause] {
        &self.wheres
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    // =========================================================================
    // SELECT list
    // =========================================================================

    /// Append columns to the SELECT list.
    pub fn select(&mut self, columns: &[&str]) -> &mut Self {
        for col in columns {
            self.columns.push(SelectItem {
                column: (*col).into(),
                raw: false,
            });
        }
        self
    }

    /// Append a raw SELECT fragment that bypasses quoting.
    pub fn select_raw(&mut self, sql: &str) -> &mut Self {
        self.columns.push(SelectItem {
            column: sql.into(),
            raw: true,
        });
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    // =========================================================================
    // WHERE
    // =========================================================================

    fn push_where(&mut self, clause: WhereClause) -> &mut Self {
        self.wheres.push(clause);
        self
    }

    /// `column = value`
    pub fn where_eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_op(column, "=", value)
    }

    /// `column <op> value`
    pub fn where_op(&mut self, column: &str, operator: &str, value: impl Into<Value>) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: operator.into(),
            value: WhereValue::Value(value.into()),
            negated: false,
            link: Link::And,
        })
    }

    /// `OR column = value`
    pub fn or_where(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.or_where_op(column, "=", value)
    }

    /// `OR column <op> value`
    pub fn or_where_op(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: operator.into(),
            value: WhereValue::Value(value.into()),
            negated: false,
            link: Link::Or,
        })
    }

    /// `column IS NULL`
    pub fn where_null(&mut self, column: &str) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: String::new(),
            value: WhereValue::Null,
            negated: false,
            link: Link::And,
        })
    }

    /// `column IS NOT NULL`
    pub fn where_not_null(&mut self, column: &str) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: String::new(),
            value: WhereValue::NotNull,
            negated: false,
            link: Link::And,
        })
    }

    /// `column IN (values...)`
    pub fn where_in(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> &mut Self {
        self.where_in_inner(column, values, false, Link::And)
    }

    /// `column NOT IN (values...)`
    pub fn where_not_in(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> &mut Self {
        self.where_in_inner(column, values, true, Link::And)
    }

    fn where_in_inner(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = impl Into<Value>>,
        negated: bool,
        link: Link,
    ) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: String::new(),
            value: WhereValue::List(values.into_iter().map(Into::into).collect()),
            negated,
            link,
        })
    }

    /// `column IN (SELECT ...)`
    pub fn where_in_sub(&mut self, column: &str, sub: Query) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: String::new(),
            value: WhereValue::InSubquery(Box::new(sub)),
            negated: false,
            link: Link::And,
        })
    }

    /// `column NOT IN (SELECT ...)`
    pub fn where_not_in_sub(&mut self, column: &str, sub: Query) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: String::new(),
            value: WhereValue::InSubquery(Box::new(sub)),
            negated: true,
            link: Link::And,
        })
    }

    /// `column <op> (SELECT ...)` - scalar sub-query comparison.
    pub fn where_sub(&mut self, column: &str, operator: &str, sub: Query) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: operator.into(),
            value: WhereValue::Subquery(Box::new(sub)),
            negated: false,
            link: Link::And,
        })
    }

    /// `EXISTS (SELECT ...)`
    pub fn where_exists(&mut self, sub: Query) -> &mut Self {
        self.push_where(WhereClause {
            column: String::new(),
            operator: String::new(),
            value: WhereValue::Exists(Box::new(sub)),
            negated: false,
            link: Link::And,
        })
    }

    /// `column BETWEEN low AND high`
    pub fn where_between(
        &mut self,
        column: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: String::new(),
            value: WhereValue::Between {
                low: low.into(),
                high: high.into(),
            },
            negated: false,
            link: Link::And,
        })
    }

    /// `column NOT BETWEEN low AND high`
    pub fn where_not_between(
        &mut self,
        column: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: String::new(),
            value: WhereValue::Between {
                low: low.into(),
                high: high.into(),
            },
            negated: true,
            link: Link::And,
        })
    }

    /// `local_column <op> other_column` - both sides quoted as identifiers.
    pub fn where_column(&mut self, column: &str, operator: &str, other: &str) -> &mut Self {
        self.push_where(WhereClause {
            column: column.into(),
            operator: operator.into(),
            value: WhereValue::Column(other.into()),
            negated: false,
            link: Link::And,
        })
    }

    /// Verbatim WHERE fragment; `?` placeholders pair with `bindings`.
    pub fn where_raw(&mut self, sql: &str, bindings: Vec<Value>) -> &mut Self {
        self.push_where(WhereClause {
            column: String::new(),
            operator: String::new(),
            value: WhereValue::Raw {
                sql: sql.into(),
                bindings,
            },
            negated: false,
            link: Link::And,
        })
    }

    /// Nested predicate group: `... AND (a = 1 OR b = 2)`.
    pub fn where_group(&mut self, build: impl FnOnce(&mut Query)) -> &mut Self {
        self.where_group_inner(build, Link::And)
    }

    /// Nested predicate group chained with OR.
    pub fn or_where_group(&mut self, build: impl FnOnce(&mut Query)) -> &mut Self {
        self.where_group_inner(build, Link::Or)
    }

    fn where_group_inner(&mut self, build: impl FnOnce(&mut Query), link: Link) -> &mut Self {
        let mut sub = Query::table(&self.table);
        build(&mut sub);
        self.push_where(WhereClause {
            column: String::new(),
            operator: String::new(),
            value: WhereValue::Group(Box::new(sub)),
            negated: false,
            link,
        })
    }

    // =========================================================================
    // JOIN / GROUP BY / HAVING / ORDER BY / LIMIT
    // =========================================================================

    fn push_join(
        &mut self,
        kind: JoinKind,
        table: &str,
        local: &str,
        operator: &str,
        foreign: &str,
    ) -> &mut Self {
        self.joins.push(JoinClause {
            table: table.into(),
            local_column: local.into(),
            operator: operator.into(),
            foreign_column: foreign.into(),
            kind,
        });
        self
    }

    /// INNER JOIN.
    pub fn join(&mut self, table: &str, local: &str, operator: &str, foreign: &str) -> &mut Self {
        self.push_join(JoinKind::Inner, table, local, operator, foreign)
    }

    pub fn left_join(
        &mut self,
        table: &str,
        local: &str,
        operator: &str,
        foreign: &str,
    ) -> &mut Self {
        self.push_join(JoinKind::Left, table, local, operator, foreign)
    }

    pub fn right_join(
        &mut self,
        table: &str,
        local: &str,
        operator: &str,
        foreign: &str,
    ) -> &mut Self {
        self.push_join(JoinKind::Right, table, local, operator, foreign)
    }

    pub fn outer_join(
        &mut self,
        table: &str,
        local: &str,
        operator: &str,
        foreign: &str,
    ) -> &mut Self {
        self.push_join(JoinKind::Outer, table, local, operator, foreign)
    }

    pub fn group_by(&mut self, columns: &[&str]) -> &mut Self {
        self.groups.extend(columns.iter().map(|c| c.to_string()));
        self
    }

    pub fn having(&mut self, column: &str, operator: &str, value: impl Into<Value>) -> &mut Self {
        self.havings.push(HavingClause {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(&mut self, column: &str) -> &mut Self {
        self.orders.push(OrderClause {
            column: column.into(),
            direction: SortDir::Asc,
        });
        self
    }

    pub fn order_by_desc(&mut self, column: &str) -> &mut Self {
        self.orders.push(OrderClause {
            column: column.into(),
            direction: SortDir::Desc,
        });
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    fn push_aggregate(&mut self, func: AggregateFunc, column: &str) -> &mut Self {
        self.aggregates.push(Aggregate {
            func,
            column: column.into(),
        });
        self
    }

    pub fn count(&mut self, column: &str) -> &mut Self {
        self.push_aggregate(AggregateFunc::Count, column)
    }

    pub fn sum(&mut self, column: &str) -> &mut Self {
        self.push_aggregate(AggregateFunc::Sum, column)
    }

    pub fn min(&mut self, column: &str) -> &mut Self {
        self.push_aggregate(AggregateFunc::Min, column)
    }

    pub fn max(&mut self, column: &str) -> &mut Self {
        self.push_aggregate(AggregateFunc::Max, column)
    }

    pub fn avg(&mut self, column: &str) -> &mut Self {
        self.push_aggregate(AggregateFunc::Avg, column)
    }

    /// Aggregate by function name; unknown names fail fast.
    pub fn aggregate(&mut self, func: &str, column: &str) -> SqlResult<&mut Self> {
        let func = AggregateFunc::parse(func)?;
        Ok(self.push_aggregate(func, column))
    }

    // =========================================================================
    // INSERT / UPDATE / DELETE
    // =========================================================================

    /// Queue one row for INSERT. The first row fixes the column order; an
    /// empty row is dropped, so compiling with none queued fails with
    /// [`SqlError::EmptyInsert`](crate::error::SqlError::EmptyInsert).
    pub fn insert(&mut self, row: Vec<(&str, Value)>) -> &mut Self {
        self.action = Action::Insert;
        if row.is_empty() {
            return self;
        }
        if self.insert_columns.is_empty() {
            self.insert_columns = row.iter().map(|(c, _)| c.to_string()).collect();
        }
        self.insert_rows
            .push(row.into_iter().map(|(_, v)| v).collect());
        self
    }

    /// `SET column = value`
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.action = Action::Update;
        self.assignments.push(Assignment {
            column: column.into(),
            value: value.into(),
            op: AssignOp::Set,
        });
        self
    }

    /// `SET column = column + amount`
    pub fn increment(&mut self, column: &str, amount: impl Into<Value>) -> &mut Self {
        self.action = Action::Update;
        self.assignments.push(Assignment {
            column: column.into(),
            value: amount.into(),
            op: AssignOp::Increment,
        });
        self
    }

    /// `SET column = column - amount`
    pub fn decrement(&mut self, column: &str, amount: impl Into<Value>) -> &mut Self {
        self.action = Action::Update;
        self.assignments.push(Assignment {
            column: column.into(),
            value: amount.into(),
            op: AssignOp::Decrement,
        });
        self
    }

    /// Compile as a DELETE.
    pub fn delete(&mut self) -> &mut Self {
        self.action = Action::Delete;
        self
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    /// Register a scope; it runs before every compile of the matching
    /// action, in registration order, and survives the post-compile reset.
    pub fn scope(
        &mut self,
        name: &str,
        action: Action,
        apply: impl Fn(&mut Query) + 'static,
    ) -> &mut Self {
        self.scopes.register(Scope::new(name, action, apply));
        self
    }

    // =========================================================================
    // Terminal compile operations
    // =========================================================================

    /// Compile to literal SQL (values inlined), then reset the accumulators.
    pub fn to_sql(&mut self, grammar: &Grammar) -> SqlResult<String> {
        self.apply_scopes();
        let result = grammar.sql(self);
        self.reset();
        result
    }

    /// Compile to parameterized SQL plus ordered bindings, then reset.
    pub fn to_qmark(&mut self, grammar: &Grammar) -> SqlResult<(String, Vec<Value>)> {
        self.apply_scopes();
        let result = grammar.qmark(self);
        self.reset();
        result
    }

    fn apply_scopes(&mut self) {
        if self.scopes.is_empty() {
            return;
        }
        let scopes = self.scopes.clone();
        scopes.apply(self.action, self);
    }

    /// Clear accumulated state back to a fresh query on the same table.
    ///
    /// The table binding, schema prefix, and scope registry are preserved;
    /// everything else empties so one instance can serve successive queries
    /// without leakage.
    fn reset(&mut self) {
        self.action = Action::Select;
        self.columns.clear();
        self.aggregates.clear();
        self.distinct = false;
        self.wheres.clear();
        self.joins.clear();
        self.groups.clear();
        self.havings.clear();
        self.orders.clear();
        self.limit = None;
        self.offset = None;
        self.assignments.clear();
        self.insert_columns.clear();
        self.insert_rows.clear();
    }
}
