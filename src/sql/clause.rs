//! Clause data structures - the dialect-independent expression model.
//!
//! One inert structure per clause kind. Nothing here compiles SQL; the
//! grammar walks these in add-order and renders them per dialect.

use super::query::Query;
use super::value::Value;
use crate::error::SqlError;

/// How a WHERE clause chains to the previous one.
///
/// The first clause in a query renders as `WHERE` regardless of its link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Link {
    #[default]
    And,
    Or,
}

/// The shape of a WHERE clause's right-hand side.
///
/// Form selection happens here, by value shape, not by separate clause
/// types; the grammar matches variants in precedence order (raw first, then
/// between, null checks, exists, lists/sub-queries, then plain comparison).
#[derive(Debug, Clone)]
pub enum WhereValue {
    /// Plain comparison against a bound value.
    Value(Value),
    /// Column-to-column comparison; the right side is quoted, not bound.
    Column(String),
    /// IN / NOT IN over a literal list.
    List(Vec<Value>),
    /// IN / NOT IN over a sub-query.
    InSubquery(Box<Query>),
    /// Scalar sub-query compared with the clause operator.
    Subquery(Box<Query>),
    /// EXISTS over a correlated sub-query.
    Exists(Box<Query>),
    /// Nested predicate group built by a closure; compiles recursively with
    /// the leading WHERE stripped, wrapped in parentheses.
    Group(Box<Query>),
    /// IS NULL
    Null,
    /// IS NOT NULL
    NotNull,
    /// BETWEEN low AND high
    Between { low: Value, high: Value },
    /// Verbatim SQL fragment, bypassing column quoting. May carry its own
    /// `?` placeholders with matching bindings.
    Raw { sql: String, bindings: Vec<Value> },
}

/// One WHERE clause as added by the caller.
#[derive(Debug, Clone)]
pub struct WhereClause {
    /// Left-hand column; empty for raw, exists, and group forms.
    pub column: String,
    /// Comparison operator for the value/column/sub-query forms.
    pub operator: String,
    pub value: WhereValue,
    /// NOT IN / NOT BETWEEN.
    pub negated: bool,
    pub link: Link,
}

/// One SELECT list item.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub column: String,
    /// Raw fragments bypass identifier quoting entirely.
    pub raw: bool,
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Outer,
}

/// One JOIN clause: `<kind> JOIN foreign_table ON local op foreign`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub table: String,
    pub local_column: String,
    pub operator: String,
    pub foreign_column: String,
    pub kind: JoinKind,
}

/// One HAVING clause. Multiple clauses join with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct HavingClause {
    pub column: String,
    pub operator: String,
    pub value: Value,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// One ORDER BY expression.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderClause {
    pub column: String,
    pub direction: SortDir,
}

/// Aggregate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Sum,
    Count,
    Min,
    Max,
    Avg,
}

impl AggregateFunc {
    /// Parse an aggregate function name.
    ///
    /// Unknown names fail with [`SqlError::UnsupportedAggregate`] instead of
    /// silently degrading to an empty function token.
    pub fn parse(name: &str) -> Result<Self, SqlError> {
        match name.to_lowercase().as_str() {
            "sum" => Ok(AggregateFunc::Sum),
            "count" => Ok(AggregateFunc::Count),
            "min" => Ok(AggregateFunc::Min),
            "max" => Ok(AggregateFunc::Max),
            "avg" => Ok(AggregateFunc::Avg),
            other => Err(SqlError::UnsupportedAggregate(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
            AggregateFunc::Avg => "AVG",
        }
    }
}

/// One aggregate rendering in the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub func: AggregateFunc,
    pub column: String,
}

/// Assignment operation for UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Increment,
    Decrement,
}

/// One SET assignment in an UPDATE statement.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
    pub op: AssignOp,
}
