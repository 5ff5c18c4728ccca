//! SQL generation module.
//!
//! Dialect-independent query and schema representations plus the grammar
//! that compiles them to dialect SQL:
//!
//! - [`query`] - fluent query accumulator (SELECT/INSERT/UPDATE/DELETE)
//! - [`clause`] - inert clause data structures
//! - [`grammar`] - the compiler from representation to SQL text/bindings
//! - [`schema`] - blueprints for CREATE/ALTER TABLE
//! - [`token`] - token types for SQL generation
//! - [`dialect`] - SQL dialect implementations
//! - [`value`] - the SQL value model and conversions

pub mod clause;
pub mod dialect;
pub mod grammar;
pub mod query;
pub mod schema;
pub mod token;
pub mod types;
pub mod value;

// Re-export commonly used types at the sql module level
pub use clause::{
    Aggregate, AggregateFunc, AssignOp, Assignment, HavingClause, JoinClause, JoinKind, Link,
    OrderClause, SelectItem, SortDir, WhereClause, WhereValue,
};
pub use dialect::{Dialect, SqlDialect};
pub use grammar::Grammar;
pub use query::{Action, Query};
pub use schema::{
    Blueprint, BlueprintAction, ColumnAction, ColumnDef, Constraint, ConstraintKind, DefaultValue,
    ForeignKey, ReferentialAction,
};
pub use token::{Token, TokenStream};
pub use types::ColumnType;
pub use value::Value;
