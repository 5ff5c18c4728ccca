//! # Mason
//!
//! A database-agnostic SQL generation and execution engine.
//!
//! Queries and schema changes are built through fluent, dialect-independent
//! representations and compiled per dialect:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Query / Blueprint (fluent accumulators)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [grammar]
//! ┌─────────────────────────────────────────────────────────┐
//! │     TokenStream (dialect-agnostic compiled form)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dialect serialization]
//! ┌─────────────────────────────────────────────────────────┐
//! │   SQL text (literal)  or  SQL + ordered bindings (qmark) │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [connection - optional]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Rows (column name → value maps)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Supported dialects: MySQL, Postgres, SQLite, MSSQL. All four compile;
//! SQLite additionally executes through the bundled driver.
//!
//! ## Example
//!
//! ```
//! use mason::prelude::*;
//!
//! let grammar = Grammar::new(Dialect::MySql);
//! let mut query = Query::table("users");
//! query.select(&["username"]).where_eq("id", 1);
//! assert_eq!(
//!     query.to_sql(&grammar).unwrap(),
//!     "SELECT `username` FROM `users` WHERE `id` = '1'"
//! );
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod migrate;
pub mod record;
pub mod scope;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::dialect;
pub use sql::grammar;
pub use sql::query;
pub use sql::schema;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Config, ConnectionConfig};
    pub use crate::connection::{Arity, Connection, ConnectionFactory, Row, SqliteConnection};
    pub use crate::error::{SqlError, SqlResult};
    pub use crate::migrate::{Migration, Migrator, RunReport, Schema};
    pub use crate::record::{table_name_for, Relation, RelationKind, Table};
    pub use crate::scope::{Scope, ScopeSet};
    pub use crate::sql::clause::{JoinKind, Link, SortDir};
    pub use crate::sql::dialect::{Dialect, SqlDialect};
    pub use crate::sql::grammar::Grammar;
    pub use crate::sql::query::{Action, Query};
    pub use crate::sql::schema::{Blueprint, ConstraintKind, ReferentialAction};
    pub use crate::sql::types::ColumnType;
    pub use crate::sql::value::Value;
}
