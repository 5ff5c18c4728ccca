//! SQL dialect definitions and formatting rules.
//!
//! Each supported database implements [`SqlDialect`] to express its
//! syntactic differences:
//!
//! - Identifier quoting: `` ` `` (MySQL), `"` (Postgres/SQLite), `[]` (MSSQL)
//! - Pagination: trailing LIMIT/OFFSET vs leading TOP vs OFFSET FETCH
//! - Column type mapping for blueprints (VARCHAR vs TEXT, ENUM emulation,
//!   auto-increment forms)
//! - Which constraint kinds must be emitted as separate statements after a
//!   CREATE/ALTER (`second_query_constraints`)
//!
//! Structural differences are capability flags or format emission methods,
//! never name-matching on the dialect elsewhere in the compiler.

mod mysql;
mod postgres;
mod sqlite;
mod tsql;

pub mod helpers;

pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use std::fmt;

use super::schema::ConstraintKind;
use super::token::TokenStream;
use super::types::ColumnType;
use crate::error::SqlError;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Default implementations follow the MySQL/ANSI common ground where
/// possible; dialects override only what differs.
pub trait SqlDialect: fmt::Debug {
    /// Dialect name for display/logging and error messages.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal. All dialects single-quote with `''` escaping.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal's bare text (quoting is the token layer's
    /// concern).
    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Emit the trailing pagination clause.
    ///
    /// Standard form is `LIMIT n OFFSET m`. MSSQL overrides with
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY` (used only when an offset is
    /// present; plain limits render as a leading TOP instead).
    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::emit_limit_offset_standard(limit, offset)
    }

    /// Whether a bare limit renders as `TOP n` before the column list.
    fn uses_top_clause(&self) -> bool {
        false
    }

    // =========================================================================
    // Schema compilation
    // =========================================================================

    /// Map a logical column type to this dialect's native type token.
    ///
    /// `name` is the column name, needed for CHECK-based enum emulation.
    /// Fails with [`SqlError::TypeMapping`] when the dialect has no mapping.
    fn emit_column_type(&self, name: &str, ty: &ColumnType) -> Result<String, SqlError>;

    /// Constraint kinds that cannot appear inline in CREATE/ALTER and must
    /// be emitted as separate trailing statements.
    fn second_query_constraints(&self) -> &'static [ConstraintKind] {
        &[]
    }

    /// Whether ALTER TABLE supports changing an existing column's type.
    fn supports_modify_column(&self) -> bool {
        true
    }

    /// The MODIFY/ALTER COLUMN keyword sequence for this dialect.
    fn modify_column_keyword(&self) -> &'static str {
        "MODIFY"
    }

    /// Whether column renames go through `sp_rename` instead of
    /// `ALTER TABLE ... RENAME COLUMN`.
    fn uses_sp_rename(&self) -> bool {
        false
    }

    /// The named default for "now".
    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MySql,
    Postgres,
    Sqlite,
    TSql,
}

impl Dialect {
    /// Resolve a driver key to a dialect.
    ///
    /// Unknown keys fail with [`SqlError::DriverNotFound`] naming the key;
    /// there is no silent default.
    pub fn from_key(key: &str) -> Result<Dialect, SqlError> {
        match key.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pgsql" => Ok(Dialect::Postgres),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" | "tsql" => Ok(Dialect::TSql),
            other => Err(SqlError::DriverNotFound(other.to_string())),
        }
    }

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
            Dialect::Sqlite => &Sqlite,
            Dialect::TSql => &TSql,
        }
    }
}

// Implement SqlDialect for the enum by delegating to the concrete types,
// so call sites can hold a plain Copy value.
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        self.dialect().emit_limit_offset(limit, offset)
    }

    fn uses_top_clause(&self) -> bool {
        self.dialect().uses_top_clause()
    }

    fn emit_column_type(&self, name: &str, ty: &ColumnType) -> Result<String, SqlError> {
        self.dialect().emit_column_type(name, ty)
    }

    fn second_query_constraints(&self) -> &'static [ConstraintKind] {
        self.dialect().second_query_constraints()
    }

    fn supports_modify_column(&self) -> bool {
        self.dialect().supports_modify_column()
    }

    fn modify_column_keyword(&self) -> &'static str {
        self.dialect().modify_column_keyword()
    }

    fn uses_sp_rename(&self) -> bool {
        self.dialect().uses_sp_rename()
    }

    fn current_timestamp(&self) -> &'static str {
        self.dialect().current_timestamp()
    }
}
