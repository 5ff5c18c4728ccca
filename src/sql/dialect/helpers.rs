//! Shared helper functions for SQL dialect implementations.
//!
//! Reusable building blocks that dialects compose to implement
//! `SqlDialect` with minimal duplication.

use super::super::token::{Token, TokenStream};
use super::super::types::ColumnType;
use super::SqlDialect;
use crate::error::SqlError;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Postgres, SQLite
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: MySQL
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote identifier with square brackets.
/// Used by: MSSQL
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Boolean Formatting
// =============================================================================

/// Format boolean as literal true/false. Used by: Postgres
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// Format boolean as numeric 1/0. Used by: MySQL, SQLite, MSSQL
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Emit `LIMIT n OFFSET m`.
/// Used by: MySQL, Postgres, SQLite
pub fn emit_limit_offset_standard(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    let mut ts = TokenStream::new();

    if let Some(lim) = limit {
        ts.push(Token::Limit).space().push(Token::Count(lim as i64));
    }

    if let Some(off) = offset {
        if limit.is_some() {
            ts.space();
        }
        ts.push(Token::Offset)
            .space()
            .push(Token::Count(off as i64));
    }

    ts
}

/// Emit `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
/// Used by: MSSQL when an offset is present (bare limits render as TOP).
/// Requires ORDER BY in real SQL Server; the grammar emits what it is given.
pub fn emit_limit_offset_fetch(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    let mut ts = TokenStream::new();

    let off = offset.unwrap_or(0);
    ts.push(Token::Offset)
        .space()
        .push(Token::Count(off as i64))
        .space()
        .push(Token::Raw("ROWS".into()));

    if let Some(lim) = limit {
        ts.space()
            .push(Token::Raw("FETCH NEXT".into()))
            .space()
            .push(Token::Count(lim as i64))
            .space()
            .push(Token::Raw("ROWS ONLY".into()));
    }

    ts
}

// =============================================================================
// Column Type Mapping
// =============================================================================

fn type_mapping_error(dialect: &'static str, ty: &ColumnType) -> SqlError {
    SqlError::TypeMapping {
        ty: ty.to_string(),
        dialect,
    }
}

/// Render an emulated enum: VARCHAR plus a CHECK constraint over the
/// allowed values. Used by dialects without a native ENUM type.
pub fn emit_enum_check(dialect: &dyn SqlDialect, name: &str, values: &[String]) -> String {
    let list = values
        .iter()
        .map(|v| quote_string_single(v))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "VARCHAR(255) CHECK ({} IN ({}))",
        dialect.quote_identifier(name),
        list
    )
}

/// MySQL column type mapping.
pub fn emit_column_type_mysql(name: &str, ty: &ColumnType) -> Result<String, SqlError> {
    let _ = name;
    Ok(match ty {
        ColumnType::Increments => "INT UNSIGNED AUTO_INCREMENT PRIMARY KEY".into(),
        ColumnType::Integer => "INT".into(),
        ColumnType::BigInteger => "BIGINT".into(),
        ColumnType::SmallInteger => "SMALLINT".into(),
        ColumnType::Float => "DOUBLE".into(),
        ColumnType::Decimal(p, s) => format!("DECIMAL({p}, {s})"),
        ColumnType::Boolean => "TINYINT(1)".into(),
        ColumnType::String(len) => format!("VARCHAR({len})"),
        ColumnType::Text => "TEXT".into(),
        ColumnType::Date => "DATE".into(),
        ColumnType::Time => "TIME".into(),
        ColumnType::DateTime => "DATETIME".into(),
        ColumnType::Timestamp => "TIMESTAMP".into(),
        ColumnType::Binary => "BLOB".into(),
        ColumnType::Json => "JSON".into(),
        ColumnType::Enum(values) => {
            let list = values
                .iter()
                .map(|v| quote_string_single(v))
                .collect::<Vec<_>>()
                .join(", ");
            format!("ENUM({list})")
        }
    })
}

/// Postgres column type mapping.
pub fn emit_column_type_postgres(name: &str, ty: &ColumnType) -> Result<String, SqlError> {
    Ok(match ty {
        ColumnType::Increments => "SERIAL PRIMARY KEY".into(),
        ColumnType::Integer => "INTEGER".into(),
        ColumnType::BigInteger => "BIGINT".into(),
        ColumnType::SmallInteger => "SMALLINT".into(),
        ColumnType::Float => "DOUBLE PRECISION".into(),
        ColumnType::Decimal(p, s) => format!("DECIMAL({p}, {s})"),
        ColumnType::Boolean => "BOOLEAN".into(),
        ColumnType::String(len) => format!("VARCHAR({len})"),
        ColumnType::Text => "TEXT".into(),
        ColumnType::Date => "DATE".into(),
        ColumnType::Time => "TIME".into(),
        ColumnType::DateTime => "TIMESTAMP".into(),
        ColumnType::Timestamp => "TIMESTAMP".into(),
        ColumnType::Binary => "BYTEA".into(),
        ColumnType::Json => "JSONB".into(),
        ColumnType::Enum(values) => emit_enum_check(&super::Postgres, name, values),
    })
}

/// SQLite column type mapping.
pub fn emit_column_type_sqlite(name: &str, ty: &ColumnType) -> Result<String, SqlError> {
    Ok(match ty {
        ColumnType::Increments => "INTEGER PRIMARY KEY AUTOINCREMENT".into(),
        ColumnType::Integer | ColumnType::BigInteger | ColumnType::SmallInteger => "INTEGER".into(),
        ColumnType::Float => "REAL".into(),
        ColumnType::Decimal(_, _) => "NUMERIC".into(),
        ColumnType::Boolean => "INTEGER".into(),
        ColumnType::String(len) => format!("VARCHAR({len})"),
        ColumnType::Text => "TEXT".into(),
        ColumnType::Date => "DATE".into(),
        ColumnType::Time => "TIME".into(),
        ColumnType::DateTime => "DATETIME".into(),
        ColumnType::Timestamp => "DATETIME".into(),
        ColumnType::Binary => "BLOB".into(),
        ColumnType::Json => "TEXT".into(),
        ColumnType::Enum(values) => emit_enum_check(&super::Sqlite, name, values),
    })
}

/// MSSQL column type mapping.
///
/// JSON has no native column type here, so it fails with a mapping error
/// rather than guessing at an NVARCHAR width.
pub fn emit_column_type_tsql(name: &str, ty: &ColumnType) -> Result<String, SqlError> {
    Ok(match ty {
        ColumnType::Increments => "INT IDENTITY(1,1) PRIMARY KEY".into(),
        ColumnType::Integer => "INT".into(),
        ColumnType::BigInteger => "BIGINT".into(),
        ColumnType::SmallInteger => "SMALLINT".into(),
        ColumnType::Float => "FLOAT".into(),
        ColumnType::Decimal(p, s) => format!("DECIMAL({p}, {s})"),
        ColumnType::Boolean => "BIT".into(),
        ColumnType::String(len) => format!("NVARCHAR({len})"),
        ColumnType::Text => "NVARCHAR(MAX)".into(),
        ColumnType::Date => "DATE".into(),
        ColumnType::Time => "TIME".into(),
        ColumnType::DateTime => "DATETIME2".into(),
        ColumnType::Timestamp => "DATETIME2".into(),
        ColumnType::Binary => "VARBINARY(MAX)".into(),
        ColumnType::Json => return Err(type_mapping_error("mssql", ty)),
        ColumnType::Enum(values) => emit_enum_check(&super::TSql, name, values),
    })
}
