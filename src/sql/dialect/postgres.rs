//! PostgreSQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Native boolean literals (true/false)
//! - `SERIAL` auto-increment primary keys
//! - Index and fulltext constraints emitted as separate CREATE INDEX
//!   statements after the CREATE/ALTER body
//! - ENUM emulated with VARCHAR + CHECK

use super::helpers;
use super::SqlDialect;
use crate::error::SqlError;
use crate::sql::schema::ConstraintKind;
use crate::sql::types::ColumnType;

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn emit_column_type(&self, name: &str, ty: &ColumnType) -> Result<String, SqlError> {
        helpers::emit_column_type_postgres(name, ty)
    }

    fn second_query_constraints(&self) -> &'static [ConstraintKind] {
        &[ConstraintKind::Index, ConstraintKind::Fulltext]
    }

    fn modify_column_keyword(&self) -> &'static str {
        "ALTER COLUMN"
    }
}
