//! SQLite dialect.
//!
//! SQLite keeps ANSI double-quote identifier quoting and standard
//! LIMIT/OFFSET, but its ALTER TABLE is minimal:
//! - No MODIFY/ALTER COLUMN (table rebuild is required; out of scope here)
//! - Index and fulltext constraints are separate CREATE INDEX statements
//! - `INTEGER PRIMARY KEY AUTOINCREMENT` for auto-increment keys

use super::helpers;
use super::SqlDialect;
use crate::error::SqlError;
use crate::sql::schema::ConstraintKind;
use crate::sql::types::ColumnType;

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn emit_column_type(&self, name: &str, ty: &ColumnType) -> Result<String, SqlError> {
        helpers::emit_column_type_sqlite(name, ty)
    }

    fn second_query_constraints(&self) -> &'static [ConstraintKind] {
        &[ConstraintKind::Index, ConstraintKind::Fulltext]
    }

    fn supports_modify_column(&self) -> bool {
        false
    }
}
