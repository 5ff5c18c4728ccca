//! MySQL dialect.
//!
//! MySQL differences from the other dialects:
//! - Backtick identifier quoting (`` `name` ``)
//! - Trailing `LIMIT n OFFSET m` pagination
//! - Native `ENUM(...)` column type
//! - `AUTO_INCREMENT` primary keys
//! - Index and fulltext constraints inline in CREATE TABLE

use super::helpers;
use super::SqlDialect;
use crate::error::SqlError;
use crate::sql::types::ColumnType;

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    // Uses default emit_limit_offset (LIMIT ... OFFSET ...)

    fn emit_column_type(&self, name: &str, ty: &ColumnType) -> Result<String, SqlError> {
        helpers::emit_column_type_mysql(name, ty)
    }

    // All constraint kinds render inline in CREATE/ALTER.
}
