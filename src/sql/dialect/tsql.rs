//! MSSQL (SQL Server) dialect.
//!
//! Differences from the others:
//! - Square bracket identifier quoting (`[name]`)
//! - A bare limit renders as a leading `TOP n` before the column list;
//!   with an offset present it becomes `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
//! - `IDENTITY(1,1)` auto-increment primary keys
//! - `GETDATE()` for the current-timestamp default
//! - Column renames go through `sp_rename`

use super::helpers;
use super::SqlDialect;
use crate::error::SqlError;
use crate::sql::schema::ConstraintKind;
use crate::sql::token::TokenStream;
use crate::sql::types::ColumnType;

/// MSSQL (SQL Server) dialect.
#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::emit_limit_offset_fetch(limit, offset)
    }

    fn uses_top_clause(&self) -> bool {
        true
    }

    fn emit_column_type(&self, name: &str, ty: &ColumnType) -> Result<String, SqlError> {
        helpers::emit_column_type_tsql(name, ty)
    }

    fn second_query_constraints(&self) -> &'static [ConstraintKind] {
        &[ConstraintKind::Index, ConstraintKind::Fulltext]
    }

    fn modify_column_keyword(&self) -> &'static str {
        "ALTER COLUMN"
    }

    fn uses_sp_rename(&self) -> bool {
        true
    }

    fn current_timestamp(&self) -> &'static str {
        "GETDATE()"
    }
}
