//! Grammar compiler - walks a query representation into dialect SQL.
//!
//! One shared compilation algorithm, parameterized by [`Dialect`]. The walk
//! produces a [`TokenStream`]; the terminal operations serialize it either
//! with inlined literals (`sql`) or with `?` placeholders plus an ordered
//! bindings sequence (`qmark`). Structural dialect differences (TOP vs
//! trailing LIMIT, quoting characters) live behind the dialect's emission
//! methods and capability flags, never behind dialect-name branches here.

use once_cell::sync::Lazy;
use regex::Regex;

use super::clause::{
    AssignOp, JoinKind, Link, SortDir, WhereClause, WhereValue,
};
use super::dialect::{Dialect, SqlDialect};
use super::query::{Action, Query};
use super::token::{Token, TokenStream};
use super::value::Value;
use crate::error::{SqlError, SqlResult};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Collapse repeated whitespace and trim the compiled statement.
fn tidy(sql: &str) -> String {
    WHITESPACE.replace_all(sql, " ").trim().to_string()
}

/// A dialect grammar: compiles query representations and blueprints.
#[derive(Debug, Clone, Copy)]
pub struct Grammar {
    dialect: Dialect,
}

impl Grammar {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Resolve a driver key (`mysql`, `postgres`, `sqlite`, `mssql`, ...).
    ///
    /// Unknown keys fail with [`SqlError::DriverNotFound`].
    pub fn make(key: &str) -> SqlResult<Self> {
        Ok(Self::new(Dialect::from_key(key)?))
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Compile to literal SQL with values inlined.
    pub fn sql(&self, query: &Query) -> SqlResult<String> {
        let ts = self.compile(query)?;
        Ok(tidy(&ts.serialize(self.dialect)))
    }

    /// Compile to parameterized SQL plus bindings in placeholder order.
    pub fn qmark(&self, query: &Query) -> SqlResult<(String, Vec<Value>)> {
        let ts = self.compile(query)?;
        let (sql, bindings) = ts.serialize_qmark(self.dialect);
        Ok((tidy(&sql), bindings))
    }

    /// Compile a CREATE TABLE blueprint into its statement sequence.
    pub fn compile_create(&self, blueprint: &super::schema::Blueprint) -> SqlResult<Vec<String>> {
        blueprint.to_sql(self.dialect)
    }

    /// Compile an ALTER TABLE blueprint into its statement sequence.
    pub fn compile_alter(&self, blueprint: &super::schema::Blueprint) -> SqlResult<Vec<String>> {
        blueprint.to_sql(self.dialect)
    }

    /// Compile to a token stream, dispatching on the query's action kind.
    pub fn compile(&self, query: &Query) -> SqlResult<TokenStream> {
        match query.action {
            Action::Select => self.compile_select(query),
            Action::Insert => self.compile_insert(query),
            Action::Update => self.compile_update(query),
            Action::Delete => self.compile_delete(query),
        }
    }

    // =========================================================================
    // SELECT
    // =========================================================================

    pub fn compile_select(&self, query: &Query) -> SqlResult<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Select);

        if query.distinct {
            ts.space().push(Token::Distinct);
        }

        // A bare limit on TOP dialects leads the column list instead of
        // trailing; with an offset the trailing OFFSET FETCH form wins.
        let top = self.dialect.uses_top_clause() && query.offset.is_none();
        if top {
            if let Some(limit) = query.limit {
                ts.space()
                    .push(Token::Top)
                    .space()
                    .push(Token::Count(limit as i64));
            }
        }

        ts.space();
        self.select_list(query, &mut ts);

        ts.space().push(Token::From).space();
        ts.push(self.table_token(query));

        for join in &query.joins {
            ts.space();
            match join.kind {
                JoinKind::Inner => ts.push(Token::Inner),
                JoinKind::Left => ts.push(Token::Left),
                JoinKind::Right => ts.push(Token::Right),
                JoinKind::Outer => ts.push(Token::Outer),
            };
            ts.space()
                .push(Token::Join)
                .space()
                .ident(&join.table)
                .space()
                .push(Token::On)
                .space()
                .ident(&join.local_column)
                .space()
                .push(Token::Operator(join.operator.clone()))
                .space()
                .ident(&join.foreign_column);
        }

        let wheres = self.where_tokens(&query.wheres, true)?;
        if !wheres.is_empty() {
            ts.space().append(&wheres);
        }

        if !query.groups.is_empty() {
            ts.space().push(Token::GroupBy).space();
            for (i, col) in query.groups.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.ident(col);
            }
        }

        for (i, having) in query.havings.iter().enumerate() {
            ts.space();
            if i == 0 {
                ts.push(Token::Having);
            } else {
                ts.push(Token::And);
            }
            ts.space()
                .ident(&having.column)
                .space()
                .push(Token::Operator(having.operator.clone()))
                .space()
                .bind(having.value.clone());
        }

        if !query.orders.is_empty() {
            ts.space().push(Token::OrderBy).space();
            for (i, order) in query.orders.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.ident(&order.column).space().push(match order.direction {
                    SortDir::Asc => Token::Asc,
                    SortDir::Desc => Token::Desc,
                });
            }
        }

        if !(top && query.limit.is_some()) && (query.limit.is_some() || query.offset.is_some()) {
            let pagination = self.dialect.emit_limit_offset(query.limit, query.offset);
            if !pagination.is_empty() {
                ts.space().append(&pagination);
            }
        }

        Ok(ts)
    }

    /// Render the column list (`*` when empty), then any aggregates.
    fn select_list(&self, query: &Query, ts: &mut TokenStream) {
        if query.columns.is_empty() {
            ts.push(Token::Star);
        } else {
            for (i, item) in query.columns.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                if item.raw {
                    ts.push(Token::Raw(item.column.clone()));
                } else {
                    ts.ident(&item.column);
                }
            }
        }

        for agg in &query.aggregates {
            ts.comma()
                .space()
                .push(Token::FunctionName(agg.func.as_str()))
                .lparen()
                .ident(&agg.column)
                .rparen();
        }
    }

    // =========================================================================
    // INSERT / UPDATE / DELETE
    // =========================================================================

    pub fn compile_insert(&self, query: &Query) -> SqlResult<TokenStream> {
        if query.insert_rows.is_empty() {
            return Err(SqlError::EmptyInsert);
        }

        let mut ts = TokenStream::new();
        ts.push(Token::Insert).space().push(Token::Into).space();
        ts.push(self.table_token(query));

        ts.space().lparen();
        for (i, col) in query.insert_columns.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.ident(col);
        }
        ts.rparen();

        ts.space().push(Token::Values);
        for (row_idx, row) in query.insert_rows.iter().enumerate() {
            if row_idx > 0 {
                ts.comma();
            }
            ts.space().lparen();
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.bind(value.clone());
            }
            ts.rparen();
        }

        Ok(ts)
    }

    pub fn compile_update(&self, query: &Query) -> SqlResult<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Update).space();
        ts.push(self.table_token(query));
        ts.space().push(Token::Set).space();

        for (i, assign) in query.assignments.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.ident(&assign.column)
                .space()
                .push(Token::Operator("=".into()))
                .space();
            match assign.op {
                AssignOp::Set => {
                    ts.bind(assign.value.clone());
                }
                AssignOp::Increment => {
                    ts.ident(&assign.column)
                        .space()
                        .push(Token::Plus)
                        .space()
                        .bind(assign.value.clone());
                }
                AssignOp::Decrement => {
                    ts.ident(&assign.column)
                        .space()
                        .push(Token::Minus)
                        .space()
                        .bind(assign.value.clone());
                }
            }
        }

        let wheres = self.where_tokens(&query.wheres, true)?;
        if !wheres.is_empty() {
            ts.space().append(&wheres);
        }

        Ok(ts)
    }

    pub fn compile_delete(&self, query: &Query) -> SqlResult<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Delete).space().push(Token::From).space();
        ts.push(self.table_token(query));

        let wheres = self.where_tokens(&query.wheres, true)?;
        if !wheres.is_empty() {
            ts.space().append(&wheres);
        }

        Ok(ts)
    }

    // =========================================================================
    // WHERE rendering
    // =========================================================================

    /// Render WHERE clauses in add-order. The first clause takes the leading
    /// `WHERE` keyword (or nothing, for nested groups); the rest chain with
    /// AND/OR per their link.
    fn where_tokens(&self, wheres: &[WhereClause], leading: bool) -> SqlResult<TokenStream> {
        let mut ts = TokenStream::new();
        for (i, clause) in wheres.iter().enumerate() {
            if i == 0 {
                if leading {
                    ts.push(Token::Where).space();
                }
            } else {
                ts.space()
                    .push(match clause.link {
                        Link::And => Token::And,
                        Link::Or => Token::Or,
                    })
                    .space();
            }
            self.where_clause(clause, &mut ts)?;
        }
        Ok(ts)
    }

    /// Render one clause. Variant order mirrors the form-selection
    /// precedence: raw, between, null checks, exists, lists/sub-queries,
    /// then plain comparison.
    fn where_clause(&self, clause: &WhereClause, ts: &mut TokenStream) -> SqlResult<()> {
        match &clause.value {
            WhereValue::Raw { sql, bindings } => {
                ts.push(Token::RawBound {
                    sql: sql.clone(),
                    bindings: bindings.clone(),
                });
            }

            WhereValue::Between { low, high } => {
                ts.ident(&clause.column).space();
                if clause.negated {
                    ts.push(Token::Not).space();
                }
                ts.push(Token::Between)
                    .space()
                    .bind(low.clone())
                    .space()
                    .push(Token::And)
                    .space()
                    .bind(high.clone());
            }

            WhereValue::Null => {
                ts.ident(&clause.column).space().push(Token::IsNull);
            }

            WhereValue::NotNull => {
                ts.ident(&clause.column).space().push(Token::IsNotNull);
            }

            WhereValue::Exists(sub) => {
                ts.push(Token::Exists).space().lparen();
                ts.append(&self.compile_select(sub)?);
                ts.rparen();
            }

            WhereValue::List(values) => {
                ts.ident(&clause.column).space();
                if clause.negated {
                    ts.push(Token::Not).space();
                }
                ts.push(Token::In).space().lparen();
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.bind(value.clone());
                }
                ts.rparen();
            }

            WhereValue::InSubquery(sub) => {
                ts.ident(&clause.column).space();
                if clause.negated {
                    ts.push(Token::Not).space();
                }
                ts.push(Token::In).space().lparen();
                ts.append(&self.compile_select(sub)?);
                ts.rparen();
            }

            WhereValue::Subquery(sub) => {
                ts.ident(&clause.column)
                    .space()
                    .push(Token::Operator(clause.operator.clone()))
                    .space()
                    .lparen();
                ts.append(&self.compile_select(sub)?);
                ts.rparen();
            }

            WhereValue::Group(sub) => {
                ts.lparen();
                ts.append(&self.where_tokens(&sub.wheres, false)?);
                ts.rparen();
            }

            WhereValue::Column(other) => {
                ts.ident(&clause.column)
                    .space()
                    .push(Token::Operator(clause.operator.clone()))
                    .space()
                    .ident(other);
            }

            WhereValue::Value(value) => {
                // NULL comparisons select the IS NULL / IS NOT NULL forms
                // by value shape, not by a separate clause type.
                if value.is_null() {
                    ts.ident(&clause.column).space();
                    if matches!(clause.operator.as_str(), "!=" | "<>") {
                        ts.push(Token::IsNotNull);
                    } else {
                        ts.push(Token::IsNull);
                    }
                } else {
                    ts.ident(&clause.column)
                        .space()
                        .push(Token::Operator(clause.operator.clone()))
                        .space()
                        .bind(value.clone());
                }
            }
        }
        Ok(())
    }

    fn table_token(&self, query: &Query) -> Token {
        Token::QualifiedIdent {
            schema: query.schema.clone(),
            name: query.table.clone(),
        }
    }
}
