//! Record layer - table handles over a live connection.
//!
//! A [`Table`] pairs a long-lived [`Query`] with a connection, compiles
//! through the connection's grammar in qmark mode, and executes. Rows stay
//! plain maps; relation lookups (`has_many` / `belongs_to`) resolve by name
//! through an explicit registry, never by reflection.

use inflector::Inflector;

use crate::connection::{Arity, Connection, Row};
use crate::error::{SqlError, SqlResult};
use crate::sql::query::Query;
use crate::sql::value::Value;

/// Conventional table name for a model type name: `BlogPost` -> `blog_posts`.
pub fn table_name_for(model: &str) -> String {
    model.to_snake_case().to_plural()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    HasMany,
    BelongsTo,
}

/// One registered relation.
#[derive(Debug, Clone)]
pub struct Relation {
    pub name: String,
    pub kind: RelationKind,
    pub foreign_table: String,
    /// Column on this table whose value keys the lookup.
    pub local_key: String,
    /// Column on the foreign table matched against the local key.
    pub foreign_key: String,
}

/// A table handle bound to one connection.
pub struct Table<'a> {
    conn: &'a dyn Connection,
    query: Query,
    relations: Vec<Relation>,
}

impl<'a> Table<'a> {
    pub fn new(conn: &'a dyn Connection, table: &str) -> Self {
        Self {
            conn,
            query: Query::table(table),
            relations: Vec::new(),
        }
    }

    /// Bind by model type name using the pluralized snake_case convention.
    pub fn for_model(conn: &'a dyn Connection, model: &str) -> Self {
        Self::new(conn, &table_name_for(model))
    }

    /// The underlying query accumulator, for fluent clause building.
    pub fn query(&mut self) -> &mut Query {
        &mut self.query
    }

    // =========================================================================
    // Execution shortcuts
    // =========================================================================

    /// Fetch all matching rows.
    pub fn get(&mut self) -> SqlResult<Vec<Row>> {
        let (sql, bindings) = self.query.to_qmark(&self.conn.grammar())?;
        self.conn.query(&sql, &bindings, Arity::All)
    }

    /// Fetch the first matching row, if any.
    pub fn first(&mut self) -> SqlResult<Option<Row>> {
        self.query.limit(1);
        let (sql, bindings) = self.query.to_qmark(&self.conn.grammar())?;
        let mut rows = self.conn.query(&sql, &bindings, Arity::One)?;
        Ok(rows.pop())
    }

    /// Insert one row of (column, value) pairs.
    pub fn insert(&mut self, row: Vec<(&str, Value)>) -> SqlResult<usize> {
        self.query.insert(row);
        self.execute()
    }

    /// Update matching rows with (column, value) assignments; filters added
    /// through [`Table::query`] beforehand still apply.
    pub fn update(&mut self, assignments: Vec<(&str, Value)>) -> SqlResult<usize> {
        for (column, value) in assignments {
            self.query.set(column, value);
        }
        self.execute()
    }

    /// Delete matching rows.
    pub fn delete(&mut self) -> SqlResult<usize> {
        self.query.delete();
        self.execute()
    }

    /// Run the accumulated query as a non-returning statement
    /// (INSERT/UPDATE/DELETE built through [`Table::query`]).
    pub fn execute(&mut self) -> SqlResult<usize> {
        let (sql, bindings) = self.query.to_qmark(&self.conn.grammar())?;
        self.conn.execute(&sql, &bindings)
    }

    // =========================================================================
    // Relations
    // =========================================================================

    pub fn has_many(&mut self, name: &str, foreign_table: &str, foreign_key: &str) -> &mut Self {
        self.relations.push(Relation {
            name: name.into(),
            kind: RelationKind::HasMany,
            foreign_table: foreign_table.into(),
            local_key: "id".into(),
            foreign_key: foreign_key.into(),
        });
        self
    }

    pub fn belongs_to(&mut self, name: &str, foreign_table: &str, local_key: &str) -> &mut Self {
        self.relations.push(Relation {
            name: name.into(),
            kind: RelationKind::BelongsTo,
            foreign_table: foreign_table.into(),
            local_key: local_key.into(),
            foreign_key: "id".into(),
        });
        self
    }

    /// Fetch rows related to `row` through the named relation.
    ///
    /// Unregistered names fail with [`SqlError::UnknownRelation`].
    pub fn related(&self, name: &str, row: &Row) -> SqlResult<Vec<Row>> {
        let relation = self
            .relations
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| SqlError::UnknownRelation(name.to_string()))?;

        let key = row.get(&relation.local_key).cloned().unwrap_or(Value::Null);
        let mut query = Query::table(&relation.foreign_table);
        query.where_eq(&relation.foreign_key, key);

        let (sql, bindings) = query.to_qmark(&self.conn.grammar())?;
        let arity = match relation.kind {
            RelationKind::HasMany => Arity::All,
            RelationKind::BelongsTo => Arity::One,
        };
        self.conn.query(&sql, &bindings, arity)
    }
}
