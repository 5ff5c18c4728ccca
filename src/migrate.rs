//! Migration runner.
//!
//! Migrations are named up/down pairs over a [`Schema`] helper. Applied
//! state persists in the `migrations` table (`migration_id` primary key,
//! `migration` unique name, `batch` grouping integer); that shape is a
//! stable convention, other tooling reads it.

use std::fmt;

use crate::connection::{Arity, Connection};
use crate::error::{SqlError, SqlResult};
use crate::sql::dialect::SqlDialect;
use crate::sql::query::Query;
use crate::sql::schema::Blueprint;
use crate::sql::value::Value;

const STATE_TABLE: &str = "migrations";

/// Blueprint executor bound to one connection.
pub struct Schema<'a> {
    conn: &'a dyn Connection,
}

impl<'a> Schema<'a> {
    pub fn new(conn: &'a dyn Connection) -> Self {
        Self { conn }
    }

    /// Build and execute a CREATE TABLE blueprint.
    pub fn create(&self, table: &str, build: impl FnOnce(&mut Blueprint)) -> SqlResult<()> {
        let mut bp = Blueprint::create(table);
        build(&mut bp);
        self.run(&bp)
    }

    /// Build and execute an ALTER TABLE blueprint.
    pub fn alter(&self, table: &str, build: impl FnOnce(&mut Blueprint)) -> SqlResult<()> {
        let mut bp = Blueprint::alter(table);
        build(&mut bp);
        self.run(&bp)
    }

    pub fn drop(&self, table: &str) -> SqlResult<()> {
        let dialect = self.conn.grammar().dialect();
        let sql = format!("DROP TABLE {}", dialect.quote_identifier(table));
        self.conn.execute(&sql, &[])?;
        Ok(())
    }

    pub fn has_table(&self, table: &str) -> SqlResult<bool> {
        self.conn.has_table(table)
    }

    fn run(&self, bp: &Blueprint) -> SqlResult<()> {
        for statement in bp.to_sql(self.conn.grammar().dialect())? {
            self.conn.execute(&statement, &[])?;
        }
        Ok(())
    }
}

/// One reversible schema change.
pub trait Migration {
    /// Stable unique identifier, persisted in the state table.
    fn name(&self) -> &str;
    fn up(&self, schema: &Schema) -> SqlResult<()>;
    fn down(&self, schema: &Schema) -> SqlResult<()>;
}

/// Outcome of a run or rollback.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub batch: i64,
    pub ran: Vec<String>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ran.is_empty() {
            write!(f, "nothing to migrate")
        } else {
            write!(f, "batch {}: {}", self.batch, self.ran.join(", "))
        }
    }
}

/// Runs registered migrations against one connection.
pub struct Migrator<'a> {
    conn: &'a dyn Connection,
    migrations: Vec<Box<dyn Migration>>,
}

impl<'a> Migrator<'a> {
    pub fn new(conn: &'a dyn Connection) -> Self {
        Self {
            conn,
            migrations: Vec::new(),
        }
    }

    /// Register a migration. Registration order is run order.
    pub fn register(&mut self, migration: Box<dyn Migration>) -> &mut Self {
        self.migrations.push(migration);
        self
    }

    /// Apply every registered migration not yet recorded, as one new batch.
    pub fn run(&self) -> SqlResult<RunReport> {
        self.ensure_state_table()?;
        let applied = self.applied_names()?;
        let batch = self.current_batch()? + 1;

        let schema = Schema::new(self.conn);
        let mut ran = Vec::new();
        for migration in &self.migrations {
            let name = migration.name().to_string();
            if applied.contains(&name) {
                continue;
            }

            self.conn.begin()?;
            if let Err(source) = migration.up(&schema) {
                self.conn.rollback()?;
                return Err(SqlError::MigrationFailed {
                    name,
                    source: Box::new(source),
                });
            }
            self.record_applied(&name, batch)?;
            self.conn.commit()?;
            ran.push(name);
        }

        let batch = if ran.is_empty() { batch - 1 } else { batch };
        Ok(RunReport { batch, ran })
    }

    /// Revert the most recent batch, newest migration first.
    pub fn rollback(&self) -> SqlResult<RunReport> {
        self.ensure_state_table()?;
        let batch = self.current_batch()?;
        if batch == 0 {
            return Ok(RunReport {
                batch: 0,
                ran: Vec::new(),
            });
        }

        let mut query = Query::table(STATE_TABLE);
        query
            .select(&["migration"])
            .where_eq("batch", batch)
            .order_by_desc("migration_id");
        let (sql, bindings) = query.to_qmark(&self.conn.grammar())?;
        let rows = self.conn.query(&sql, &bindings, Arity::All)?;

        let schema = Schema::new(self.conn);
        let mut ran = Vec::new();
        for row in rows {
            let name = match row.get("migration") {
                Some(Value::Str(s)) => s.clone(),
                _ => continue,
            };
            let migration = self
                .migrations
                .iter()
                .find(|m| m.name() == name)
                .ok_or_else(|| SqlError::MigrationNotFound(name.clone()))?;

            self.conn.begin()?;
            if let Err(source) = migration.down(&schema) {
                self.conn.rollback()?;
                return Err(SqlError::MigrationFailed {
                    name,
                    source: Box::new(source),
                });
            }
            self.remove_applied(&name)?;
            self.conn.commit()?;
            ran.push(name);
        }

        Ok(RunReport { batch, ran })
    }

    /// Each registered migration with its applied batch, if any.
    pub fn status(&self) -> SqlResult<Vec<(String, Option<i64>)>> {
        self.ensure_state_table()?;
        let mut query = Query::table(STATE_TABLE);
        query.select(&["migration", "batch"]);
        let (sql, bindings) = query.to_qmark(&self.conn.grammar())?;
        let rows = self.conn.query(&sql, &bindings, Arity::All)?;

        let mut out = Vec::new();
        for migration in &self.migrations {
            let batch = rows
                .iter()
                .find(|r| r.get("migration") == Some(&Value::Str(migration.name().into())))
                .and_then(|r| match r.get("batch") {
                    Some(Value::Int(b)) => Some(*b),
                    _ => None,
                });
            out.push((migration.name().to_string(), batch));
        }
        Ok(out)
    }

    fn ensure_state_table(&self) -> SqlResult<()> {
        if self.conn.has_table(STATE_TABLE)? {
            return Ok(());
        }
        Schema::new(self.conn).create(STATE_TABLE, |t| {
            t.increments("migration_id");
            t.string("migration", 255);
            t.integer("batch");
            t.unique(&["migration"]);
        })
    }

    fn applied_names(&self) -> SqlResult<Vec<String>> {
        let mut query = Query::table(STATE_TABLE);
        query.select(&["migration"]);
        let (sql, bindings) = query.to_qmark(&self.conn.grammar())?;
        let rows = self.conn.query(&sql, &bindings, Arity::All)?;
        Ok(rows
            .into_iter()
            .filter_map(|r| match r.get("migration") {
                Some(Value::Str(s)) => Some(s.clone()),
                _ => None,
            })
            .collect())
    }

    fn current_batch(&self) -> SqlResult<i64> {
        let mut query = Query::table(STATE_TABLE);
        query.select_raw("MAX(batch) AS latest_batch");
        let (sql, bindings) = query.to_qmark(&self.conn.grammar())?;
        let rows = self.conn.query(&sql, &bindings, Arity::One)?;
        Ok(rows
            .first()
            .and_then(|r| r.get("latest_batch"))
            .and_then(|v| match v {
                Value::Int(b) => Some(*b),
                _ => None,
            })
            .unwrap_or(0))
    }

    fn record_applied(&self, name: &str, batch: i64) -> SqlResult<()> {
        let mut query = Query::table(STATE_TABLE);
        query.insert(vec![("migration", name.into()), ("batch", batch.into())]);
        let (sql, bindings) = query.to_qmark(&self.conn.grammar())?;
        self.conn.execute(&sql, &bindings)?;
        Ok(())
    }

    fn remove_applied(&self, name: &str) -> SqlResult<()> {
        let mut query = Query::table(STATE_TABLE);
        query.where_eq("migration", name).delete();
        let (sql, bindings) = query.to_qmark(&self.conn.grammar())?;
        self.conn.execute(&sql, &bindings)?;
        Ok(())
    }
}
