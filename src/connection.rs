//! Connection layer - the narrow execution contract the core compiles for.
//!
//! The compiler itself never touches a database; it hands `(sql, bindings)`
//! to a [`Connection`]. Rows come back as plain column-name-to-value maps,
//! never inspected beyond that shape. SQLite (bundled) is the live driver;
//! the other dialects compile SQL but have no execution backend here.

use std::collections::BTreeMap;

use rusqlite::params_from_iter;

use crate::error::{SqlError, SqlResult};
use crate::sql::dialect::{Dialect, SqlDialect};
use crate::sql::grammar::Grammar;
use crate::sql::value::Value;

/// How many rows the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    All,
}

/// One result row: column name to value.
pub type Row = BTreeMap<String, Value>;

/// Synchronous execution contract.
pub trait Connection {
    fn dialect(&self) -> Dialect;

    /// The grammar matching this connection's dialect.
    fn grammar(&self) -> Grammar {
        Grammar::new(self.dialect())
    }

    /// Run a row-returning statement.
    fn query(&self, sql: &str, bindings: &[Value], arity: Arity) -> SqlResult<Vec<Row>>;

    /// Run a statement, returning the affected row count.
    fn execute(&self, sql: &str, bindings: &[Value]) -> SqlResult<usize>;

    fn begin(&self) -> SqlResult<()>;
    fn commit(&self) -> SqlResult<()>;
    fn rollback(&self) -> SqlResult<()>;

    // Introspection, used by the migration runner and shell tooling.
    fn has_table(&self, name: &str) -> SqlResult<bool>;
    fn get_columns(&self, table: &str) -> SqlResult<Vec<String>>;
}

/// Live SQLite connection over the bundled driver.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    pub fn open(path: &str) -> SqlResult<Self> {
        Ok(Self {
            conn: rusqlite::Connection::open(path)?,
        })
    }

    pub fn open_in_memory() -> SqlResult<Self> {
        Ok(Self {
            conn: rusqlite::Connection::open_in_memory()?,
        })
    }
}

impl Connection for SqliteConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn query(&self, sql: &str, bindings: &[Value], arity: Arity) -> SqlResult<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = stmt.query(params_from_iter(bindings.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = Row::new();
            for (i, name) in columns.iter().enumerate() {
                map.insert(name.clone(), Value::from(row.get_ref(i)?));
            }
            out.push(map);
            if arity == Arity::One {
                break;
            }
        }
        Ok(out)
    }

    fn execute(&self, sql: &str, bindings: &[Value]) -> SqlResult<usize> {
        Ok(self.conn.execute(sql, params_from_iter(bindings.iter()))?)
    }

    fn begin(&self) -> SqlResult<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&self) -> SqlResult<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&self) -> SqlResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn has_table(&self, name: &str) -> SqlResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn get_columns(&self, table: &str) -> SqlResult<Vec<String>> {
        // PRAGMA cannot bind the table name
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info(\"{}\")", table.replace('"', "\"\"")))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

/// Driver-key-based connection factory.
pub struct ConnectionFactory;

impl ConnectionFactory {
    /// Open a live connection for a driver key.
    ///
    /// Every key [`Dialect::from_key`] accepts compiles SQL; only SQLite has
    /// an execution backend, so other keys fail with
    /// [`SqlError::UnsupportedOperation`].
    pub fn make(driver: &str, database: &str) -> SqlResult<Box<dyn Connection>> {
        match Dialect::from_key(driver)? {
            Dialect::Sqlite => {
                let conn = if database == ":memory:" {
                    SqliteConnection::open_in_memory()?
                } else {
                    SqliteConnection::open(database)?
                };
                Ok(Box::new(conn))
            }
            other => Err(SqlError::UnsupportedOperation {
                operation: "live connection".into(),
                dialect: other.name(),
            }),
        }
    }
}
